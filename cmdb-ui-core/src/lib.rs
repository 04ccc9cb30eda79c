//! CMDB UI Core Library
//!
//! Front-end independent controllers for CRUD pages of the CMDB admin UI:
//! - async request execution with loading / error / data state ([`RequestRunner`])
//! - form values, field errors and submission ([`FormController`])
//! - filtering, search and sort with persistence ([`FilterEngine`])
//! - create / edit / view dialogs ([`DialogController`])
//! - confirmation of destructive actions ([`ConfirmationGate`])
//!
//! Notifications and persistence are injected through traits, so the same
//! controllers drive the terminal front-end and the tests.

pub mod context;
pub mod controllers;
pub mod error;
pub mod http;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use context::UiContext;
pub use controllers::{
    ConfirmationGate, DialogController, ExecuteOptions, FilterEngine, FormController,
    RequestRunner, SubmitOptions, SubmitOutcome,
};
pub use error::{CoreError, CoreResult, ErrorInfo};
pub use traits::{InMemoryKeyValueStore, KeyValueStore, LogNotifier, Notifier};
