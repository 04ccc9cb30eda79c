//! Reusable CRUD page controllers
//!
//! Each controller owns one concern of a CRUD page and reports user-facing
//! outcomes through the injected [`Notifier`](crate::traits::Notifier).

mod confirmation_gate;
mod dialog_controller;
mod filter_engine;
mod form_controller;
mod request_runner;

pub use confirmation_gate::{ConfirmPrompt, ConfirmationGate, ConfirmedAction};
pub use dialog_controller::{DialogController, DialogState};
pub use filter_engine::{resolve_path, value_as_text, FilterEngine};
pub use form_controller::{FormController, FormState, SubmitOptions, SubmitOutcome, Validator};
pub use request_runner::{ExecuteOptions, RequestRunner, RequestState};
