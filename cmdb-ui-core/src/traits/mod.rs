//! Collaborator trait definitions

mod key_value_store;
mod notifier;

pub use key_value_store::{InMemoryKeyValueStore, KeyValueStore};
pub use notifier::{LogNotifier, Notifier};
