//! Confirmation step in front of destructive actions

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::controllers::request_runner::{ExecuteOptions, RequestRunner};
use crate::error::{CoreError, CoreResult};
use crate::traits::Notifier;

/// Staged action; receives the confirmed targets
pub type ConfirmedAction<T> = Box<dyn FnOnce(Vec<T>) -> BoxFuture<'static, CoreResult<()>> + Send>;

/// What the confirmation prompt shows
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmPrompt<T> {
    /// One element for a single delete, several for a bulk action
    pub targets: Vec<T>,
    /// Item label (single) or action name (bulk)
    pub label: String,
    /// Question shown to the user
    pub message: String,
    pub is_bulk: bool,
    success_message: String,
    error_context: String,
}

struct Staged<T> {
    prompt: Option<ConfirmPrompt<T>>,
    action: Option<ConfirmedAction<T>>,
    /// Raised when the action is taken, lowered together with `prompt`
    executing: bool,
}

struct GateInner<T> {
    staged: Mutex<Staged<T>>,
    runner: RequestRunner<()>,
}

/// Wraps single or bulk destructive actions behind a confirmation
///
/// Staging while an action is executing fails with [`CoreError::Busy`];
/// staging while a prompt is waiting replaces it.
pub struct ConfirmationGate<T> {
    inner: Arc<GateInner<T>>,
}

impl<T> Clone for ConfirmationGate<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> ConfirmationGate<T> {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner: Arc::new(GateInner {
                staged: Mutex::new(Staged {
                    prompt: None,
                    action: None,
                    executing: false,
                }),
                runner: RequestRunner::new(notifier),
            }),
        }
    }

    /// Stage deletion of a single item
    pub fn confirm_delete<F, Fut>(
        &self,
        item: T,
        label: impl Into<String>,
        action: F,
    ) -> CoreResult<()>
    where
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = CoreResult<()>> + Send + 'static,
    {
        let label = label.into();
        let prompt = ConfirmPrompt {
            targets: vec![item],
            message: format!("Are you sure you want to delete \"{label}\"?"),
            success_message: format!("\"{label}\" deleted"),
            error_context: format!("Failed to delete \"{label}\""),
            label,
            is_bulk: false,
        };
        let action: ConfirmedAction<T> = Box::new(move |targets: Vec<T>| {
            async move {
                match targets.into_iter().next() {
                    Some(item) => action(item).await,
                    None => Ok(()),
                }
            }
            .boxed()
        });
        self.stage(prompt, action)
    }

    /// Stage `action_name` on several items at once
    pub fn confirm_bulk_action<F, Fut>(
        &self,
        items: Vec<T>,
        action_name: impl Into<String>,
        action: F,
    ) -> CoreResult<()>
    where
        F: FnOnce(Vec<T>) -> Fut + Send + 'static,
        Fut: Future<Output = CoreResult<()>> + Send + 'static,
    {
        let action_name = action_name.into();
        if items.is_empty() {
            return Err(CoreError::InvalidTransition(format!(
                "nothing selected to {action_name}"
            )));
        }
        let count = items.len();
        let noun = if count == 1 { "item" } else { "items" };
        let prompt = ConfirmPrompt {
            targets: items,
            message: format!("Are you sure you want to {action_name} {count} selected {noun}?"),
            success_message: format!("{action_name}: {count} {noun} done"),
            error_context: format!("Failed to {action_name} {count} {noun}"),
            label: action_name,
            is_bulk: true,
        };
        let action: ConfirmedAction<T> = Box::new(move |targets: Vec<T>| action(targets).boxed());
        self.stage(prompt, action)
    }

    fn stage(&self, prompt: ConfirmPrompt<T>, action: ConfirmedAction<T>) -> CoreResult<()> {
        let mut staged = self.staged();
        if staged.executing {
            return Err(CoreError::Busy);
        }
        if staged.prompt.is_some() {
            log::debug!("Replacing pending confirmation '{}'", prompt.label);
        }
        staged.prompt = Some(prompt);
        staged.action = Some(action);
        Ok(())
    }

    /// Run the staged action once, then clear the staged state
    ///
    /// Returns `true` when the action succeeded; `false` when it failed or
    /// nothing was staged.
    pub async fn execute_confirmed_action(&self) -> bool {
        let (action, prompt) = {
            let mut staged = self.staged();
            let Some(action) = staged.action.take() else {
                return false;
            };
            let Some(prompt) = staged.prompt.clone() else {
                return false;
            };
            staged.executing = true;
            (action, prompt)
        };
        let _clear = ClearOnExit { gate: self };

        let targets = prompt.targets;
        let options = ExecuteOptions::new()
            .success(prompt.success_message)
            .context(prompt.error_context);

        self.inner
            .runner
            .run(move || action(targets), options)
            .await
            .is_ok()
    }

    /// Discard the staged action without running it
    pub fn close_confirm_dialog(&self) {
        let mut staged = self.staged();
        staged.action = None;
        if !staged.executing {
            staged.prompt = None;
        }
    }

    /// Prompt currently shown, if any
    pub fn prompt(&self) -> Option<ConfirmPrompt<T>> {
        self.staged().prompt.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.staged().prompt.is_some()
    }

    /// True from taking the action until the prompt is cleared
    ///
    /// Outlives the runner's `loading` flag by the time it takes to clear
    /// the prompt, so nothing can be staged in between.
    pub fn is_executing(&self) -> bool {
        self.staged().executing
    }

    /// Targets of the staged action (empty when nothing is staged)
    pub fn targets(&self) -> Vec<T> {
        self.staged()
            .prompt
            .as_ref()
            .map(|p| p.targets.clone())
            .unwrap_or_default()
    }

    fn staged(&self) -> MutexGuard<'_, Staged<T>> {
        self.inner
            .staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the prompt once execution ends, even if the future is dropped.
struct ClearOnExit<'a, T: Clone + Send + 'static> {
    gate: &'a ConfirmationGate<T>,
}

impl<T: Clone + Send + 'static> Drop for ClearOnExit<'_, T> {
    fn drop(&mut self) {
        let mut staged = self.gate.staged();
        staged.prompt = None;
        staged.action = None;
        staged.executing = false;
    }
}
