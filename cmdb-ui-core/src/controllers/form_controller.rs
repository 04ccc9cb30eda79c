//! Form state and submission lifecycle

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::controllers::request_runner::{failure_message, ExecuteOptions, RequestRunner};
use crate::error::{CoreError, CoreResult};
use crate::traits::Notifier;
use crate::types::{FieldErrors, Severity};

/// Observable state of a [`FormController`]
#[derive(Debug, Clone)]
pub struct FormState<F> {
    /// Current field values
    pub form: F,
    /// Field -> message
    pub errors: FieldErrors,
    /// True while a submission is in flight
    pub is_submitting: bool,
    initial: F,
}

impl<F> FormState<F> {
    /// True iff there are no field errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error message for one field
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Value the form was created or last loaded with
    pub fn initial(&self) -> &F {
        &self.initial
    }
}

impl<F: PartialEq> FormState<F> {
    /// Whether the values differ from the initial ones
    pub fn is_dirty(&self) -> bool {
        self.form != self.initial
    }
}

/// Per-call options for [`FormController::submit`]
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    pub success_message: Option<String>,
    pub error_context: Option<String>,
}

impl SubmitOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn success(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.error_context = Some(context.into());
        self
    }
}

/// How a submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Handler succeeded; errors cleared
    Succeeded,
    /// Client-side or server-side validation failed; errors populated
    Invalid,
    /// Handler failed for another reason; reported through the notifier
    Failed,
    /// Another submission was in flight; nothing was done
    Busy,
}

/// Client-side validator: returns the errors for the given values
pub type Validator<F> = Arc<dyn Fn(&F) -> FieldErrors + Send + Sync>;

struct FormInner<F> {
    state: watch::Sender<FormState<F>>,
    runner: RequestRunner<()>,
    notifier: Arc<dyn Notifier>,
    validator: Option<Validator<F>>,
}

/// Holds form values, field errors and the submission lifecycle
///
/// A second `submit` while one is in flight is rejected with
/// [`SubmitOutcome::Busy`]; the check and the flag update happen in one
/// atomic state transition.
pub struct FormController<F> {
    inner: Arc<FormInner<F>>,
}

impl<F> Clone for FormController<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: Clone + Send + Sync + 'static> FormController<F> {
    /// Create a form initialized with `initial`
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>, initial: F) -> Self {
        Self::build(notifier, initial, None)
    }

    /// Attach a client-side validator
    ///
    /// Call before the controller is cloned or subscribed to: the state is
    /// carried over, existing subscribers are not.
    #[must_use]
    pub fn with_validator(self, validator: impl Fn(&F) -> FieldErrors + Send + Sync + 'static) -> Self {
        let state = self.inner.state.borrow().clone();
        let (sender, _) = watch::channel(state);
        Self {
            inner: Arc::new(FormInner {
                state: sender,
                runner: RequestRunner::new(Arc::clone(&self.inner.notifier)),
                notifier: Arc::clone(&self.inner.notifier),
                validator: Some(Arc::new(validator)),
            }),
        }
    }

    fn build(notifier: Arc<dyn Notifier>, initial: F, validator: Option<Validator<F>>) -> Self {
        let (state, _) = watch::channel(FormState {
            form: initial.clone(),
            errors: FieldErrors::new(),
            is_submitting: false,
            initial,
        });
        Self {
            inner: Arc::new(FormInner {
                state,
                runner: RequestRunner::new(Arc::clone(&notifier)),
                notifier,
                validator,
            }),
        }
    }

    /// Submit the current values through `handler`
    ///
    /// A [`CoreError::Validation`] failure is mapped into the field errors and
    /// is not reported through the notifier; any other failure is.
    pub async fn submit<H, Fut>(&self, handler: H, options: SubmitOptions) -> SubmitOutcome
    where
        H: FnOnce(F) -> Fut,
        Fut: Future<Output = CoreResult<()>>,
    {
        let mut acquired = false;
        self.inner.state.send_if_modified(|s| {
            if s.is_submitting {
                return false;
            }
            s.is_submitting = true;
            acquired = true;
            true
        });
        if !acquired {
            log::debug!("Submit ignored: another submission is in flight");
            return SubmitOutcome::Busy;
        }
        let _submitting = Submitting {
            state: &self.inner.state,
        };

        if let Some(ref validator) = self.inner.validator {
            let errors = validator(&self.inner.state.borrow().form);
            if !errors.is_empty() {
                log::debug!("Submit blocked by client validation: {} field(s)", errors.len());
                self.set_errors(errors);
                return SubmitOutcome::Invalid;
            }
        }

        self.clear_errors();
        let form = self.inner.state.borrow().form.clone();

        let result = self
            .inner
            .runner
            .run(
                move || handler(form),
                ExecuteOptions {
                    success_message: options.success_message,
                    error_context: options.error_context.clone(),
                    show_toast: false,
                },
            )
            .await;

        match result {
            Ok(()) => {
                self.clear_errors();
                SubmitOutcome::Succeeded
            }
            Err(CoreError::Validation(errors)) => {
                self.set_errors(errors);
                SubmitOutcome::Invalid
            }
            Err(err) => {
                let message = failure_message(options.error_context.as_deref(), &err);
                self.inner.notifier.display(Severity::Error, &message);
                SubmitOutcome::Failed
            }
        }
    }

    /// Run the client-side validator (if any) and store its result
    ///
    /// Returns the resulting `is_valid`.
    pub fn validate(&self) -> bool {
        let Some(ref validator) = self.inner.validator else {
            return self.is_valid();
        };
        let errors = validator(&self.inner.state.borrow().form);
        let valid = errors.is_empty();
        self.set_errors(errors);
        valid
    }

    /// Mutate the values
    pub fn update(&self, edit: impl FnOnce(&mut F)) {
        self.inner.state.send_modify(|s| edit(&mut s.form));
    }

    /// Mutate the values and drop the error of the edited field
    pub fn set_field(&self, field: &str, edit: impl FnOnce(&mut F)) {
        self.inner.state.send_modify(|s| {
            edit(&mut s.form);
            s.errors.remove(field);
        });
    }

    pub fn set_errors(&self, errors: FieldErrors) {
        self.inner.state.send_modify(|s| s.errors = errors);
    }

    pub fn set_field_error(&self, field: impl Into<String>, message: impl Into<String>) {
        let (field, message) = (field.into(), message.into());
        self.inner.state.send_modify(|s| {
            s.errors.insert(field, message);
        });
    }

    pub fn clear_field_error(&self, field: &str) {
        self.inner.state.send_if_modified(|s| s.errors.remove(field).is_some());
    }

    pub fn clear_errors(&self) {
        self.inner.state.send_if_modified(|s| {
            if s.errors.is_empty() {
                return false;
            }
            s.errors.clear();
            true
        });
    }

    /// Restore the initial values and clear errors
    pub fn reset(&self) {
        self.inner.state.send_modify(|s| {
            s.form = s.initial.clone();
            s.errors.clear();
        });
    }

    /// Replace both the current and the initial values (e.g. opening an edit dialog)
    pub fn load(&self, data: F) {
        self.inner.state.send_modify(|s| {
            s.form = data.clone();
            s.initial = data;
            s.errors.clear();
        });
    }

    /// Snapshot of the current state
    pub fn state(&self) -> FormState<F> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState<F>> {
        self.inner.state.subscribe()
    }

    pub fn form(&self) -> F {
        self.inner.state.borrow().form.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.inner.state.borrow().errors.clone()
    }

    pub fn is_valid(&self) -> bool {
        self.inner.state.borrow().is_valid()
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.state.borrow().is_submitting
    }
}

/// Lowers `is_submitting` when the submission ends or is dropped.
struct Submitting<'a, F> {
    state: &'a watch::Sender<FormState<F>>,
}

impl<F> Drop for Submitting<'_, F> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.is_submitting = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{field_errors, RecordingNotifier};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct AssetForm {
        name: String,
        site: String,
    }

    fn form() -> (FormController<AssetForm>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (
            FormController::new(notifier.clone(), AssetForm::default()),
            notifier,
        )
    }

    #[tokio::test]
    async fn server_validation_errors_are_mapped_inline() {
        let (form, notifier) = form();

        let outcome = form
            .submit(
                |_| async { Err(CoreError::Validation(field_errors(&[("name", "required")]))) },
                SubmitOptions::new().success("Saved"),
            )
            .await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        let state = form.state();
        assert_eq!(state.error("name"), Some("required"));
        assert!(!state.is_valid());
        assert!(!state.is_submitting);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn success_clears_errors_and_notifies() {
        let (form, notifier) = form();
        form.set_field_error("name", "required");
        form.update(|f| f.name = "PLC-01".to_string());

        let outcome = form
            .submit(
                |values| async move {
                    assert_eq!(values.name, "PLC-01");
                    Ok(())
                },
                SubmitOptions::new().success("Asset saved"),
            )
            .await;

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert!(form.is_valid());
        assert_eq!(
            notifier.last(),
            Some((Severity::Success, "Asset saved".to_string()))
        );
    }

    #[tokio::test]
    async fn transport_failure_is_reported_and_form_stays_editable() {
        let (form, notifier) = form();

        let outcome = form
            .submit(
                |_| async { Err(CoreError::Network("connection refused".to_string())) },
                SubmitOptions::new().context("Failed to save asset"),
            )
            .await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(form.is_valid());
        assert!(!form.is_submitting());
        assert_eq!(
            notifier.last(),
            Some((
                Severity::Error,
                "Failed to save asset: Network error: connection refused".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn concurrent_submit_is_rejected() {
        let (form, _) = form();
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel::<()>();

        let counter = calls.clone();
        let mut first = Box::pin(form.submit(
            move |_| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                rx.await.map_err(|_| CoreError::Busy)
            },
            SubmitOptions::new(),
        ));
        assert!(futures::poll!(&mut first).is_pending());
        assert!(form.is_submitting());

        let counter = calls.clone();
        let second = form
            .submit(
                move |_| async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                SubmitOptions::new(),
            )
            .await;
        assert_eq!(second, SubmitOutcome::Busy);

        tx.send(()).unwrap();
        assert_eq!(first.await, SubmitOutcome::Succeeded);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn client_validator_blocks_handler() {
        let notifier = Arc::new(RecordingNotifier::new());
        let form = FormController::new(notifier, AssetForm::default()).with_validator(|f| {
            let mut errors = FieldErrors::new();
            if f.name.trim().is_empty() {
                errors.insert("name".to_string(), "required".to_string());
            }
            errors
        });
        let called = Arc::new(AtomicUsize::new(0));

        let counter = called.clone();
        let outcome = form
            .submit(
                move |_| async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                SubmitOptions::new(),
            )
            .await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(called.load(Ordering::SeqCst), 0);
        assert_eq!(form.state().error("name"), Some("required"));
        assert!(!form.is_submitting());

        form.set_field("name", |f| f.name = "HMI-2".to_string());
        assert!(form.is_valid());
        assert!(form.validate());
    }

    #[tokio::test]
    async fn load_and_reset_track_dirtiness() {
        let (form, _) = form();
        let loaded = AssetForm {
            name: "Switch A".to_string(),
            site: "Plant 1".to_string(),
        };
        form.load(loaded.clone());
        assert!(!form.state().is_dirty());

        form.update(|f| f.site = "Plant 2".to_string());
        assert!(form.state().is_dirty());

        form.set_field_error("site", "unknown site");
        form.reset();
        let state = form.state();
        assert_eq!(state.form, loaded);
        assert!(state.is_valid());
        assert!(!state.is_dirty());
    }
}
