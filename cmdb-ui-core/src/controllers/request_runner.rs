//! Async request runner
//!
//! Wraps a caller-supplied asynchronous operation and keeps an observable
//! `loading / error / data` triple, reporting the outcome through the
//! injected [`Notifier`].

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{CoreError, CoreResult, ErrorInfo};
use crate::traits::Notifier;
use crate::types::Severity;

/// Observable state of a [`RequestRunner`]
#[derive(Debug, Clone)]
pub struct RequestState<T> {
    /// True while at least one invocation is in flight
    pub loading: bool,
    /// Failure of the most recent invocation
    pub error: Option<ErrorInfo>,
    /// Result of the most recent successful invocation
    pub data: Option<T>,
    in_flight: usize,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            data: None,
            in_flight: 0,
        }
    }
}

/// Per-call options
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Shown as a success notification when the operation succeeds
    pub success_message: Option<String>,
    /// Prefix of the error notification, e.g. "Failed to load assets"
    pub error_context: Option<String>,
    /// Emit an error notification on failure
    pub show_toast: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            success_message: None,
            error_context: None,
            show_toast: true,
        }
    }
}

impl ExecuteOptions {
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

    /// Do not emit an error notification
    #[must_use]
    pub fn silent(mut self) -> Self {
        self.show_toast = false;
        self
    }
}

/// Builds the user-facing text of an error notification.
pub(crate) fn failure_message(context: Option<&str>, err: &CoreError) -> String {
    match context {
        Some(context) => format!("{context}: {err}"),
        None => format!("Request failed: {err}"),
    }
}

/// Logs a failure at `warn` when expected and `error` otherwise.
pub(crate) fn log_failure(context: Option<&str>, err: &CoreError) {
    let context = context.unwrap_or("request");
    if err.is_expected() {
        log::warn!("{context} failed: {err}");
    } else {
        log::error!("{context} failed: {err}");
    }
}

struct RunnerInner<T> {
    state: watch::Sender<RequestState<T>>,
    notifier: Arc<dyn Notifier>,
    latest: AtomicU64,
}

/// Executes async operations and tracks their state
///
/// Cloning is cheap; clones share state, so a spawned task and the view that
/// renders it can hold the same runner.
///
/// When invocations overlap, only the most recent one writes `data`/`error`
/// and emits notifications. Older invocations still run to completion and
/// return their own result to their caller; the runner never cancels work.
pub struct RequestRunner<T> {
    inner: Arc<RunnerInner<T>>,
}

impl<T> Clone for RequestRunner<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> RequestRunner<T> {
    /// Create a runner reporting to `notifier`
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(RequestState::default());
        Self {
            inner: Arc::new(RunnerInner {
                state,
                notifier,
                latest: AtomicU64::new(0),
            }),
        }
    }

    /// Run `operation`, swallow and report failures
    ///
    /// Returns `None` when the operation failed.
    pub async fn execute<F, Fut>(&self, operation: F, options: ExecuteOptions) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CoreResult<T>>,
    {
        self.run(operation, options).await.ok()
    }

    /// Run `operation` with the same bookkeeping as [`execute`](Self::execute),
    /// but hand the failure back to the caller
    pub async fn run<F, Fut>(&self, operation: F, options: ExecuteOptions) -> CoreResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CoreResult<T>>,
    {
        let seq = self.inner.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let guard = InFlight::start(&self.inner.state);

        let result = operation().await;

        let is_latest = self.inner.latest.load(Ordering::SeqCst) == seq;
        if !is_latest {
            log::debug!("Discarding stale result of request #{seq}");
        }

        match &result {
            Ok(data) => {
                guard.finish(|s| {
                    if is_latest {
                        s.data = Some(data.clone());
                        s.error = None;
                    }
                });
                if is_latest {
                    if let Some(ref message) = options.success_message {
                        self.inner.notifier.display(Severity::Success, message);
                    }
                }
            }
            Err(err) => {
                guard.finish(|s| {
                    if is_latest {
                        s.error = Some(ErrorInfo::from(err));
                    }
                });
                if is_latest {
                    log_failure(options.error_context.as_deref(), err);
                    if options.show_toast {
                        let message = failure_message(options.error_context.as_deref(), err);
                        self.inner.notifier.display(Severity::Error, &message);
                    }
                }
            }
        }

        result
    }

    /// Snapshot of the current state
    pub fn state(&self) -> RequestState<T> {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.inner.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn data(&self) -> Option<T> {
        self.inner.state.borrow().data.clone()
    }

    pub fn error(&self) -> Option<ErrorInfo> {
        self.inner.state.borrow().error.clone()
    }

    /// Clear `data` and `error`; in-flight invocations are unaffected
    pub fn reset(&self) {
        self.inner.state.send_modify(|s| {
            s.data = None;
            s.error = None;
        });
    }
}

/// Keeps `loading` raised for the lifetime of one invocation.
///
/// Dropping it without calling [`finish`](Self::finish) (the invocation's
/// future was dropped) still releases the flag.
struct InFlight<'a, T> {
    state: &'a watch::Sender<RequestState<T>>,
    armed: bool,
}

impl<'a, T> InFlight<'a, T> {
    fn start(state: &'a watch::Sender<RequestState<T>>) -> Self {
        state.send_modify(|s| {
            s.in_flight += 1;
            s.loading = true;
        });
        Self { state, armed: true }
    }

    /// Apply the outcome and release in a single state update
    fn finish(mut self, apply: impl FnOnce(&mut RequestState<T>)) {
        self.armed = false;
        self.state.send_modify(|s| {
            apply(s);
            release(s);
        });
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_modify(release);
        }
    }
}

fn release<T>(s: &mut RequestState<T>) {
    s.in_flight = s.in_flight.saturating_sub(1);
    s.loading = s.in_flight > 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingNotifier;
    use tokio::sync::oneshot;

    fn runner() -> (RequestRunner<u32>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (RequestRunner::new(notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn success_sets_data_and_clears_error() {
        let (runner, notifier) = runner();

        // 先制造一次失败
        let _ = runner
            .execute(
                || async { Err(CoreError::Network("offline".to_string())) },
                ExecuteOptions::new(),
            )
            .await;
        assert!(runner.error().is_some());

        let probe = runner.clone();
        let result = runner
            .execute(
                move || async move {
                    assert!(probe.is_loading());
                    Ok(42)
                },
                ExecuteOptions::new().success("Loaded"),
            )
            .await;

        assert_eq!(result, Some(42));
        let state = runner.state();
        assert!(!state.loading);
        assert_eq!(state.data, Some(42));
        assert!(state.error.is_none());
        assert_eq!(notifier.last(), Some((Severity::Success, "Loaded".to_string())));
    }

    #[tokio::test]
    async fn failure_keeps_previous_data() {
        let (runner, notifier) = runner();
        runner
            .execute(|| async { Ok(1) }, ExecuteOptions::new())
            .await;

        let probe = runner.clone();
        let result = runner
            .execute(
                move || async move {
                    assert!(probe.is_loading());
                    Err(CoreError::Server {
                        status: 500,
                        message: "boom".to_string(),
                    })
                },
                ExecuteOptions::new().context("Failed to load assets"),
            )
            .await;

        assert_eq!(result, None);
        let state = runner.state();
        assert!(!state.loading);
        assert_eq!(state.data, Some(1));
        assert_eq!(state.error.map(|e| e.code), Some("Server".to_string()));
        assert_eq!(
            notifier.last(),
            Some((
                Severity::Error,
                "Failed to load assets: Server error (500): boom".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn failure_without_context_uses_generic_message() {
        let (runner, notifier) = runner();
        runner
            .execute(
                || async { Err(CoreError::Timeout("30s".to_string())) },
                ExecuteOptions::new(),
            )
            .await;
        assert_eq!(
            notifier.last(),
            Some((
                Severity::Error,
                "Request failed: Request timed out: 30s".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn silent_failure_emits_no_notification() {
        let (runner, notifier) = runner();
        let result = runner
            .run(
                || async { Err(CoreError::NotFound("asset".to_string())) },
                ExecuteOptions::new().silent(),
            )
            .await;

        assert!(matches!(result, Err(CoreError::NotFound(_))));
        assert!(runner.error().is_some());
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn stale_result_is_ignored() {
        let (runner, _) = runner();
        let (tx1, rx1) = oneshot::channel::<u32>();
        let (tx2, rx2) = oneshot::channel::<u32>();

        let mut first = Box::pin(runner.execute(
            move || async move { rx1.await.map_err(|_| CoreError::Busy) },
            ExecuteOptions::new(),
        ));
        let mut second = Box::pin(runner.execute(
            move || async move { rx2.await.map_err(|_| CoreError::Busy) },
            ExecuteOptions::new(),
        ));

        assert!(futures::poll!(&mut first).is_pending());
        assert!(futures::poll!(&mut second).is_pending());
        assert!(runner.is_loading());

        tx2.send(2).unwrap();
        assert_eq!(second.await, Some(2));
        assert!(runner.is_loading());

        tx1.send(1).unwrap();
        assert_eq!(first.await, Some(1));

        assert!(!runner.is_loading());
        assert_eq!(runner.data(), Some(2));
    }

    #[tokio::test]
    async fn dropped_invocation_releases_loading() {
        let (runner, _) = runner();
        let (_tx, rx) = oneshot::channel::<u32>();

        let mut pending = Box::pin(runner.execute(
            move || async move { rx.await.map_err(|_| CoreError::Busy) },
            ExecuteOptions::new(),
        ));
        assert!(futures::poll!(&mut pending).is_pending());
        assert!(runner.is_loading());

        drop(pending);
        assert!(!runner.is_loading());
    }

    #[tokio::test]
    async fn subscribers_see_loading_transitions() {
        let (runner, _) = runner();
        let mut rx = runner.subscribe();
        let _ = rx.borrow_and_update();

        runner.execute(|| async { Ok(5) }, ExecuteOptions::new()).await;

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert!(!state.loading);
        assert_eq!(state.data, Some(5));
    }
}
