use crate::errors::{EngineError, EngineResult};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// Deferred work handed to a [`Scheduler`]
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Handle to one scheduled callback
#[derive(Debug, Clone)]
pub struct CancelToken(CancellationToken);

impl CancelToken {
    pub fn new() -> Self {
        Self(CancellationToken::new())
    }

    pub fn cancel(&self) {
        self.0.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }

    pub(crate) fn inner(&self) -> &CancellationToken {
        &self.0
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellable one-shot timers.
///
/// Implementations must never run `callback` synchronously from inside
/// [`schedule`](Scheduler::schedule).
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> CancelToken;

    fn cancel(&self, token: &CancelToken) {
        token.cancel();
    }
}

/// Scheduler backed by tokio timers
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler on the runtime the caller is running in
    pub fn current() -> EngineResult<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| EngineError::RuntimeUnavailable)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> CancelToken {
        let token = CancelToken::new();
        let cancelled = token.inner().clone();

        self.handle.spawn(async move {
            tokio::select! {
                biased;
                () = cancelled.cancelled() => {}
                () = tokio::time::sleep(delay) => callback(),
            }
        });

        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_current_without_runtime_fails() {
        assert_err!(TokioScheduler::current());
    }

    #[tokio::test(start_paused = true)]
    async fn test_callback_runs_after_delay() {
        let scheduler = assert_ok!(TokioScheduler::current());
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();

        scheduler.schedule(
            Duration::from_millis(100),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_millis(99)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_callback_never_runs() {
        let scheduler = assert_ok!(TokioScheduler::current());
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();

        let token = scheduler.schedule(
            Duration::from_millis(50),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        scheduler.cancel(&token);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(token.is_cancelled());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
