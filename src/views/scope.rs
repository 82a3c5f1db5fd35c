//! View Scopes
//!
//! Every request a view issues runs inside the view's scope. Tearing the
//! view down cancels the scope: pending requests are aborted and anything
//! that resolves afterwards is discarded.

use futures_util::future::{AbortHandle, Abortable};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::{ViewError, ViewResult};

/// Cancellation boundary tied to a mounted view
#[derive(Clone, Default)]
pub struct ViewScope {
    inner: Arc<ScopeInner>,
}

#[derive(Default)]
struct ScopeInner {
    cancelled: AtomicBool,
    pending: Mutex<Vec<AbortHandle>>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive `future` unless the scope is cancelled first
    pub async fn run<F: Future>(&self, future: F) -> ViewResult<F::Output> {
        let (handle, registration) = AbortHandle::new_pair();
        {
            let mut pending = self
                .inner
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if self.is_cancelled() {
                return Err(ViewError::Cancelled);
            }
            pending.push(handle);
        }

        let output = Abortable::new(future, registration)
            .await
            .map_err(|_| ViewError::Cancelled)?;

        // Resolved, but the view went away in the meantime
        if self.is_cancelled() {
            return Err(ViewError::Cancelled);
        }
        Ok(output)
    }

    /// Abort everything in flight and refuse new work
    pub fn cancel(&self) {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.inner.cancelled.store(true, Ordering::SeqCst);

        let aborted = pending.len();
        for handle in pending.drain(..) {
            handle.abort();
        }
        tracing::debug!(aborted, "View scope cancelled");
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for ViewScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewScope")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_passes_output_through() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 7 }).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_cancelled_scope_refuses_work() {
        let scope = ViewScope::new();
        scope.cancel();
        assert!(matches!(
            scope.run(async { 7 }).await,
            Err(ViewError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_cancel_aborts_pending_request() {
        let scope = ViewScope::new();
        let teardown = scope.clone();

        let (result, ()) = tokio::join!(
            scope.run(std::future::pending::<u32>()),
            async move {
                tokio::task::yield_now().await;
                teardown.cancel();
            }
        );

        assert!(matches!(result, Err(ViewError::Cancelled)));
        assert!(scope.is_cancelled());
    }
}
