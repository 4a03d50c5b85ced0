//! Simulated backend latency.
//!
//! There is no real backend: searches, train lookups and booking
//! submissions resolve after a fixed delay. Each delayed task comes with a
//! [`CancelGuard`] owned by whoever is waiting for the result. Dropping or
//! cancelling the guard suppresses the result, so a view that goes away
//! mid-delay never receives a late update.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::{AbortHandle, Abortable, Aborted, BoxFuture, FutureExt};
use tracing::trace;

/// The task was cancelled before it completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Cancels a [`Simulated`] task when cancelled or dropped.
#[derive(Debug)]
#[must_use = "dropping the guard cancels the task"]
pub struct CancelGuard {
    handle: AbortHandle,
}

impl CancelGuard {
    /// Cancel the task now.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A value that becomes ready after a fixed delay, unless cancelled.
#[must_use = "futures do nothing unless polled"]
pub struct Simulated<T> {
    inner: Abortable<BoxFuture<'static, T>>,
}

impl<T> Future for Simulated<T> {
    type Output = Result<T, Cancelled>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner)
            .poll(cx)
            .map(|result| result.map_err(|Aborted| Cancelled))
    }
}

/// Run `f` after `delay`.
///
/// `f` runs only if the task is still live when the delay ends.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use train_booking::simulate::{Cancelled, simulate};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (task, guard) = simulate(Duration::from_millis(5), || 42);
/// assert_eq!(task.await, Ok(42));
///
/// let (task, guard2) = simulate(Duration::from_millis(5), || 42);
/// guard2.cancel();
/// assert_eq!(task.await, Err(Cancelled));
/// # drop(guard);
/// # }
/// ```
pub fn simulate<T, F>(delay: Duration, f: F) -> (Simulated<T>, CancelGuard)
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (handle, registration) = AbortHandle::new_pair();
    let work = async move {
        tokio::time::sleep(delay).await;
        trace!(?delay, "Simulated delay elapsed");
        f()
    }
    .boxed();

    (
        Simulated {
            inner: Abortable::new(work, registration),
        },
        CancelGuard { handle },
    )
}
