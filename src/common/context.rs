//! Per-call context: deadline and cancellation
//!
//! Every broker operation runs under a `CallContext`. Expiry and
//! cancellation both end the wait with a `tonic::Status`
//! (`DeadlineExceeded` / `Cancelled`), so they surface like any other
//! transport failure.

use futures_util::future::select_all;
use std::future::{pending, Future};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: Vec<watch::Receiver<bool>>,
}

/// Cancels every context derived from the one that created it.
/// Dropping the handle does not cancel.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CallContext {
    /// No deadline, never cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context expiring after `timeout`, keeping any earlier deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        };
        Self {
            deadline: Some(deadline),
            cancel: self.cancel.clone(),
        }
    }

    /// Derive a cancellable context. Cancelling the parent still cancels the child.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let mut cancel = self.cancel.clone();
        cancel.push(rx);
        let ctx = Self {
            deadline: self.deadline,
            cancel,
        };
        (ctx, CancelHandle { tx })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` without a deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.iter().any(|rx| *rx.borrow())
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| d <= Instant::now())
    }

    async fn cancelled(&self) {
        if self.cancel.is_empty() {
            return pending().await;
        }
        let waits = self.cancel.iter().cloned().map(|mut rx| {
            Box::pin(async move {
                // Sender gone without cancelling: this source can never fire
                if rx.wait_for(|c| *c).await.is_err() {
                    pending::<()>().await;
                }
            })
        });
        select_all(waits).await;
    }

    /// Drive `fut` until it completes, the deadline passes, or the context is cancelled.
    pub async fn run<T, F>(&self, fut: F) -> std::result::Result<T, tonic::Status>
    where
        F: Future<Output = std::result::Result<T, tonic::Status>>,
    {
        if self.is_cancelled() {
            return Err(tonic::Status::cancelled("context cancelled"));
        }
        if self.is_expired() {
            return Err(tonic::Status::deadline_exceeded("context deadline exceeded"));
        }

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => pending().await,
            }
        };

        tokio::select! {
            res = fut => res,
            _ = expired => Err(tonic::Status::deadline_exceeded("context deadline exceeded")),
            _ = self.cancelled() => Err(tonic::Status::cancelled("context cancelled")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[tokio::test]
    async fn test_background_runs_to_completion() {
        let ctx = CallContext::background();
        assert!(ctx.remaining().is_none());
        let res = ctx.run(async { Ok::<_, tonic::Status>(7) }).await;
        assert_eq!(res.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let ctx = CallContext::background().with_timeout(Duration::from_millis(20));
        let res = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, tonic::Status>(())
            })
            .await;
        assert_eq!(res.unwrap_err().code(), Code::DeadlineExceeded);
    }

    #[tokio::test]
    async fn test_child_keeps_earlier_deadline() {
        let parent = CallContext::background().with_timeout(Duration::from_secs(1));
        let child = parent.with_timeout(Duration::from_secs(60));
        assert_eq!(parent.deadline(), child.deadline());
        assert!(child.remaining().unwrap() <= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_call() {
        let (ctx, handle) = CallContext::background().with_cancel();
        let task = tokio::spawn(async move {
            ctx.run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, tonic::Status>(())
            })
            .await
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();
        let res = task.await.unwrap();
        assert_eq!(res.unwrap_err().code(), Code::Cancelled);
    }

    #[tokio::test]
    async fn test_parent_cancel_reaches_child() {
        let (parent, handle) = CallContext::background().with_cancel();
        let (child, _child_handle) = parent.with_cancel();
        handle.cancel();
        assert!(child.is_cancelled());
        let res = child.run(async { Ok::<_, tonic::Status>(()) }).await;
        assert_eq!(res.unwrap_err().code(), Code::Cancelled);
    }

    #[tokio::test]
    async fn test_dropped_handle_does_not_cancel() {
        let (ctx, handle) = CallContext::background().with_cancel();
        drop(handle);
        let res = ctx
            .run(async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok::<_, tonic::Status>(1)
            })
            .await;
        assert_eq!(res.unwrap(), 1);
    }
}
