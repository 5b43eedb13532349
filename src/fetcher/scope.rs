use std::future::Future;

use tokio::sync::watch;

use crate::app::{AksharError, Result};

/// Ties fetches to the lifetime of a view.
///
/// Dropping (or explicitly cancelling) the [`ScopeGuard`] ends the scope;
/// any request still in flight through a [`ScopeHandle`] resolves to
/// `AksharError::Cancelled` and its response is discarded.
pub struct ViewScope;

impl ViewScope {
    pub fn open() -> (ScopeGuard, ScopeHandle) {
        let (tx, rx) = watch::channel(false);
        (ScopeGuard { tx }, ScopeHandle { rx })
    }
}

pub struct ScopeGuard {
    tx: watch::Sender<bool>,
}

impl ScopeGuard {
    /// End the scope now instead of at drop.
    pub fn cancel(self) {}
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.tx.send_replace(true);
    }
}

#[derive(Clone)]
pub struct ScopeHandle {
    rx: watch::Receiver<bool>,
}

impl ScopeHandle {
    pub fn is_active(&self) -> bool {
        !*self.rx.borrow() && self.rx.has_changed().is_ok()
    }

    /// Resolves once the scope has ended.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // An error means the guard is gone, which also ends the scope
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Drive `request` unless the scope ends first. A result that arrives
    /// after the scope ended is dropped.
    pub async fn run<T, F>(&self, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if !self.is_active() {
            return Err(AksharError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancelled() => Err(AksharError::Cancelled),
            result = request => {
                if self.is_active() {
                    result
                } else {
                    Err(AksharError::Cancelled)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_active_until_guard_dropped() {
        let (guard, handle) = ViewScope::open();
        assert!(handle.is_active());

        drop(guard);
        assert!(!handle.is_active());
    }

    #[tokio::test]
    async fn test_run_completes_while_active() {
        let (_guard, handle) = ViewScope::open();
        let value = handle.run(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_run_after_cancel_never_polls_request() {
        let (guard, handle) = ViewScope::open();
        guard.cancel();

        let polled = AtomicBool::new(false);
        let result = handle
            .run(async {
                polled.store(true, Ordering::SeqCst);
                Ok(1)
            })
            .await;
        assert!(matches!(result, Err(AksharError::Cancelled)));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_in_flight_request() {
        let (guard, handle) = ViewScope::open();

        let task = tokio::spawn(async move {
            handle
                .run(async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(1)
                })
                .await
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(guard);

        let result = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("cancellation should be prompt")
            .unwrap();
        assert!(matches!(result, Err(AksharError::Cancelled)));
    }
}
