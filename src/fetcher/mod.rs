//! View-level resource fetchers.
//!
//! Every view follows the same shape: mark itself loading, issue its API
//! call(s) inside the view's [`ScopeHandle`], unwrap the envelope, and
//! settle into either fresh data, bundled fallback data, or an error.
//! Whether a view may fall back is an explicit [`FallbackPolicy`] handed in
//! at construction, never inferred from the failure alone.

pub mod blog_detail;
pub mod blog_list;
pub mod editor;
pub mod feed;
pub mod notifications;
pub mod profile;
pub mod scope;

use std::future::Future;

use crate::app::{AksharError, Result};

pub use blog_detail::BlogDetail;
pub use blog_list::{BlogList, ListQuery};
pub use editor::Editor;
pub use feed::Feed;
pub use notifications::Notifications;
pub use profile::{Profile, ProfileData};
pub use scope::{ScopeGuard, ScopeHandle, ViewScope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Replace unreachable-backend failures with bundled demo content.
    Degrade,
    /// Surface every failure as an empty/error state.
    Strict,
}

/// Data held by a view together with its loading status.
#[derive(Debug, Default)]
pub struct Resource<T> {
    pub data: T,
    pub loading: bool,
    /// The data came from the fallback provider, not the backend.
    pub using_fallback: bool,
    pub error: Option<AksharError>,
}

impl<T: Default> Resource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&mut self) {
        self.loading = true;
    }

    fn resolve(&mut self, data: T) {
        self.data = data;
        self.loading = false;
        self.using_fallback = false;
        self.error = None;
    }

    fn degrade(&mut self, data: T) {
        self.data = data;
        self.loading = false;
        self.using_fallback = true;
        self.error = None;
    }

    fn fail(&mut self, error: AksharError) {
        self.data = T::default();
        self.loading = false;
        self.using_fallback = false;
        self.error = Some(error);
    }

    pub fn is_ready(&self) -> bool {
        !self.loading && self.error.is_none()
    }
}

/// Run `request` for `resource` and settle the outcome according to `policy`.
///
/// Fetch failures are recorded in `resource.error` rather than returned;
/// the only error returned is `Cancelled`, in which case `resource` keeps
/// whatever it held before.
pub(crate) async fn settle<T, F>(
    resource: &mut Resource<T>,
    scope: &ScopeHandle,
    policy: FallbackPolicy,
    request: F,
    fallback: impl FnOnce() -> Option<T>,
) -> Result<()>
where
    T: Default,
    F: Future<Output = Result<T>>,
{
    let was_loading = resource.loading;
    resource.begin();

    match scope.run(request).await {
        Ok(data) => resource.resolve(data),
        Err(AksharError::Cancelled) => {
            tracing::debug!("View closed before response arrived; discarding");
            resource.loading = was_loading;
            return Err(AksharError::Cancelled);
        }
        Err(e) if policy == FallbackPolicy::Degrade && e.is_unreachable() => match fallback() {
            Some(data) => {
                tracing::warn!("Backend unavailable ({}); showing demo content", e);
                resource.degrade(data);
            }
            None => resource.fail(e),
        },
        Err(e) => {
            tracing::warn!("Fetch failed: {}", e);
            resource.fail(e);
        }
    }

    Ok(())
}

/// Demo records live only on this side of the wire and are read-only.
pub(crate) fn ensure_writable(id_or_slug: &str) -> Result<()> {
    if crate::fallback::is_fallback(id_or_slug) {
        return Err(AksharError::DemoContent(id_or_slug.to_string()));
    }
    Ok(())
}

/// Apply `patch` optimistically, run `request`, and undo the patch with
/// `rollback` unless the request succeeds. A closed view is left untouched.
pub(crate) async fn optimistic<S, F>(
    state: &mut S,
    scope: &ScopeHandle,
    patch: impl FnOnce(&mut S),
    rollback: impl FnOnce(&mut S),
    request: F,
) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    if !scope.is_active() {
        return Err(AksharError::Cancelled);
    }
    patch(state);
    match scope.run(request).await {
        Ok(()) => Ok(()),
        Err(AksharError::Cancelled) => {
            tracing::debug!("View closed during action; reverting local change");
            rollback(state);
            Err(AksharError::Cancelled)
        }
        Err(e) => {
            tracing::warn!("Action failed, reverting local change: {}", e);
            rollback(state);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_settle_success() {
        let (_guard, scope) = ViewScope::open();
        let mut resource: Resource<Vec<u32>> = Resource::new();

        settle(&mut resource, &scope, FallbackPolicy::Degrade, async { Ok(vec![1]) }, || {
            Some(vec![9])
        })
        .await
        .unwrap();

        assert_eq!(resource.data, vec![1]);
        assert!(!resource.using_fallback);
        assert!(resource.is_ready());
    }

    #[tokio::test]
    async fn test_settle_degrades_on_unreachable() {
        let (_guard, scope) = ViewScope::open();
        let mut resource: Resource<Vec<u32>> = Resource::new();

        settle(
            &mut resource,
            &scope,
            FallbackPolicy::Degrade,
            async { Err(AksharError::Network("down".into())) },
            || Some(vec![9]),
        )
        .await
        .unwrap();

        assert_eq!(resource.data, vec![9]);
        assert!(resource.using_fallback);
        assert!(resource.error.is_none());
    }

    #[tokio::test]
    async fn test_settle_does_not_mask_client_errors() {
        let (_guard, scope) = ViewScope::open();
        let mut resource: Resource<Vec<u32>> = Resource::new();

        settle(
            &mut resource,
            &scope,
            FallbackPolicy::Degrade,
            async { Err(AksharError::from_status(401, None)) },
            || Some(vec![9]),
        )
        .await
        .unwrap();

        assert!(resource.data.is_empty());
        assert!(!resource.using_fallback);
        assert!(matches!(resource.error, Some(AksharError::Auth(_))));
    }

    #[tokio::test]
    async fn test_settle_strict_never_degrades() {
        let (_guard, scope) = ViewScope::open();
        let mut resource: Resource<Vec<u32>> = Resource::new();

        settle(
            &mut resource,
            &scope,
            FallbackPolicy::Strict,
            async { Err(AksharError::Network("down".into())) },
            || Some(vec![9]),
        )
        .await
        .unwrap();

        assert!(resource.data.is_empty());
        assert!(!resource.using_fallback);
        assert!(matches!(resource.error, Some(AksharError::Network(_))));
    }

    #[tokio::test]
    async fn test_optimistic_rolls_back_on_failure() {
        let (_guard, scope) = ViewScope::open();
        let mut count = 1u32;

        let result = optimistic(
            &mut count,
            &scope,
            |c| *c += 1,
            |c| *c -= 1,
            async { Err(AksharError::Network("down".into())) },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_optimistic_on_closed_view_changes_nothing() {
        let (guard, scope) = ViewScope::open();
        guard.cancel();
        let mut count = 1u32;
        let polled = std::sync::atomic::AtomicBool::new(false);

        let result = optimistic(&mut count, &scope, |c| *c += 1, |c| *c -= 1, async {
            polled.store(true, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(AksharError::Cancelled)));
        assert_eq!(count, 1);
        assert!(!polled.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_optimistic_rolls_back_when_view_closes_mid_flight() {
        let (guard, scope) = ViewScope::open();
        let mut count = 1u32;

        let request = async {
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            Ok(())
        };
        let closer = async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            guard.cancel();
        };
        let (result, ()) = tokio::join!(
            optimistic(&mut count, &scope, |c| *c += 1, |c| *c -= 1, request),
            closer
        );

        assert!(matches!(result, Err(AksharError::Cancelled)));
        assert_eq!(count, 1);
    }
}
