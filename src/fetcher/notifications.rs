use futures::future::join_all;
use reqwest::Method;

use crate::api::{endpoint, ApiClient};
use crate::app::{AksharError, Result};
use crate::domain::Notification;
use crate::fetcher::{optimistic, settle, FallbackPolicy, Resource, ScopeHandle};

pub struct Notifications {
    api: ApiClient,
    scope: ScopeHandle,
    pub items: Resource<Vec<Notification>>,
}

impl Notifications {
    pub fn new(api: ApiClient, scope: ScopeHandle) -> Self {
        Self {
            api,
            scope,
            items: Resource::new(),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        self.api.session().require_auth()?;

        let api = &self.api;
        let request = async move { api.get::<Vec<Notification>>("/notifications").await };
        settle(&mut self.items, &self.scope, FallbackPolicy::Strict, request, || None).await
    }

    pub fn unread_count(&self) -> usize {
        self.items.data.iter().filter(|n| !n.read).count()
    }

    /// Mark one notification read. Already-read items are left alone.
    pub async fn mark_read(&mut self, id: &str) -> Result<()> {
        self.api.session().require_auth()?;

        let index = self
            .items
            .data
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| AksharError::NotFound(format!("Notification {}", id)))?;
        if self.items.data[index].read {
            return Ok(());
        }

        let path = endpoint(&["notifications", id, "read"])?;
        let api = &self.api;
        optimistic(
            &mut self.items.data[index],
            &self.scope,
            |n| n.read = true,
            |n| n.read = false,
            api.action(Method::PATCH, &path),
        )
        .await
    }

    /// Mark every unread notification read, issuing the requests
    /// concurrently. Only the notifications whose request succeeded are
    /// marked; returns how many that was.
    pub async fn mark_all_read(&mut self) -> Result<usize> {
        self.api.session().require_auth()?;

        let unread: Vec<String> = self
            .items
            .data
            .iter()
            .filter(|n| !n.read)
            .map(|n| n.id.clone())
            .collect();
        if unread.is_empty() {
            return Ok(0);
        }

        let api = &self.api;
        let scope = &self.scope;
        let results = join_all(unread.iter().map(|id| async move {
            let path = endpoint(&["notifications", id.as_str(), "read"])?;
            scope.run(api.action(Method::PATCH, &path)).await
        }))
        .await;

        let mut marked = 0;
        for (id, result) in unread.iter().zip(results) {
            match result {
                Ok(()) => {
                    if let Some(n) = self.items.data.iter_mut().find(|n| &n.id == id) {
                        n.read = true;
                        marked += 1;
                    }
                }
                Err(AksharError::Cancelled) => return Err(AksharError::Cancelled),
                Err(e) => tracing::warn!(notification = %id, "Failed to mark read: {}", e),
            }
        }

        Ok(marked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{self, MockTransport, Reply};
    use crate::fetcher::{ScopeGuard, ViewScope};
    use serde_json::json;

    fn notification_json(id: &str, kind: &str, read: bool) -> serde_json::Value {
        json!({
            "_id": id,
            "type": kind,
            "sender": {"_id": "u2", "name": "Priya Verma", "username": "priya-creates"},
            "blog": {"_id": "b1", "title": "Hello"},
            "read": read,
            "createdAt": "2026-03-05T08:00:00Z"
        })
    }

    fn inbox(mock: MockTransport) -> (Notifications, ScopeGuard) {
        let mock = mock.on(
            Method::GET,
            "/notifications",
            Reply::json(
                200,
                json!({"success": true, "data": [
                    notification_json("n1", "like", false),
                    notification_json("n2", "comment", true),
                    notification_json("n3", "follow", false),
                ]}),
            ),
        );
        let (api, session) = testing::client(mock);
        testing::sign_in(&session, "tok");
        let (guard, scope) = ViewScope::open();
        (Notifications::new(api, scope), guard)
    }

    #[tokio::test]
    async fn test_requires_sign_in() {
        let mock = MockTransport::new();
        let (api, _) = testing::client(mock.clone());
        let (_guard, scope) = ViewScope::open();
        let mut view = Notifications::new(api, scope);

        assert!(matches!(view.load().await, Err(AksharError::Auth(_))));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_load_and_unread_count() {
        let (mut view, _guard) = inbox(MockTransport::new());
        view.load().await.unwrap();

        assert_eq!(view.items.data.len(), 3);
        assert_eq!(view.unread_count(), 2);
    }

    #[tokio::test]
    async fn test_mark_read() {
        let mock = MockTransport::new().on(
            Method::PATCH,
            "/notifications/n1/read",
            Reply::json(200, json!({"success": true})),
        );
        let (mut view, _guard) = inbox(mock.clone());
        view.load().await.unwrap();

        view.mark_read("n1").await.unwrap();

        assert!(view.items.data[0].read);
        assert_eq!(view.unread_count(), 1);
        assert_eq!(mock.paths().last().unwrap(), "PATCH /notifications/n1/read");
    }

    #[tokio::test]
    async fn test_failed_mark_read_rolls_back() {
        let mock = MockTransport::new().on(
            Method::PATCH,
            "/notifications/n1/read",
            Reply::json(503, json!({})),
        );
        let (mut view, _guard) = inbox(mock);
        view.load().await.unwrap();

        assert!(view.mark_read("n1").await.is_err());
        assert!(!view.items.data[0].read);
    }

    #[tokio::test]
    async fn test_mark_all_read_patches_only_successes() {
        let mock = MockTransport::new()
            .on(Method::PATCH, "/notifications/n1/read", Reply::json(200, json!({})))
            .on(Method::PATCH, "/notifications/n3/read", Reply::network_error());
        let (mut view, _guard) = inbox(mock.clone());
        view.load().await.unwrap();

        let marked = view.mark_all_read().await.unwrap();

        assert_eq!(marked, 1);
        assert!(view.items.data[0].read);
        assert!(!view.items.data[2].read);
        assert_eq!(view.unread_count(), 1);
        // The already-read n2 is never sent
        assert!(!mock.paths().iter().any(|p| p.contains("n2")));
    }
}
