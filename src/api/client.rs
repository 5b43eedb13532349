use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::api::envelope::{self, Page};
use crate::api::{ApiRequest, RawResponse, Transport};
use crate::app::{AksharError, Result};
use crate::session::SessionStore;

/// HTTP client for the blogging backend.
///
/// Every request reads the bearer token from the [`SessionStore`] at the
/// moment it is issued, so a logout is reflected by the very next call.
/// The client does not retry, cache or queue.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport + Send + Sync>,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn Transport + Send + Sync>,
        base_url: &str,
        session: SessionStore,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        Ok(Self {
            transport,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Resolve an API path (e.g. `/blogs/slug/x`) against the base URL.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        ))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.url(path, query)?;
        let value = self.execute(Method::GET, url, None).await?;
        envelope::unwrap_data(value)
    }

    /// GET a paginated list, keeping the paging metadata.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Page<T>> {
        let url = self.url(path, query)?;
        let value = self.execute(Method::GET, url, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.with_body(Method::POST, path, body).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.with_body(Method::PUT, path, body).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.with_body(Method::PATCH, path, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.action(Method::DELETE, path).await
    }

    /// Body-less call whose response payload is not needed (like, follow,
    /// publish, mark-read, ...).
    pub async fn action(&self, method: Method, path: &str) -> Result<()> {
        let url = self.url(path, &[])?;
        self.execute(method, url, None).await?;
        Ok(())
    }

    async fn with_body<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &[])?;
        let body = serde_json::to_vec(body)?;
        let value = self.execute(method, url, Some(body)).await?;
        envelope::unwrap_data(value)
    }

    async fn execute(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<Value> {
        let request = ApiRequest {
            method,
            url,
            bearer: self.session.token(),
            body,
        };

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            authenticated = request.bearer.is_some(),
            "API request"
        );

        let response = self.transport.send(request).await?;
        parse_response(response)
    }
}

/// Build an API path from raw segments, percent-encoding each one so a
/// slug or id can never add segments, a query or a fragment.
pub fn endpoint(segments: &[&str]) -> Result<String> {
    let mut url = Url::parse("http://localhost/")?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| AksharError::Validation("Invalid API path".into()))?;
        path.clear();
        for segment in segments {
            if matches!(*segment, "" | "." | "..") {
                return Err(AksharError::Validation(format!(
                    "Invalid path segment '{}'",
                    segment
                )));
            }
            path.push(segment);
        }
    }
    Ok(url.path().to_string())
}

fn parse_response(response: RawResponse) -> Result<Value> {
    if !response.is_success() {
        let message = envelope::error_message(&response.body);
        tracing::debug!(status = response.status, message = ?message, "API error response");
        return Err(AksharError::from_status(response.status, message));
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&response.body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{self, MockTransport, Reply};
    use serde_json::json;

    #[tokio::test]
    async fn test_url_keeps_base_path() {
        let (api, _) = testing::client(MockTransport::new());
        let url = api.url("/blogs/search", &[("q", "deep work")]).unwrap();
        assert_eq!(url.as_str(), "http://test.local/api/blogs/search?q=deep+work");
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        assert_eq!(endpoint(&["blogs", "slug", "a?b#c"]).unwrap(), "/blogs/slug/a%3Fb%23c");
        assert_eq!(
            endpoint(&["blogs", "slug", "x/../../users/me"]).unwrap(),
            "/blogs/slug/x%2F..%2F..%2Fusers%2Fme"
        );
        assert!(matches!(endpoint(&["users", ".."]), Err(AksharError::Validation(_))));
        assert!(matches!(endpoint(&["users", ""]), Err(AksharError::Validation(_))));
    }

    #[tokio::test]
    async fn test_escaped_segment_stays_in_path() {
        let mock = MockTransport::new().on(
            Method::GET,
            "/blogs/slug/a%3Fb",
            Reply::json(200, json!({"data": 1})),
        );
        let (api, _) = testing::client(mock.clone());

        let path = endpoint(&["blogs", "slug", "a?b"]).unwrap();
        let _: u32 = api.get(&path).await.unwrap();

        let url = &mock.requests()[0].url;
        assert_eq!(url.path(), "/api/blogs/slug/a%3Fb");
        assert_eq!(url.query(), None);
    }

    #[tokio::test]
    async fn test_get_unwraps_envelope() {
        let mock = MockTransport::new().on(
            Method::GET,
            "/ping",
            Reply::json(200, json!({"success": true, "data": {"data": "pong"}})),
        );
        let (api, _) = testing::client(mock);

        let value: String = api.get("/ping").await.unwrap();
        assert_eq!(value, "pong");
    }

    #[tokio::test]
    async fn test_get_page_keeps_paging_metadata() {
        let mock = MockTransport::new().on(
            Method::GET,
            "/blogs?page=1",
            Reply::json(
                200,
                json!({"success": true, "data": [{"n": 1}], "total": 12, "page": 1, "pages": 2}),
            ),
        );
        let (api, _) = testing::client(mock);

        let page: Page<Value> = api.get_page("/blogs", &[("page", "1")]).await.unwrap();
        assert_eq!(page.total, 12);
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn test_anonymous_request_has_no_bearer() {
        let mock = MockTransport::new().on(Method::GET, "/ping", Reply::json(200, json!({"data": 1})));
        let (api, _) = testing::client(mock.clone());

        let _: u32 = api.get("/ping").await.unwrap();
        assert_eq!(mock.requests()[0].bearer, None);
    }

    #[tokio::test]
    async fn test_authenticated_request_carries_bearer() {
        let mock = MockTransport::new().on(Method::GET, "/ping", Reply::json(200, json!({"data": 1})));
        let (api, session) = testing::client(mock.clone());
        testing::sign_in(&session, "tok-123");

        let _: u32 = api.get("/ping").await.unwrap();
        assert_eq!(mock.requests()[0].bearer.as_deref(), Some("tok-123"));
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let mock = MockTransport::new().on(
            Method::POST,
            "/blogs",
            Reply::json(400, json!({"success": false, "message": "Title is required"})),
        );
        let (api, _) = testing::client(mock);

        let err = api
            .post::<_, Value>("/blogs", &json!({"title": ""}))
            .await
            .unwrap_err();
        assert!(matches!(err, AksharError::Validation(m) if m == "Title is required"));
    }

    #[tokio::test]
    async fn test_network_failure_is_network_error() {
        let mock = MockTransport::new().on(Method::GET, "/ping", Reply::network_error());
        let (api, _) = testing::client(mock);

        let err = api.get::<Value>("/ping").await.unwrap_err();
        assert!(matches!(err, AksharError::Network(_)));
    }

    #[tokio::test]
    async fn test_action_accepts_empty_body() {
        let mock = MockTransport::new().on(Method::DELETE, "/blogs/b1", Reply::empty(204));
        let (api, _) = testing::client(mock.clone());

        api.delete("/blogs/b1").await.unwrap();
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mock = MockTransport::new().on(
            Method::POST,
            "/blogs/b1/comments",
            Reply::json(201, json!({"data": {"ok": true}})),
        );
        let (api, _) = testing::client(mock.clone());

        let _: Value = api
            .post("/blogs/b1/comments", &json!({"content": "hi"}))
            .await
            .unwrap();
        let sent: Value = serde_json::from_slice(mock.requests()[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(sent, json!({"content": "hi"}));
    }
}
