pub mod client;
pub mod envelope;
pub mod http_transport;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use reqwest::Method;
use url::Url;

use crate::app::Result;

pub use client::{endpoint, ApiClient};
pub use envelope::{ApiResponse, AuthResponse, Page};
pub use http_transport::HttpTransport;

/// A fully resolved request, ready to hand to a transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    /// Bearer token read from the session at call time
    pub bearer: Option<String>,
    /// JSON-encoded request body
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the backend. Transport failures (DNS, refused,
/// timeout) are reported as `AksharError::Network`; HTTP error statuses are
/// returned as ordinary responses and classified by the client.
#[async_trait]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}
