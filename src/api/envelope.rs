//! Response envelopes returned by the backend.
//!
//! Most endpoints answer `{ success, data, message? }`, list endpoints may
//! answer with a paginated variant, and a few wrap the payload twice
//! (`{ data: { data: ... } }`). [`unwrap_data`] peels whatever wrapping is
//! present so callers only ever see the payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::Result;
use crate::domain::User;

/// Envelopes are never nested deeper than this.
const MAX_WRAP_DEPTH: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Body of a failed request; the backend uses either `message` or `error`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Strip up to two `data` wrappers and decode the payload.
pub fn unwrap_data<T: DeserializeOwned>(mut value: Value) -> Result<T> {
    for _ in 0..MAX_WRAP_DEPTH {
        let peeled = match &mut value {
            Value::Object(map) if map.get("data").is_some_and(|d| !d.is_null()) => {
                map.remove("data")
            }
            _ => None,
        };
        match peeled {
            Some(inner) => value = inner,
            None => break,
        }
    }
    Ok(serde_json::from_value(value)?)
}

/// Best-effort human readable message from an error response body.
pub fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty())
}
