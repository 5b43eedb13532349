use thiserror::Error;

#[derive(Error, Debug)]
pub enum AksharError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Demo content cannot be modified: {0}")]
    DemoContent(String),

    #[error("Request cancelled: view is no longer active")]
    Cancelled,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AksharError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AksharError::Network(format!("request timed out: {}", e))
        } else {
            AksharError::Network(e.to_string())
        }
    }
}

impl AksharError {
    /// Map a non-2xx status and optional server message onto the taxonomy.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| default_message(status).to_string());
        match status {
            401 | 403 => AksharError::Auth(message),
            400 | 409 | 422 => AksharError::Validation(message),
            404 => AksharError::NotFound(message),
            _ => AksharError::Server { status, message },
        }
    }

    /// Failures that look like "the backend is unreachable" rather than a
    /// definite answer from it. Only these may be replaced by demo content.
    pub fn is_unreachable(&self) -> bool {
        match self {
            AksharError::Network(_) => true,
            AksharError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Short message suitable for a view's error slot.
    pub fn user_message(&self) -> String {
        match self {
            AksharError::Network(_) => "Could not reach the server.".to_string(),
            AksharError::Auth(m)
            | AksharError::Validation(m)
            | AksharError::NotFound(m)
            | AksharError::Server { message: m, .. } => m.clone(),
            AksharError::DemoContent(_) => "Demo articles are read-only.".to_string(),
            other => other.to_string(),
        }
    }
}

fn default_message(status: u16) -> &'static str {
    match status {
        400 => "Bad request",
        401 => "Not authorized",
        403 => "Forbidden",
        404 => "Resource not found",
        409 => "Conflict",
        422 => "Unprocessable entity",
        500..=599 => "Internal server error",
        _ => "Unexpected response",
    }
}

pub type Result<T> = std::result::Result<T, AksharError>;
