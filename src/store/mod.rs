pub mod sqlite;

use crate::app::Result;

pub use sqlite::SqliteStore;

/// Persisted session record (`{token, user}` as JSON).
pub const SESSION_KEY: &str = "akshar-session";
/// Persisted display theme (`light` or `dark`).
pub const THEME_KEY: &str = "akshar-theme";

/// Durable client-side key/value storage.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
