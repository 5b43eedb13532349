use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::Theme;
use crate::store::{Store, THEME_KEY};

/// Persisted light/dark preference, read once at startup and written on
/// every change.
#[derive(Clone)]
pub struct ThemeStore {
    state: Arc<watch::Sender<Theme>>,
    storage: Arc<dyn Store + Send + Sync>,
}

impl ThemeStore {
    pub fn load(storage: Arc<dyn Store + Send + Sync>) -> Self {
        let theme = match storage.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}; using default theme", e);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::error!("Failed to read theme preference: {}", e);
                Theme::default()
            }
        };

        let (state, _) = watch::channel(theme);
        Self {
            state: Arc::new(state),
            storage,
        }
    }

    pub fn current(&self) -> Theme {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.state.subscribe()
    }

    pub fn set(&self, theme: Theme) -> Theme {
        if let Err(e) = self.storage.set(THEME_KEY, theme.as_str()) {
            tracing::error!("Failed to persist theme preference: {}", e);
        }
        self.state.send_if_modified(|current| {
            let changed = *current != theme;
            *current = theme;
            changed
        });
        theme
    }

    pub fn toggle(&self) -> Theme {
        self.set(self.current().toggled())
    }
}
