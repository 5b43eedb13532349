use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{ApiClient, HttpTransport, Transport};
use crate::app::error::{AksharError, Result};
use crate::config::Config;
use crate::fetcher::{
    BlogDetail, BlogList, Editor, Feed, FallbackPolicy, ListQuery, Notifications, Profile,
    ScopeHandle,
};
use crate::session::SessionStore;
use crate::store::SqliteStore;
use crate::theme::ThemeStore;

/// Application root. Owns the single session and theme stores and hands
/// out views wired to them.
pub struct AppContext {
    pub config: Config,
    pub store: Arc<SqliteStore>,
    pub session: SessionStore,
    pub theme: ThemeStore,
    pub api: ApiClient,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let db_path = match &config.storage.db_path {
            Some(p) => p.clone(),
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let transport: Arc<dyn Transport + Send + Sync> = Arc::new(HttpTransport::new(&config.api)?);
        Self::assemble(config, store, transport)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        let transport: Arc<dyn Transport + Send + Sync> = Arc::new(HttpTransport::new(&config.api)?);
        Self::assemble(config, store, transport)
    }

    /// Wire the stores and client over an arbitrary transport.
    pub fn with_transport(
        config: Config,
        store: Arc<SqliteStore>,
        transport: Arc<dyn Transport + Send + Sync>,
    ) -> Result<Self> {
        Self::assemble(config, store, transport)
    }

    fn assemble(
        config: Config,
        store: Arc<SqliteStore>,
        transport: Arc<dyn Transport + Send + Sync>,
    ) -> Result<Self> {
        let session = SessionStore::load(store.clone());
        let theme = ThemeStore::load(store.clone());
        let api = ApiClient::new(transport, &config.api.base_url, session.clone())?;

        Ok(Self {
            config,
            store,
            session,
            theme,
            api,
        })
    }

    fn public_policy(&self) -> FallbackPolicy {
        self.config.fallback.public_policy()
    }

    pub fn blog_list(&self, scope: ScopeHandle, query: ListQuery) -> BlogList {
        BlogList::new(self.api.clone(), scope, self.public_policy(), query)
    }

    /// The landing view: latest articles, capped by `[landing] limit`.
    pub fn landing(&self, scope: ScopeHandle) -> BlogList {
        self.blog_list(scope, ListQuery::Latest(self.config.landing.limit))
    }

    pub fn blog_detail(&self, scope: ScopeHandle, slug: &str) -> BlogDetail {
        BlogDetail::new(self.api.clone(), scope, self.public_policy(), slug)
    }

    pub fn profile(&self, scope: ScopeHandle, username: &str) -> Profile {
        Profile::new(self.api.clone(), scope, username)
    }

    pub fn feed(&self, scope: ScopeHandle) -> Feed {
        Feed::new(self.api.clone(), scope)
    }

    pub fn notifications(&self, scope: ScopeHandle) -> Notifications {
        Notifications::new(self.api.clone(), scope)
    }

    pub fn editor(&self, scope: ScopeHandle) -> Editor {
        Editor::compose(self.api.clone(), scope)
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| AksharError::Config("Could not find data directory".into()))?;
        let akshar_dir = data_dir.join("akshar");
        std::fs::create_dir_all(&akshar_dir)?;
        Ok(akshar_dir.join("akshar.db"))
    }
}
