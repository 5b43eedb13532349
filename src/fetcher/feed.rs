use crate::api::ApiClient;
use crate::app::Result;
use crate::domain::Article;
use crate::fetcher::{settle, FallbackPolicy, Resource, ScopeHandle};

/// Articles from the authors the viewer follows.
pub struct Feed {
    api: ApiClient,
    scope: ScopeHandle,
    pub articles: Resource<Vec<Article>>,
}

impl Feed {
    pub fn new(api: ApiClient, scope: ScopeHandle) -> Self {
        Self {
            api,
            scope,
            articles: Resource::new(),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        self.api.session().require_auth()?;

        let api = &self.api;
        let request = async move { api.get::<Vec<Article>>("/feed").await };
        settle(&mut self.articles, &self.scope, FallbackPolicy::Strict, request, || None).await
    }
}
