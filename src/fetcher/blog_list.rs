use crate::api::ApiClient;
use crate::app::Result;
use crate::domain::Article;
use crate::fallback;
use crate::fetcher::{settle, FallbackPolicy, Resource, ScopeHandle};

/// Maximum number of tags offered as filters.
pub const MAX_TAG_FILTERS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    /// `GET /blogs`
    All,
    /// `GET /blogs/search?q=...`
    Search(String),
    /// `GET /blogs?limit=n`, used by the landing view
    Latest(usize),
}

impl ListQuery {
    /// A blank search is the same as listing everything.
    pub fn search(query: Option<&str>) -> Self {
        match query.map(str::trim) {
            Some(q) if !q.is_empty() => ListQuery::Search(q.to_string()),
            _ => ListQuery::All,
        }
    }
}

/// Public article list (the "All Stories" and landing pages).
pub struct BlogList {
    api: ApiClient,
    scope: ScopeHandle,
    policy: FallbackPolicy,
    query: ListQuery,
    active_tag: Option<String>,
    pub articles: Resource<Vec<Article>>,
}

impl BlogList {
    pub fn new(api: ApiClient, scope: ScopeHandle, policy: FallbackPolicy, query: ListQuery) -> Self {
        Self {
            api,
            scope,
            policy,
            query,
            active_tag: None,
            articles: Resource::new(),
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub async fn load(&mut self) -> Result<()> {
        let api = &self.api;
        let query = &self.query;
        let request = async move {
            match query {
                ListQuery::All => api.get::<Vec<Article>>("/blogs").await,
                ListQuery::Search(q) => {
                    api.get_with_query::<Vec<Article>>("/blogs/search", &[("q", q.as_str())])
                        .await
                }
                ListQuery::Latest(limit) => {
                    let limit = limit.to_string();
                    api.get_with_query::<Vec<Article>>("/blogs", &[("limit", limit.as_str())])
                        .await
                }
            }
        };

        settle(&mut self.articles, &self.scope, self.policy, request, || {
            Some(fallback::articles().to_vec())
        })
        .await
    }

    /// Change the query and reload if it differs from the current one.
    pub async fn set_query(&mut self, query: ListQuery) -> Result<()> {
        if query == self.query && !self.articles.loading && self.articles.error.is_none() {
            return Ok(());
        }
        self.query = query;
        self.active_tag = None;
        self.load().await
    }

    /// Unique tags across the loaded articles, first-seen order, capped.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.articles.data.iter().flat_map(|a| a.tags.iter()) {
            if tags.len() >= MAX_TAG_FILTERS {
                break;
            }
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
        tags
    }

    /// Selecting the active tag again clears the filter.
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.active_tag.as_deref() == Some(tag) {
            self.active_tag = None;
        } else {
            self.active_tag = Some(tag.to_string());
        }
    }

    pub fn active_tag(&self) -> Option<&str> {
        self.active_tag.as_deref()
    }

    /// Loaded articles after applying the tag filter.
    pub fn visible(&self) -> Vec<&Article> {
        self.articles
            .data
            .iter()
            .filter(|a| match &self.active_tag {
                Some(tag) => a.tags.iter().any(|t| t == tag),
                None => true,
            })
            .collect()
    }
}
