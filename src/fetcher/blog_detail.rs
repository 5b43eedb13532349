use reqwest::Method;

use crate::api::{endpoint, ApiClient};
use crate::app::{AksharError, Result};
use crate::domain::{Article, Comment, LikeState, NewComment};
use crate::fallback;
use crate::fetcher::{ensure_writable, optimistic, settle, FallbackPolicy, Resource, ScopeHandle};

/// A single article with its comments (the reading page).
pub struct BlogDetail {
    api: ApiClient,
    scope: ScopeHandle,
    policy: FallbackPolicy,
    slug: String,
    like: LikeState,
    pub article: Resource<Option<Article>>,
    pub comments: Resource<Vec<Comment>>,
}

impl BlogDetail {
    pub fn new(api: ApiClient, scope: ScopeHandle, policy: FallbackPolicy, slug: &str) -> Self {
        Self {
            api,
            scope,
            policy,
            slug: slug.to_string(),
            like: LikeState::default(),
            article: Resource::new(),
            comments: Resource::new(),
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn like_state(&self) -> LikeState {
        self.like
    }

    /// Load the article, then its comments.
    ///
    /// Demo slugs never touch the network. For everything else the
    /// comments request is only issued once the article has resolved.
    pub async fn load(&mut self) -> Result<()> {
        if fallback::is_fallback(&self.slug) {
            self.load_demo();
            return Ok(());
        }

        let slug = self.slug.clone();
        let api = &self.api;
        let request = async move {
            let path = endpoint(&["blogs", "slug", slug.as_str()])?;
            api.get::<Article>(&path).await.map(Some)
        };
        settle(&mut self.article, &self.scope, self.policy, request, || {
            fallback::by_slug(&self.slug).cloned().map(Some)
        })
        .await?;

        self.refresh_like();

        let Some(id) = self.article.data.as_ref().map(|a| a.id.clone()) else {
            return Ok(());
        };
        if self.article.using_fallback {
            self.comments.resolve(Vec::new());
            return Ok(());
        }

        let api = &self.api;
        let request = async move {
            let path = endpoint(&["blogs", id.as_str(), "comments"])?;
            api.get::<Vec<Comment>>(&path).await
        };
        settle(&mut self.comments, &self.scope, FallbackPolicy::Strict, request, || None).await
    }

    fn load_demo(&mut self) {
        match fallback::by_slug(&self.slug) {
            Some(article) => {
                tracing::debug!(slug = %self.slug, "Serving demo article locally");
                self.article.degrade(Some(article.clone()));
                self.comments.resolve(Vec::new());
            }
            None => {
                self.article
                    .fail(AksharError::NotFound(format!("No article at {}", self.slug)));
            }
        }
        self.refresh_like();
    }

    fn refresh_like(&mut self) {
        let session = self.api.session().current();
        self.like = match &self.article.data {
            Some(article) => article.like_state(session.user()),
            None => LikeState::default(),
        };
    }

    /// Like the article if the viewer has not, unlike it otherwise.
    ///
    /// The flag and counter flip immediately and are restored if the
    /// request fails.
    pub async fn toggle_like(&mut self) -> Result<()> {
        self.api.session().require_auth()?;
        let id = self.loaded_id()?;
        ensure_writable(&id)?;

        let before = self.like;
        let action = if before.liked { "unlike" } else { "like" };
        let path = endpoint(&["blogs", id.as_str(), action])?;
        let api = &self.api;

        optimistic(
            &mut self.like,
            &self.scope,
            |state| {
                if before.liked {
                    state.unlike();
                } else {
                    state.like();
                }
            },
            |state| *state = before,
            api.action(Method::POST, &path),
        )
        .await
    }

    /// Post a comment and put it at the top of the list. Blank input is
    /// ignored and returns `None`.
    pub async fn add_comment(&mut self, content: &str) -> Result<Option<Comment>> {
        if content.trim().is_empty() {
            return Ok(None);
        }
        self.api.session().require_auth()?;
        let id = self.loaded_id()?;
        ensure_writable(&id)?;

        let path = endpoint(&["blogs", id.as_str(), "comments"])?;
        let comment: Comment = match self
            .scope
            .run(self.api.post(&path, &NewComment { content }))
            .await
        {
            Ok(comment) => comment,
            Err(AksharError::Cancelled) => return Err(AksharError::Cancelled),
            Err(e) => {
                tracing::warn!("Comment failed: {}", e);
                return Err(e);
            }
        };

        self.comments.data.insert(0, comment.clone());
        Ok(Some(comment))
    }

    fn loaded_id(&self) -> Result<String> {
        self.article
            .data
            .as_ref()
            .map(|a| a.id.clone())
            .ok_or_else(|| AksharError::NotFound(format!("No article at {}", self.slug)))
    }
}
