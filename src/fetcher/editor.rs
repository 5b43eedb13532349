use reqwest::Method;

use crate::api::{endpoint, ApiClient};
use crate::app::{AksharError, Result};
use crate::domain::{Article, ArticleStatus, Draft};
use crate::fetcher::{ensure_writable, settle, FallbackPolicy, Resource, ScopeHandle};

/// Composer for new articles and editor for existing ones.
///
/// Every operation checks, in order, that someone is signed in, that the
/// target is not demo content and that the draft is valid. Nothing is sent
/// until all three pass. The last failure is kept in `error` for display.
pub struct Editor {
    api: ApiClient,
    scope: ScopeHandle,
    pub draft: Draft,
    pub article: Resource<Option<Article>>,
    pub error: Option<String>,
}

impl Editor {
    /// Start a new, empty article.
    pub fn compose(api: ApiClient, scope: ScopeHandle) -> Self {
        Self {
            api,
            scope,
            draft: Draft::default(),
            article: Resource::new(),
            error: None,
        }
    }

    /// Edit an article that is already in hand.
    pub fn open(api: ApiClient, scope: ScopeHandle, article: Article) -> Self {
        let mut editor = Self::compose(api, scope);
        editor.draft = Draft::from_article(&article);
        editor.article.resolve(Some(article));
        editor
    }

    pub fn id(&self) -> Option<&str> {
        self.article.data.as_ref().map(|a| a.id.as_str())
    }

    pub fn status(&self) -> Option<ArticleStatus> {
        self.article.data.as_ref().map(|a| a.status)
    }

    /// Fetch an article by id and fill the draft from it.
    pub async fn load(&mut self, id: &str) -> Result<()> {
        self.api.session().require_auth()?;
        ensure_writable(id)?;

        let api = &self.api;
        let request = async move {
            let path = endpoint(&["blogs", id])?;
            api.get::<Article>(&path).await.map(Some)
        };
        settle(&mut self.article, &self.scope, FallbackPolicy::Strict, request, || None).await?;

        match (&self.article.data, &self.article.error) {
            (Some(article), _) => {
                self.draft = Draft::from_article(article);
                self.error = None;
            }
            (None, Some(e)) => self.error = Some(e.user_message()),
            (None, None) => {}
        }
        Ok(())
    }

    /// Create the article as a draft.
    pub async fn save_draft(&mut self) -> Result<Article> {
        let result = self.create(false).await;
        self.record(result)
    }

    /// Create the article and publish it straight away.
    pub async fn publish_new(&mut self) -> Result<Article> {
        let result = self.create(true).await;
        self.record(result)
    }

    /// Save edits to the loaded article.
    pub async fn save_changes(&mut self) -> Result<Article> {
        let result = self.update(false).await;
        self.record(result)
    }

    /// Save edits to the loaded article and publish it.
    pub async fn publish_existing(&mut self) -> Result<Article> {
        let result = self.update(true).await;
        self.record(result)
    }

    /// Move the loaded article to the archive. Archiving is one-way.
    pub async fn archive(&mut self) -> Result<()> {
        let result = self.archive_loaded().await;
        self.record(result)
    }

    pub async fn delete(&mut self) -> Result<()> {
        let result = self.delete_loaded().await;
        self.record(result)
    }

    /// Once the POST has succeeded the article exists on the backend, so a
    /// repeated call (e.g. after a failed publish) updates it instead.
    async fn create(&mut self, publish: bool) -> Result<Article> {
        if self.id().is_some() {
            return self.update(publish).await;
        }
        self.api.session().require_auth()?;
        if publish {
            self.draft.validate_for_publish()?;
        } else {
            self.draft.validate_for_save()?;
        }

        let mut article: Article = self.scope.run(self.api.post("/blogs", &self.draft)).await?;
        self.article.resolve(Some(article.clone()));
        if publish {
            let path = endpoint(&["blogs", article.id.as_str(), "publish"])?;
            self.scope.run(self.api.action(Method::PATCH, &path)).await?;
            article.status = ArticleStatus::Published;
            self.article.resolve(Some(article.clone()));
            tracing::info!(id = %article.id, slug = %article.slug, "Published article");
        } else {
            tracing::info!(id = %article.id, "Saved draft");
        }
        Ok(article)
    }

    async fn update(&mut self, publish: bool) -> Result<Article> {
        self.api.session().require_auth()?;
        let id = self.loaded_id()?;
        ensure_writable(&id)?;
        if publish && self.status() == Some(ArticleStatus::Archived) {
            return Err(AksharError::Validation(
                "Archived articles cannot be published".into(),
            ));
        }
        if publish {
            self.draft.validate_for_publish()?;
        } else {
            self.draft.validate_for_save()?;
        }

        let path = endpoint(&["blogs", id.as_str()])?;
        let mut article: Article = self.scope.run(self.api.put(&path, &self.draft)).await?;
        if publish {
            let path = endpoint(&["blogs", id.as_str(), "publish"])?;
            self.scope.run(self.api.action(Method::PATCH, &path)).await?;
            article.status = ArticleStatus::Published;
            tracing::info!(id = %id, "Published article");
        }

        self.article.resolve(Some(article.clone()));
        Ok(article)
    }

    async fn archive_loaded(&mut self) -> Result<()> {
        self.api.session().require_auth()?;
        let id = self.loaded_id()?;
        ensure_writable(&id)?;
        if !self.status().is_some_and(ArticleStatus::can_archive) {
            return Err(AksharError::Validation("Article is already archived".into()));
        }

        let path = endpoint(&["blogs", id.as_str(), "archive"])?;
        self.scope.run(self.api.action(Method::PATCH, &path)).await?;
        if let Some(article) = self.article.data.as_mut() {
            article.status = ArticleStatus::Archived;
        }
        tracing::info!(id = %id, "Archived article");
        Ok(())
    }

    async fn delete_loaded(&mut self) -> Result<()> {
        self.api.session().require_auth()?;
        let id = self.loaded_id()?;
        ensure_writable(&id)?;

        let path = endpoint(&["blogs", id.as_str()])?;
        self.scope.run(self.api.delete(&path)).await?;
        self.article.resolve(None);
        self.draft = Draft::default();
        tracing::info!(id = %id, "Deleted article");
        Ok(())
    }

    fn loaded_id(&self) -> Result<String> {
        self.id()
            .map(String::from)
            .ok_or_else(|| AksharError::Validation("No article is open".into()))
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.error = None,
            Err(AksharError::Cancelled) => {}
            Err(e) => {
                tracing::warn!("Editor action failed: {}", e);
                self.error = Some(e.user_message());
            }
        }
        result
    }
}
