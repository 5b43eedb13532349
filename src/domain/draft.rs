use serde::Serialize;

use crate::app::{AksharError, Result};
use crate::domain::Article;

pub const MAX_TAGS: usize = 5;

/// Editable fields of an article, as held by the composer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub title: String,
    pub content: String,
    tags: Vec<String>,
}

impl Draft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }

    pub fn from_article(article: &Article) -> Self {
        let mut draft = Self::new(article.title.clone(), article.content.clone());
        for tag in &article.tags {
            draft.add_tag(tag);
        }
        draft
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Adds a trimmed, lower-cased tag. Empty input, duplicates and tags past
    /// the fifth are ignored; returns whether the tag was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || self.tags.len() >= MAX_TAGS || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn validate_for_save(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AksharError::Validation("Title is required".into()));
        }
        Ok(())
    }

    pub fn validate_for_publish(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(AksharError::Validation(
                "Title and content are required to publish".into(),
            ));
        }
        Ok(())
    }
}
