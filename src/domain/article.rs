use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use html_escape::decode_html_entities;
use serde::{Deserialize, Serialize};

use crate::domain::user::{id_set, User};
use crate::fallback;

const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Published,
    Archived,
}

impl ArticleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
            ArticleStatus::Archived => "archived",
        }
    }

    /// Archiving is one-way; everything except an archived article may be archived.
    pub fn can_archive(self) -> bool {
        self != ArticleStatus::Archived
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: ArticleStatus,
    pub author: User,
    #[serde(default, deserialize_with = "id_set")]
    pub likes: BTreeSet<String>,
    #[serde(default)]
    pub likes_count: u32,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Bundled demo articles are identified by their reserved prefix.
    pub fn is_demo(&self) -> bool {
        fallback::is_fallback(&self.slug) || fallback::is_fallback(&self.id)
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.contains(user_id)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.author.id == user_id
    }

    pub fn like_state(&self, viewer: Option<&User>) -> LikeState {
        LikeState {
            liked: viewer.is_some_and(|u| self.is_liked_by(&u.id)),
            count: self.likes_count,
        }
    }

    /// Plain-text preview: tags stripped, entities decoded, whitespace collapsed.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let text = plain_text(&self.content);
        if text.chars().count() <= max_chars {
            return text;
        }
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated.trim_end())
    }

    /// Estimated reading time in minutes, never less than one.
    pub fn reading_time(&self) -> usize {
        let words = plain_text(&self.content).split_whitespace().count();
        words.div_ceil(WORDS_PER_MINUTE).max(1)
    }
}

fn plain_text(html: &str) -> String {
    let mut stripped = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                stripped.push(' ');
            }
            _ if !in_tag => stripped.push(c),
            _ => {}
        }
    }
    decode_html_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Local like flag and counter held by a detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LikeState {
    pub liked: bool,
    pub count: u32,
}

impl LikeState {
    /// Returns false (and leaves the state alone) if already liked.
    pub fn like(&mut self) -> bool {
        if self.liked {
            return false;
        }
        self.liked = true;
        self.count += 1;
        true
    }

    /// Returns false (and leaves the state alone) if not currently liked.
    pub fn unlike(&mut self) -> bool {
        if !self.liked {
            return false;
        }
        self.liked = false;
        self.count = self.count.saturating_sub(1);
        true
    }
}
