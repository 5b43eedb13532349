//! Bundled demo content shown on public pages when the backend is
//! unreachable.
//!
//! Every slug and id here starts with [`RESERVED_PREFIX`]; the backend never
//! hands out such identifiers, so anything carrying the prefix is known to
//! be local and read-only.

mod articles;

use std::sync::LazyLock;

use crate::domain::Article;

pub const RESERVED_PREFIX: &str = "demo-";

static ARTICLES: LazyLock<Vec<Article>> = LazyLock::new(articles::build);

/// The demo articles, newest first.
pub fn articles() -> &'static [Article] {
    &ARTICLES
}

pub fn by_slug(slug: &str) -> Option<&'static Article> {
    ARTICLES.iter().find(|a| a.slug == slug)
}

/// True for slugs or ids that belong to demo content.
pub fn is_fallback(slug_or_id: &str) -> bool {
    slug_or_id.starts_with(RESERVED_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArticleStatus;

    #[test]
    fn test_five_articles_in_fixed_order() {
        let slugs: Vec<&str> = articles().iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec![
                "demo-art-of-thoughtful-writing",
                "demo-building-communities-around-ideas",
                "demo-philosophy-of-samvaad",
                "demo-designing-for-focus",
                "demo-from-akshar-to-expression",
            ]
        );
    }

    #[test]
    fn test_newest_first() {
        let dates: Vec<_> = articles().iter().map(|a| a.created_at).collect();
        assert!(dates.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_all_reserved_and_published() {
        for article in articles() {
            assert!(is_fallback(&article.slug));
            assert!(is_fallback(&article.id));
            assert!(is_fallback(&article.author.id));
            assert!(article.is_demo());
            assert_eq!(article.status, ArticleStatus::Published);
            assert!(article.tags.len() <= 5);
        }
    }

    #[test]
    fn test_by_slug() {
        let article = by_slug("demo-philosophy-of-samvaad").unwrap();
        assert_eq!(article.title, "The Philosophy of Samvaad: Meaningful Dialogue");
        assert_eq!(article.author.username, "priya-creates");
        assert!(by_slug("unknown").is_none());
    }

    #[test]
    fn test_is_fallback() {
        assert!(is_fallback("demo-001"));
        assert!(!is_fallback("65f0c0ffee"));
        assert!(!is_fallback("my-demo-post"));
    }
}
