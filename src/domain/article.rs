use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Category;

/// Maximum headline length applied at normalization time.
pub const MAX_HEADLINE_LEN: usize = 300;
/// Maximum summary length applied at normalization time.
pub const MAX_SUMMARY_LEN: usize = 1000;
/// Cap for full-page content extracted without a matching selector.
pub const MAX_CONTENT_LEN: usize = 20000;

/// Canonical normalized article, shared by the feed and scrape paths.
///
/// `id` is the dedupe key and cache primary key: source-provided entry id,
/// else permalink, else title. It must stay stable across repeated fetches of
/// the same logical article so cache upserts and read/bookmark flags line up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub headline: String,
    pub summary: String,
    pub source: String,
    pub category: Category,
    pub url: String,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub content: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    /// Local-only flag, never populated by a fetch.
    pub is_read: bool,
    /// Local-only flag, never populated by a fetch.
    pub is_bookmarked: bool,
    /// Set by the cache store at write time.
    pub cached_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Create a fresh article with truncation applied to headline and summary.
    pub fn new(
        id: impl Into<String>,
        headline: &str,
        summary: &str,
        source: impl Into<String>,
        category: Category,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            headline: truncate(headline, MAX_HEADLINE_LEN),
            summary: truncate(summary, MAX_SUMMARY_LEN),
            source: source.into(),
            category,
            url: url.into(),
            author: None,
            image_url: None,
            content: None,
            published_at: None,
            tags: Vec::new(),
            is_read: false,
            is_bookmarked: false,
            cached_at: None,
        }
    }

    pub fn display_headline(&self) -> &str {
        if self.headline.is_empty() {
            "(untitled)"
        } else {
            &self.headline
        }
    }
}

/// Truncate to at most `max` characters, on a char boundary.
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_truncates_headline_and_summary() {
        let long = "x".repeat(2000);
        let article = Article::new("id", &long, &long, "src", Category::Tech, "url");
        assert_eq!(article.headline.chars().count(), MAX_HEADLINE_LEN);
        assert_eq!(article.summary.chars().count(), MAX_SUMMARY_LEN);
    }

    #[test]
    fn test_new_leaves_short_fields_alone() {
        let article = Article::new("id", "Headline", "Summary", "src", Category::Us, "url");
        assert_eq!(article.headline, "Headline");
        assert_eq!(article.summary, "Summary");
    }

    #[test]
    fn test_flags_start_unset() {
        let article = Article::new("id", "h", "s", "src", Category::World, "url");
        assert!(!article.is_read);
        assert!(!article.is_bookmarked);
        assert!(article.cached_at.is_none());
        assert!(article.content.is_none());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "héllo wörld";
        assert_eq!(truncate(s, 4), "héll");
        assert_eq!(truncate(s, 100), s);
    }

    #[test]
    fn test_display_headline_fallback() {
        let article = Article::new("id", "", "s", "src", Category::Tech, "url");
        assert_eq!(article.display_headline(), "(untitled)");
    }
}
