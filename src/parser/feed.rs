use chrono::Utc;
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::domain::{Article, Category};

/// Parse an RSS/Atom body into normalized articles.
///
/// Best-effort: a body that cannot be parsed at all yields an empty Vec with
/// a warning, never an error. Entries missing a title or link are still
/// included with whatever fields are present; completeness is the
/// aggregator's concern, not the parser's.
pub fn parse_feed(body: &str, source_name: &str, category: Category, limit: usize) -> Vec<Article> {
    let feed = match parser::parse(body.as_bytes()) {
        Ok(feed) => feed,
        Err(e) => {
            tracing::warn!("Feed parse warning from {}: {}", source_name, e);
            return Vec::new();
        }
    };

    feed.entries
        .into_iter()
        .take(limit)
        .map(|entry| {
            let link = entry.links.first().map(|l| l.href.clone());
            let title = entry
                .title
                .map(|t| decode_html_entities(&t.content).to_string())
                .unwrap_or_default();
            let summary = entry
                .summary
                .map(|s| decode_html_entities(&s.content).to_string())
                .unwrap_or_default();

            // Identity precedence: entry id, else permalink, else title.
            let id = if !entry.id.is_empty() {
                entry.id.clone()
            } else if let Some(ref link) = link {
                link.clone()
            } else {
                title.clone()
            };

            let mut article = Article::new(
                id,
                &title,
                &summary,
                source_name,
                category,
                link.unwrap_or_default(),
            );

            article.author = entry.authors.first().map(|a| a.name.clone());
            article.image_url = entry
                .media
                .iter()
                .find_map(|m| m.thumbnails.first())
                .map(|t| t.image.uri.clone());
            article.published_at = entry
                .published
                .or(entry.updated)
                .map(|dt| dt.with_timezone(&Utc));
            article.tags = entry.categories.into_iter().map(|c| c.term).collect();

            article
        })
        .collect()
}
