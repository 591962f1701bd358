use scraper::{ElementRef, Html, Selector};

use crate::domain::article::{truncate, MAX_CONTENT_LEN};
use crate::domain::{Article, Category};

/// Fixed summary marking an article as scraped; no summary extraction is
/// attempted on this path.
pub const SCRAPED_SUMMARY: &str = "(scraped)";

/// Selectors tried in order when extracting full article content.
const CONTENT_SELECTORS: [&str; 4] = ["article", ".article-body", ".post-content", ".entry-content"];

/// Scrape article links out of an HTML body using a CSS selector.
///
/// Each matched node contributes its anchor (the node itself if it is an
/// `<a>`, else its first descendant `<a>`); nodes without a resolvable href
/// are skipped. Relative hrefs starting with `/` are resolved against
/// `base_url`. Best-effort: an invalid selector yields an empty Vec with a
/// warning.
pub fn parse_scrape(
    body: &str,
    selector: &str,
    base_url: &str,
    source_name: &str,
    category: Category,
    limit: usize,
) -> Vec<Article> {
    let selector = match Selector::parse(selector) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Invalid selector for {}: {}", source_name, e);
            return Vec::new();
        }
    };
    let anchor = Selector::parse("a").expect("static selector");

    let document = Html::parse_document(body);
    let mut articles = Vec::new();

    for element in document.select(&selector).take(limit) {
        let link = if element.value().name() == "a" {
            Some(element)
        } else {
            element.select(&anchor).next()
        };

        let Some(link) = link else { continue };
        let Some(href) = link.value().attr("href").filter(|h| !h.is_empty()) else {
            continue;
        };

        let url = resolve_href(base_url, href);
        let headline = element_text(link);

        articles.push(Article::new(
            url.clone(),
            &headline,
            SCRAPED_SUMMARY,
            source_name,
            category,
            url,
        ));
    }

    articles
}

/// Extract full article content from an HTML body.
///
/// Tries common article selectors in priority order; when none match, falls
/// back to the whole document's text capped at `MAX_CONTENT_LEN` characters.
pub fn extract_content(body: &str) -> String {
    let document = Html::parse_document(body);

    for selector in CONTENT_SELECTORS {
        let selector = Selector::parse(selector).expect("static selector");
        if let Some(element) = document.select(&selector).next() {
            let text = element_text(element);
            if !text.is_empty() {
                return text;
            }
        }
    }

    let text = document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    truncate(&text, MAX_CONTENT_LEN)
}

/// Resolve root-relative hrefs against the source's base URL by simple
/// concatenation; everything else passes through unchanged.
fn resolve_href(base_url: &str, href: &str) -> String {
    if href.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    } else {
        href.to_string()
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML_SAMPLE: &str = r#"<html><body>
      <div class="story"><a href="https://example.com/one">Story One</a></div>
      <div class="story"><h2><a href="/two">Story Two</a></h2></div>
      <div class="story"><span>No link here</span></div>
      <div class="story"><a href="https://example.com/three">Story Three</a></div>
    </body></html>"#;

    #[test]
    fn test_scrape_direct_and_nested_anchors() {
        let articles = parse_scrape(
            HTML_SAMPLE,
            ".story",
            "https://example.com",
            "scrape-src",
            Category::Tech,
            10,
        );

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].headline, "Story One");
        assert_eq!(articles[0].url, "https://example.com/one");
        assert_eq!(articles[0].id, articles[0].url);
        assert_eq!(articles[0].summary, SCRAPED_SUMMARY);
    }

    #[test]
    fn test_scrape_resolves_relative_hrefs() {
        let articles = parse_scrape(
            HTML_SAMPLE,
            ".story",
            "https://example.com/",
            "scrape-src",
            Category::Tech,
            10,
        );

        assert_eq!(articles[1].url, "https://example.com/two");
    }

    #[test]
    fn test_scrape_anchor_selector() {
        let articles = parse_scrape(
            HTML_SAMPLE,
            ".story a",
            "https://example.com",
            "scrape-src",
            Category::Us,
            10,
        );

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[2].headline, "Story Three");
    }

    #[test]
    fn test_scrape_limit_applies_to_selected_nodes() {
        let articles = parse_scrape(
            HTML_SAMPLE,
            ".story",
            "https://example.com",
            "scrape-src",
            Category::Tech,
            2,
        );

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].headline, "Story One");
        assert_eq!(articles[1].headline, "Story Two");
    }

    #[test]
    fn test_invalid_selector_yields_empty() {
        let articles = parse_scrape(
            HTML_SAMPLE,
            ":::not-a-selector",
            "https://example.com",
            "scrape-src",
            Category::Tech,
            10,
        );

        assert!(articles.is_empty());
    }

    #[test]
    fn test_extract_content_prefers_article_element() {
        let html = r#"<html><body>
          <nav>Navigation</nav>
          <article>The real content.</article>
        </body></html>"#;

        assert_eq!(extract_content(html), "The real content.");
    }

    #[test]
    fn test_extract_content_falls_back_to_document_text() {
        let html = "<html><body><p>Just a paragraph.</p></body></html>";
        assert_eq!(extract_content(html), "Just a paragraph.");
    }
}
