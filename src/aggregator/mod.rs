use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::app::FetchError;
use crate::domain::{Article, Category, FeedSource, ScrapeSource};
use crate::fetcher::Fetcher;
use crate::parser;

pub const DEFAULT_WORKERS: usize = 10;

/// Fans fetch+parse tasks out across all sources for a category and joins
/// them into one deduplicated article list.
pub struct Aggregator {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Arc<Semaphore>,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_workers(fetcher, DEFAULT_WORKERS)
    }

    pub fn with_workers(fetcher: Arc<dyn Fetcher + Send + Sync>, workers: usize) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers)),
        }
    }

    /// Fetch all sources for a category concurrently and merge the results.
    ///
    /// One task per source, feed sources first in config order, then scrape
    /// sources. Tasks are joined in submission order, so completion timing
    /// never affects output order. A failed source is logged and contributes
    /// zero articles; duplicates by `id` are dropped, first occurrence wins.
    /// No sources, or all sources failing, yields an empty Vec, not an error.
    pub async fn fetch_category(
        &self,
        feeds: &[FeedSource],
        scrapes: &[ScrapeSource],
        category: Category,
        limit_per_source: usize,
    ) -> Vec<Article> {
        if feeds.is_empty() && scrapes.is_empty() {
            tracing::debug!("No sources configured for {}", category);
            return Vec::new();
        }

        let mut handles = Vec::new();

        for feed in feeds {
            let fetcher = self.fetcher.clone();
            let semaphore = self.semaphore.clone();
            let name = feed.name.clone();
            let url = feed.url.clone();

            handles.push((
                name.clone(),
                tokio::spawn(async move {
                    let _permit = semaphore.acquire().await.expect("Semaphore closed");
                    let body = fetcher.fetch(&url).await?;
                    Ok::<_, FetchError>(parser::parse_feed(&body, &name, category, limit_per_source))
                }),
            ));
        }

        for scrape in scrapes {
            let fetcher = self.fetcher.clone();
            let semaphore = self.semaphore.clone();
            let name = scrape.name.clone();
            let url = scrape.url.clone();
            let selector = scrape.selector.clone();

            handles.push((
                name.clone(),
                tokio::spawn(async move {
                    let _permit = semaphore.acquire().await.expect("Semaphore closed");
                    let body = fetcher.fetch(&url).await?;
                    Ok::<_, FetchError>(parser::parse_scrape(
                        &body,
                        &selector,
                        &url,
                        &name,
                        category,
                        limit_per_source,
                    ))
                }),
            ));
        }

        let total = handles.len();
        let mut failed = 0;
        let mut seen = HashSet::new();
        let mut merged = Vec::new();

        for (name, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Task join error for {}: {}", name, e);
                    failed += 1;
                    continue;
                }
            };

            match result {
                Ok(articles) => {
                    for article in articles {
                        if seen.insert(article.id.clone()) {
                            merged.push(article);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Source {} failed: {}", name, e);
                    failed += 1;
                }
            }
        }

        if failed == total {
            tracing::warn!("All {} sources failed for {}", total, category);
        } else {
            tracing::debug!(
                "Fetched {} articles from {} sources for {} ({} failed)",
                merged.len(),
                total,
                category,
                failed
            );
        }

        merged
    }

    /// Fetch and extract full content for a single article URL.
    ///
    /// This is an explicit caller request, so fetch failures propagate
    /// instead of being swallowed like a fan-out task's.
    pub async fn fetch_article_content(&self, url: &str) -> Result<String, FetchError> {
        let body = self.fetcher.fetch(url).await?;
        Ok(parser::extract_content(&body))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;

    /// Mock fetcher serving canned bodies per URL, with optional per-URL
    /// delays to simulate out-of-order task completion.
    struct MockFetcher {
        bodies: HashMap<String, String>,
        delays: HashMap<String, u64>,
    }

    impl MockFetcher {
        fn new(bodies: &[(&str, &str)]) -> Self {
            Self {
                bodies: bodies
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
                delays: HashMap::new(),
            }
        }

        fn with_delay(mut self, url: &str, millis: u64) -> Self {
            self.delays.insert(url.to_string(), millis);
            self
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            if let Some(&millis) = self.delays.get(url) {
                tokio::time::sleep(Duration::from_millis(millis)).await;
            }
            self.bodies
                .get(url)
                .cloned()
                .ok_or(FetchError::Status(404))
        }
    }

    fn rss_body(guids: &[&str]) -> String {
        let items: String = guids
            .iter()
            .map(|guid| {
                format!(
                    "<item><title>{guid}</title><link>https://example.com/{guid}</link>\
                     <guid>{guid}</guid></item>"
                )
            })
            .collect();
        format!(
            "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>t</title>{items}</channel></rss>"
        )
    }

    fn feed_source(name: &str, url: &str) -> FeedSource {
        FeedSource {
            name: name.into(),
            url: url.into(),
            categories: vec![Category::Tech],
        }
    }

    fn aggregator(fetcher: MockFetcher) -> Aggregator {
        Aggregator::new(Arc::new(fetcher))
    }

    #[tokio::test]
    async fn test_no_sources_yields_empty() {
        let agg = aggregator(MockFetcher::new(&[]));
        let articles = agg.fetch_category(&[], &[], Category::Tech, 10).await;
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_failing_source_contributes_nothing() {
        let fetcher = MockFetcher::new(&[("https://ok.test/feed", &rss_body(&["a", "b"]))]);
        let agg = aggregator(fetcher);

        let feeds = [
            feed_source("broken", "https://broken.test/feed"),
            feed_source("ok", "https://ok.test/feed"),
        ];
        let articles = agg.fetch_category(&feeds, &[], Category::Tech, 10).await;

        assert_eq!(articles.len(), 2);
        assert!(articles.iter().all(|a| a.source == "ok"));
    }

    #[tokio::test]
    async fn test_all_sources_failing_yields_empty() {
        let agg = aggregator(MockFetcher::new(&[]));
        let feeds = [
            feed_source("a", "https://a.test/feed"),
            feed_source("b", "https://b.test/feed"),
        ];
        let articles = agg.fetch_category(&feeds, &[], Category::Tech, 10).await;
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_dedupe_first_source_wins() {
        let fetcher = MockFetcher::new(&[
            ("https://one.test/feed", &rss_body(&["shared", "only-one"])),
            ("https://two.test/feed", &rss_body(&["shared", "only-two"])),
        ]);
        let agg = aggregator(fetcher);

        let feeds = [
            feed_source("one", "https://one.test/feed"),
            feed_source("two", "https://two.test/feed"),
        ];
        let articles = agg.fetch_category(&feeds, &[], Category::Tech, 10).await;

        assert_eq!(articles.len(), 3);
        let shared = articles.iter().find(|a| a.id == "shared").unwrap();
        assert_eq!(shared.source, "one");
    }

    #[tokio::test]
    async fn test_merge_order_independent_of_completion_order() {
        // First source is the slowest; it must still come first in the merge.
        let fetcher = MockFetcher::new(&[
            ("https://slow.test/feed", &rss_body(&["slow-1"])),
            ("https://fast.test/feed", &rss_body(&["fast-1"])),
        ])
        .with_delay("https://slow.test/feed", 50);
        let agg = aggregator(fetcher);

        let feeds = [
            feed_source("slow", "https://slow.test/feed"),
            feed_source("fast", "https://fast.test/feed"),
        ];
        let articles = agg.fetch_category(&feeds, &[], Category::Tech, 10).await;

        let ids: Vec<_> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["slow-1", "fast-1"]);
    }

    #[tokio::test]
    async fn test_scrape_sources_merge_after_feeds() {
        let fetcher = MockFetcher::new(&[
            ("https://feed.test/rss", &rss_body(&["feed-1"])),
            (
                "https://scrape.test",
                r#"<html><body><div class="s"><a href="/page">Scraped</a></div></body></html>"#,
            ),
        ]);
        let agg = aggregator(fetcher);

        let feeds = [feed_source("feed", "https://feed.test/rss")];
        let scrapes = [ScrapeSource {
            name: "scrape".into(),
            url: "https://scrape.test".into(),
            categories: vec![Category::Tech],
            selector: ".s".into(),
        }];
        let articles = agg
            .fetch_category(&feeds, &scrapes, Category::Tech, 10)
            .await;

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].id, "feed-1");
        assert_eq!(articles[1].url, "https://scrape.test/page");
    }

    #[tokio::test]
    async fn test_limit_applies_per_source() {
        let fetcher = MockFetcher::new(&[(
            "https://many.test/feed",
            &rss_body(&["a", "b", "c", "d", "e"]),
        )]);
        let agg = aggregator(fetcher);

        let feeds = [feed_source("many", "https://many.test/feed")];
        let articles = agg.fetch_category(&feeds, &[], Category::Tech, 3).await;

        assert_eq!(articles.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_article_content_propagates_failure() {
        let agg = aggregator(MockFetcher::new(&[]));
        let result = agg.fetch_article_content("https://missing.test/page").await;
        assert!(matches!(result, Err(FetchError::Status(404))));
    }

    #[tokio::test]
    async fn test_fetch_article_content_extracts_article() {
        let fetcher = MockFetcher::new(&[(
            "https://page.test/story",
            "<html><body><article>Body text.</article></body></html>",
        )]);
        let agg = aggregator(fetcher);

        let content = agg
            .fetch_article_content("https://page.test/story")
            .await
            .unwrap();
        assert_eq!(content, "Body text.");
    }
}
