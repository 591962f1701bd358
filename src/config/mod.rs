//! Configuration for gazette.
//!
//! Read from `~/.config/gazette/config.toml` at startup. If the file doesn't
//! exist, a commented default configuration is written there. Sources are
//! declared per-name with the category tags they serve; the aggregator never
//! sees the mapping, only the pre-filtered lists produced here.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::domain::{Category, FeedSource, ScrapeSource};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub cache: CacheConfig,
    /// Feed sources by name. BTreeMap keeps per-category lists deterministic.
    pub feeds: BTreeMap<String, RawFeed>,
    /// Scraping sources by name.
    pub scraping: BTreeMap<String, RawScrape>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum entries taken per source.
    pub limit_per_source: usize,
    /// Maximum concurrent fetch tasks.
    pub workers: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            limit_per_source: 10,
            workers: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Database path override; defaults to the platform data directory.
    pub path: Option<PathBuf>,
    /// Cached articles older than this are considered stale on read.
    pub max_age_hours: i64,
    /// Default cutoff for `gazette prune`.
    pub prune_days: i64,
    /// Row bound applied to cache reads.
    pub max_articles: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_age_hours: 24,
            prune_days: 30,
            max_articles: 50,
        }
    }
}

/// A feed source as written in the config file; category tags are plain
/// strings here and validated at the boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeed {
    pub url: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A scraping source as written in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScrape {
    pub url: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub selector: SelectorSpec,
}

/// Selector config accepts a plain string or a named mapping; both collapse
/// to a single selector string at load time.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SelectorSpec {
    One(String),
    Many(BTreeMap<String, String>),
}

impl SelectorSpec {
    /// Resolve to the single selector used for every fetch.
    pub fn resolve(&self) -> Option<&str> {
        match self {
            SelectorSpec::One(s) => Some(s.as_str()),
            SelectorSpec::Many(map) => map.keys().next().map(String::as_str),
        }
    }
}

impl Config {
    /// Load configuration from the default path, writing a commented default
    /// file on first run. Missing fields fall back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Self::parse(Self::default_config_content());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })
    }

    fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<built-in>"),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/gazette/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gazette").join("config.toml"))
    }

    /// Feed sources serving `category`, in name order.
    ///
    /// Unknown category tags and unparseable URLs are skipped with a warning
    /// here so they never reach the aggregator.
    pub fn feeds_for_category(&self, category: Category) -> Vec<FeedSource> {
        self.feeds
            .iter()
            .filter_map(|(name, raw)| {
                let categories = parse_categories(name, &raw.categories);
                if !categories.contains(&category) {
                    return None;
                }
                if Url::parse(&raw.url).is_err() {
                    tracing::warn!("Skipping feed {} with invalid url {}", name, raw.url);
                    return None;
                }
                Some(FeedSource {
                    name: name.clone(),
                    url: raw.url.clone(),
                    categories,
                })
            })
            .collect()
    }

    /// Scraping sources serving `category`, in name order, with the selector
    /// already resolved to a single string.
    pub fn scrape_sources_for_category(&self, category: Category) -> Vec<ScrapeSource> {
        self.scraping
            .iter()
            .filter_map(|(name, raw)| {
                let categories = parse_categories(name, &raw.categories);
                if !categories.contains(&category) {
                    return None;
                }
                if Url::parse(&raw.url).is_err() {
                    tracing::warn!("Skipping scrape source {} with invalid url {}", name, raw.url);
                    return None;
                }
                let Some(selector) = raw.selector.resolve() else {
                    tracing::warn!("Skipping scrape source {} with empty selector map", name);
                    return None;
                };
                Some(ScrapeSource {
                    name: name.clone(),
                    url: raw.url.clone(),
                    categories,
                    selector: selector.to_string(),
                })
            })
            .collect()
    }

    /// Every category at least one source is configured for.
    pub fn configured_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| {
                !self.feeds_for_category(*c).is_empty()
                    || !self.scrape_sources_for_category(*c).is_empty()
            })
            .collect()
    }

    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> &'static str {
        r##"# Gazette configuration
#
# Category tags: breaking, agentic_ai_dev, agentic_ai_business, us, world,
# tech, business, deals, sports, entertainment, science, manufacturing,
# life_sciences, automotive, aviation, ecommerce, agentic_ai

[fetch]
# Per-request timeout in seconds
timeout_secs = 10
# Maximum articles taken per source
limit_per_source = 10
# Maximum concurrent fetches
workers = 10

[cache]
# Cached articles older than this are re-fetched on `list`
max_age_hours = 24
# Default cutoff for `gazette prune`
prune_days = 30
# Maximum rows returned per cache read
max_articles = 50

# Feed sources. Each feed serves one or more categories.
[feeds.hackernews]
url = "https://news.ycombinator.com/rss"
categories = ["tech", "business"]

[feeds.techcrunch]
url = "https://techcrunch.com/feed/"
categories = ["tech", "business"]

[feeds.bbc_tech]
url = "https://feeds.bbci.co.uk/news/technology/rss.xml"
categories = ["tech"]

[feeds.bbc_us]
url = "https://feeds.bbci.co.uk/news/world/us_and_canada/rss.xml"
categories = ["us", "world"]

[feeds.bbc_world]
url = "https://feeds.bbci.co.uk/news/world/rss.xml"
categories = ["world"]

[feeds.bbc_business]
url = "https://feeds.bbci.co.uk/news/business/rss.xml"
categories = ["business"]

[feeds.bbc_science]
url = "https://feeds.bbci.co.uk/news/science_and_environment/rss.xml"
categories = ["science"]

[feeds.bbc_sport]
url = "https://feeds.bbci.co.uk/sport/rss.xml"
categories = ["sports"]

[feeds.bbc_entertainment]
url = "https://feeds.bbci.co.uk/news/entertainment_and_arts/rss.xml"
categories = ["entertainment"]

[feeds.npr_news]
url = "https://feeds.npr.org/1001/rss.xml"
categories = ["us", "world"]

# Scraping sources are disabled by default; scraping is unreliable.
# [scraping.example]
# url = "https://example.com/news"
# categories = ["tech"]
# selector = "h2.headline"
"##
    }
}

fn parse_categories(source_name: &str, tags: &[String]) -> Vec<Category> {
    tags.iter()
        .filter_map(|tag| match tag.parse() {
            Ok(category) => Some(category),
            Err(_) => {
                tracing::warn!("Ignoring unknown category tag {:?} on {}", tag, source_name);
                None
            }
        })
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
