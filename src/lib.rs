//! # Gazette
//!
//! A category-driven news aggregator for RSS/Atom feeds and lightweight
//! HTML-scraping sources.
//!
//! ## Architecture
//!
//! Gazette is built around one pipeline:
//!
//! ```text
//! Config → Aggregator → (Fetcher → Parser)ⁿ → dedupe → Store
//! ```
//!
//! A category maps (via config) to a set of sources. The [`aggregator`]
//! fans one fetch+parse task out per source, joins them in submission order,
//! drops duplicate article ids, and hands the merged list to the caller,
//! which persists it through the age-bounded [`store`] cache. A failed
//! source contributes zero articles and never fails the category.
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`domain`]: Core domain models (Article, Category, sources)
//! - [`fetcher`]: HTTP fetching with per-request timeouts
//! - [`parser`]: Feed and scrape normalization into articles
//! - [`aggregator`]: Concurrent fan-out/fan-in with deduplication
//! - [`store`]: SQLite article cache
//! - [`config`]: TOML configuration and category→source mapping
//! - [`cli`]: Command-line interface

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires together config, store, and
/// aggregator; [`GazetteError`](app::GazetteError) is the crate-wide error.
pub mod app;

/// Concurrent fan-out/fan-in across a category's sources.
pub mod aggregator;

/// Command-line interface using clap.
pub mod cli;

/// TOML configuration: fetch/cache settings plus the category→source map.
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): the canonical normalized record
/// - [`Category`](domain::Category): closed topic-tag enum
/// - [`FeedSource`](domain::FeedSource) / [`ScrapeSource`](domain::ScrapeSource)
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait, one GET per call
/// - [`HttpFetcher`](fetcher::HttpFetcher): pooled reqwest implementation
pub mod fetcher;

/// Feed and scrape parsing.
///
/// Converts RSS/Atom bodies ([`parser::parse_feed`]) and selector-scraped
/// HTML ([`parser::parse_scrape`]) into [`Article`](domain::Article)s,
/// best-effort in both cases.
pub mod parser;

/// SQLite article cache.
///
/// - [`Store`](store::Store): trait defining cache operations
/// - [`SqliteStore`](store::SqliteStore): rusqlite implementation
pub mod store;
