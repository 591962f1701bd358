use serde::{Deserialize, Serialize};

use crate::domain::Category;

/// A configured RSS/Atom feed, immutable during a fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
    pub categories: Vec<Category>,
}

/// A configured HTML-scraping source.
///
/// `selector` is a single CSS selector choosing which DOM nodes represent
/// article links; the string-or-mapping config forms are resolved into this
/// at config-load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeSource {
    pub name: String,
    pub url: String,
    pub categories: Vec<Category>,
    pub selector: String,
}
