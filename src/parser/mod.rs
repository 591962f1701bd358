pub mod feed;
pub mod scrape;

pub use feed::parse_feed;
pub use scrape::{extract_content, parse_scrape};
