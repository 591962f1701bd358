pub mod article;
pub mod category;
pub mod source;

pub use article::Article;
pub use category::Category;
pub use source::{FeedSource, ScrapeSource};
