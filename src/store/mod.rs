pub mod sqlite;

use crate::app::Result;
use crate::domain::{Article, Category};

pub use sqlite::SqliteStore;

/// Article cache keyed by article `id`.
///
/// Writes are serialized by the single coordinating flow; implementations
/// only need interior locking, not a concurrent-writer contract.
pub trait Store {
    /// Upsert each article, setting `cached_at` to now.
    ///
    /// On conflict by `id` the full record is replaced, including the
    /// `is_read`/`is_bookmarked` flags. Preserving the flags across a
    /// refresh is a pending product decision; the shipped behavior is a
    /// full overwrite.
    fn save_articles(&self, articles: &[Article]) -> Result<usize>;

    /// Articles matching `category` (if given), cached within
    /// `max_age_hours` of now (if given), newest published first.
    ///
    /// The age bound is a strict inequality, so `max_age_hours = 0` always
    /// returns zero rows.
    fn get_articles(
        &self,
        category: Option<Category>,
        max_age_hours: Option<i64>,
        limit: usize,
    ) -> Result<Vec<Article>>;

    fn get_article(&self, id: &str) -> Result<Option<Article>>;

    /// Point update; a no-op when `id` is absent.
    fn mark_read(&self, id: &str, read: bool) -> Result<()>;

    /// Point update; a no-op when `id` is absent.
    fn mark_bookmarked(&self, id: &str, bookmarked: bool) -> Result<()>;

    fn get_bookmarked(&self, limit: usize) -> Result<Vec<Article>>;

    /// Persist explicitly fetched full content for one article.
    fn update_content(&self, id: &str, content: &str) -> Result<()>;

    /// Delete rows cached before the cutoff; returns rows deleted.
    fn prune(&self, older_than_days: i64) -> Result<usize>;

    /// Delete everything.
    fn clear(&self) -> Result<()>;
}
