use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use rusqlite_migration::{Migrations, M};

use crate::app::{GazetteError, Result};
use crate::domain::{Article, Category};
use crate::store::Store;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|e| GazetteError::Other(format!("migration failed: {}", e)))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            GazetteError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }

    fn article_from_row(row: &Row<'_>) -> rusqlite::Result<Article> {
        let category: String = row.get(4)?;
        let tags: String = row.get(10)?;

        Ok(Article {
            id: row.get(0)?,
            headline: row.get(1)?,
            summary: row.get(2)?,
            source: row.get(3)?,
            // A tag the enum doesn't know means the row predates a schema
            // change or was edited by hand; surface it instead of guessing.
            category: category.parse::<Category>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, e.into())
            })?,
            url: row.get(5)?,
            author: row.get(6)?,
            image_url: row.get(7)?,
            content: row.get(8)?,
            published_at: row
                .get::<_, Option<String>>(9)?
                .and_then(|s| Self::parse_datetime(&s)),
            tags: serde_json::from_str(&tags).unwrap_or_default(),
            is_read: row.get::<_, i32>(11)? != 0,
            is_bookmarked: row.get::<_, i32>(12)? != 0,
            cached_at: row
                .get::<_, Option<String>>(13)?
                .and_then(|s| Self::parse_datetime(&s)),
        })
    }
}

const ARTICLE_COLUMNS: &str = "id, headline, summary, source, category, url, author, image_url, \
                               content, published_at, tags, is_read, is_bookmarked, cached_at";

impl Store for SqliteStore {
    fn save_articles(&self, articles: &[Article]) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let now = Utc::now();

        for article in articles {
            let tags = serde_json::to_string(&article.tags)
                .map_err(|e| GazetteError::Other(format!("tags serialization: {}", e)))?;

            tx.execute(
                "INSERT OR REPLACE INTO articles
                 (id, headline, summary, source, category, url, author, image_url,
                  content, published_at, tags, is_read, is_bookmarked, cached_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    article.id,
                    article.headline,
                    article.summary,
                    article.source,
                    article.category.as_str(),
                    article.url,
                    article.author,
                    article.image_url,
                    article.content,
                    article.published_at.map(|dt| dt.to_rfc3339()),
                    tags,
                    article.is_read as i32,
                    article.is_bookmarked as i32,
                    now.to_rfc3339(),
                ],
            )?;
        }

        tx.commit()?;
        Ok(articles.len())
    }

    fn get_articles(
        &self,
        category: Option<Category>,
        max_age_hours: Option<i64>,
        limit: usize,
    ) -> Result<Vec<Article>> {
        let conn = self.conn()?;

        let mut sql = format!("SELECT {} FROM articles", ARTICLE_COLUMNS);
        let mut clauses = Vec::new();
        let mut args: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(category) = category {
            args.push(Box::new(category.as_str()));
            clauses.push(format!("category = ?{}", args.len()));
        }
        if let Some(hours) = max_age_hours {
            let cutoff = Utc::now() - Duration::hours(hours);
            args.push(Box::new(cutoff.to_rfc3339()));
            // Strict: max_age_hours = 0 matches nothing.
            clauses.push(format!("cached_at > ?{}", args.len()));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        args.push(Box::new(limit as i64));
        sql.push_str(&format!(" ORDER BY published_at DESC LIMIT ?{}", args.len()));

        let mut stmt = conn.prepare(&sql)?;
        let articles = stmt
            .query_map(
                params_from_iter(args.iter().map(|a| a.as_ref())),
                Self::article_from_row,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(articles)
    }

    fn get_article(&self, id: &str) -> Result<Option<Article>> {
        let conn = self.conn()?;

        let result = conn
            .query_row(
                &format!("SELECT {} FROM articles WHERE id = ?1", ARTICLE_COLUMNS),
                params![id],
                Self::article_from_row,
            )
            .optional()?;

        Ok(result)
    }

    fn mark_read(&self, id: &str, read: bool) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE articles SET is_read = ?1 WHERE id = ?2",
            params![read as i32, id],
        )?;
        Ok(())
    }

    fn mark_bookmarked(&self, id: &str, bookmarked: bool) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE articles SET is_bookmarked = ?1 WHERE id = ?2",
            params![bookmarked as i32, id],
        )?;
        Ok(())
    }

    fn get_bookmarked(&self, limit: usize) -> Result<Vec<Article>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM articles WHERE is_bookmarked = 1
             ORDER BY published_at DESC LIMIT ?1",
            ARTICLE_COLUMNS
        ))?;

        let articles = stmt
            .query_map(params![limit], Self::article_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(articles)
    }

    fn update_content(&self, id: &str, content: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE articles SET content = ?1 WHERE id = ?2",
            params![content, id],
        )?;
        Ok(())
    }

    fn prune(&self, older_than_days: i64) -> Result<usize> {
        let conn = self.conn()?;
        let cutoff = (Utc::now() - Duration::days(older_than_days)).to_rfc3339();

        let deleted = conn.execute("DELETE FROM articles WHERE cached_at < ?1", params![cutoff])?;
        Ok(deleted)
    }

    fn clear(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM articles", [])?;
        Ok(())
    }
}
