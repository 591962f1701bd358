pub mod commands;

use clap::{Parser, Subcommand};

use crate::domain::Category;

#[derive(Parser)]
#[command(name = "gazette")]
#[command(about = "A category-driven news aggregator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List articles for a category, fetching live when the cache is stale
    List {
        /// Category tag (e.g. tech, world, agentic_ai)
        category: Category,

        /// Skip the cache and fetch live
        #[arg(long)]
        refresh: bool,
    },
    /// Fetch sources and refresh the cache
    Refresh {
        /// Category tag; all configured categories when omitted
        category: Option<Category>,
    },
    /// Show a single cached article
    Show {
        /// Article id
        id: String,

        /// Fetch and store the full article content
        #[arg(long)]
        content: bool,

        /// Open the article URL in the browser
        #[arg(long)]
        open: bool,
    },
    /// Mark an article as read
    Read {
        /// Article id
        id: String,

        /// Mark as unread instead
        #[arg(long)]
        undo: bool,
    },
    /// Bookmark an article
    Bookmark {
        /// Article id
        id: String,

        /// Remove the bookmark instead
        #[arg(long)]
        undo: bool,
    },
    /// List bookmarked articles
    Bookmarks,
    /// List configured sources
    Sources {
        /// Only sources serving this category
        category: Option<Category>,
    },
    /// Delete cached articles older than the cutoff
    Prune {
        /// Age cutoff in days (defaults to the configured prune_days)
        #[arg(long)]
        days: Option<i64>,
    },
    /// Clear the article cache
    Clear,
}
