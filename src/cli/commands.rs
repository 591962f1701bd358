use crate::app::{AppContext, GazetteError, Result};
use crate::domain::{Article, Category};
use crate::store::Store;

/// Cache-first listing: fresh cached articles when available, a live fetch
/// (stored back into the cache) otherwise.
pub async fn list(ctx: &AppContext, category: Category, force_refresh: bool) -> Result<()> {
    let cache = &ctx.config.cache;

    if !force_refresh {
        let cached = ctx.store.get_articles(
            Some(category),
            Some(cache.max_age_hours),
            cache.max_articles,
        )?;
        if !cached.is_empty() {
            print_articles(&cached);
            return Ok(());
        }
    }

    let articles = fetch_and_store(ctx, category).await?;
    if articles.is_empty() {
        println!("No articles for {}", category.display_name());
    } else {
        print_articles(&articles);
    }

    Ok(())
}

/// Force a live fetch for one category, or for every configured category.
pub async fn refresh(ctx: &AppContext, category: Option<Category>) -> Result<()> {
    let categories = match category {
        Some(c) => vec![c],
        None => ctx.config.configured_categories(),
    };

    if categories.is_empty() {
        println!("No sources configured");
        return Ok(());
    }

    for category in categories {
        let articles = fetch_and_store(ctx, category).await?;
        println!(
            "{}: {} articles",
            category.display_name(),
            articles.len()
        );
    }

    Ok(())
}

async fn fetch_and_store(ctx: &AppContext, category: Category) -> Result<Vec<Article>> {
    let feeds = ctx.config.feeds_for_category(category);
    let scrapes = ctx.config.scrape_sources_for_category(category);

    let articles = ctx
        .aggregator
        .fetch_category(
            &feeds,
            &scrapes,
            category,
            ctx.config.fetch.limit_per_source,
        )
        .await;

    if !articles.is_empty() {
        ctx.store.save_articles(&articles)?;
    }

    Ok(articles)
}

pub async fn show(ctx: &AppContext, id: &str, fetch_content: bool, open_url: bool) -> Result<()> {
    let mut article = ctx
        .store
        .get_article(id)?
        .ok_or_else(|| GazetteError::ArticleNotFound(id.to_string()))?;

    if fetch_content {
        let content = ctx.aggregator.fetch_article_content(&article.url).await?;
        ctx.store.update_content(&article.id, &content)?;
        article.content = Some(content);
    }

    println!("{}", article.display_headline());
    println!("{} | {}", article.source, article.category.display_name());
    if let Some(date) = article.published_at {
        println!("{}", date.format("%Y-%m-%d %H:%M"));
    }
    if let Some(ref author) = article.author {
        println!("by {}", author);
    }
    println!("{}", article.url);
    if !article.summary.is_empty() {
        println!("\n{}", article.summary);
    }
    if let Some(ref content) = article.content {
        println!("\n{}", content);
    }

    if open_url {
        open::that(&article.url)?;
    }

    Ok(())
}

pub fn mark_read(ctx: &AppContext, id: &str, read: bool) -> Result<()> {
    ctx.store.mark_read(id, read)?;
    println!("{} {}", if read { "Read" } else { "Unread" }, id);
    Ok(())
}

pub fn mark_bookmarked(ctx: &AppContext, id: &str, bookmarked: bool) -> Result<()> {
    ctx.store.mark_bookmarked(id, bookmarked)?;
    println!(
        "{} {}",
        if bookmarked {
            "Bookmarked"
        } else {
            "Unbookmarked"
        },
        id
    );
    Ok(())
}

pub fn bookmarks(ctx: &AppContext) -> Result<()> {
    let articles = ctx.store.get_bookmarked(ctx.config.cache.max_articles)?;

    if articles.is_empty() {
        println!("No bookmarks");
        return Ok(());
    }

    print_articles(&articles);
    Ok(())
}

pub fn sources(ctx: &AppContext, category: Option<Category>) -> Result<()> {
    let categories = match category {
        Some(c) => vec![c],
        None => ctx.config.configured_categories(),
    };

    for category in categories {
        let feeds = ctx.config.feeds_for_category(category);
        let scrapes = ctx.config.scrape_sources_for_category(category);
        if feeds.is_empty() && scrapes.is_empty() {
            continue;
        }

        println!("{}:", category.display_name());
        for feed in feeds {
            println!("  {} (feed)\n    {}", feed.name, feed.url);
        }
        for scrape in scrapes {
            println!(
                "  {} (scrape, {})\n    {}",
                scrape.name, scrape.selector, scrape.url
            );
        }
    }

    Ok(())
}

pub fn prune(ctx: &AppContext, days: Option<i64>) -> Result<()> {
    let days = days.unwrap_or(ctx.config.cache.prune_days);
    let deleted = ctx.store.prune(days)?;
    println!("Pruned {} articles older than {} days", deleted, days);
    Ok(())
}

pub fn clear(ctx: &AppContext) -> Result<()> {
    ctx.store.clear()?;
    println!("Cache cleared");
    Ok(())
}

fn print_articles(articles: &[Article]) {
    for article in articles {
        let read_marker = if article.is_read { " " } else { "●" };
        let bookmark_marker = if article.is_bookmarked { "★" } else { " " };
        let date = article
            .published_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "          ".to_string());

        println!(
            "{}{} {} [{}] {}",
            read_marker,
            bookmark_marker,
            date,
            article.source,
            article.display_headline()
        );
        println!("     id: {}", article.id);
    }
}
