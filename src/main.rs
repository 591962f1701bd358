use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gazette::app::AppContext;
use gazette::cli::{commands, Cli, Commands};
use gazette::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::List { category, refresh } => {
            commands::list(&ctx, category, refresh).await?;
        }
        Commands::Refresh { category } => {
            commands::refresh(&ctx, category).await?;
        }
        Commands::Show { id, content, open } => {
            commands::show(&ctx, &id, content, open).await?;
        }
        Commands::Read { id, undo } => {
            commands::mark_read(&ctx, &id, !undo)?;
        }
        Commands::Bookmark { id, undo } => {
            commands::mark_bookmarked(&ctx, &id, !undo)?;
        }
        Commands::Bookmarks => {
            commands::bookmarks(&ctx)?;
        }
        Commands::Sources { category } => {
            commands::sources(&ctx, category)?;
        }
        Commands::Prune { days } => {
            commands::prune(&ctx, days)?;
        }
        Commands::Clear => {
            commands::clear(&ctx)?;
        }
    }

    Ok(())
}
