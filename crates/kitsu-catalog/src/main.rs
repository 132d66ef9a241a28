//! Kitsu catalog CLI application.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kitsu_catalog::{render, HomeFeed, KitsuClient, ListView, ListingKind, WatchView};
use shared::{Config, LogConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Landing feed: trending, popular, top rated and upcoming
    Home,

    /// One page of a catalog listing
    List {
        /// trending, popular, top-rated or upcoming
        kind: ListingKind,

        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Search shows by title
    Search {
        query: String,

        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// A show's episodes, with one episode selected
    Watch {
        anime_id: String,

        /// Episode number (defaults to the first episode)
        episode: Option<u32>,

        /// Also list related shows
        #[arg(long)]
        related: bool,
    },

    /// Write the default configuration to the config path
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let mut log_config = LogConfig::from_settings(&config.logging, "kitsu-catalog");
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    info!(config_file = %args.config.display(), "Loaded configuration");

    let client = KitsuClient::new(&config.catalog).context("Failed to create Kitsu client")?;
    let catalog = &config.catalog;

    let output = match args.command {
        Command::Home => {
            let mut feed = HomeFeed::new(client, catalog.home_section_limit);
            render::state("Home", feed.refresh().await, render::home)
        }
        Command::List { kind, page } => {
            let mut view = ListView::listing(client, kind, catalog.list_page_size);
            let title = view.target().title();
            render::state(&title, view.load(page).await, |p| render::list_page(&title, p))
        }
        Command::Search { query, page } => {
            let mut view = ListView::search(client, query, catalog.search_page_size);
            let title = view.target().title();
            render::state(&title, view.load(page).await, |p| render::list_page(&title, p))
        }
        Command::Watch {
            anime_id,
            episode,
            related,
        } => {
            let mut view =
                WatchView::new(client, catalog.episode_page_limit, catalog.related_limit);
            let mut output = render::state(
                "Error Loading Episode",
                view.load(&anime_id, episode).await,
                render::watch,
            );
            if related && view.state().data().is_some() {
                let related = render::state(
                    "Related Anime",
                    view.load_related().await,
                    |items| render::related(items),
                );
                output.push('\n');
                output.push_str(&related);
            }
            output
        }
        Command::InitConfig => {
            config
                .save(&args.config)
                .with_context(|| format!("Failed to write {}", args.config.display()))?;
            format!("Wrote configuration to {}", args.config.display())
        }
    };

    println!("{}", output);

    Ok(())
}
