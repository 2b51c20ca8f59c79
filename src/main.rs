use clap::Parser;
use skindex::{Config, FeedSource, RelatedStrategy};
use std::path::PathBuf;

/// Skindex - browse weapon skins by case, collection and rarity
#[derive(Parser)]
#[command(name = "skindex")]
#[command(version)]
#[command(about = "Browse weapon skins by case, collection and rarity")]
struct Cli {
    /// Item feed: an http(s) URL or a local `.json` / `.json.gz` file
    #[arg(long)]
    feed: Option<String>,

    /// JSON table of related collections (`{"name": ["other", ...]}`);
    /// replaces the shared-knife lookup
    #[arg(long)]
    related_table: Option<PathBuf>,

    /// Start location, e.g. `?collection=Chroma Case` or `?search=doppler`
    #[arg(long, default_value = "")]
    location: String,

    /// Start with the light theme
    #[arg(long)]
    light: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            feed: self
                .feed
                .as_deref()
                .map(FeedSource::parse)
                .unwrap_or_default(),
            related: self
                .related_table
                .map(RelatedStrategy::Table)
                .unwrap_or_default(),
            initial_location: self.location,
            theme_dark: !self.light,
        }
    }
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn main() -> eframe::Result {
    setup_logging();
    let config = Cli::parse().into_config();
    tracing::info!(feed = %config.feed, location = %config.initial_location, "starting");
    skindex::run_gui(config)
}
