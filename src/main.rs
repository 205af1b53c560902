use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;

use moviefinder::cli::{Cli, Command};
use moviefinder::config::{Config, ConfigStore, API_KEY_ENV_VAR};
use moviefinder::favorites::FavoritesStore;
use moviefinder::headless;
use moviefinder::logging::{init_file_tracing, init_tracing};
use moviefinder::omdb::OmdbClient;
use moviefinder::search::{SearchOrchestrator, SearchSettings};
use moviefinder::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use moviefinder::ui::app::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid command line override")?;

    match &command {
        Command::Tui { .. } => init_file_tracing(&config.log_path())
            .with_context(|| format!("Failed to open log file {}", config.log_path().display()))?,
        Command::Search { .. } | Command::Favorites => init_tracing(),
    }

    let (favorites_storage, theme_storage) = open_storage(&cli, &config);
    let favorites = FavoritesStore::load(favorites_storage);

    if let Command::Favorites = command {
        return headless::print_favorites(&favorites, &mut io::stdout().lock());
    }

    let api_key = cli.api_key(&config).ok_or_else(|| {
        anyhow!(
            "No OMDb API key configured. Pass --api-key, set {}, or add api.api_key to {}",
            API_KEY_ENV_VAR,
            config_path.display()
        )
    })?;
    let client = OmdbClient::new(&config.api, api_key).context("Failed to build HTTP client")?;
    let settings = SearchSettings::from(&config.search);
    let (mut orchestrator, mut events) = SearchOrchestrator::new(Arc::new(client), favorites, settings);

    match command {
        Command::Search {
            query,
            genre,
            pages,
        } => {
            headless::run_search(
                &mut orchestrator,
                &mut events,
                &query,
                genre,
                pages,
                &mut io::stdout().lock(),
            )
            .await
        }
        Command::Tui { query } => {
            if let Some(query) = query {
                orchestrator.set_query(query);
            }
            let tick_rate = Duration::from_millis(config.ui.tick_rate_ms.max(1));
            let store = ConfigStore::new(config, config_path);
            let app = App::new(orchestrator, store, theme_storage);
            tracing::info!("Starting terminal UI");
            moviefinder::ui::run(app, events, tick_rate)
                .await
                .context("Terminal UI failed")
        }
        Command::Favorites => Ok(()),
    }
}

/// Favorites and theme share one backing store.
fn open_storage(cli: &Cli, config: &Config) -> (Box<dyn KeyValueStore>, Box<dyn KeyValueStore>) {
    if cli.no_persist {
        let memory = MemoryStore::new();
        return (Box::new(memory.clone()), Box::new(memory));
    }
    let file = JsonFileStore::new(config.storage_path());
    tracing::debug!(path = %file.path().display(), "Using storage file");
    (Box::new(file.clone()), Box::new(file))
}
