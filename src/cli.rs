//! Command line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "moviefinder", version)]
#[command(about = "Search OMDb for movies and keep a local list of favorites", long_about = None)]
pub struct Cli {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// OMDb API key; overrides OMDB_API_KEY and the config file
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Keep favorites and theme in memory only
    #[arg(long, global = true)]
    pub no_persist: bool,

    /// Debounce delay for typed queries, in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Initial query for the terminal UI
    pub query: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive terminal UI (the default)
    Tui {
        /// Initial query
        query: Option<String>,
    },
    /// Run one search and print the results
    Search {
        query: String,

        /// Keep only movies whose genre list contains this genre
        #[arg(long)]
        genre: Option<String>,

        /// Number of result pages to fetch
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Print saved favorites
    Favorites,
}

impl Cli {
    /// The subcommand to run, with a bare `QUERY` meaning `tui QUERY`.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_else(|| Command::Tui {
            query: self.query.clone(),
        })
    }

    /// Apply flag overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ms) = self.debounce_ms {
            config.search.debounce_ms = ms;
        }
    }

    /// Resolve the API key with `--api-key` taking precedence over everything.
    pub fn api_key(&self, config: &Config) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| config.resolve_api_key())
    }
}
