//! Non-interactive subcommands.

use std::io::Write;

use anyhow::{bail, Context};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::favorites::FavoritesStore;
use crate::movie::MovieSummary;
use crate::search::{SearchEvent, SearchOrchestrator};

/// Run one search through the orchestrator, following load-more up to
/// `pages` pages, and print one line per movie.
pub async fn run_search(
    orchestrator: &mut SearchOrchestrator,
    events: &mut UnboundedReceiver<SearchEvent>,
    query: &str,
    genre: Option<String>,
    pages: u32,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if genre.is_some() {
        orchestrator.set_genre(genre);
    }
    orchestrator.set_query(query);
    orchestrator.settle(events).await;

    let mut fetched_pages = 1;
    while fetched_pages < pages && orchestrator.session().has_more() {
        if !orchestrator.load_more() {
            break;
        }
        orchestrator.settle(events).await;
        if orchestrator.session().error.is_some() {
            break;
        }
        fetched_pages += 1;
    }

    let session = orchestrator.session();
    if session.results.is_empty() {
        if let Some(error) = &session.error {
            bail!("{}", error);
        }
    }

    for movie in &session.results {
        write_movie(out, movie, orchestrator.is_favorite(&movie.id))?;
    }
    if let Some(error) = &session.error {
        tracing::warn!(error = %error, "Search stopped early");
    }
    tracing::info!(
        results = session.results.len(),
        total = ?session.total_results,
        pages = fetched_pages,
        "Search finished"
    );
    Ok(())
}

/// Print every saved favorite.
pub fn print_favorites(favorites: &FavoritesStore, out: &mut impl Write) -> anyhow::Result<()> {
    if favorites.is_empty() {
        writeln!(out, "No favorites").context("Failed to write output")?;
        return Ok(());
    }
    for movie in favorites.list() {
        write_movie(out, movie, true)?;
    }
    Ok(())
}

fn write_movie(out: &mut impl Write, movie: &MovieSummary, favorite: bool) -> anyhow::Result<()> {
    let marker = if favorite { "♥" } else { " " };
    let genre = movie.genre.as_deref().unwrap_or("");
    writeln!(
        out,
        "{} {}\t{}\t{}\t{}",
        marker, movie.id, movie.year, movie.title, genre
    )
    .context("Failed to write output")
}
