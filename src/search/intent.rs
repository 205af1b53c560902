//! Intents for the search session.

use crate::movie::{MovieDetail, ResultPage};
use crate::mvi::Intent;

/// Intents that can be dispatched to the search session reducer.
///
/// Async completions only become intents after the orchestrator has
/// checked that they belong to the current generation.
#[derive(Debug, Clone)]
pub enum SearchIntent {
    /// User edited the title text.
    QueryEdited { text: String },

    /// User changed the genre filter.
    GenreEdited { genre: Option<String> },

    /// Debounce fired with an empty query: back to idle.
    Reset,

    /// User pressed "clear": everything back to initial values.
    Clear,

    /// First page requested for the current query, which becomes the
    /// searched query.
    SearchStarted,

    /// First page arrived. `genre` is the filter captured when the request
    /// was issued.
    SearchSucceeded {
        page: ResultPage,
        genre: Option<String>,
    },

    /// First page failed.
    SearchFailed { message: String },

    /// Next page requested.
    LoadMoreStarted,

    /// Next page arrived.
    LoadMoreSucceeded {
        page: ResultPage,
        genre: Option<String>,
    },

    /// Next page failed.
    LoadMoreFailed { message: String },

    /// Detail lookup requested for a selected movie.
    DetailStarted,

    /// Detail lookup finished; opens the overlay.
    DetailLoaded { detail: MovieDetail },

    /// Detail lookup failed; the overlay is left as it was.
    DetailFailed { message: String },

    /// User closed the details overlay.
    CloseDetail,
}

impl Intent for SearchIntent {}
