//! Search session state.

use crate::movie::{MovieDetail, MovieSummary};
use crate::mvi::UiState;

/// What the user is searching for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    /// Genre filter. Never `Some("")`: blank genres are stored as `None`.
    pub genre: Option<String>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, genre: Option<String>) -> Self {
        Self {
            text: text.into(),
            genre: normalize_genre(genre),
        }
    }

    /// True when neither a title nor a genre is set.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.genre.is_none()
    }

    /// Title sent to the search endpoint: the trimmed text, or the genre
    /// when only a genre is set.
    pub fn search_term(&self) -> Option<String> {
        let text = self.text.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
        self.genre.clone()
    }
}

pub(crate) fn normalize_genre(genre: Option<String>) -> Option<String> {
    genre
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
}

/// Coarse lifecycle of the result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPhase {
    /// Empty query, nothing shown.
    #[default]
    Idle,
    /// First page requested for the current query.
    Searching,
    /// Results shown, no search request outstanding.
    Ready,
    /// Next page requested; current results stay visible.
    LoadingMore,
    /// Last request failed; see `SearchSession::error`.
    Error,
}

/// Everything the view needs to render the search widget.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    pub query: SearchQuery,
    /// Query of the last issued search. Load-more extends this one, not
    /// whatever has been typed since.
    pub searched: Option<SearchQuery>,
    /// Last page requested, starting at 1.
    pub page: u32,
    pub results: Vec<MovieSummary>,
    /// A search or detail request for the current session is outstanding.
    pub loading: bool,
    pub error: Option<String>,
    /// Movie shown in the details overlay.
    pub selected: Option<MovieDetail>,
    pub phase: SearchPhase,
    /// Total matches reported by the API for the current query.
    pub total_results: Option<u32>,
    /// Items received from the API before genre filtering.
    pub fetched: usize,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            query: SearchQuery::default(),
            searched: None,
            page: 1,
            results: Vec::new(),
            loading: false,
            error: None,
            selected: None,
            phase: SearchPhase::Idle,
            total_results: None,
            fetched: 0,
        }
    }
}

impl UiState for SearchSession {}

impl SearchSession {
    /// Load-more is allowed: something is shown and nothing is in flight.
    pub fn can_load_more(&self) -> bool {
        !self.results.is_empty() && !self.loading
    }

    /// The API reported more matches than have been fetched so far.
    pub fn has_more(&self) -> bool {
        self.total_results
            .is_some_and(|total| self.fetched < total as usize)
    }

    pub fn overlay_open(&self) -> bool {
        self.selected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_is_idle_on_page_one() {
        let session = SearchSession::default();
        assert_eq!(session.page, 1);
        assert_eq!(session.phase, SearchPhase::Idle);
        assert!(!session.can_load_more());
    }

    #[test]
    fn blank_genre_is_normalized_away() {
        let query = SearchQuery::new("", Some("   ".into()));
        assert_eq!(query.genre, None);
        assert!(query.is_empty());
    }

    #[test]
    fn search_term_prefers_text_then_genre() {
        assert_eq!(
            SearchQuery::new("  batman ", Some("Action".into())).search_term(),
            Some("batman".to_string())
        );
        assert_eq!(
            SearchQuery::new(" ", Some("Horror".into())).search_term(),
            Some("Horror".to_string())
        );
        assert_eq!(SearchQuery::default().search_term(), None);
    }

    #[test]
    fn has_more_compares_raw_fetch_count() {
        let session = SearchSession {
            total_results: Some(25),
            fetched: 20,
            ..SearchSession::default()
        };
        assert!(session.has_more());

        let session = SearchSession {
            total_results: Some(20),
            fetched: 20,
            ..SearchSession::default()
        };
        assert!(!session.has_more());
    }
}
