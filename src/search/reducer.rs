//! Reducer for the search session.

use crate::movie::{MovieSummary, ResultPage};
use crate::mvi::Reducer;

use super::intent::SearchIntent;
use super::state::{normalize_genre, SearchPhase, SearchQuery, SearchSession};

/// Reducer for search session state transitions.
///
/// Pure function. Timers, HTTP calls and the stale-response check are the
/// orchestrator's job; by the time an intent gets here it is current.
pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchSession;
    type Intent = SearchIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SearchIntent::QueryEdited { text } => SearchSession {
                query: SearchQuery {
                    text,
                    genre: state.query.genre.clone(),
                },
                ..state
            },

            SearchIntent::GenreEdited { genre } => SearchSession {
                query: SearchQuery {
                    text: state.query.text.clone(),
                    genre: normalize_genre(genre),
                },
                ..state
            },

            SearchIntent::Reset => SearchSession {
                query: state.query,
                selected: state.selected,
                ..SearchSession::default()
            },

            SearchIntent::Clear => SearchSession::default(),

            SearchIntent::SearchStarted => SearchSession {
                searched: Some(state.query.clone()),
                page: 1,
                loading: true,
                phase: SearchPhase::Searching,
                total_results: None,
                fetched: 0,
                ..state
            },

            SearchIntent::SearchSucceeded { page, genre } => {
                let fetched = page.items.len();
                let total_results = page.total_results;
                SearchSession {
                    results: filter_by_genre(page, genre.as_deref()),
                    loading: false,
                    error: None,
                    phase: SearchPhase::Ready,
                    total_results,
                    fetched,
                    ..state
                }
            }

            SearchIntent::SearchFailed { message } => SearchSession {
                results: Vec::new(),
                loading: false,
                error: Some(message),
                phase: SearchPhase::Error,
                total_results: None,
                fetched: 0,
                ..state
            },

            SearchIntent::LoadMoreStarted => SearchSession {
                page: state.page + 1,
                loading: true,
                phase: SearchPhase::LoadingMore,
                ..state
            },

            SearchIntent::LoadMoreSucceeded { page, genre } => {
                let fetched = state.fetched + page.items.len();
                let total_results = page.total_results.or(state.total_results);
                let mut results = state.results;
                results.extend(filter_by_genre(page, genre.as_deref()));
                SearchSession {
                    results,
                    loading: false,
                    error: None,
                    phase: SearchPhase::Ready,
                    total_results,
                    fetched,
                    ..state
                }
            }

            // Existing results stay; the page goes back so the next
            // load-more asks for the same page again.
            SearchIntent::LoadMoreFailed { message } => SearchSession {
                page: state.page.saturating_sub(1).max(1),
                loading: false,
                error: Some(message),
                phase: SearchPhase::Error,
                ..state
            },

            SearchIntent::DetailStarted => SearchSession {
                loading: true,
                ..state
            },

            SearchIntent::DetailLoaded { detail } => SearchSession {
                loading: false,
                selected: Some(detail),
                ..state
            },

            SearchIntent::DetailFailed { message } => SearchSession {
                loading: false,
                error: Some(message),
                ..state
            },

            SearchIntent::CloseDetail => SearchSession {
                selected: None,
                ..state
            },
        }
    }
}

fn filter_by_genre(page: ResultPage, genre: Option<&str>) -> Vec<MovieSummary> {
    match genre {
        Some(genre) => page
            .items
            .into_iter()
            .filter(|movie| movie.has_genre(genre))
            .collect(),
        None => page.items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::MovieDetail;

    fn page(ids: &[&str]) -> ResultPage {
        ResultPage {
            items: ids
                .iter()
                .map(|id| MovieSummary::new(*id, format!("Title {}", id), "2001"))
                .collect(),
            total_results: Some(40),
        }
    }

    fn ids(session: &SearchSession) -> Vec<&str> {
        session.results.iter().map(|m| m.id.as_str()).collect()
    }

    fn ready_with(ids: &[&str]) -> SearchSession {
        let state = SearchReducer::reduce(SearchSession::default(), SearchIntent::SearchStarted);
        SearchReducer::reduce(
            state,
            SearchIntent::SearchSucceeded {
                page: page(ids),
                genre: None,
            },
        )
    }

    #[test]
    fn query_edit_keeps_results() {
        let state = ready_with(&["a", "b"]);
        let state = SearchReducer::reduce(
            state,
            SearchIntent::QueryEdited {
                text: "bat".into(),
            },
        );
        assert_eq!(state.query.text, "bat");
        assert_eq!(ids(&state), vec!["a", "b"]);
    }

    #[test]
    fn search_started_resets_page_and_sets_loading() {
        let mut state = ready_with(&["a"]);
        state.page = 4;
        let state = SearchReducer::reduce(state, SearchIntent::SearchStarted);
        assert_eq!(state.page, 1);
        assert!(state.loading);
        assert_eq!(state.phase, SearchPhase::Searching);
    }

    #[test]
    fn search_started_records_searched_query() {
        let state = SearchReducer::reduce(
            SearchSession::default(),
            SearchIntent::QueryEdited {
                text: "batman".into(),
            },
        );
        let state = SearchReducer::reduce(state, SearchIntent::SearchStarted);
        let state = SearchReducer::reduce(
            state,
            SearchIntent::QueryEdited {
                text: "superman".into(),
            },
        );
        assert_eq!(state.searched.as_ref().map(|q| q.text.as_str()), Some("batman"));
        assert_eq!(state.query.text, "superman");

        let state = SearchReducer::reduce(state, SearchIntent::Clear);
        assert_eq!(state.searched, None);
    }

    #[test]
    fn search_success_transitions_to_ready() {
        let state = ready_with(&["a", "b", "c"]);
        assert_eq!(state.phase, SearchPhase::Ready);
        assert_eq!(state.results.len(), 3);
        assert_eq!(state.error, None);
        assert!(!state.loading);
        assert_eq!(state.fetched, 3);
    }

    #[test]
    fn search_failure_clears_results() {
        let state = ready_with(&["a"]);
        let state = SearchReducer::reduce(state, SearchIntent::SearchStarted);
        let state = SearchReducer::reduce(
            state,
            SearchIntent::SearchFailed {
                message: "Movie not found!".into(),
            },
        );
        assert!(state.results.is_empty());
        assert_eq!(state.error.as_deref(), Some("Movie not found!"));
        assert_eq!(state.phase, SearchPhase::Error);
    }

    #[test]
    fn load_more_appends_in_order() {
        let state = ready_with(&["a", "b"]);
        let state = SearchReducer::reduce(state, SearchIntent::LoadMoreStarted);
        assert_eq!(state.page, 2);
        assert_eq!(state.phase, SearchPhase::LoadingMore);

        let state = SearchReducer::reduce(
            state,
            SearchIntent::LoadMoreSucceeded {
                page: page(&["c", "a"]),
                genre: None,
            },
        );
        assert_eq!(ids(&state), vec!["a", "b", "c", "a"]);
        assert_eq!(state.fetched, 4);
        assert_eq!(state.phase, SearchPhase::Ready);
    }

    #[test]
    fn load_more_failure_retains_results_and_restores_page() {
        let state = ready_with(&["a", "b"]);
        let state = SearchReducer::reduce(state, SearchIntent::LoadMoreStarted);
        let state = SearchReducer::reduce(
            state,
            SearchIntent::LoadMoreFailed {
                message: "Network error: HTTP status 502".into(),
            },
        );
        assert_eq!(ids(&state), vec!["a", "b"]);
        assert_eq!(state.page, 1);
        assert!(state.error.is_some());
        assert_eq!(state.phase, SearchPhase::Error);
    }

    #[test]
    fn genre_filter_applies_to_each_page() {
        let mut first = page(&["a", "b"]);
        first.items[0].genre = Some("Action, Drama".into());
        first.items[1].genre = Some("Comedy".into());

        let state = SearchReducer::reduce(SearchSession::default(), SearchIntent::SearchStarted);
        let state = SearchReducer::reduce(
            state,
            SearchIntent::SearchSucceeded {
                page: first,
                genre: Some("drama".into()),
            },
        );
        assert_eq!(ids(&state), vec!["a"]);
        assert_eq!(state.fetched, 2);
    }

    #[test]
    fn reset_keeps_query_and_overlay() {
        let mut state = ready_with(&["a"]);
        state.query.text = String::new();
        state.selected = Some(MovieDetail {
            summary: MovieSummary::new("a", "A", "2001"),
            plot: String::new(),
            director: String::new(),
            actors: String::new(),
            genre: String::new(),
            released: String::new(),
        });
        state.error = Some("old".into());

        let state = SearchReducer::reduce(state, SearchIntent::Reset);
        assert!(state.results.is_empty());
        assert_eq!(state.error, None);
        assert_eq!(state.page, 1);
        assert_eq!(state.phase, SearchPhase::Idle);
        assert!(state.overlay_open());
    }

    #[test]
    fn clear_returns_initial_state() {
        let mut state = ready_with(&["a"]);
        state.query = SearchQuery::new("alien", Some("Horror".into()));
        state.loading = true;
        let state = SearchReducer::reduce(state, SearchIntent::Clear);
        assert_eq!(state, SearchSession::default());
    }

    #[test]
    fn detail_overlay_cycle_leaves_results_alone() {
        let state = ready_with(&["a", "b"]);
        let state = SearchReducer::reduce(state, SearchIntent::DetailStarted);
        assert!(state.loading);
        assert_eq!(state.phase, SearchPhase::Ready);

        let detail = MovieDetail {
            summary: MovieSummary::new("a", "A", "2001"),
            plot: "Plot".into(),
            director: "Someone".into(),
            actors: "People".into(),
            genre: "Drama".into(),
            released: "2001".into(),
        };
        let state = SearchReducer::reduce(state, SearchIntent::DetailLoaded { detail });
        assert!(!state.loading);
        assert!(state.overlay_open());

        let state = SearchReducer::reduce(state, SearchIntent::CloseDetail);
        assert!(!state.overlay_open());
        assert_eq!(ids(&state), vec!["a", "b"]);
    }

    #[test]
    fn detail_failure_sets_error_without_overlay() {
        let state = ready_with(&["a"]);
        let state = SearchReducer::reduce(state, SearchIntent::DetailStarted);
        let state = SearchReducer::reduce(
            state,
            SearchIntent::DetailFailed {
                message: "Failed to load movie details".into(),
            },
        );
        assert!(!state.overlay_open());
        assert!(!state.loading);
        assert_eq!(state.results.len(), 1);
        assert!(state.error.is_some());
    }

    #[test]
    fn detail_failure_keeps_open_overlay() {
        let mut state = ready_with(&["a", "b"]);
        state.selected = Some(MovieDetail {
            summary: MovieSummary::new("a", "A", "2001"),
            plot: "Plot".into(),
            director: String::new(),
            actors: String::new(),
            genre: String::new(),
            released: String::new(),
        });
        let state = SearchReducer::reduce(state, SearchIntent::DetailStarted);
        let state = SearchReducer::reduce(
            state,
            SearchIntent::DetailFailed {
                message: "Failed to load movie details: Incorrect IMDb ID.".into(),
            },
        );
        assert_eq!(
            state.selected.as_ref().map(|d| d.summary.id.as_str()),
            Some("a")
        );
        assert!(!state.loading);
        assert!(state.error.is_some());
    }
}
