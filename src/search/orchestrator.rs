use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::mpsc;

use crate::config::SearchConfig;
use crate::favorites::FavoritesStore;
use crate::movie::{MovieDetail, MovieSummary, ResultPage};
use crate::mvi::Reducer;
use crate::omdb::{MovieApi, SearchError};

use super::debounce::Debouncer;
use super::intent::SearchIntent;
use super::reducer::SearchReducer;
use super::state::SearchSession;

/// Runtime knobs for the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub enrich_genres: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SearchSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            enrich_genres: config.enrich_genres,
        }
    }
}

/// Whether a search response replaces or extends the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Fresh,
    Append,
}

/// Completed async work, delivered back to the orchestrator's owner.
#[derive(Debug)]
pub enum SearchEvent {
    DebounceFired {
        ticket: u64,
    },
    SearchFinished {
        generation: u64,
        mode: RequestMode,
        genre: Option<String>,
        result: Result<ResultPage, SearchError>,
    },
    DetailFinished {
        generation: u64,
        id: String,
        result: Result<MovieDetail, SearchError>,
    },
}

/// Owns the search session and sequences every async operation on it.
///
/// Network calls and the debounce timer run as spawned tasks that only
/// send a [`SearchEvent`]. The owner feeds those events back through
/// [`handle_event`](Self::handle_event), so all state changes happen on the
/// owner's task. Each request carries the generation current when it was
/// issued; a response for an older generation is dropped.
pub struct SearchOrchestrator {
    session: SearchSession,
    favorites: FavoritesStore,
    api: Arc<dyn MovieApi>,
    events: mpsc::UnboundedSender<SearchEvent>,
    debouncer: Debouncer,
    generation: u64,
    in_flight: usize,
    settings: SearchSettings,
}

impl SearchOrchestrator {
    pub fn new(
        api: Arc<dyn MovieApi>,
        favorites: FavoritesStore,
        settings: SearchSettings,
    ) -> (Self, mpsc::UnboundedReceiver<SearchEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let orchestrator = Self {
            session: SearchSession::default(),
            favorites,
            api,
            events,
            debouncer: Debouncer::new(settings.debounce),
            generation: 0,
            in_flight: 0,
            settings,
        };
        (orchestrator, receiver)
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    pub fn settings(&self) -> SearchSettings {
        self.settings
    }

    /// Requests issued and not yet completed, stale ones included.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// A debounce timer is pending or a request has not completed yet.
    pub fn is_busy(&self) -> bool {
        self.debouncer.is_armed() || self.in_flight > 0
    }

    /// Apply new settings; the debounce delay takes effect on the next keystroke.
    pub fn apply_settings(&mut self, settings: SearchSettings) {
        self.debouncer.set_delay(settings.debounce);
        self.settings = settings;
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.dispatch(SearchIntent::QueryEdited { text: text.into() });
        self.arm_debounce();
    }

    pub fn set_genre(&mut self, genre: Option<String>) {
        self.dispatch(SearchIntent::GenreEdited { genre });
        self.arm_debounce();
    }

    /// Reset everything. In-flight requests keep running; their responses
    /// are dropped because the generation moves on.
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.advance_generation();
        self.dispatch(SearchIntent::Clear);
        tracing::debug!(generation = self.generation, "Search cleared");
    }

    /// Request the next page. Returns false when there is nothing to extend
    /// or a request is already outstanding.
    pub fn load_more(&mut self) -> bool {
        if !self.session.can_load_more() {
            tracing::debug!(
                results = self.session.results.len(),
                loading = self.session.loading,
                "Load more ignored"
            );
            return false;
        }
        let Some(searched) = self.session.searched.clone() else {
            return false;
        };
        let Some(term) = searched.search_term() else {
            return false;
        };

        let generation = self.advance_generation();
        self.dispatch(SearchIntent::LoadMoreStarted);
        let page = self.session.page;
        self.spawn_search(generation, RequestMode::Append, term, searched.genre, page);
        true
    }

    /// Open the details overlay for the result at `index`.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(id) = self.session.results.get(index).map(|m| m.id.clone()) else {
            return false;
        };
        self.select_id(id)
    }

    /// Open the details overlay for any movie id (e.g. a favorite).
    pub fn select_id(&mut self, id: impl Into<String>) -> bool {
        if self.session.loading {
            tracing::debug!("Selection ignored while a request is outstanding");
            return false;
        }
        let id = id.into();
        let generation = self.advance_generation();
        self.dispatch(SearchIntent::DetailStarted);
        self.spawn_detail(generation, id);
        true
    }

    pub fn close_detail(&mut self) {
        self.dispatch(SearchIntent::CloseDetail);
    }

    /// Toggle `movie` in favorites. Returns whether it is a favorite afterwards.
    pub fn toggle_favorite(&mut self, movie: &MovieSummary) -> bool {
        self.favorites.toggle(movie)
    }

    /// Toggle the result at `index`.
    pub fn toggle_favorite_at(&mut self, index: usize) -> Option<bool> {
        let movie = self.session.results.get(index)?.clone();
        Some(self.favorites.toggle(&movie))
    }

    /// Toggle the movie shown in the details overlay.
    pub fn toggle_selected_favorite(&mut self) -> Option<bool> {
        let movie = self.session.selected.as_ref()?.to_summary();
        Some(self.favorites.toggle(&movie))
    }

    pub fn handle_event(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::DebounceFired { ticket } => self.on_debounce_fired(ticket),
            SearchEvent::SearchFinished {
                generation,
                mode,
                genre,
                result,
            } => self.on_search_finished(generation, mode, genre, result),
            SearchEvent::DetailFinished {
                generation,
                id,
                result,
            } => self.on_detail_finished(generation, id, result),
        }
    }

    /// Feed events from `events` until no timer or request is pending.
    pub async fn settle(&mut self, events: &mut mpsc::UnboundedReceiver<SearchEvent>) {
        while self.is_busy() {
            match events.recv().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
    }

    fn on_debounce_fired(&mut self, ticket: u64) {
        if !self.debouncer.accept(ticket) {
            tracing::trace!(ticket, "Stale debounce ticket ignored");
            return;
        }

        let query = self.session.query.clone();
        let Some(term) = query.search_term() else {
            self.advance_generation();
            self.dispatch(SearchIntent::Reset);
            tracing::debug!("Empty query, search reset");
            return;
        };

        let generation = self.advance_generation();
        self.dispatch(SearchIntent::SearchStarted);
        tracing::info!(query = %term, genre = ?query.genre, generation, "Search issued");
        self.spawn_search(generation, RequestMode::Fresh, term, query.genre, 1);
    }

    fn on_search_finished(
        &mut self,
        generation: u64,
        mode: RequestMode,
        genre: Option<String>,
        result: Result<ResultPage, SearchError>,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale search response"
            );
            return;
        }

        let intent = match (mode, result) {
            (RequestMode::Fresh, Ok(page)) => SearchIntent::SearchSucceeded { page, genre },
            (RequestMode::Fresh, Err(err)) => SearchIntent::SearchFailed {
                message: err.to_string(),
            },
            (RequestMode::Append, Ok(page)) => SearchIntent::LoadMoreSucceeded { page, genre },
            (RequestMode::Append, Err(err)) => SearchIntent::LoadMoreFailed {
                message: err.to_string(),
            },
        };
        self.dispatch(intent);
        tracing::debug!(
            generation,
            page = self.session.page,
            results = self.session.results.len(),
            phase = ?self.session.phase,
            "Search response applied"
        );
    }

    fn on_detail_finished(
        &mut self,
        generation: u64,
        id: String,
        result: Result<MovieDetail, SearchError>,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if generation != self.generation {
            tracing::debug!(id = %id, generation, "Discarding stale detail response");
            return;
        }

        let intent = match result {
            Ok(detail) => SearchIntent::DetailLoaded { detail },
            Err(err) => SearchIntent::DetailFailed {
                message: SearchError::detail_fetch(id, err).to_string(),
            },
        };
        self.dispatch(intent);
    }

    fn dispatch(&mut self, intent: SearchIntent) {
        SearchReducer::apply(&mut self.session, intent);
    }

    fn advance_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn arm_debounce(&mut self) {
        let events = self.events.clone();
        self.debouncer.arm(move |ticket| {
            let _ = events.send(SearchEvent::DebounceFired { ticket });
        });
    }

    fn spawn_search(
        &mut self,
        generation: u64,
        mode: RequestMode,
        term: String,
        genre: Option<String>,
        page: u32,
    ) {
        self.in_flight += 1;
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let enrich = self.settings.enrich_genres && genre.is_some();

        tokio::spawn(async move {
            let mut result = api.search_by_title(&term, page).await;
            if enrich {
                if let Ok(results) = &mut result {
                    enrich_genres(&*api, &mut results.items).await;
                }
            }
            let _ = events.send(SearchEvent::SearchFinished {
                generation,
                mode,
                genre,
                result,
            });
        });
    }

    fn spawn_detail(&mut self, generation: u64, id: String) {
        self.in_flight += 1;
        let api = Arc::clone(&self.api);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = api.fetch_by_id(&id).await;
            let _ = events.send(SearchEvent::DetailFinished {
                generation,
                id,
                result,
            });
        });
    }
}

/// Fill in genres the search endpoint does not return by looking up each
/// movie's details. Lookups run concurrently; failures leave `genre` unset.
async fn enrich_genres(api: &dyn MovieApi, items: &mut [MovieSummary]) {
    let lookups = items
        .iter()
        .filter(|item| item.genre.is_none())
        .map(|item| async move { (item.id.clone(), api.fetch_by_id(&item.id).await) })
        .collect::<Vec<_>>();

    let outcomes = join_all(lookups).await;

    let mut failed = 0usize;
    for (id, result) in outcomes {
        match result {
            Ok(detail) => {
                if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                    item.genre = detail.to_summary().genre;
                }
            }
            Err(_) => failed += 1,
        }
    }
    if failed > 0 {
        tracing::warn!(failed, "Genre lookups failed for some results");
    }
}
