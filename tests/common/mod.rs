//! Shared test utilities and fakes.

#![allow(dead_code, unused_imports)]

pub mod mock_omdb;

use async_trait::async_trait;
use moviefinder::favorites::FavoritesStore;
use moviefinder::movie::{MovieDetail, MovieSummary, ResultPage};
use moviefinder::omdb::{MovieApi, SearchError};
use moviefinder::search::{SearchEvent, SearchOrchestrator, SearchSettings};
use moviefinder::storage::MemoryStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// One call made against [`ScriptedApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Search { query: String, page: u32 },
    Detail { id: String },
}

impl ApiCall {
    pub fn search(query: &str, page: u32) -> Self {
        Self::Search {
            query: query.to_string(),
            page,
        }
    }

    pub fn detail(id: &str) -> Self {
        Self::Detail { id: id.to_string() }
    }
}

#[derive(Clone)]
struct Scripted<T> {
    result: Result<T, SearchError>,
    delay: Duration,
}

/// In-process `MovieApi` that answers from a script and records every call.
///
/// Unscripted searches fail with `NoResults("Movie not found!")`, unscripted
/// detail lookups with `NoResults("Incorrect IMDb ID.")`.
#[derive(Default)]
pub struct ScriptedApi {
    searches: Mutex<HashMap<(String, u32), Scripted<ResultPage>>>,
    details: Mutex<HashMap<String, Scripted<MovieDetail>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(self, query: &str, page: u32, result: Result<ResultPage, SearchError>) -> Self {
        self.search_delayed(query, page, result, Duration::ZERO)
    }

    pub fn search_delayed(
        self,
        query: &str,
        page: u32,
        result: Result<ResultPage, SearchError>,
        delay: Duration,
    ) -> Self {
        self.searches
            .lock()
            .insert((query.to_string(), page), Scripted { result, delay });
        self
    }

    pub fn detail(self, id: &str, result: Result<MovieDetail, SearchError>) -> Self {
        self.detail_delayed(id, result, Duration::ZERO)
    }

    pub fn detail_delayed(
        self,
        id: &str,
        result: Result<MovieDetail, SearchError>,
        delay: Duration,
    ) -> Self {
        self.details
            .lock()
            .insert(id.to_string(), Scripted { result, delay });
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    pub fn search_calls(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, ApiCall::Search { .. }))
            .collect()
    }
}

#[async_trait]
impl MovieApi for ScriptedApi {
    async fn search_by_title(&self, query: &str, page: u32) -> Result<ResultPage, SearchError> {
        self.calls.lock().push(ApiCall::search(query, page));
        let scripted = self.searches.lock().get(&(query.to_string(), page)).cloned();
        match scripted {
            Some(scripted) => {
                if !scripted.delay.is_zero() {
                    tokio::time::sleep(scripted.delay).await;
                }
                scripted.result
            }
            None => Err(SearchError::NoResults("Movie not found!".to_string())),
        }
    }

    async fn fetch_by_id(&self, id: &str) -> Result<MovieDetail, SearchError> {
        self.calls.lock().push(ApiCall::detail(id));
        let scripted = self.details.lock().get(id).cloned();
        match scripted {
            Some(scripted) => {
                if !scripted.delay.is_zero() {
                    tokio::time::sleep(scripted.delay).await;
                }
                scripted.result
            }
            None => Err(SearchError::NoResults("Incorrect IMDb ID.".to_string())),
        }
    }
}

/// `count` summaries with ids `<prefix>00`, `<prefix>01`, ... starting at `start`.
pub fn movies(prefix: &str, start: usize, count: usize) -> Vec<MovieSummary> {
    (start..start + count)
        .map(|i| {
            MovieSummary::new(
                format!("{}{:02}", prefix, i),
                format!("{} {}", prefix, i),
                "2005",
            )
        })
        .collect()
}

pub fn page_of(items: Vec<MovieSummary>, total: u32) -> ResultPage {
    ResultPage {
        items,
        total_results: Some(total),
    }
}

pub fn detail(id: &str, title: &str, genre: &str) -> MovieDetail {
    MovieDetail {
        summary: MovieSummary::new(id, title, "1999"),
        plot: format!("Plot of {}", title),
        director: "Someone".to_string(),
        actors: "A, B".to_string(),
        genre: genre.to_string(),
        released: "01 Jan 1999".to_string(),
    }
}

pub fn ids(orchestrator: &SearchOrchestrator) -> Vec<String> {
    orchestrator
        .session()
        .results
        .iter()
        .map(|m| m.id.clone())
        .collect()
}

/// Orchestrator wired to `api` and an in-memory favorites store.
pub struct Harness {
    pub orchestrator: SearchOrchestrator,
    pub events: UnboundedReceiver<SearchEvent>,
    pub api: Arc<ScriptedApi>,
    pub storage: MemoryStore,
}

impl Harness {
    pub fn new(api: ScriptedApi) -> Self {
        Self::with_settings(api, SearchSettings::default())
    }

    pub fn with_settings(api: ScriptedApi, settings: SearchSettings) -> Self {
        let api = Arc::new(api);
        let storage = MemoryStore::new();
        let favorites = FavoritesStore::load(Box::new(storage.clone()));
        let (orchestrator, events) = SearchOrchestrator::new(api.clone(), favorites, settings);
        Self {
            orchestrator,
            events,
            api,
            storage,
        }
    }

    /// Process events until nothing is pending.
    pub async fn settle(&mut self) {
        self.orchestrator.settle(&mut self.events).await;
    }

    /// Process exactly one event.
    pub async fn step(&mut self) {
        let event = self
            .events
            .recv()
            .await
            .expect("orchestrator event channel closed");
        self.orchestrator.handle_event(event);
    }
}
