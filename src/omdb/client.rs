use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::SearchError;
use super::wire::{parse_detail, parse_search};
use crate::config::ApiConfig;
use crate::movie::{MovieDetail, ResultPage};

/// Remote movie database operations used by the search orchestrator.
///
/// Implementations never retry; a failed call surfaces immediately.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Search titles, one API-sized page at a time (`page` starts at 1).
    async fn search_by_title(&self, query: &str, page: u32) -> Result<ResultPage, SearchError>;

    /// Load the full record for one movie.
    async fn fetch_by_id(&self, id: &str) -> Result<MovieDetail, SearchError>;
}

/// HTTP client for the OMDb API.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &ApiConfig, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: api_key.into(),
        })
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<String, SearchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Network(format!(
                "HTTP status {}",
                status.as_u16()
            )));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl MovieApi for OmdbClient {
    async fn search_by_title(&self, query: &str, page: u32) -> Result<ResultPage, SearchError> {
        tracing::debug!(query = %query, page, "Searching titles");
        let page_param = page.to_string();
        let result = self
            .get(&[("s", query), ("page", page_param.as_str())])
            .await
            .and_then(|body| parse_search(&body));

        match &result {
            Ok(results) => tracing::debug!(
                query = %query,
                page,
                items = results.items.len(),
                total = ?results.total_results,
                "Search page received"
            ),
            Err(err) => tracing::warn!(
                query = %query,
                page,
                kind = err.kind(),
                error = %err,
                "Search failed"
            ),
        }
        result
    }

    async fn fetch_by_id(&self, id: &str) -> Result<MovieDetail, SearchError> {
        tracing::debug!(id = %id, "Fetching movie details");
        let result = self
            .get(&[("i", id)])
            .await
            .and_then(|body| parse_detail(id, &body));

        if let Err(err) = &result {
            tracing::warn!(id = %id, kind = err.kind(), error = %err, "Detail fetch failed");
        }
        result
    }
}
