//! Error taxonomy for remote movie lookups.

use thiserror::Error;

/// Errors returned by [`MovieApi`](super::MovieApi) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Transport failure, timeout, or non-2xx HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered `Response: "False"`; carries its own message.
    #[error("{0}")]
    NoResults(String),

    /// A 2xx body that does not have the documented shape.
    #[error("Invalid response from movie database: {0}")]
    InvalidResponse(String),

    /// Loading a single movie for the details overlay failed.
    #[error("Failed to load movie details: {source}")]
    DetailFetch {
        id: String,
        #[source]
        source: Box<SearchError>,
    },
}

impl SearchError {
    /// Wrap a lookup failure for movie `id` as a detail-fetch error.
    pub fn detail_fetch(id: impl Into<String>, source: SearchError) -> Self {
        SearchError::DetailFetch {
            id: id.into(),
            source: Box::new(source),
        }
    }

    /// Short machine-friendly tag for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Network(_) => "network",
            SearchError::NoResults(_) => "no_results",
            SearchError::InvalidResponse(_) => "invalid_response",
            SearchError::DetailFetch { .. } => "detail_fetch",
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return SearchError::Network("request timed out".to_string());
        }
        if let Some(status) = err.status() {
            return SearchError::Network(format!("HTTP status {}", status.as_u16()));
        }
        SearchError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_results_displays_api_message_verbatim() {
        let err = SearchError::NoResults("Movie not found!".into());
        assert_eq!(err.to_string(), "Movie not found!");
        assert_eq!(err.kind(), "no_results");
    }

    #[test]
    fn detail_fetch_wraps_cause() {
        let err = SearchError::detail_fetch("tt1", SearchError::Network("HTTP status 503".into()));
        assert_eq!(
            err.to_string(),
            "Failed to load movie details: Network error: HTTP status 503"
        );
        assert_eq!(err.kind(), "detail_fetch");
    }
}
