//! Movie records shared by the API client, the search session and favorites.

use serde::{Deserialize, Serialize};

/// One row of search results.
///
/// Identity is `id` (the IMDb identifier); two summaries with the same id
/// describe the same movie even if other fields differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// Comma-separated genres, when known. The search endpoint does not
    /// return genres; they come from a detail lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl MovieSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            poster_url: None,
            genre: None,
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_poster(mut self, poster_url: impl Into<String>) -> Self {
        self.poster_url = Some(poster_url.into());
        self
    }

    /// True if any comma-separated genre token equals `wanted`,
    /// ignoring case and surrounding whitespace.
    pub fn has_genre(&self, wanted: &str) -> bool {
        let wanted = wanted.trim();
        if wanted.is_empty() {
            return true;
        }
        self.genre.as_deref().is_some_and(|genres| {
            genres
                .split(',')
                .any(|token| token.trim().eq_ignore_ascii_case(wanted))
        })
    }
}

/// Full record shown in the details overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetail {
    pub summary: MovieSummary,
    pub plot: String,
    pub director: String,
    pub actors: String,
    pub genre: String,
    pub released: String,
}

impl MovieDetail {
    /// Summary carrying the genre from this detail record.
    pub fn to_summary(&self) -> MovieSummary {
        let mut summary = self.summary.clone();
        if !self.genre.is_empty() && self.genre != "N/A" {
            summary.genre = Some(self.genre.clone());
        }
        summary
    }
}

/// One page of search results, in API order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPage {
    pub items: Vec<MovieSummary>,
    /// Total matches reported by the API across all pages.
    pub total_results: Option<u32>,
}
