//! OMDb JSON payloads and their validation into movie records.

use serde::Deserialize;

use super::error::SearchError;
use crate::movie::{MovieDetail, MovieSummary, ResultPage};

const NOT_AVAILABLE: &str = "N/A";
const DEFAULT_SEARCH_ERROR: &str = "No movies found";
const DEFAULT_DETAIL_ERROR: &str = "Failed to load movie details";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchResponse {
    response: String,
    #[serde(default)]
    search: Option<Vec<SearchItem>>,
    #[serde(default, rename = "totalResults")]
    total_results: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    poster: Option<String>,
    #[serde(default, rename = "imdbID")]
    imdb_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetailResponse {
    response: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    plot: String,
    #[serde(default)]
    director: String,
    #[serde(default)]
    actors: String,
    #[serde(default)]
    genre: String,
    #[serde(default)]
    released: String,
    #[serde(default)]
    poster: Option<String>,
    #[serde(default, rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse a `?s=` response body.
pub(crate) fn parse_search(body: &str) -> Result<ResultPage, SearchError> {
    let resp: SearchResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

    check_response_flag(&resp.response, resp.error, DEFAULT_SEARCH_ERROR)?;

    let items = resp.search.ok_or_else(|| {
        SearchError::InvalidResponse("missing 'Search' list in successful response".to_string())
    })?;

    let items = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if item.imdb_id.trim().is_empty() {
                return Err(SearchError::InvalidResponse(format!(
                    "search item {} has no imdbID",
                    index
                )));
            }
            Ok(MovieSummary {
                id: item.imdb_id,
                title: item.title,
                year: item.year,
                poster_url: poster_url(item.poster),
                genre: None,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total_results = resp
        .total_results
        .and_then(|raw| raw.trim().parse::<u32>().ok());

    Ok(ResultPage {
        items,
        total_results,
    })
}

/// Parse an `?i=` response body for movie `id`.
pub(crate) fn parse_detail(id: &str, body: &str) -> Result<MovieDetail, SearchError> {
    let resp: DetailResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

    check_response_flag(&resp.response, resp.error, DEFAULT_DETAIL_ERROR)?;

    let id = resp
        .imdb_id
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| id.to_string());

    Ok(MovieDetail {
        summary: MovieSummary {
            id,
            title: resp.title,
            year: resp.year,
            poster_url: poster_url(resp.poster),
            genre: None,
        },
        plot: resp.plot,
        director: resp.director,
        actors: resp.actors,
        genre: resp.genre,
        released: resp.released,
    })
}

fn check_response_flag(
    flag: &str,
    error: Option<String>,
    fallback: &str,
) -> Result<(), SearchError> {
    match flag {
        "True" => Ok(()),
        "False" => Err(SearchError::NoResults(
            error
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        )),
        other => Err(SearchError::InvalidResponse(format!(
            "unexpected Response value '{}'",
            other
        ))),
    }
}

fn poster_url(raw: Option<String>) -> Option<String> {
    raw.filter(|url| {
        let url = url.trim();
        !url.is_empty() && url != NOT_AVAILABLE
    })
}
