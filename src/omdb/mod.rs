//! Remote search client for the OMDb movie database.
//!
//! Two read-only operations, search by title and fetch by id, each
//! normalized into `Result<_, SearchError>`:
//!
//! - transport failure or non-2xx status → [`SearchError::Network`]
//! - `Response: "False"` → [`SearchError::NoResults`]
//! - a body that is not the documented shape → [`SearchError::InvalidResponse`]

mod client;
mod error;
mod wire;

pub use client::{MovieApi, OmdbClient};
pub use error::SearchError;
