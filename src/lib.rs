//! Terminal movie search over the OMDb API.
//!
//! The interesting part is [`search::SearchOrchestrator`]: it debounces
//! typed queries, discards responses that arrive after the user moved on,
//! pages through results and opens a details overlay. Favorites and the
//! theme preference persist through [`storage::KeyValueStore`].

pub mod cli;
pub mod config;
pub mod favorites;
pub mod headless;
pub mod logging;
pub mod movie;
pub mod mvi;
pub mod omdb;
pub mod search;
pub mod storage;
pub mod ui;
