//! Terminal front end: state, key mapping, rendering and the event loop.

pub mod app;
pub mod input;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::run;
