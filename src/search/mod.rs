//! Search orchestration.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Session snapshot (query, page, results, flags, overlay)
//! - `intent.rs` - User actions and accepted async completions
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `debounce.rs` - Single-timer debouncer
//! - `orchestrator.rs` - Timers, requests and the generation guard around
//!   the reducer
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──debounce──→ Searching ──ok──→ Ready ──load more──→ LoadingMore
//!                        │               ↑                      │
//!                        └──err──→ Error ┴──────────ok──────────┘
//! ```

mod debounce;
mod intent;
mod orchestrator;
mod reducer;
mod state;

pub use debounce::Debouncer;
pub use intent::SearchIntent;
pub use orchestrator::{RequestMode, SearchEvent, SearchOrchestrator, SearchSettings};
pub use reducer::SearchReducer;
pub use state::{SearchPhase, SearchQuery, SearchSession};
