//! Unidirectional state updates (Model-View-Intent).
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! State only changes by running an intent through a reducer. Timers,
//! HTTP calls and persistence happen around the dispatch, never inside
//! it, so every transition is testable without a runtime.

/// Snapshot a view renders from. Reducers take and return it by value.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// A user action or an accepted async completion.
pub trait Intent: Send + 'static {}

/// Pure `(State, Intent) -> State` transition.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Reduce the state behind `slot` in place.
    fn apply(slot: &mut Self::State, intent: Self::Intent) {
        *slot = Self::reduce(std::mem::take(slot), intent);
    }
}
