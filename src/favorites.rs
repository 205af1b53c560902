//! Favorite movies, persisted to the local key/value store.

use crate::movie::MovieSummary;
use crate::storage::KeyValueStore;

/// Storage key holding the favorites JSON array.
pub const FAVORITES_KEY: &str = "favorites";

/// Set of favorite movies keyed by id, in insertion order.
///
/// Every mutation writes the whole set back to storage. Storage failures
/// are logged and otherwise ignored: favorites keep working in memory.
pub struct FavoritesStore {
    items: Vec<MovieSummary>,
    storage: Box<dyn KeyValueStore>,
}

impl FavoritesStore {
    /// Load favorites from `storage`.
    ///
    /// An absent, unreadable or corrupt entry yields an empty set.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let items = match storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<MovieSummary>>(&raw) {
                Ok(items) => dedup_by_id(items),
                Err(err) => {
                    tracing::warn!(error = %err, "Stored favorites are corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read favorites, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = items.len(), "Favorites loaded");
        Self { items, storage }
    }

    /// Add `movie` if absent, remove it if present. Returns whether it is
    /// a favorite afterwards. Always persists.
    pub fn toggle(&mut self, movie: &MovieSummary) -> bool {
        let now_favorite = match self.position(&movie.id) {
            Some(index) => {
                self.items.remove(index);
                false
            }
            None => {
                self.items.push(movie.clone());
                true
            }
        };

        tracing::info!(id = %movie.id, favorite = now_favorite, "Favorite toggled");
        self.persist();
        now_favorite
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn list(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to serialize favorites");
                return;
            }
        };
        if let Err(err) = self.storage.set(FAVORITES_KEY, &json) {
            tracing::warn!(error = %err, "Failed to save favorites");
        }
    }
}

fn dedup_by_id(items: Vec<MovieSummary>) -> Vec<MovieSummary> {
    let mut unique: Vec<MovieSummary> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.iter().any(|seen| seen.id == item.id) {
            unique.push(item);
        }
    }
    unique
}
