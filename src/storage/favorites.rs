//! Favorites persisted as a JSON array under a single store key.
//!
//! The list only grows through the UI: there is no remove operation, and
//! adding an id that is already present is a no-op.

use std::sync::Arc;
use tokio::sync::Mutex;

use super::schema::Database;
use super::types::{DatabaseError, FavoriteRecord};

/// Store key holding the JSON-encoded favorites array.
pub const FAVORITES_KEY: &str = "favoritos";

/// Clones share one write lock, so saves spawned as separate tasks
/// never interleave their read-modify-write.
#[derive(Clone)]
pub struct FavoritesStore {
    db: Database,
    write_lock: Arc<Mutex<()>>,
}

impl FavoritesStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// All stored favorites in insertion order.
    ///
    /// A missing key, a read failure or a value that is not a favorites array
    /// all yield an empty list. Corrupt data is logged, never returned as an error.
    pub async fn list(&self) -> Vec<FavoriteRecord> {
        let raw = match self.db.get_value(FAVORITES_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read favorites, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<FavoriteRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Stored favorites are unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Append `record` unless its id is already stored.
    ///
    /// Returns `Ok(true)` when the record was written, `Ok(false)` when the id
    /// was already a favorite.
    pub async fn add(&self, record: FavoriteRecord) -> Result<bool, DatabaseError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.list().await;
        if records.iter().any(|r| r.id == record.id) {
            tracing::debug!(id = record.id, "Already a favorite");
            return Ok(false);
        }

        tracing::info!(id = record.id, name = %record.name, "Saving favorite");
        records.push(record);
        let encoded = serde_json::to_string(&records)?;
        self.db.set_value(FAVORITES_KEY, &encoded).await?;
        Ok(true)
    }

    pub async fn is_favorite(&self, id: u32) -> bool {
        self.list().await.iter().any(|r| r.id == id)
    }

    /// Drop every stored favorite (`--reset-favorites`).
    pub async fn clear(&self) -> Result<(), DatabaseError> {
        let _guard = self.write_lock.lock().await;
        self.db.remove_value(FAVORITES_KEY).await?;
        Ok(())
    }
}
