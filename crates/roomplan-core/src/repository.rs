//! # Storage Port
//!
//! The trait the store persists through, plus an in-memory adapter.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storage Port                                         │
//! │                                                                         │
//! │  RoomStore (roomplan-store)                                            │
//! │       │                                                                 │
//! │       │  open:    repo.load().await   ──► Option<RoomState>            │
//! │       │  mutate:  repo.save(&room).await                               │
//! │       ▼                                                                 │
//! │  RoomRepository (THIS TRAIT)                                           │
//! │       │                                                                 │
//! │       ├── MemoryRepository      key → JSON text in a shared map        │
//! │       └── SqliteRoomRepository  kv_store table (roomplan-db)           │
//! │                                                                         │
//! │  One record, one key. Every save writes the full state.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::codec::{decode_room, encode_room};
use crate::error::{CoreError, CoreResult};
use crate::types::RoomState;
use crate::ROOM_STORAGE_KEY;

// =============================================================================
// Port
// =============================================================================

/// Durable home of the room record.
///
/// ## Contract
/// - `load` returns `Ok(None)` when nothing has been saved yet
/// - `load` returns an error for a record that exists but cannot be read
/// - `save` replaces the whole record
///
/// Futures are `Send` so a store can live behind a Tokio mutex.
pub trait RoomRepository: Send + Sync {
    /// Error reported by this adapter.
    type Error: StorageError;

    /// Reads the stored room, if any.
    fn load(&self) -> impl Future<Output = Result<Option<RoomState>, Self::Error>> + Send;

    /// Writes the full room, replacing whatever was stored.
    fn save(&self, room: &RoomState) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// What a repository error says about the stored record.
///
/// The store only starts over from defaults when the record itself is bad.
/// Any other failure (storage offline, lock timeout) leaves a good record
/// that a later write would clobber, so opening must fail instead.
pub trait StorageError: std::error::Error + Send + Sync + 'static {
    /// The record was read but cannot be decoded.
    fn is_unreadable_record(&self) -> bool;
}

impl StorageError for CoreError {
    fn is_unreadable_record(&self) -> bool {
        matches!(self, CoreError::Codec(_))
    }
}

// =============================================================================
// In-Memory Adapter
// =============================================================================

/// Map-backed repository.
///
/// Records are held as encoded text, so a save followed by a load goes
/// through the same codec as the database adapter. Clones share the map;
/// building a second store from a clone behaves like a process restart.
///
/// ## Usage
/// ```rust
/// use roomplan_core::{MemoryRepository, RoomRepository, RoomState};
///
/// # tokio_test_block_on(async {
/// let repo = MemoryRepository::new();
/// assert_eq!(repo.load().await.unwrap(), None);
///
/// repo.save(&RoomState::default()).await.unwrap();
/// assert_eq!(repo.load().await.unwrap(), Some(RoomState::default()));
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryRepository {
    key: String,
    entries: Arc<Mutex<HashMap<String, String>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryRepository {
    /// Creates an empty repository using the standard room key.
    pub fn new() -> Self {
        Self::with_key(ROOM_STORAGE_KEY)
    }

    /// Creates an empty repository storing under `key`.
    pub fn with_key(key: impl Into<String>) -> Self {
        MemoryRepository {
            key: key.into(),
            entries: Arc::new(Mutex::new(HashMap::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Key this repository reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw stored text for the room key.
    pub fn raw(&self) -> Option<String> {
        self.entries().get(&self.key).cloned()
    }

    /// Stores raw text under the room key, bypassing the codec.
    ///
    /// Lets callers plant legacy or corrupt records.
    pub fn put_raw(&self, text: impl Into<String>) {
        let key = self.key.clone();
        self.entries().insert(key, text.into());
    }

    /// Makes every load and save fail until switched back on.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_available(&self) -> CoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CoreError::StorageUnavailable(format!(
                "memory repository for '{}' is switched off",
                self.key
            )));
        }
        Ok(())
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRepository for MemoryRepository {
    type Error = CoreError;

    async fn load(&self) -> CoreResult<Option<RoomState>> {
        self.ensure_available()?;
        self.raw().map(|text| decode_room(&text)).transpose()
    }

    async fn save(&self, room: &RoomState) -> CoreResult<()> {
        self.ensure_available()?;
        let text = encode_room(room)?;
        self.put_raw(text);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_repository_loads_none() {
        let repo = MemoryRepository::new();
        assert_eq!(repo.key(), "room");
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = MemoryRepository::new();
        let mut room = RoomState::default();
        room.set_room_dimensions(4.0, 3.0, "feet");
        repo.save(&room).await.unwrap();

        let restarted = repo.clone();
        assert_eq!(restarted.load().await.unwrap(), Some(room));
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let repo = MemoryRepository::with_key("room-a");
        repo.save(&RoomState::default()).await.unwrap();

        let other = MemoryRepository::with_key("room-b");
        assert!(other.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record_is_an_error() {
        let repo = MemoryRepository::new();
        repo.put_raw("{ truncated");
        assert!(matches!(repo.load().await, Err(CoreError::Codec(_))));
    }

    #[tokio::test]
    async fn test_unavailable_fails_both_ways() {
        let repo = MemoryRepository::new();
        repo.set_unavailable(true);

        assert!(matches!(
            repo.save(&RoomState::default()).await,
            Err(CoreError::StorageUnavailable(_))
        ));
        assert!(repo.load().await.is_err());
        assert!(repo.raw().is_none());

        repo.set_unavailable(false);
        repo.save(&RoomState::default()).await.unwrap();
        assert!(repo.raw().is_some());
    }

    #[tokio::test]
    async fn test_only_codec_errors_mark_the_record_unreadable() {
        let repo = MemoryRepository::new();
        repo.put_raw("{ \"width\": ");
        let corrupt = repo.load().await.unwrap_err();
        assert!(corrupt.is_unreadable_record());

        repo.set_unavailable(true);
        let offline = repo.load().await.unwrap_err();
        assert!(!offline.is_unreadable_record());
    }
}
