//! # Room Repository
//!
//! The SQLite implementation of the room storage port.
//!
//! ## Record Layout
//! ```text
//! ┌──────────┬──────────────────────────────────────────┬─────────────────────┐
//! │ key      │ value                                    │ updated_at          │
//! ├──────────┼──────────────────────────────────────────┼─────────────────────┤
//! │ room     │ {                                        │ 2026-10-18T09:12:…Z │
//! │          │   "width": 5.0,                          │                     │
//! │          │   "height": 4.0,                         │                     │
//! │          │   "unit": "meters",                      │                     │
//! │          │   "items": [ … ],                        │                     │
//! │          │   "customItems": [ … ],                  │                     │
//! │          │   "selectedItemId": null                 │                     │
//! │          │ }                                        │                     │
//! └──────────┴──────────────────────────────────────────┴─────────────────────┘
//! ```

use roomplan_core::{decode_room, encode_room, RoomRepository, RoomState, ROOM_STORAGE_KEY};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::kv::KeyValueRepository;

/// Room storage port backed by the `kv_store` table.
#[derive(Debug, Clone)]
pub struct SqliteRoomRepository {
    kv: KeyValueRepository,
    key: String,
}

impl SqliteRoomRepository {
    /// Creates a repository using the standard `"room"` key.
    pub fn new(kv: KeyValueRepository) -> Self {
        Self::with_key(kv, ROOM_STORAGE_KEY)
    }

    /// Creates a repository storing under `key`.
    pub fn with_key(kv: KeyValueRepository, key: impl Into<String>) -> Self {
        SqliteRoomRepository {
            kv,
            key: key.into(),
        }
    }

    /// Key this repository reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw stored text, without decoding.
    pub async fn raw(&self) -> DbResult<Option<String>> {
        self.kv.get(&self.key).await
    }
}

impl RoomRepository for SqliteRoomRepository {
    type Error = DbError;

    async fn load(&self) -> DbResult<Option<RoomState>> {
        let Some(text) = self.kv.get(&self.key).await? else {
            debug!(key = %self.key, "No stored room");
            return Ok(None);
        };

        let room = decode_room(&text).map_err(|e| DbError::codec(&self.key, e))?;
        debug!(
            key = %self.key,
            items = room.items.len(),
            custom_items = room.custom_items.len(),
            "Room loaded"
        );
        Ok(Some(room))
    }

    async fn save(&self, room: &RoomState) -> DbResult<()> {
        let text = encode_room(room).map_err(|e| DbError::codec(&self.key, e))?;
        self.kv.put(&self.key, &text).await
    }
}
