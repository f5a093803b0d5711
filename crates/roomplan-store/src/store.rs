//! # Room Store
//!
//! Applies room operations and persists the result after each one.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Operations                                     │
//! │                                                                         │
//! │  Caller                  RoomStore                  RoomRepository      │
//! │  ──────                  ─────────                  ──────────────      │
//! │                                                                         │
//! │  add_item(item) ───────► room.add_item(item)                           │
//! │                          save(&room) ─────────────► upsert 'room'      │
//! │                    ◄──── ()                                            │
//! │                                                                         │
//! │  If the save fails the in-memory change stands, the failure is         │
//! │  logged and counted, and the caller still sees `()`.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exclusive Access
//! Every operation takes `&mut self`, so one store has one writer at a time.
//! Wrap it in [`SharedRoomStore`](crate::SharedRoomStore) to share it.

use roomplan_core::{
    check_consistency, CustomItem, RoomItem, RoomRepository, RoomState, StorageError,
};
use tracing::{debug, info, warn};

/// The room layout plus the repository it is persisted through.
#[derive(Debug)]
pub struct RoomStore<R: RoomRepository> {
    repo: R,
    room: RoomState,
    persist_failures: u64,
}

impl<R: RoomRepository> RoomStore<R> {
    // =========================================================================
    // Opening
    // =========================================================================

    /// Opens the store, loading the stored room.
    ///
    /// ## Load Policy
    /// - Stored room present: used as-is
    /// - Nothing stored: defaults, written back immediately
    /// - Record present but undecodable: defaults, logged at `warn`. The bad
    ///   record stays until the next mutation overwrites it.
    /// - Storage unreachable: the error is returned and nothing is written
    ///
    /// Use [`try_open`](Self::try_open) to fail on an undecodable record too.
    pub async fn open(repo: R) -> Result<Self, R::Error> {
        let loaded = repo.load().await;
        match loaded {
            Ok(stored) => Ok(Self::start(repo, stored).await),
            Err(e) if e.is_unreadable_record() => {
                warn!(error = %e, "Stored room could not be decoded, starting from defaults");
                Ok(Self::from_parts(repo, RoomState::default()))
            }
            Err(e) => {
                warn!(error = %e, "Room storage unavailable, not opening");
                Err(e)
            }
        }
    }

    /// Opens the store, failing if the stored room cannot be loaded.
    pub async fn try_open(repo: R) -> Result<Self, R::Error> {
        let stored = repo.load().await?;
        Ok(Self::start(repo, stored).await)
    }

    async fn start(repo: R, stored: Option<RoomState>) -> Self {
        match stored {
            Some(room) => {
                info!(
                    items = room.items.len(),
                    custom_items = room.custom_items.len(),
                    "Room loaded"
                );
                Self::from_parts(repo, room)
            }
            None => {
                info!("No stored room, starting empty");
                let mut store = Self::from_parts(repo, RoomState::default());
                store.persist("open").await;
                store
            }
        }
    }

    fn from_parts(repo: R, room: RoomState) -> Self {
        for issue in check_consistency(&room) {
            debug!(%issue, "Room consistency");
        }

        RoomStore {
            repo,
            room,
            persist_failures: 0,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current room snapshot.
    pub fn room(&self) -> &RoomState {
        &self.room
    }

    /// The repository this store persists through.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Number of saves that have failed since the store was opened.
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures
    }

    /// Consumes the store, returning its repository.
    pub fn into_repository(self) -> R {
        self.repo
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Overwrites the room extents and display unit.
    pub async fn set_room_dimensions(&mut self, width: f64, height: f64, unit: impl Into<String>) {
        self.room.set_room_dimensions(width, height, unit);
        debug!(width, height, unit = %self.room.unit, "Room dimensions set");
        self.persist("set_room_dimensions").await;
    }

    /// Appends an item.
    pub async fn add_item(&mut self, item: RoomItem) {
        debug!(id = %item.id, name = %item.name, "Adding item");
        self.room.add_item(item);
        self.persist("add_item").await;
    }

    /// Replaces the first item with the same id. Missing id: nothing changes,
    /// though the state is still written back.
    pub async fn update_item(&mut self, item: RoomItem) {
        let id = item.id.clone();
        if self.room.update_item(item) {
            debug!(id = %id, "Item updated");
        } else {
            debug!(id = %id, "No item with this id, update ignored");
        }
        self.persist("update_item").await;
    }

    /// Appends a template.
    pub async fn add_custom_item(&mut self, item: CustomItem) {
        debug!(name = %item.name, "Adding custom item");
        self.room.add_custom_item(item);
        self.persist("add_custom_item").await;
    }

    /// Sets or clears the selection.
    pub async fn select_item(&mut self, id: Option<String>) {
        debug!(id = ?id, "Selection changed");
        self.room.select_item(id);
        self.persist("select_item").await;
    }

    /// Removes every item with the given id. The selection is left alone.
    pub async fn remove_item(&mut self, id: &str) {
        let removed = self.room.remove_item(id);
        debug!(id = %id, removed, "Items removed");
        self.persist("remove_item").await;
    }

    /// Removes every template with the given name.
    pub async fn remove_custom_item(&mut self, name: &str) {
        let removed = self.room.remove_custom_item(name);
        debug!(name = %name, removed, "Custom items removed");
        self.persist("remove_custom_item").await;
    }

    /// Replaces the whole room with the defaults.
    pub async fn reset(&mut self) {
        self.room.reset();
        info!("Room reset");
        self.persist("reset").await;
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Saves the current room and reports the outcome.
    pub async fn flush(&self) -> Result<(), R::Error> {
        self.repo.save(&self.room).await
    }

    async fn persist(&mut self, operation: &'static str) {
        if let Err(e) = self.repo.save(&self.room).await {
            self.persist_failures += 1;
            warn!(
                operation,
                error = %e,
                failures = self.persist_failures,
                "Failed to persist room, keeping in-memory state"
            );
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use roomplan_core::{decode_room, CoreError, LabelPlacement, LengthUnit, MemoryRepository};

    fn item(id: &str, name: &str) -> RoomItem {
        RoomItem {
            id: id.to_string(),
            name: name.to_string(),
            group: "Living".to_string(),
            color: "#808080".to_string(),
            width: 1.0,
            height: 0.5,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            label_placement: LabelPlacement::Inside,
            unit: LengthUnit::Meters,
            no_color: false,
        }
    }

    fn template(name: &str) -> CustomItem {
        CustomItem::from(&item("unused", name))
    }

    fn stored(repo: &MemoryRepository) -> RoomState {
        decode_room(&repo.raw().expect("room was written")).unwrap()
    }

    #[tokio::test]
    async fn test_open_empty_writes_defaults() {
        let repo = MemoryRepository::new();
        let store = RoomStore::open(repo.clone()).await.unwrap();

        assert_eq!(store.room(), &RoomState::default());
        assert_eq!(stored(&repo), RoomState::default());
        assert_eq!(store.persist_failures(), 0);
    }

    #[tokio::test]
    async fn test_scenario_set_dimensions() {
        let repo = MemoryRepository::new();
        let mut store = RoomStore::open(repo.clone()).await.unwrap();

        store.set_room_dimensions(5.0, 4.0, "meters").await;

        assert_eq!(store.room().width, 5.0);
        assert_eq!(store.room().height, 4.0);
        assert_eq!(store.room().unit, "meters");
        assert_eq!(&stored(&repo), store.room());
    }

    #[tokio::test]
    async fn test_scenario_add_two_items() {
        let mut store = RoomStore::open(MemoryRepository::new()).await.unwrap();

        store.add_item(item("a", "Sofa")).await;
        store.add_item(item("b", "Table")).await;

        assert_eq!(store.room().items.len(), 2);
        assert_eq!(store.room().items[0].id, "a");
    }

    #[tokio::test]
    async fn test_scenario_remove_first() {
        let repo = MemoryRepository::new();
        let mut store = RoomStore::open(repo.clone()).await.unwrap();
        store.add_item(item("a", "Sofa")).await;
        store.add_item(item("b", "Table")).await;

        store.remove_item("a").await;

        assert_eq!(store.room().items, vec![item("b", "Table")]);
        assert_eq!(stored(&repo).items, vec![item("b", "Table")]);
    }

    #[tokio::test]
    async fn test_scenario_selection_dangles_after_remove() {
        let repo = MemoryRepository::new();
        let mut store = RoomStore::open(repo.clone()).await.unwrap();
        store.add_item(item("a", "Sofa")).await;

        store.select_item(Some("a".to_string())).await;
        store.remove_item("a").await;

        assert_eq!(store.room().selected_item_id.as_deref(), Some("a"));
        assert_eq!(stored(&repo).selected_item_id.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_update_item_write_through() {
        let repo = MemoryRepository::new();
        let mut store = RoomStore::open(repo.clone()).await.unwrap();
        store.add_item(item("a", "Sofa")).await;

        let mut moved = item("a", "Sofa");
        moved.x = 3.0;
        moved.rotation = 180.0;
        store.update_item(moved.clone()).await;
        store.update_item(item("missing", "Ghost")).await;

        assert_eq!(store.room().items, vec![moved.clone()]);
        assert_eq!(stored(&repo).items, vec![moved]);
    }

    #[tokio::test]
    async fn test_custom_items_write_through() {
        let repo = MemoryRepository::new();
        let mut store = RoomStore::open(repo.clone()).await.unwrap();

        store.add_custom_item(template("Desk")).await;
        store.add_custom_item(template("Desk")).await;
        store.add_custom_item(template("Chair")).await;
        assert_eq!(stored(&repo).custom_items.len(), 3);

        store.remove_custom_item("Desk").await;
        assert_eq!(stored(&repo).custom_items, vec![template("Chair")]);
    }

    #[tokio::test]
    async fn test_reset_overwrites_storage() {
        let repo = MemoryRepository::new();
        let mut store = RoomStore::open(repo.clone()).await.unwrap();
        store.set_room_dimensions(7.0, 7.0, "feet").await;
        store.add_item(item("a", "Sofa")).await;
        store.select_item(Some("a".to_string())).await;

        store.reset().await;
        store.reset().await;

        assert_eq!(store.room(), &RoomState::default());
        assert_eq!(stored(&repo), RoomState::default());
    }

    #[tokio::test]
    async fn test_reopen_sees_last_write() {
        let repo = MemoryRepository::new();
        let mut store = RoomStore::open(repo.clone()).await.unwrap();
        store.set_room_dimensions(3.0, 2.0, "cm").await;
        store.add_item(item("a", "Sofa")).await;
        store.add_custom_item(template("Desk")).await;
        store.select_item(Some("a".to_string())).await;
        let expected = store.room().clone();
        drop(store);

        let reopened = RoomStore::open(repo).await.unwrap();
        assert_eq!(reopened.room(), &expected);
    }

    #[tokio::test]
    async fn test_infinite_dimensions_do_not_lose_the_room() {
        let repo = MemoryRepository::new();
        let mut store = RoomStore::open(repo.clone()).await.unwrap();
        store.add_item(item("a", "Sofa")).await;
        store.set_room_dimensions(f64::INFINITY, f64::NAN, "meters").await;
        drop(store);

        let mut reopened = RoomStore::try_open(repo.clone()).await.unwrap();
        assert_eq!(reopened.room().width, f64::INFINITY);
        assert!(reopened.room().height.is_nan());

        reopened.select_item(Some("a".to_string())).await;
        assert_eq!(stored(&repo).items, vec![item("a", "Sofa")]);
    }

    #[tokio::test]
    async fn test_failed_save_is_counted_not_raised() {
        let repo = MemoryRepository::new();
        let mut store = RoomStore::open(repo.clone()).await.unwrap();
        repo.set_unavailable(true);

        store.add_item(item("a", "Sofa")).await;
        store.remove_item("zzz").await;

        assert_eq!(store.room().items.len(), 1);
        assert_eq!(store.persist_failures(), 2);
        assert!(matches!(store.flush().await, Err(CoreError::StorageUnavailable(_))));

        repo.set_unavailable(false);
        store.flush().await.unwrap();
        assert_eq!(stored(&repo).items.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_record_falls_back_to_defaults() {
        let repo = MemoryRepository::new();
        repo.put_raw("{\"width\": ");

        let mut store = RoomStore::open(repo.clone()).await.unwrap();
        assert_eq!(store.room(), &RoomState::default());
        assert_eq!(repo.raw().as_deref(), Some("{\"width\": "));

        store.set_room_dimensions(2.0, 2.0, "meters").await;
        assert_eq!(stored(&repo).width, 2.0);
    }

    #[tokio::test]
    async fn test_open_during_outage_keeps_stored_room() {
        let repo = MemoryRepository::new();
        let mut saved = RoomState::default();
        saved.set_room_dimensions(9.0, 9.0, "meters");
        repo.save(&saved).await.unwrap();

        repo.set_unavailable(true);
        let result = RoomStore::open(repo.clone()).await;
        assert!(matches!(result, Err(CoreError::StorageUnavailable(_))));

        repo.set_unavailable(false);
        let mut store = RoomStore::open(repo.clone()).await.unwrap();
        store.select_item(None).await;
        assert_eq!(stored(&repo).width, 9.0);
    }

    #[tokio::test]
    async fn test_try_open_surfaces_corrupt_record() {
        let repo = MemoryRepository::new();
        repo.put_raw("garbage");

        let result = RoomStore::try_open(repo).await;
        assert!(matches!(result, Err(CoreError::Codec(_))));
    }

    #[tokio::test]
    async fn test_legacy_record_missing_fields_loads() {
        let repo = MemoryRepository::new();
        repo.put_raw(r#"{ "width": 4, "height": 3, "unit": "feet", "items": [] }"#);

        let store = RoomStore::try_open(repo).await.unwrap();
        assert_eq!(store.room().unit, "feet");
        assert!(store.room().custom_items.is_empty());
        assert_eq!(store.room().selected_item_id, None);
    }
}
