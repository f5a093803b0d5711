//! # Shared Room Store
//!
//! A cloneable handle for hosts that touch the store from several tasks.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<tokio::sync::Mutex<T>>` because:
//! 1. Several tasks may read or mutate the room
//! 2. Only one operation should run at a time, save included
//! 3. The lock is held across the save's `.await`, which a std mutex can't do
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  task A: shared.lock().await.add_item(sofa).await     ─┐               │
//! │  task B: shared.lock().await.remove_item("a").await   ─┼─► one at a    │
//! │  task C: shared.snapshot().await                      ─┘   time        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use roomplan_core::{RoomRepository, RoomState};
use tokio::sync::{Mutex, MutexGuard};

use crate::store::RoomStore;

/// Mutex-guarded [`RoomStore`] handle. Clones share the same store.
#[derive(Debug)]
pub struct SharedRoomStore<R: RoomRepository> {
    inner: Arc<Mutex<RoomStore<R>>>,
}

impl<R: RoomRepository> SharedRoomStore<R> {
    pub fn new(store: RoomStore<R>) -> Self {
        SharedRoomStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the store for one or more operations.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// shared.lock().await.add_item(item).await;
    /// ```
    pub async fn lock(&self) -> MutexGuard<'_, RoomStore<R>> {
        self.inner.lock().await
    }

    /// Runs a closure against the current room.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = shared.with_room(|room| room.items.len()).await;
    /// ```
    pub async fn with_room<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&RoomState) -> T,
    {
        let store = self.inner.lock().await;
        f(store.room())
    }

    /// Clones the current room.
    pub async fn snapshot(&self) -> RoomState {
        self.with_room(RoomState::clone).await
    }
}

impl<R: RoomRepository> Clone for SharedRoomStore<R> {
    fn clone(&self) -> Self {
        SharedRoomStore {
            inner: Arc::clone(&self.inner),
        }
    }
}
