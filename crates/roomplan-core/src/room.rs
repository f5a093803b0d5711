//! # Room State Transitions
//!
//! The eight operations the editor performs on a [`RoomState`].
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Room State Operations                                │
//! │                                                                         │
//! │  Operation               Lookup        Effect                          │
//! │  ─────────               ──────        ──────                          │
//! │  set_room_dimensions     -             overwrite width/height/unit     │
//! │  add_item                -             items.push(item)                │
//! │  update_item             first id      items[i] = item (or no-op)      │
//! │  add_custom_item         -             custom_items.push(item)         │
//! │  select_item             -             selected_item_id = id           │
//! │  remove_item             every id      items.retain(id != ..)          │
//! │  remove_custom_item      every name    custom_items.retain(name != ..) │
//! │  reset                   -             *self = RoomState::default()    │
//! │                                                                         │
//! │  NONE of these fail. Missing ids/names make the operation a no-op.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Removal Semantics
//! Removal filters rather than deleting the first match, so duplicate ids or
//! names disappear together in one call. Update only ever touches the first
//! match.
//!
//! ## Selection
//! Removing the selected item leaves `selected_item_id` pointing at it.
//! Clearing the selection is the caller's job (`select_item(None)`).

use crate::types::{CustomItem, RoomItem, RoomState};

impl RoomState {
    /// Overwrites the room extents and display unit.
    pub fn set_room_dimensions(&mut self, width: f64, height: f64, unit: impl Into<String>) {
        self.width = width;
        self.height = height;
        self.unit = unit.into();
    }

    /// Appends an item. No uniqueness check.
    pub fn add_item(&mut self, item: RoomItem) {
        self.items.push(item);
    }

    /// Replaces the first item whose id matches `item.id`, keeping its
    /// position in the sequence.
    ///
    /// Full replacement, no field merge. Returns `false` when no item had
    /// that id, in which case nothing changed.
    pub fn update_item(&mut self, item: RoomItem) -> bool {
        match self.items.iter().position(|i| i.id == item.id) {
            Some(index) => {
                self.items[index] = item;
                true
            }
            None => false,
        }
    }

    /// Appends a template. Duplicate names are allowed.
    pub fn add_custom_item(&mut self, item: CustomItem) {
        self.custom_items.push(item);
    }

    /// Sets or clears the selection. The id is not checked against `items`.
    pub fn select_item(&mut self, id: Option<String>) {
        self.selected_item_id = id;
    }

    /// Removes every item with the given id and returns how many went.
    pub fn remove_item(&mut self, id: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        before - self.items.len()
    }

    /// Removes every template with the given name and returns how many went.
    pub fn remove_custom_item(&mut self, name: &str) -> usize {
        let before = self.custom_items.len();
        self.custom_items.retain(|c| c.name != name);
        before - self.custom_items.len()
    }

    /// Puts the room back to the empty default.
    pub fn reset(&mut self) {
        *self = RoomState::default();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
