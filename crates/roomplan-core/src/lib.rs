//! # roomplan-core: Pure Room State for RoomPlan
//!
//! This crate holds the room layout model and every state transition the
//! editor can perform on it, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RoomPlan Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Editor / roomctl (callers)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            roomplan-store (RoomStore, write-through)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ roomplan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐  │   │
//! │  │   │   types   │  │   room    │  │   codec   │  │ repository │  │   │
//! │  │   │ RoomState │  │ add_item  │  │ JSON text │  │ RoomRepo   │  │   │
//! │  │   │ RoomItem  │  │ remove_*  │  │           │  │ (port)     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          roomplan-db (SqliteRoomRepository implements port)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (RoomState, RoomItem, CustomItem, enums)
//! - [`room`] - The state transitions on `RoomState`
//! - [`codec`] - JSON encoding of the persisted record
//! - [`validation`] - Non-enforcing consistency diagnostics
//! - [`repository`] - The storage port and an in-memory adapter
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use roomplan_core::RoomState;
//!
//! let mut room = RoomState::default();
//! room.set_room_dimensions(5.0, 4.0, "meters");
//!
//! assert_eq!(room.width, 5.0);
//! assert_eq!(room.height, 4.0);
//! assert!(room.items.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod repository;
pub mod room;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use codec::{decode_room, encode_room};
pub use error::{CoreError, CoreResult};
pub use repository::{MemoryRepository, RoomRepository, StorageError};
pub use types::*;
pub use validation::{check_consistency, ConsistencyIssue};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key under which the room record is persisted.
///
/// There is exactly one room per store, so the key is fixed. Adapters accept
/// an override for tests and side-by-side installs.
pub const ROOM_STORAGE_KEY: &str = "room";

/// Unit assigned to a freshly created or reset room.
pub const DEFAULT_ROOM_UNIT: &str = "meters";
