//! # Repository Module
//!
//! Database repository implementations for RoomPlan.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  RoomStore                                                             │
//! │       │  RoomRepository::load / save                                   │
//! │       ▼                                                                 │
//! │  SqliteRoomRepository   ← encodes/decodes the room record              │
//! │       │  get(key) / put(key, text)                                     │
//! │       ▼                                                                 │
//! │  KeyValueRepository     ← plain SQL on kv_store                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`KeyValueRepository`](kv::KeyValueRepository) - Text records by key
//! - [`SqliteRoomRepository`](room::SqliteRoomRepository) - The room storage port

pub mod kv;
pub mod room;
