//! # roomplan-store: Write-Through Room Store
//!
//! The single point of truth for a room layout.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    RoomStore Lifecycle                                  │
//! │                                                                         │
//! │  RoomStore::open(repo)                                                 │
//! │       │                                                                 │
//! │       ├── stored room found   ──► use it                               │
//! │       ├── nothing stored      ──► defaults, written back               │
//! │       ├── record unreadable   ──► defaults (warn!)                     │
//! │       └── storage unreachable ──► Err, nothing written                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────┐   any of the eight operations                        │
//! │  │   mutated    │◄──────────────────────────┐                          │
//! │  └──────┬───────┘                           │                          │
//! │         └── state.op(..); repo.save(&state) ┘                          │
//! │                                                                         │
//! │  reset() returns to the defaults and saves them like any other op.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`store`] - `RoomStore`, the eight operations
//! - [`shared`] - `SharedRoomStore`, a mutex-guarded handle for threaded hosts

pub mod shared;
pub mod store;

pub use shared::SharedRoomStore;
pub use store::RoomStore;
