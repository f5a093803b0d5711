//! # roomplan-db: Database Layer for RoomPlan
//!
//! This crate provides durable storage for the room record.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RoomPlan Data Flow                               │
//! │                                                                         │
//! │  RoomStore::add_item(..)                                               │
//! │       │  state.add_item(..); repo.save(&state).await                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   roomplan-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │    │                    │  │ (embedded) │  │   │
//! │  │   │               │    │ KeyValueRepository │  │            │  │   │
//! │  │   │ SqlitePool    │◄───│ SqliteRoomRepo     │  │ 001_kv.sql │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   kv_store: 'room' → { "width": .., "items": [..], .. }         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Key-value access and the room repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roomplan_core::RoomRepository;
//! use roomplan_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/roomplan.db")).await?;
//!
//! let repo = db.room();
//! let room = repo.load().await?.unwrap_or_default();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DbLocation};

pub use repository::kv::KeyValueRepository;
pub use repository::room::SqliteRoomRepository;
