//! # Error Types
//!
//! Domain-specific error types for roomplan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  roomplan-core errors (this file)                                      │
//! │  └── CoreError        - Enum parsing, codec, in-memory storage         │
//! │                                                                         │
//! │  roomplan-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  roomctl (binary)                                                      │
//! │  └── anyhow::Error    - What the terminal sees                         │
//! │                                                                         │
//! │  NOTE: none of these reach callers of the eight room operations.       │
//! │        Persistence failures are logged and counted by the store.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors produced by the pure room layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A label placement string did not name a known placement.
    #[error("Unknown label placement: '{0}' (expected top, right, bottom, left or inside)")]
    UnknownLabelPlacement(String),

    /// A unit string did not name a known length unit.
    #[error("Unknown length unit: '{0}' (expected meters, cm, feet or inches)")]
    UnknownLengthUnit(String),

    /// The room record could not be encoded or decoded.
    ///
    /// ## When This Occurs
    /// - The stored text is not JSON
    /// - A field has the wrong type (e.g. `"width": "wide"`)
    /// - An item carries a unit or placement outside the closed enumerations
    #[error("Room record codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The in-memory storage adapter was switched off.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
