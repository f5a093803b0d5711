//! # Consistency Diagnostics
//!
//! Reports the places where a room drifts from its informal invariants.
//!
//! ## Reporting, Not Enforcing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Checks Happen                                │
//! │                                                                         │
//! │  RoomStore::open ──► check_consistency ──► debug! per issue            │
//! │  roomctl check   ──► check_consistency ──► printed report              │
//! │                                                                         │
//! │  The room operations accept duplicate ids, duplicate template names    │
//! │  and dangling selections. This module only describes them.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::types::RoomState;

/// A single departure from the room's informal invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyIssue {
    /// `selected_item_id` names an item that isn't in `items`.
    DanglingSelection { id: String },

    /// More than one placed item shares an id. Only the first is reachable
    /// by update.
    DuplicateItemId { id: String, count: usize },

    /// More than one template shares a name. Removal takes all of them.
    DuplicateCustomItemName { name: String, count: usize },
}

impl fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyIssue::DanglingSelection { id } => {
                write!(f, "selection '{}' does not match any item", id)
            }
            ConsistencyIssue::DuplicateItemId { id, count } => {
                write!(f, "item id '{}' is used {} times", id, count)
            }
            ConsistencyIssue::DuplicateCustomItemName { name, count } => {
                write!(f, "custom item name '{}' is used {} times", name, count)
            }
        }
    }
}

/// Lists every consistency issue in the room.
///
/// Issues come out in a stable order: the selection first, then duplicate
/// ids, then duplicate template names, each in order of first appearance.
///
/// ## Example
/// ```rust
/// use roomplan_core::{check_consistency, ConsistencyIssue, RoomState};
///
/// let mut room = RoomState::default();
/// room.select_item(Some("sofa".to_string()));
///
/// assert_eq!(
///     check_consistency(&room),
///     vec![ConsistencyIssue::DanglingSelection { id: "sofa".to_string() }]
/// );
/// ```
pub fn check_consistency(room: &RoomState) -> Vec<ConsistencyIssue> {
    let mut issues = Vec::new();

    if let Some(id) = &room.selected_item_id {
        if room.item(id).is_none() {
            issues.push(ConsistencyIssue::DanglingSelection { id: id.clone() });
        }
    }

    for (id, count) in repeated(room.items.iter().map(|i| i.id.as_str())) {
        issues.push(ConsistencyIssue::DuplicateItemId { id, count });
    }

    for (name, count) in repeated(room.custom_items.iter().map(|c| c.name.as_str())) {
        issues.push(ConsistencyIssue::DuplicateCustomItemName { name, count });
    }

    issues
}

/// Keys seen more than once, with their counts, in first-seen order.
fn repeated<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for key in keys {
        let count = counts.entry(key).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|key| {
            let count = counts[key];
            (count > 1).then(|| (key.to_string(), count))
        })
        .collect()
}
