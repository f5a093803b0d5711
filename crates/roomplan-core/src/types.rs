//! # Domain Types
//!
//! Core domain types used throughout RoomPlan.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  RoomState (root, one per store)                                 │  │
//! │  │  width, height, unit, selectedItemId                             │  │
//! │  │                                                                  │  │
//! │  │   items ───────────────► ┌─────────────────┐                     │  │
//! │  │                          │    RoomItem     │  placed, has id     │  │
//! │  │                          │  x, y, rotation │                     │  │
//! │  │                          └─────────────────┘                     │  │
//! │  │   customItems ─────────► ┌─────────────────┐                     │  │
//! │  │                          │   CustomItem    │  template, by name  │  │
//! │  │                          └─────────────────┘                     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ LabelPlacement  │   │   LengthUnit    │                             │
//! │  │ top right       │   │ meters cm       │                             │
//! │  │ bottom left     │   │ feet inches     │                             │
//! │  │ inside          │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Field names serialize in camelCase (`customItems`, `selectedItemId`,
//! `labelPlacement`, `noColor`) so the persisted record matches what the
//! editor front-end reads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::DEFAULT_ROOM_UNIT;

// =============================================================================
// Label Placement
// =============================================================================

/// Where an item's label is drawn relative to its footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum LabelPlacement {
    Top,
    Right,
    Bottom,
    Left,
    Inside,
}

impl LabelPlacement {
    /// All placements, in editor menu order.
    pub const ALL: [LabelPlacement; 5] = [
        LabelPlacement::Top,
        LabelPlacement::Right,
        LabelPlacement::Bottom,
        LabelPlacement::Left,
        LabelPlacement::Inside,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelPlacement::Top => "top",
            LabelPlacement::Right => "right",
            LabelPlacement::Bottom => "bottom",
            LabelPlacement::Left => "left",
            LabelPlacement::Inside => "inside",
        }
    }
}

impl fmt::Display for LabelPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelPlacement {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LabelPlacement::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::UnknownLabelPlacement(s.to_string()))
    }
}

// =============================================================================
// Length Unit
// =============================================================================

/// Unit an item's dimensions were entered in.
///
/// ## Note
/// Stored as-is. Converting between units is the caller's concern; the store
/// never rescales geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Meters,
    Cm,
    Feet,
    Inches,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 4] = [
        LengthUnit::Meters,
        LengthUnit::Cm,
        LengthUnit::Feet,
        LengthUnit::Inches,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Meters => "meters",
            LengthUnit::Cm => "cm",
            LengthUnit::Feet => "feet",
            LengthUnit::Inches => "inches",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LengthUnit::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| CoreError::UnknownLengthUnit(s.to_string()))
    }
}

// =============================================================================
// Room Item
// =============================================================================

/// A furniture or fixture piece placed in the room.
///
/// ## Identity
/// `id` is supplied by the caller. The store looks items up by id for
/// update and removal but never checks that ids are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoomItem {
    /// Caller-assigned identifier.
    pub id: String,

    /// Display name (e.g. "Sofa").
    pub name: String,

    /// Free-form grouping used by the editor palette.
    pub group: String,

    /// Fill color, any CSS color string.
    pub color: String,

    #[serde(with = "crate::codec::number")]
    #[ts(type = "number | string")]
    pub width: f64,
    #[serde(with = "crate::codec::number")]
    #[ts(type = "number | string")]
    pub height: f64,

    /// Position of the item within the room.
    #[serde(with = "crate::codec::number")]
    #[ts(type = "number | string")]
    pub x: f64,
    #[serde(with = "crate::codec::number")]
    #[ts(type = "number | string")]
    pub y: f64,

    /// Rotation in degrees.
    #[serde(with = "crate::codec::number")]
    #[ts(type = "number | string")]
    pub rotation: f64,

    pub label_placement: LabelPlacement,

    pub unit: LengthUnit,

    /// Draw the outline only.
    pub no_color: bool,
}

// =============================================================================
// Custom Item
// =============================================================================

/// A reusable item template saved by the user.
///
/// Templates have no position and no id; `name` is what removal matches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomItem {
    pub name: String,
    pub group: String,
    pub color: String,
    #[serde(with = "crate::codec::number")]
    #[ts(type = "number | string")]
    pub width: f64,
    #[serde(with = "crate::codec::number")]
    #[ts(type = "number | string")]
    pub height: f64,
    #[serde(with = "crate::codec::number")]
    #[ts(type = "number | string")]
    pub rotation: f64,
    pub label_placement: LabelPlacement,
    pub unit: LengthUnit,
    pub no_color: bool,
}

impl CustomItem {
    /// Builds a placed item from this template.
    ///
    /// The id is taken from the caller; the room layer never generates ids.
    ///
    /// ## Example
    /// ```rust
    /// use roomplan_core::{CustomItem, LabelPlacement, LengthUnit};
    ///
    /// let desk = CustomItem {
    ///     name: "Desk".to_string(),
    ///     group: "Office".to_string(),
    ///     color: "#8b5a2b".to_string(),
    ///     width: 1.4,
    ///     height: 0.7,
    ///     rotation: 0.0,
    ///     label_placement: LabelPlacement::Inside,
    ///     unit: LengthUnit::Meters,
    ///     no_color: false,
    /// };
    ///
    /// let placed = desk.instantiate("desk-1", 2.0, 0.5);
    /// assert_eq!(placed.id, "desk-1");
    /// assert_eq!(placed.name, "Desk");
    /// assert_eq!((placed.x, placed.y), (2.0, 0.5));
    /// ```
    pub fn instantiate(&self, id: impl Into<String>, x: f64, y: f64) -> RoomItem {
        RoomItem {
            id: id.into(),
            name: self.name.clone(),
            group: self.group.clone(),
            color: self.color.clone(),
            width: self.width,
            height: self.height,
            x,
            y,
            rotation: self.rotation,
            label_placement: self.label_placement,
            unit: self.unit,
            no_color: self.no_color,
        }
    }
}

impl From<&RoomItem> for CustomItem {
    /// Saves a placed item as a template, dropping its id and position.
    fn from(item: &RoomItem) -> Self {
        CustomItem {
            name: item.name.clone(),
            group: item.group.clone(),
            color: item.color.clone(),
            width: item.width,
            height: item.height,
            rotation: item.rotation,
            label_placement: item.label_placement,
            unit: item.unit,
            no_color: item.no_color,
        }
    }
}

// =============================================================================
// Room State
// =============================================================================

/// The whole persisted room layout.
///
/// ## Invariants (not enforced)
/// - `items` normally holds one entry per id; duplicates are tolerated
/// - `selected_item_id` normally names an entry in `items`; it may dangle
///
/// ## Decoding
/// `#[serde(default)]` lets a record that is missing top-level fields load
/// with those fields at their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomState {
    #[serde(with = "crate::codec::number")]
    #[ts(type = "number | string")]
    pub width: f64,
    #[serde(with = "crate::codec::number")]
    #[ts(type = "number | string")]
    pub height: f64,

    /// Display unit for the room. Open string, stored as given.
    pub unit: String,

    /// Placed items in insertion order.
    pub items: Vec<RoomItem>,

    /// Saved templates in insertion order.
    pub custom_items: Vec<CustomItem>,

    /// Currently selected item, if any.
    pub selected_item_id: Option<String>,
}

impl Default for RoomState {
    /// An empty room: zero extents, meters, nothing placed, nothing selected.
    fn default() -> Self {
        RoomState {
            width: 0.0,
            height: 0.0,
            unit: DEFAULT_ROOM_UNIT.to_string(),
            items: Vec::new(),
            custom_items: Vec::new(),
            selected_item_id: None,
        }
    }
}

impl RoomState {
    /// Returns the first item with the given id.
    pub fn item(&self, id: &str) -> Option<&RoomItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Returns the item the selection points at, if it exists.
    pub fn selected_item(&self) -> Option<&RoomItem> {
        self.selected_item_id.as_deref().and_then(|id| self.item(id))
    }

    /// Returns the first template with the given name.
    pub fn custom_item(&self, name: &str) -> Option<&CustomItem> {
        self.custom_items.iter().find(|c| c.name == name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sofa() -> RoomItem {
        RoomItem {
            id: "a".to_string(),
            name: "Sofa".to_string(),
            group: "Living".to_string(),
            color: "#336699".to_string(),
            width: 2.0,
            height: 0.9,
            x: 1.0,
            y: 1.5,
            rotation: 90.0,
            label_placement: LabelPlacement::Bottom,
            unit: LengthUnit::Meters,
            no_color: false,
        }
    }

    #[test]
    fn test_default_room() {
        let room = RoomState::default();
        assert_eq!(room.width, 0.0);
        assert_eq!(room.height, 0.0);
        assert_eq!(room.unit, "meters");
        assert!(room.items.is_empty());
        assert!(room.custom_items.is_empty());
        assert_eq!(room.selected_item_id, None);
    }

    #[test]
    fn test_enum_round_trip_through_str() {
        for placement in LabelPlacement::ALL {
            assert_eq!(placement.as_str().parse::<LabelPlacement>().unwrap(), placement);
        }
        for unit in LengthUnit::ALL {
            assert_eq!(unit.to_string().parse::<LengthUnit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_enum_parse_rejects_unknown() {
        assert!(matches!(
            "center".parse::<LabelPlacement>(),
            Err(CoreError::UnknownLabelPlacement(s)) if s == "center"
        ));
        assert!(matches!(
            "Meters".parse::<LengthUnit>(),
            Err(CoreError::UnknownLengthUnit(_))
        ));
    }

    #[test]
    fn test_item_wire_names() {
        let json = serde_json::to_value(sofa()).unwrap();
        assert_eq!(json["labelPlacement"], "bottom");
        assert_eq!(json["unit"], "meters");
        assert_eq!(json["noColor"], false);
        assert!(json.get("label_placement").is_none());
    }

    #[test]
    fn test_room_wire_names() {
        let json = serde_json::to_value(RoomState::default()).unwrap();
        assert!(json["customItems"].is_array());
        assert!(json["selectedItemId"].is_null());
        assert_eq!(json["unit"], "meters");
    }

    #[test]
    fn test_template_round_trip_keeps_geometry() {
        let item = sofa();
        let template = CustomItem::from(&item);
        assert_eq!(template.name, "Sofa");

        let placed = template.instantiate("b", 3.0, 4.0);
        assert_eq!(placed.id, "b");
        assert_eq!(placed.width, item.width);
        assert_eq!(placed.rotation, item.rotation);
        assert_eq!(placed.label_placement, item.label_placement);
        assert_eq!((placed.x, placed.y), (3.0, 4.0));
    }

    #[test]
    fn test_selected_item_lookup() {
        let mut room = RoomState::default();
        room.items.push(sofa());

        room.selected_item_id = Some("a".to_string());
        assert_eq!(room.selected_item().map(|i| i.name.as_str()), Some("Sofa"));

        room.selected_item_id = Some("gone".to_string());
        assert!(room.selected_item().is_none());
    }
}
