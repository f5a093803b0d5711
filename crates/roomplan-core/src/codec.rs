//! # Room Record Codec
//!
//! Turns a [`RoomState`] into the text stored under the room key and back.
//!
//! The record is pretty-printed JSON so it stays readable when someone opens
//! the database by hand. There is no version field; a record that cannot be
//! decoded is reported as [`CoreError::Codec`] and the store decides what to
//! do with it.
//!
//! ## Numbers
//! JSON has no literal for infinity or NaN. Geometry fields go through
//! [`number`], which writes those three as the strings `"Infinity"`,
//! `"-Infinity"` and `"NaN"` and reads them back, so every `f64` a caller
//! stores survives a reload.

use crate::error::CoreResult;
use crate::types::RoomState;

/// Serializes the room into its persisted text form.
pub fn encode_room(room: &RoomState) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(room)?)
}

/// Parses a persisted room record.
///
/// Missing top-level fields fall back to their defaults. Anything else that
/// doesn't fit the shape is an error.
pub fn decode_room(text: &str) -> CoreResult<RoomState> {
    Ok(serde_json::from_str(text)?)
}

/// Serde adapter for `f64` fields that may hold non-finite values.
///
/// Use with `#[serde(with = "crate::codec::number")]`.
pub mod number {
    use std::fmt;

    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserializer, Serializer};

    const INFINITY: &str = "Infinity";
    const NEG_INFINITY: &str = "-Infinity";
    const NAN: &str = "NaN";

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str(NAN)
        } else if value.is_sign_positive() {
            serializer.serialize_str(INFINITY)
        } else {
            serializer.serialize_str(NEG_INFINITY)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(NumberVisitor)
    }

    struct NumberVisitor;

    impl<'de> Visitor<'de> for NumberVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a number, \"{}\", \"{}\" or \"{}\"", INFINITY, NEG_INFINITY, NAN)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                INFINITY => Ok(f64::INFINITY),
                NEG_INFINITY => Ok(f64::NEG_INFINITY),
                NAN => Ok(f64::NAN),
                other => Err(E::invalid_value(Unexpected::Str(other), &self)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::{LabelPlacement, LengthUnit, RoomItem};

    #[test]
    fn test_encode_is_human_readable() {
        let text = encode_room(&RoomState::default()).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"selectedItemId\": null"));
        assert!(text.contains("\"customItems\": []"));
    }

    #[test]
    fn test_decode_what_was_encoded() {
        let mut room = RoomState::default();
        room.set_room_dimensions(3.5, 2.25, "cm");
        room.add_item(RoomItem {
            id: "bed".to_string(),
            name: "Bed".to_string(),
            group: "Bedroom".to_string(),
            color: "rgb(10, 20, 30)".to_string(),
            width: 1.6,
            height: 2.0,
            x: 0.1,
            y: 0.2,
            rotation: 45.0,
            label_placement: LabelPlacement::Left,
            unit: LengthUnit::Feet,
            no_color: true,
        });
        room.select_item(Some("bed".to_string()));

        let decoded = decode_room(&encode_room(&room).unwrap()).unwrap();
        assert_eq!(decoded, room);
    }

    #[test]
    fn test_non_finite_dimensions_survive_reload() {
        let mut room = RoomState::default();
        room.set_room_dimensions(f64::INFINITY, f64::NAN, "meters");
        room.add_item(RoomItem {
            id: "rug".to_string(),
            name: "Rug".to_string(),
            group: "Living".to_string(),
            color: "#aa0000".to_string(),
            width: 2.0,
            height: 1.5,
            x: f64::NEG_INFINITY,
            y: 0.0,
            rotation: 0.0,
            label_placement: LabelPlacement::Inside,
            unit: LengthUnit::Meters,
            no_color: false,
        });

        let text = encode_room(&room).unwrap();
        assert!(text.contains("\"width\": \"Infinity\""));
        assert!(text.contains("\"height\": \"NaN\""));
        assert!(text.contains("\"x\": \"-Infinity\""));

        let decoded = decode_room(&text).unwrap();
        assert_eq!(decoded.width, f64::INFINITY);
        assert!(decoded.height.is_nan());
        assert_eq!(decoded.items[0].x, f64::NEG_INFINITY);
        assert_eq!(decoded.items[0].width, 2.0);
    }

    #[test]
    fn test_decode_fills_missing_fields() {
        let room = decode_room(r#"{ "width": 7, "height": 3 }"#).unwrap();
        assert_eq!(room.width, 7.0);
        assert_eq!(room.unit, "meters");
        assert!(room.items.is_empty());
        assert_eq!(room.selected_item_id, None);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_room("not json"), Err(CoreError::Codec(_))));
        assert!(matches!(
            decode_room(r#"{ "width": "wide" }"#),
            Err(CoreError::Codec(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_item_unit() {
        let text = r##"{
            "items": [{
                "id": "a", "name": "Sofa", "group": "", "color": "#000",
                "width": 1, "height": 1, "x": 0, "y": 0, "rotation": 0,
                "labelPlacement": "top", "unit": "yards", "noColor": false
            }]
        }"##;
        assert!(decode_room(text).is_err());
    }
}
