//! Polymorphic variant registry.
//!
//! Each polymorphic family (effects, visual items, transitions) owns a
//! [`Registry`]: a closed table from `TypeId` discriminator to decoder.
//! Records whose discriminator is not registered are kept as an
//! [`UnknownRecord`] and written back unchanged.

use serde_json::{Map, Value};
use tracing::warn;

use super::object::Record;
use super::wire::RawObject;
use crate::error::Result;

/// A record whose discriminator is not part of its family.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownRecord {
    /// The discriminator as found in the file; empty when absent.
    pub type_id: String,
    /// The whole record, re-emitted verbatim on encode.
    pub raw: Map<String, Value>,
}

impl UnknownRecord {
    /// Capture a raw record.
    pub fn capture(raw: &RawObject<'_>) -> Self {
        Self {
            type_id: raw.type_id().unwrap_or_default().to_owned(),
            raw: raw.map().clone(),
        }
    }

    /// The record's `Id`, if it has one.
    pub fn id(&self) -> &str {
        self.raw.get("Id").and_then(Value::as_str).unwrap_or_default()
    }

    /// The captured record.
    pub fn encode(&self) -> Value {
        Value::Object(self.raw.clone())
    }
}

/// Decoder for one registered variant.
pub type Decoder<T> = fn(&RawObject<'_>) -> Result<T>;

/// Decode variant `V` and lift it into its family `T`.
pub fn variant<V: Record, T: From<V>>(raw: &RawObject<'_>) -> Result<T> {
    V::decode(raw).map(T::from)
}

/// A closed discriminator table for one polymorphic family.
pub struct Registry<T: 'static> {
    family: &'static str,
    entries: &'static [(&'static str, Decoder<T>)],
}

impl<T: From<UnknownRecord>> Registry<T> {
    /// Create a table for `family` (used in log messages).
    pub const fn new(family: &'static str, entries: &'static [(&'static str, Decoder<T>)]) -> Self {
        Self { family, entries }
    }

    /// Dispatch on the record's discriminator.
    pub fn decode(&self, raw: &RawObject<'_>) -> Result<T> {
        let type_id = raw.type_id().unwrap_or_default();
        match self.entries.iter().find(|(tag, _)| *tag == type_id) {
            Some((_, decoder)) => decoder(raw),
            None => {
                warn!(
                    "Preserving unrecognised {} `{type_id}` at {}",
                    self.family,
                    raw.path()
                );
                Ok(T::from(UnknownRecord::capture(raw)))
            }
        }
    }

    /// Decode every record of an array field.
    pub fn decode_list(&self, raw: &RawObject<'_>, key: &str) -> Result<Vec<T>> {
        raw.records(key)?.iter().map(|record| self.decode(record)).collect()
    }

    /// Whether `type_id` is registered.
    pub fn contains(&self, type_id: &str) -> bool {
        self.entries.iter().any(|(tag, _)| *tag == type_id)
    }

    /// Registered discriminators in table order.
    pub fn type_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(tag, _)| *tag)
    }

    /// The family name.
    pub const fn family(&self) -> &'static str {
        self.family
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    enum Shape {
        Circle(f64),
        Unknown(UnknownRecord),
    }

    impl From<UnknownRecord> for Shape {
        fn from(record: UnknownRecord) -> Self {
            Self::Unknown(record)
        }
    }

    fn circle(raw: &RawObject<'_>) -> Result<Shape> {
        let mut radius = 0.0;
        raw.properties()?.read("Radius", &mut radius)?;
        Ok(Shape::Circle(radius))
    }

    static SHAPES: Registry<Shape> = Registry::new("shape", &[("Shape+Circle", circle)]);

    #[test]
    fn test_dispatches_registered_tag() {
        let value = json!({ "TypeId": "Shape+Circle", "Properties": { "Radius": 2.5 } });
        let shape = SHAPES.decode(&RawObject::new(&value, "").unwrap()).unwrap();
        assert_eq!(shape, Shape::Circle(2.5));
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let value = json!({ "Id": "q", "TypeId": "Shape+Square", "Properties": { "Side": 3 } });
        let shape = SHAPES.decode(&RawObject::new(&value, "").unwrap()).unwrap();
        match shape {
            Shape::Unknown(record) => {
                assert_eq!(record.type_id, "Shape+Square");
                assert_eq!(record.id(), "q");
                assert_eq!(record.encode(), value);
            }
            other => panic!("Expected unknown shape, got {other:?}"),
        }
    }

    #[test]
    fn test_table_queries() {
        assert!(SHAPES.contains("Shape+Circle"));
        assert!(!SHAPES.contains("Shape+Square"));
        assert_eq!(SHAPES.type_ids().collect::<Vec<_>>(), ["Shape+Circle"]);
        assert_eq!(SHAPES.family(), "shape");
    }
}
