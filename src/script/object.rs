//! Shared record contract.
//!
//! Every record in a script model carries `Id`, `Version`, `TypeId` and
//! `Properties`. Fresh objects get a generated id and the baseline version;
//! decoded objects keep whatever the file had.

use serde_json::{Map, Value};

use super::id::generate_id;
use super::wire::RawObject;
use crate::constants::version::BASELINE;
use crate::error::Result;

/// Identity shared by every record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectMeta {
    /// Document-unique id
    pub id: String,
    /// Format version tag
    pub version: String,
}

impl ObjectMeta {
    /// Identity for a newly created object.
    pub fn new() -> Self {
        Self { id: generate_id(), version: BASELINE.to_owned() }
    }

    /// Read `Id` and `Version`, falling back to a fresh identity field by field.
    pub fn decode(raw: &RawObject<'_>) -> Result<Self> {
        let mut meta = Self::new();
        raw.read("Id", &mut meta.id)?;
        raw.read("Version", &mut meta.version)?;
        Ok(meta)
    }

    /// Start a record map with `Id`, `Version`, `TypeId` and `Properties`.
    pub fn envelope(&self, type_id: &str, properties: Map<String, Value>) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("Id".into(), Value::String(self.id.clone()));
        map.insert("Version".into(), Value::String(self.version.clone()));
        map.insert("TypeId".into(), Value::String(type_id.to_owned()));
        map.insert("Properties".into(), Value::Object(properties));
        map
    }
}

impl Default for ObjectMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// A record type with a single fixed discriminator.
pub trait Tagged {
    /// The `TypeId` this record is written with.
    const TYPE_ID: &'static str;
}

/// Conversion between a typed entity and its raw record.
pub trait Record: Sized {
    /// Build the entity from a raw record.
    ///
    /// Fixed-type entities given a record with another `TypeId` come back in
    /// their default state.
    fn decode(raw: &RawObject<'_>) -> Result<Self>;

    /// Project the entity back to its raw record.
    fn encode(&self) -> Value;

    /// Decode a JSON value located at `path`.
    fn from_value(value: &Value, path: &str) -> Result<Self> {
        Self::decode(&RawObject::new(value, path)?)
    }
}

/// Decode an optional nested record, falling back to `default` when absent.
pub fn decode_or<T: Record>(raw: &RawObject<'_>, key: &str, default: impl FnOnce() -> T) -> Result<T> {
    match raw.object(key)? {
        Some(child) => T::decode(&child),
        None => Ok(default()),
    }
}

/// Decode a nullable nested record.
pub fn decode_nullable<T: Record>(raw: &RawObject<'_>, key: &str) -> Result<Option<T>> {
    raw.object(key)?.map(|child| T::decode(&child)).transpose()
}

/// Encode every record of a list.
pub fn encode_all<T: Record>(records: &[T]) -> Value {
    Value::Array(records.iter().map(Record::encode).collect())
}
