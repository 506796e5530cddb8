//! Raw record access.
//!
//! Script model records are JSON objects. Scalars the consuming application
//! needs typed are boxed as `{"$type": "<.NET type>", "$value": <value>}`.
//! [`RawObject`] reads fields leniently (absent or `null` keeps the caller's
//! default) but rejects fields of the wrong JSON shape with a path-qualified
//! [`Error::Schema`].

use serde_json::{Map, Value};

use super::primitives::Color;
use crate::error::{Error, Result};

/// Key of the value inside a boxed scalar.
pub const VALUE_KEY: &str = "$value";

/// Key of the .NET type tag on a boxed scalar or inline item body.
pub const TYPE_KEY: &str = "$type";

/// A scalar that can be read out of a JSON value.
pub trait WireScalar: Sized {
    /// Human readable name of the expected JSON shape, used in errors.
    const EXPECTED: &'static str;

    /// Convert `value`, or `None` when it has the wrong shape.
    fn from_wire(value: &Value) -> Option<Self>;
}

impl WireScalar for String {
    const EXPECTED: &'static str = "a string";

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl WireScalar for Option<String> {
    const EXPECTED: &'static str = "a string or null";

    fn from_wire(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            Value::String(s) => Some(Some(s.clone())),
            _ => None,
        }
    }
}

impl WireScalar for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl WireScalar for f64 {
    const EXPECTED: &'static str = "a number";

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl WireScalar for Option<f64> {
    const EXPECTED: &'static str = "a number or null";

    fn from_wire(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => other.as_f64().map(Some),
        }
    }
}

/// Integers are accepted as JSON integers or as floats with no fraction.
fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        let float = value.as_f64()?;
        #[allow(clippy::cast_possible_truncation)]
        let truncated = float as i64;
        #[allow(clippy::cast_precision_loss)]
        let exact = (truncated as f64 - float).abs() < f64::EPSILON;
        (float.is_finite() && exact).then_some(truncated)
    })
}

impl WireScalar for Option<i64> {
    const EXPECTED: &'static str = "an integer or null";

    fn from_wire(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => integral(other).map(Some),
        }
    }
}

impl WireScalar for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_wire(value: &Value) -> Option<Self> {
        integral(value)
    }
}

impl WireScalar for i32 {
    const EXPECTED: &'static str = "a 32-bit integer";

    fn from_wire(value: &Value) -> Option<Self> {
        integral(value).and_then(|n| Self::try_from(n).ok())
    }
}

impl WireScalar for u32 {
    const EXPECTED: &'static str = "an unsigned 32-bit integer";

    fn from_wire(value: &Value) -> Option<Self> {
        integral(value).and_then(|n| Self::try_from(n).ok())
    }
}

/// Borrowed view of one JSON object in the script model, with its path.
#[derive(Debug, Clone)]
pub struct RawObject<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> RawObject<'a> {
    /// View `value` as a record located at `path`.
    pub fn new(value: &'a Value, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            other => Err(Error::schema(path, format!("expected an object, got {}", kind(other)))),
        }
    }

    /// View a map directly.
    pub fn from_map(map: &'a Map<String, Value>, path: impl Into<String>) -> Self {
        Self { map, path: path.into() }
    }

    /// JSON path of this record; empty for the document root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The underlying map.
    pub const fn map(&self) -> &'a Map<String, Value> {
        self.map
    }

    /// Path of a field of this record.
    pub fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    /// A field's raw value; `None` when absent or `null`.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// The record's `TypeId` discriminator.
    pub fn type_id(&self) -> Option<&'a str> {
        self.map.get("TypeId").and_then(Value::as_str)
    }

    /// Whether the discriminator equals `type_id`.
    pub fn is_type(&self, type_id: &str) -> bool {
        self.type_id() == Some(type_id)
    }

    /// Read a plain scalar field into `out`.
    ///
    /// Absent fields leave `out` untouched, as do `null` fields unless `T`
    /// itself admits null.
    pub fn read<T: WireScalar>(&self, key: &str, out: &mut T) -> Result<()> {
        match self.map.get(key) {
            None => Ok(()),
            Some(value) => self.assign(key, value, out),
        }
    }

    /// Read a boxed scalar's `$value` into `out`.
    ///
    /// A bare scalar in place of the envelope is accepted.
    pub fn read_boxed<T: WireScalar>(&self, key: &str, out: &mut T) -> Result<()> {
        match self.boxed(key) {
            None => Ok(()),
            Some(value) => self.assign(key, value, out),
        }
    }

    /// Read a boxed string and convert it with `parse`.
    pub fn read_boxed_with<T>(
        &self,
        key: &str,
        out: &mut T,
        parse: impl FnOnce(&str) -> Result<T>,
    ) -> Result<()> {
        let mut text: Option<String> = None;
        self.read_boxed(key, &mut text)?;
        if let Some(text) = text {
            *out = parse(&text)?;
        }
        Ok(())
    }

    /// Read a boxed packed `Int32` color.
    pub fn read_color(&self, key: &str, out: &mut Color) -> Result<()> {
        let mut packed: Option<i64> = None;
        self.read_boxed(key, &mut packed)?;
        if let Some(packed) = packed {
            *out = Color::from_wire(packed);
        }
        Ok(())
    }

    /// The payload of a boxed field; `None` when absent or `null`.
    pub fn boxed(&self, key: &str) -> Option<&'a Value> {
        let field = self.map.get(key)?;
        match field {
            Value::Object(envelope) if envelope.contains_key(VALUE_KEY) => {
                envelope.get(VALUE_KEY).filter(|v| !v.is_null())
            }
            Value::Null => None,
            other => Some(other),
        }
    }

    /// A nested record; `None` when absent or `null`.
    pub fn object(&self, key: &str) -> Result<Option<RawObject<'a>>> {
        self.get(key)
            .map(|value| RawObject::new(value, self.field_path(key)))
            .transpose()
    }

    /// The record's `Properties` object, or an empty view when absent.
    pub fn properties(&self) -> Result<RawObject<'a>> {
        static EMPTY: std::sync::LazyLock<Map<String, Value>> = std::sync::LazyLock::new(Map::new);
        Ok(self
            .object("Properties")?
            .unwrap_or_else(|| RawObject::from_map(&EMPTY, self.field_path("Properties"))))
    }

    /// The records of an array field; empty when absent or `null`.
    pub fn records(&self, key: &str) -> Result<Vec<RawObject<'a>>> {
        self.values(key)?
            .iter()
            .enumerate()
            .map(|(i, value)| RawObject::new(value, format!("{}[{i}]", self.field_path(key))))
            .collect()
    }

    /// The raw elements of an array field; empty when absent or `null`.
    pub fn values(&self, key: &str) -> Result<&'a [Value]> {
        match self.get(key) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(Error::schema(
                self.field_path(key),
                format!("expected an array, got {}", kind(other)),
            )),
        }
    }

    fn assign<T: WireScalar>(&self, key: &str, value: &Value, out: &mut T) -> Result<()> {
        match T::from_wire(value) {
            Some(v) => {
                *out = v;
                Ok(())
            }
            None if value.is_null() => Ok(()),
            None => Err(Error::schema(
                self.field_path(key),
                format!("expected {}, got {}", T::EXPECTED, kind(value)),
            )),
        }
    }
}

/// A plain scalar written without an envelope.
pub trait ToWire {
    /// The JSON form of the value.
    fn to_wire(&self) -> Value;
}

impl ToWire for f64 {
    fn to_wire(&self) -> Value {
        number(*self)
    }
}

impl ToWire for bool {
    fn to_wire(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToWire for String {
    fn to_wire(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToWire for Option<String> {
    fn to_wire(&self) -> Value {
        nullable(self.as_deref())
    }
}

/// Short description of a JSON value's shape for error messages.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Wrap `value` in a `{"$type", "$value"}` envelope.
pub fn boxed(type_tag: &str, value: impl Into<Value>) -> Value {
    let mut envelope = Map::with_capacity(2);
    envelope.insert(TYPE_KEY.to_owned(), Value::String(type_tag.to_owned()));
    envelope.insert(VALUE_KEY.to_owned(), value.into());
    Value::Object(envelope)
}

/// Emit a number, using integer notation when it has no fraction.
pub fn number(value: f64) -> Value {
    #[allow(clippy::cast_possible_truncation)]
    let truncated = value as i64;
    #[allow(clippy::cast_precision_loss)]
    let integral = value.is_finite() && truncated as f64 == value;
    if integral {
        Value::from(truncated)
    } else {
        Value::from(value)
    }
}

/// Emit a nullable string.
pub fn nullable(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_owned()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    fn record() -> Value {
        json!({
            "TypeId": "Cue",
            "Properties": {
                "Name": "Welcome",
                "Type": { "$type": "polino.model.Enums.CueType, polino.model", "$value": 1 },
                "Bare": 7,
                "Nothing": null,
                "Fraction": 1.5,
                "Wide": 4_278_190_080_i64
            },
            "Pages": [{ "TypeId": "Page" }, { "TypeId": "Page" }]
        })
    }

    #[test]
    fn test_reads_plain_and_boxed_fields() {
        let value = record();
        let raw = RawObject::new(&value, "Cues[0]").unwrap();
        let props = raw.properties().unwrap();

        let mut name = String::new();
        props.read("Name", &mut name).unwrap();
        assert_eq!(name, "Welcome");

        let mut kind = 0_i32;
        props.read_boxed("Type", &mut kind).unwrap();
        assert_eq!(kind, 1);

        let mut bare = 0_i32;
        props.read_boxed("Bare", &mut bare).unwrap();
        assert_eq!(bare, 7);
    }

    #[test]
    fn test_absent_and_null_keep_defaults() {
        let value = record();
        let props = RawObject::new(&value, "").unwrap().properties().unwrap();

        let mut name = String::from("default");
        props.read("Missing", &mut name).unwrap();
        props.read("Nothing", &mut name).unwrap();
        assert_eq!(name, "default");

        let mut info = Some(String::from("x"));
        props.read("Nothing", &mut info).unwrap();
        assert_eq!(info, None);
    }

    #[test]
    fn test_wrong_shape_names_the_path() {
        let value = record();
        let props = RawObject::new(&value, "Cues[3]").unwrap().properties().unwrap();

        let mut flag = false;
        let err = props.read("Name", &mut flag).unwrap_err();
        match err {
            Error::Schema { path, message } => {
                assert_eq!(path, "Cues[3].Properties.Name");
                assert!(message.contains("boolean"), "{message}");
            }
            other => panic!("Expected schema error, got {other:?}"),
        }

        let mut whole = 0_i32;
        assert!(props.read("Fraction", &mut whole).is_err());
        assert!(props.read("Wide", &mut whole).is_err());
        let mut wide = 0_i64;
        props.read("Wide", &mut wide).unwrap();
        assert_eq!(wide, 4_278_190_080);
    }

    #[test]
    fn test_records_are_indexed() {
        let value = record();
        let raw = RawObject::new(&value, "Cues[0]").unwrap();
        let pages = raw.records("Pages").unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].path(), "Cues[0].Pages[1]");
        assert!(pages[1].is_type("Page"));
        assert!(raw.records("Missing").unwrap().is_empty());
        assert!(raw.records("TypeId").is_err());
    }

    #[test]
    fn test_non_object_record_is_rejected() {
        let value = json!([1, 2]);
        assert!(matches!(RawObject::new(&value, "Cues"), Err(Error::Schema { .. })));
    }

    #[test]
    fn test_boxed_writer() {
        assert_eq!(
            boxed("System.Int32, mscorlib", 1920),
            json!({ "$type": "System.Int32, mscorlib", "$value": 1920 })
        );
        let text = serde_json::to_string(&boxed("T", 1)).unwrap();
        assert_eq!(text, r#"{"$type":"T","$value":1}"#);
    }

    #[test]
    fn test_number_prefers_integers() {
        assert_eq!(serde_json::to_string(&number(1920.0)).unwrap(), "1920");
        assert_eq!(serde_json::to_string(&number(-3.0)).unwrap(), "-3");
        assert_eq!(serde_json::to_string(&number(0.25)).unwrap(), "0.25");
        assert_eq!(number(f64::NAN), Value::Null);
    }
}
