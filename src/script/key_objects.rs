//! Key objects: items kept on screen across cues.

use serde_json::{Map, Value};

use super::item::VisualItem;
use super::object::{ObjectMeta, Record, Tagged};
use super::page::{decode_items, encode_items};
use super::wire::RawObject;
use crate::error::Result;

/// A page of persistent items.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyObjectsPage {
    /// Record identity
    pub meta: ObjectMeta,
    /// Items, back to front
    pub items: Vec<VisualItem>,
    /// Layer records, kept as found
    pub visual_layers: Vec<Value>,
}

impl KeyObjectsPage {
    /// An empty key objects page.
    pub fn new() -> Self {
        Self { meta: ObjectMeta::new(), items: Vec::new(), visual_layers: Vec::new() }
    }
}

impl Default for KeyObjectsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for KeyObjectsPage {
    const TYPE_ID: &'static str = "KeyObjectsPage";
}

impl Record for KeyObjectsPage {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(Self::new());
        }
        Ok(Self {
            meta: ObjectMeta::decode(raw)?,
            items: decode_items(raw)?,
            visual_layers: raw.values("VisualLayers")?.to_vec(),
        })
    }

    fn encode(&self) -> Value {
        let (items, refs) = encode_items(&self.items);
        let mut map = self.meta.envelope(Self::TYPE_ID, Map::new());
        map.insert("Items".into(), items);
        map.insert("VisualLayers".into(), Value::Array(self.visual_layers.clone()));
        map.insert("VisualItems".into(), refs);
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::script::item::{ClockItem, TimerItem};
    use serde_json::json;

    #[test]
    fn test_roundtrip_with_items() {
        let mut page = KeyObjectsPage::new();
        page.items.push(ClockItem::new().into());
        page.items.push(TimerItem::new().into());

        let encoded = page.encode();
        assert_eq!(encoded["Properties"], json!({}));
        assert_eq!(encoded["VisualItems"][1], json!({ "$ref": "2" }));
        assert_eq!(KeyObjectsPage::from_value(&encoded, "KeyObjectsPage").unwrap(), page);
    }

    #[test]
    fn test_empty_page_shape() {
        let encoded = KeyObjectsPage::new().encode();
        let keys: Vec<&str> = encoded.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["Id", "Version", "TypeId", "Properties", "Items", "VisualLayers", "VisualItems"]
        );
    }
}
