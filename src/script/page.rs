//! Pages and stage pages.
//!
//! Page-like containers store their items twice: inline bodies under
//! `Items`, each tagged with a sequential `$id`, and an ordered list of
//! `{"$ref": id}` pointers under `VisualItems`. Order comes from `Items`;
//! the reference list is rebuilt on every encode.

use serde_json::{Map, Value};

use super::item::{VisualItem, VISUAL_ITEMS};
use super::object::{decode_or, ObjectMeta, Record, Tagged};
use super::transition::PageStoryboard;
use super::wire::{boxed, nullable, RawObject};
use crate::constants::wire_type;
use crate::error::Result;

const ID_KEY: &str = "$id";
const REF_KEY: &str = "$ref";

/// Decode the `Items` list of a page-like record.
pub(crate) fn decode_items(raw: &RawObject<'_>) -> Result<Vec<VisualItem>> {
    let mut items = VISUAL_ITEMS.decode_list(raw, "Items")?;
    for item in &mut items {
        if let VisualItem::Unknown(record) = item {
            record.raw.shift_remove(ID_KEY);
            record.raw.shift_remove(super::wire::TYPE_KEY);
        }
    }
    Ok(items)
}

/// Encode items as inline bodies plus the parallel reference list.
pub(crate) fn encode_items(items: &[VisualItem]) -> (Value, Value) {
    let mut bodies = Vec::with_capacity(items.len());
    let mut refs = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let reference = (index + 1).to_string();
        let mut body = Map::new();
        body.insert(ID_KEY.into(), Value::String(reference.clone()));
        body.insert(super::wire::TYPE_KEY.into(), Value::String(wire_type::VISUAL_ITEM.to_owned()));
        if let Value::Object(fields) = item.encode() {
            body.extend(fields);
        }
        bodies.push(Value::Object(body));

        let mut pointer = Map::new();
        pointer.insert(REF_KEY.into(), Value::String(reference));
        refs.push(Value::Object(pointer));
    }
    (Value::Array(bodies), Value::Array(refs))
}

/// Scalar settings shared by pages and stage pages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageProperties {
    /// Generated name
    pub name: String,
    /// Name set by the operator
    pub custom_name: String,
    /// Sidebar comment
    pub comment: String,
    /// Whether the page is the cue's title page
    pub is_title_page: bool,
    /// Whether playback skips the page
    pub is_skipped: bool,
    /// Whether the page is pinned
    pub is_pinned: bool,
    /// Auto advance delay
    pub auto_advance_time: i32,
    /// Item whose end advances the page
    pub auto_advance_item_id: Option<String>,
    /// Application-specific extra data
    pub additional_info: Option<String>,
}

impl PageProperties {
    fn read(&mut self, props: &RawObject<'_>) -> Result<()> {
        props.read("Name", &mut self.name)?;
        props.read("CustomName", &mut self.custom_name)?;
        props.read("Comment", &mut self.comment)?;
        props.read("IsTitlePage", &mut self.is_title_page)?;
        props.read("IsSkipped", &mut self.is_skipped)?;
        props.read("IsPinned", &mut self.is_pinned)?;
        props.read_boxed("AutoAdvanceTime", &mut self.auto_advance_time)?;
        props.read("AutoAdvanceItemId", &mut self.auto_advance_item_id)?;
        props.read("AdditionalInfo", &mut self.additional_info)?;
        Ok(())
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut props = Map::new();
        props.insert("Name".into(), Value::String(self.name.clone()));
        props.insert("CustomName".into(), Value::String(self.custom_name.clone()));
        props.insert("Comment".into(), Value::String(self.comment.clone()));
        props.insert("IsTitlePage".into(), Value::Bool(self.is_title_page));
        props.insert("IsSkipped".into(), Value::Bool(self.is_skipped));
        props.insert("IsPinned".into(), Value::Bool(self.is_pinned));
        props.insert("AutoAdvanceTime".into(), boxed(wire_type::INT32, self.auto_advance_time));
        props.insert("AutoAdvanceItemId".into(), nullable(self.auto_advance_item_id.as_deref()));
        props.insert("AdditionalInfo".into(), nullable(self.additional_info.as_deref()));
        props
    }
}

/// Content shared by [`Page`] and [`StagePage`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    /// Scalar settings
    pub properties: PageProperties,
    /// Items, back to front
    pub items: Vec<VisualItem>,
    /// Layer records, kept as found
    pub visual_layers: Vec<Value>,
    /// Page transition
    pub storyboard: PageStoryboard,
    /// Legacy transition slot, kept as found (usually `null`)
    pub transition: Value,
    /// Audio item records, kept as found
    pub audio_items: Vec<Value>,
}

impl PageContent {
    /// An empty page.
    pub fn new() -> Self {
        Self {
            properties: PageProperties::default(),
            items: Vec::new(),
            visual_layers: Vec::new(),
            storyboard: PageStoryboard::new(),
            transition: Value::Null,
            audio_items: Vec::new(),
        }
    }

    fn read(raw: &RawObject<'_>) -> Result<Self> {
        let mut content = Self::new();
        content.properties.read(&raw.properties()?)?;
        content.items = decode_items(raw)?;
        content.visual_layers = raw.values("VisualLayers")?.to_vec();
        content.storyboard = decode_or(raw, "Storyboard", PageStoryboard::new)?;
        content.transition = raw.get("Transition").cloned().unwrap_or(Value::Null);
        content.audio_items = raw.values("AudioItems")?.to_vec();
        Ok(content)
    }

    /// Everything up to `Transition`; callers append their own trailing keys.
    fn write(&self, meta: &ObjectMeta, type_id: &str) -> Map<String, Value> {
        let (items, refs) = encode_items(&self.items);
        let mut map = meta.envelope(type_id, self.properties.to_map());
        map.insert("Items".into(), items);
        map.insert("VisualLayers".into(), Value::Array(self.visual_layers.clone()));
        map.insert("VisualItems".into(), refs);
        map.insert("Storyboard".into(), self.storyboard.encode());
        map.insert("Transition".into(), self.transition.clone());
        map
    }
}

impl Default for PageContent {
    fn default() -> Self {
        Self::new()
    }
}

/// The stage monitor's counterpart of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct StagePage {
    /// Record identity
    pub meta: ObjectMeta,
    /// Items and settings
    pub content: PageContent,
}

impl StagePage {
    /// An empty stage page.
    pub fn new() -> Self {
        Self { meta: ObjectMeta::new(), content: PageContent::new() }
    }
}

impl Default for StagePage {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for StagePage {
    const TYPE_ID: &'static str = "StagePageModel";
}

impl Record for StagePage {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(Self::new());
        }
        Ok(Self { meta: ObjectMeta::decode(raw)?, content: PageContent::read(raw)? })
    }

    fn encode(&self) -> Value {
        let mut map = self.content.write(&self.meta, Self::TYPE_ID);
        map.insert("AudioItems".into(), Value::Array(self.content.audio_items.clone()));
        Value::Object(map)
    }
}

/// One frame of a cue on the main output.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Record identity
    pub meta: ObjectMeta,
    /// Items and settings
    pub content: PageContent,
    /// What the stage monitor shows with this page
    pub stage_page: StagePage,
}

impl Page {
    /// An empty page with an empty stage page.
    pub fn new() -> Self {
        Self { meta: ObjectMeta::new(), content: PageContent::new(), stage_page: StagePage::new() }
    }

    /// Add an item on top of the others.
    pub fn push_item(&mut self, item: impl Into<VisualItem>) {
        self.content.items.push(item.into());
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for Page {
    const TYPE_ID: &'static str = "Page";
}

impl Record for Page {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(Self::new());
        }
        Ok(Self {
            meta: ObjectMeta::decode(raw)?,
            content: PageContent::read(raw)?,
            stage_page: decode_or(raw, "StagePage", StagePage::new)?,
        })
    }

    fn encode(&self) -> Value {
        let mut map = self.content.write(&self.meta, Self::TYPE_ID);
        map.insert("StagePage".into(), self.stage_page.encode());
        map.insert("AudioItems".into(), Value::Array(self.content.audio_items.clone()));
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::script::item::{ImageItem, TextItem};
    use serde_json::json;

    #[test]
    fn test_items_are_reindexed() {
        let mut page = Page::new();
        page.push_item(TextItem::new());
        page.push_item(ImageItem::new());
        let encoded = page.encode();

        let items = encoded["Items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["$id"], "2");
        assert_eq!(items[0]["$type"], "polino.persistence.Models.VisualItem, polino.persistence");
        let first_keys: Vec<&str> = items[0].as_object().unwrap().keys().take(3).map(String::as_str).collect();
        assert_eq!(first_keys, ["$id", "$type", "Id"]);
        assert_eq!(encoded["VisualItems"], json!([{ "$ref": "1" }, { "$ref": "2" }]));
    }

    #[test]
    fn test_page_roundtrip_keeps_order() {
        let mut page = Page::new();
        page.content.properties.custom_name = "Verse 1".into();
        page.content.properties.auto_advance_time = 5;
        page.content.properties.auto_advance_item_id = Some("abc".into());
        page.push_item(ImageItem::new());
        page.push_item(TextItem::new());
        page.stage_page.content.items.push(TextItem::new().into());
        page.content.visual_layers.push(json!({ "Name": "Layer" }));

        let decoded = Page::from_value(&page.encode(), "Pages[0]").unwrap();
        assert_eq!(decoded, page);
        assert_eq!(decoded.content.items[0].type_id(), "VisualItem+Image");
    }

    #[test]
    fn test_page_key_order() {
        let encoded = Page::new().encode();
        let keys: Vec<&str> = encoded.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "Id", "Version", "TypeId", "Properties", "Items", "VisualLayers", "VisualItems",
                "Storyboard", "Transition", "StagePage", "AudioItems"
            ]
        );
        assert_eq!(encoded["StagePage"]["TypeId"], "StagePageModel");
        assert!(encoded["StagePage"].get("StagePage").is_none());
        assert_eq!(encoded["Storyboard"]["TypeId"], "PageTransitionStoryboard");
    }

    #[test]
    fn test_reference_list_is_ignored_on_decode() {
        let value = json!({
            "Id": "p",
            "TypeId": "Page",
            "Items": [
                { "$id": "7", "$type": "x", "TypeId": "VisualItem+Text", "Id": "a" },
                { "$id": "3", "$type": "x", "TypeId": "VisualItem+Shape", "Id": "b" }
            ],
            "VisualItems": [{ "$ref": "3" }, { "$ref": "7" }]
        });
        let page = Page::from_value(&value, "Pages[0]").unwrap();
        let ids: Vec<&str> = page.content.items.iter().map(VisualItem::id).collect();
        assert_eq!(ids, ["a", "b"]);

        let again = Page::from_value(&page.encode(), "Pages[0]").unwrap();
        assert_eq!(again.content.items, page.content.items);
    }

    #[test]
    fn test_wrong_type_gives_default() {
        let value = json!({ "Id": "p", "TypeId": "StagePageModel" });
        let page = Page::from_value(&value, "").unwrap();
        assert_ne!(page.meta.id, "p");
    }
}
