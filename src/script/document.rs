//! The script root.
//!
//! A [`Script`] owns its cues in presentation order. Each cue records the
//! id of its successor; the link is derived from sequence order and is
//! refreshed after every structural change.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::audio::AudioPlayer;
use super::cue::Cue;
use super::enums::CueType;
use super::key_objects::KeyObjectsPage;
use super::object::{decode_or, ObjectMeta, Record};
use super::wire::{boxed, RawObject};
use crate::constants::container::DEFAULT_THUMBNAIL_PNG;
use crate::constants::version::{BASELINE, GENERATOR};
use crate::constants::wire_type;
use crate::error::{Error, Result};

/// Script-level settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptProperties {
    /// Script name
    pub name: String,
    /// Main output width; must be a whole number when encoded
    pub main_width: f64,
    /// Main output height; must be a whole number when encoded
    pub main_height: f64,
    /// Stage output width; must be a whole number when encoded
    pub stage_width: f64,
    /// Stage output height; must be a whole number when encoded
    pub stage_height: f64,
}

impl ScriptProperties {
    /// An unnamed 1920x1080 script.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            main_width: 1920.0,
            main_height: 1080.0,
            stage_width: 1920.0,
            stage_height: 1080.0,
        }
    }

    fn read(&mut self, props: &RawObject<'_>) -> Result<()> {
        props.read("Name", &mut self.name)?;
        props.read_boxed("WorkingAreaWidth", &mut self.main_width)?;
        props.read_boxed("WorkingAreaHeight", &mut self.main_height)?;
        props.read_boxed("StageAreaWidth", &mut self.stage_width)?;
        props.read_boxed("StageAreaHeight", &mut self.stage_height)?;
        Ok(())
    }

    fn to_map(&self) -> Result<Map<String, Value>> {
        let mut props = Map::new();
        props.insert("Name".into(), Value::String(self.name.clone()));
        for (key, field, value) in [
            ("WorkingAreaWidth", "mainWidth", self.main_width),
            ("WorkingAreaHeight", "mainHeight", self.main_height),
            ("StageAreaWidth", "stageWidth", self.stage_width),
            ("StageAreaHeight", "stageHeight", self.stage_height),
        ] {
            props.insert(key.into(), boxed(wire_type::INT32, whole(field, value)?));
        }
        Ok(props)
    }
}

impl Default for ScriptProperties {
    fn default() -> Self {
        Self::new()
    }
}

/// `value` as an `Int32`, or an invariant violation naming `field`.
fn whole(field: &'static str, value: f64) -> Result<i32> {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    if !(value.is_finite() && value.fract() == 0.0 && in_range) {
        return Err(Error::InvariantViolation { field, value });
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = value as i32;
    Ok(whole)
}

/// The blank PNG the application shows for scripts without a preview.
pub fn default_thumbnail() -> Vec<u8> {
    base64::decode(DEFAULT_THUMBNAIL_PNG).unwrap_or_default()
}

/// A presentation script.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    /// Record identity
    pub meta: ObjectMeta,
    /// Name and output sizes
    pub properties: ScriptProperties,
    cues: Vec<Cue>,
    /// Items shown across every cue
    pub key_objects_page: KeyObjectsPage,
    /// Background audio
    pub audio_player: AudioPlayer,
    /// Application version that created the file
    pub version_created: String,
    /// Application version that last saved the file
    pub version_updated: String,
    /// Preview image stored beside the model, kept as raw bytes
    pub thumbnail: Vec<u8>,
}

impl Script {
    /// An empty script called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: ObjectMeta::new(),
            properties: ScriptProperties { name: name.into(), ..ScriptProperties::new() },
            cues: Vec::new(),
            key_objects_page: KeyObjectsPage::new(),
            audio_player: AudioPlayer::new(),
            version_created: BASELINE.to_owned(),
            version_updated: BASELINE.to_owned(),
            thumbnail: default_thumbnail(),
        }
    }

    /// Cues in presentation order.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Number of cues.
    pub fn cue_count(&self) -> usize {
        self.cues.len()
    }

    /// The cue at `index`.
    pub fn cue(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    /// Mutable access to the cue at `index`.
    ///
    /// Changing a cue's id through this handle leaves its predecessor's link
    /// stale until the next structural change or [`Script::link_cues`].
    pub fn cue_mut(&mut self, index: usize) -> Option<&mut Cue> {
        self.cues.get_mut(index)
    }

    /// Append an empty cue of `kind` and return it.
    pub fn add_cue(&mut self, kind: CueType) -> &mut Cue {
        let index = self.push_cue(Cue::with_kind(kind));
        &mut self.cues[index]
    }

    /// Append `cue`, returning its index.
    pub fn push_cue(&mut self, cue: Cue) -> usize {
        self.cues.push(cue);
        self.link_cues();
        self.cues.len() - 1
    }

    /// Insert `cue` before position `index`; `index == len` appends.
    pub fn insert_cue(&mut self, index: usize, cue: Cue) -> Result<()> {
        if index > self.cues.len() {
            return Err(Error::CueIndex { index, len: self.cues.len() });
        }
        self.cues.insert(index, cue);
        self.link_cues();
        Ok(())
    }

    /// Remove and return the cue at `index`.
    pub fn remove_cue(&mut self, index: usize) -> Option<Cue> {
        if index >= self.cues.len() {
            return None;
        }
        let mut cue = self.cues.remove(index);
        cue.next_cue = None;
        self.link_cues();
        Some(cue)
    }

    /// Move the cue at `from` so it ends up at position `to`.
    pub fn move_cue(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.cues.len();
        for index in [from, to] {
            if index >= len {
                return Err(Error::CueIndex { index, len });
            }
        }
        let cue = self.cues.remove(from);
        self.cues.insert(to, cue);
        self.link_cues();
        Ok(())
    }

    /// The cue following the one at `index`.
    pub fn next_cue(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)?;
        self.cues.get(index + 1)
    }

    /// Point every cue at its immediate successor; the last cue gets none.
    pub fn link_cues(&mut self) {
        let successors: Vec<Option<String>> = self
            .cues
            .iter()
            .skip(1)
            .map(|cue| Some(cue.meta.id.clone()))
            .chain(std::iter::once(None))
            .collect();
        for (cue, next) in self.cues.iter_mut().zip(successors) {
            cue.next_cue = next;
        }
    }

    /// Build a script from its raw root record.
    ///
    /// The thumbnail lives outside the record and is left at its default.
    pub fn decode(raw: &RawObject<'_>) -> Result<Self> {
        let mut script = Self::new("");
        if !raw.is_type("Script") {
            warn!(
                "Root record has TypeId {:?}, expected \"Script\"; using an empty script",
                raw.type_id()
            );
            return Ok(script);
        }
        script.meta = ObjectMeta::decode(raw)?;
        script.properties.read(&raw.properties()?)?;
        script.cues = raw.records("Cues")?.iter().map(Cue::decode).collect::<Result<_>>()?;
        script.link_cues();
        script.key_objects_page = decode_or(raw, "KeyObjectsPage", KeyObjectsPage::new)?;
        script.audio_player = decode_or(raw, "AudioPlayer", AudioPlayer::new)?;
        raw.read("VersionCreated", &mut script.version_created)?;
        raw.read("VersionUpdated", &mut script.version_updated)?;
        debug!("Decoded script {:?} with {} cues", script.properties.name, script.cues.len());
        Ok(script)
    }

    /// Decode a parsed script model document.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::decode(&RawObject::new(value, "")?)
    }

    /// Project the script back to its raw root record.
    ///
    /// Fails before producing anything if an output size is not a whole
    /// number or a cue's content would not read back as written.
    pub fn encode(&self) -> Result<Value> {
        let mut map = self.meta.envelope("Script", self.properties.to_map()?);

        for (index, cue) in self.cues.iter().enumerate() {
            cue.validate(&format!("Cues[{index}]"))?;
        }
        let cues = self
            .cues
            .iter()
            .enumerate()
            .map(|(index, cue)| {
                let mut encoded = cue.encode();
                let next = self.cues.get(index + 1).map_or("", |next| next.meta.id.as_str());
                if let Some(props) = encoded.get_mut("Properties").and_then(Value::as_object_mut) {
                    props.insert("NextCueId".into(), Value::String(next.to_owned()));
                }
                encoded
            })
            .collect();

        map.insert("Cues".into(), Value::Array(cues));
        map.insert("KeyObjectsPage".into(), self.key_objects_page.encode());
        map.insert("AudioPlayer".into(), self.audio_player.encode());
        map.insert("VersionCreated".into(), Value::String(self.version_created.clone()));
        map.insert("VersionUpdated".into(), Value::String(self.version_updated.clone()));
        map.insert("GeneratedBy".into(), Value::String(GENERATOR.to_owned()));
        Ok(Value::Object(map))
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::script::cue::{BibleContent, Content};
    use serde_json::json;

    fn script_with(names: &[&str]) -> Script {
        let mut script = Script::new("Sunday");
        for name in names {
            script.add_cue(CueType::Blank).name = (*name).to_owned();
        }
        script
    }

    fn next_names(script: &Script) -> Vec<Option<String>> {
        (0..script.cue_count())
            .map(|i| script.next_cue(i).map(|cue| cue.name.clone()))
            .collect()
    }

    #[test]
    fn test_next_cue_linking() {
        let mut script = script_with(&["A", "B", "C"]);
        assert_eq!(next_names(&script), [Some("B".into()), Some("C".into()), None]);

        script.add_cue(CueType::Blank).name = "D".into();
        assert_eq!(script.next_cue(2).unwrap().name, "D");
        assert_eq!(script.cue(3).unwrap().next_cue_id(), None);
    }

    #[test]
    fn test_structural_changes_relink() {
        let mut script = script_with(&["A", "B", "C"]);
        script.move_cue(0, 2).unwrap();
        assert_eq!(next_names(&script), [Some("C".into()), Some("A".into()), None]);

        let removed = script.remove_cue(1).unwrap();
        assert_eq!(removed.name, "C");
        assert_eq!(removed.next_cue_id(), None);
        assert_eq!(next_names(&script), [Some("A".into()), None]);

        let mut first = Cue::new();
        first.name = "Z".into();
        script.insert_cue(0, first).unwrap();
        assert_eq!(next_names(&script), [Some("B".into()), Some("A".into()), None]);

        assert!(matches!(
            script.insert_cue(9, Cue::new()),
            Err(Error::CueIndex { index: 9, len: 3 })
        ));
        assert!(script.move_cue(0, 3).is_err());
        assert!(script.remove_cue(3).is_none());
    }

    #[test]
    fn test_next_cue_is_positional_with_duplicate_ids() {
        let mut script = script_with(&["A"]);
        let mut copy = script.cue(0).unwrap().clone();
        copy.name = "B".into();
        script.push_cue(copy);

        assert_eq!(script.next_cue(0).unwrap().name, "B");
        assert!(script.next_cue(1).is_none());
        assert!(script.next_cue(2).is_none());
    }

    #[test]
    fn test_encode_rejects_content_of_the_wrong_shape() {
        let mut script = script_with(&["A", "B"]);
        script.cue_mut(1).unwrap().content = Content::Bible(BibleContent::default());
        match script.encode() {
            Err(Error::InvalidModel { path, .. }) => assert_eq!(path, "Cues[1].Content"),
            other => panic!("Expected invalid model, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_fails_fast_on_fractional_size() {
        let mut script = Script::new("T");
        script.properties.main_width = 1920.5;
        match script.encode() {
            Err(Error::InvariantViolation { field, value }) => {
                assert_eq!(field, "mainWidth");
                assert!((value - 1920.5).abs() < f64::EPSILON);
            }
            other => panic!("Expected invariant violation, got {other:?}"),
        }

        script.properties.main_width = 1920.0;
        script.properties.stage_height = f64::NAN;
        assert!(matches!(
            script.encode(),
            Err(Error::InvariantViolation { field: "stageHeight", .. })
        ));
    }

    #[test]
    fn test_root_wire_shape() {
        let script = script_with(&["A", "B"]);
        let encoded = script.encode().unwrap();
        assert_eq!(encoded["TypeId"], "Script");
        assert_eq!(
            encoded["Properties"]["WorkingAreaWidth"],
            json!({ "$type": "System.Int32, mscorlib", "$value": 1920 })
        );
        assert_eq!(encoded["GeneratedBy"], "mediascript");
        assert_eq!(encoded["Cues"][0]["Properties"]["NextCueId"], script.cues()[1].meta.id);
        assert_eq!(encoded["Cues"][1]["Properties"]["NextCueId"], "");
    }

    #[test]
    fn test_decode_relinks_and_roundtrips() {
        let script = script_with(&["A", "B", "C"]);
        let decoded = Script::from_value(&script.encode().unwrap()).unwrap();
        assert_eq!(decoded, script);
        assert_eq!(next_names(&decoded), [Some("B".into()), Some("C".into()), None]);
    }

    #[test]
    fn test_minimal_document() {
        let value = json!({
            "Id": "x",
            "Version": "7.0.0.0",
            "TypeId": "Script",
            "Properties": {
                "Name": "T",
                "WorkingAreaWidth": { "$value": 1920 },
                "WorkingAreaHeight": { "$value": 1080 },
                "StageAreaWidth": { "$value": 1920 },
                "StageAreaHeight": { "$value": 1080 }
            },
            "Cues": [],
            "VersionCreated": "7.0.0.0",
            "VersionUpdated": "7.0.0.0"
        });
        let script = Script::from_value(&value).unwrap();
        assert_eq!(script.meta.id, "x");
        assert_eq!(script.properties.name, "T");
        assert_eq!(script.cue_count(), 0);
        assert!((script.properties.stage_height - 1080.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_thumbnail_is_png() {
        assert_eq!(&default_thumbnail()[..4], b"\x89PNG");
    }
}
