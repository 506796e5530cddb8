//! Cues, their applied templates and their content dictionary.

use serde_json::{Map, Value};
use std::collections::HashSet;

use super::enums::CueType;
use super::item::{VisualItem, VISUAL_ITEMS};
use super::key_objects::KeyObjectsPage;
use super::object::{decode_nullable, decode_or, encode_all, ObjectMeta, Record, Tagged};
use super::page::Page;
use super::primitives::{Color, DateTimeValue};
use super::wire::{boxed, nullable, RawObject};
use crate::constants::wire_type;
use crate::error::{Error, Result};

/// A design template applied to a cue's main or stage output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Record identity
    pub meta: ObjectMeta,
    /// Template name
    pub name: String,
}

impl Template {
    /// A template reference with the placeholder name.
    pub fn new() -> Self {
        Self { meta: ObjectMeta::new(), name: "Template".to_owned() }
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for Template {
    const TYPE_ID: &'static str = "AppliedTemplateModel";
}

impl Record for Template {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        let mut template = Self::new();
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(template);
        }
        template.meta = ObjectMeta::decode(raw)?;
        raw.read("Name", &mut template.name)?;
        Ok(template)
    }

    fn encode(&self) -> Value {
        let mut map = self.meta.envelope(Self::TYPE_ID, Map::new());
        map.insert("Name".into(), Value::String(self.name.clone()));
        Value::Object(map)
    }
}

/// One named block of song lyrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza {
    /// Label such as `Verse 1`
    pub name: String,
    /// Lyric text
    pub content: String,
}

/// Bible passage settings of a bible cue.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BibleContent {
    /// Passage such as `John 3:16-17`
    pub reference: String,
    /// Translation name
    pub version: String,
    /// Second translation shown alongside, if any; `"None"` is reserved for
    /// the absent case on the wire
    pub dual_version: Option<String>,
    /// Short translation name
    pub abbreviation: String,
    /// Whether the second translation is shown
    pub dual_enabled: bool,
    /// Whether verse references are shown
    pub verse_reference_enabled: bool,
    /// Whether dual translations stack vertically
    pub orientation_vertical: bool,
}

const NO_DUAL_VERSION: &str = "None";

/// The string dictionary stored under a cue's `Content`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    /// Nothing stored
    #[default]
    Empty,
    /// Lyric stanzas in file order
    Lyric(Vec<Stanza>),
    /// Bible passage settings
    Bible(BibleContent),
    /// Entries of a cue type with no dedicated model, kept as found
    Preserved(Map<String, Value>),
}

impl Content {
    /// Empty content of the shape `kind` uses.
    pub fn for_kind(kind: CueType) -> Self {
        match kind.normalized() {
            CueType::Lyric => Self::Lyric(Vec::new()),
            CueType::Bible => Self::Bible(BibleContent::default()),
            _ => Self::Empty,
        }
    }

    /// Check that the content can be written under `kind` and read back
    /// unchanged.
    fn validate(&self, kind: CueType, path: &str) -> Result<()> {
        match (kind.normalized(), self) {
            (CueType::Lyric, Self::Lyric(stanzas)) => {
                let mut seen = HashSet::with_capacity(stanzas.len());
                for stanza in stanzas {
                    if !seen.insert(stanza.name.as_str()) {
                        return Err(Error::model(
                            path,
                            format!("duplicate stanza name {:?}", stanza.name),
                        ));
                    }
                }
                Ok(())
            }
            (CueType::Bible, Self::Bible(bible)) => {
                if bible.dual_version.as_deref() == Some(NO_DUAL_VERSION) {
                    return Err(Error::model(
                        path,
                        format!("dual version {NO_DUAL_VERSION:?} is reserved for no dual version"),
                    ));
                }
                Ok(())
            }
            (CueType::Lyric | CueType::Bible, _) | (_, Self::Lyric(_) | Self::Bible(_)) => {
                Err(Error::model(path, format!("{} content on a {kind:?} cue", self.shape())))
            }
            (_, Self::Preserved(entries)) if entries.is_empty() => {
                Err(Error::model(path, "preserved content is empty; use Content::Empty"))
            }
            _ => Ok(()),
        }
    }

    const fn shape(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Lyric(_) => "lyric",
            Self::Bible(_) => "bible",
            Self::Preserved(_) => "preserved",
        }
    }

    fn decode(kind: CueType, value: Option<&Value>, path: &str) -> Result<Self> {
        let entries = match value {
            None => return Ok(Self::for_kind(kind)),
            Some(Value::Object(entries)) => entries,
            Some(_) => return Err(Error::schema(path, "expected a string dictionary")),
        };

        let text = |key: &str| -> Result<Option<String>> {
            match entries.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(_) => Err(Error::schema(format!("{path}.{key}"), "expected a string")),
            }
        };
        let flag = |key: &str| -> Result<bool> {
            Ok(text(key)?.is_some_and(|s| s.eq_ignore_ascii_case("true")))
        };

        match kind.normalized() {
            CueType::Lyric => entries
                .keys()
                .map(|name| -> Result<Stanza> {
                    Ok(Stanza { name: name.clone(), content: text(name)?.unwrap_or_default() })
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Lyric),
            CueType::Bible => Ok(Self::Bible(BibleContent {
                reference: text("BibleReference")?.unwrap_or_default(),
                version: text("BibleVersion")?.unwrap_or_default(),
                dual_version: text("DualBibleVersion")?.filter(|v| v != NO_DUAL_VERSION),
                abbreviation: text("BibleAbbreviation")?.unwrap_or_default(),
                dual_enabled: flag("IsDualBibleEnabled")?,
                verse_reference_enabled: flag("IsVerseReferenceEnabled")?,
                orientation_vertical: flag("IsOrientationVertical")?,
            })),
            _ if entries.is_empty() => Ok(Self::Empty),
            _ => Ok(Self::Preserved(entries.clone())),
        }
    }

    fn encode(&self) -> Value {
        let flag = |on: bool| Value::String(if on { "True" } else { "False" }.to_owned());
        let entries: Map<String, Value> = match self {
            Self::Empty => Map::new(),
            Self::Lyric(stanzas) => stanzas
                .iter()
                .map(|stanza| (stanza.name.clone(), Value::String(stanza.content.clone())))
                .collect(),
            Self::Bible(bible) => {
                let mut map = Map::new();
                map.insert("BibleTextItems".into(), wire_type::BIBLE_TEXT_ITEMS.into());
                map.insert("BibleReference".into(), bible.reference.clone().into());
                map.insert("BibleVersion".into(), bible.version.clone().into());
                map.insert(
                    "DualBibleVersion".into(),
                    bible.dual_version.as_deref().unwrap_or(NO_DUAL_VERSION).into(),
                );
                map.insert("BibleAbbreviation".into(), bible.abbreviation.clone().into());
                map.insert("IsDualBibleEnabled".into(), flag(bible.dual_enabled));
                map.insert("IsVerseReferenceEnabled".into(), flag(bible.verse_reference_enabled));
                map.insert("IsOrientationVertical".into(), flag(bible.orientation_vertical));
                map
            }
            Self::Preserved(entries) => entries.clone(),
        };
        boxed(wire_type::STRING_DICTIONARY, Value::Object(entries))
    }
}

/// A scheduling unit of a script: a song, a passage, a blank screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// Record identity
    pub meta: ObjectMeta,
    /// Display name
    pub name: String,
    /// Main output background
    pub main_background: Color,
    /// Stage output background
    pub stage_background: Color,
    /// Operator comment
    pub comment: String,
    /// Whether the cue is expanded in the cue list
    pub is_expanded: bool,
    /// Last edit time
    pub last_update_time: DateTimeValue,
    /// What the cue holds
    pub kind: CueType,
    pub(crate) next_cue: Option<String>,
    /// Whether playback skips the cue
    pub is_skipped: bool,
    /// Whether the stage output mirrors the main output
    pub mirror_main_on_stage: bool,
    /// `polino.model.Enums.SplittingOptionsType`
    pub splitting_options: i32,
    /// Where the content was imported from
    pub source: String,
    /// Content dictionary
    pub content: Content,
    /// `polino.model.Enums.ScheduledPlaybackType`; `-1` when unscheduled
    pub scheduled_playback_type: i32,
    /// Scheduled start
    pub scheduled_playback_time: DateTimeValue,
    /// Application-specific extra data
    pub additional_info: Option<String>,
    /// Whether text was wrapped onto extra pages
    pub was_wrapped: bool,
    /// Pages in playback order
    pub pages: Vec<Page>,
    /// Template on the main output
    pub main_template: Option<Template>,
    /// Template on the stage output
    pub stage_template: Option<Template>,
    /// Background behind every main page
    pub main_background_item: Option<VisualItem>,
    /// Background behind every stage page
    pub stage_background_item: Option<VisualItem>,
    /// Audio playing under the cue
    pub background_audio_item: Option<VisualItem>,
    /// Key object data scoped to the cue
    pub key_data_objects_page: KeyObjectsPage,
}

impl Cue {
    /// A blank cue.
    pub fn new() -> Self {
        Self::with_kind(CueType::Blank)
    }

    /// An empty cue of `kind`, with content of the matching shape.
    pub fn with_kind(kind: CueType) -> Self {
        Self {
            meta: ObjectMeta::new(),
            name: "New cue".to_owned(),
            main_background: Color::BLACK,
            stage_background: Color::BLACK,
            comment: String::new(),
            is_expanded: true,
            last_update_time: DateTimeValue::now(),
            kind,
            next_cue: None,
            is_skipped: false,
            mirror_main_on_stage: false,
            splitting_options: 0,
            source: String::new(),
            content: Content::for_kind(kind),
            scheduled_playback_type: -1,
            scheduled_playback_time: DateTimeValue::epoch(),
            additional_info: Some(String::new()),
            was_wrapped: false,
            pages: Vec::new(),
            main_template: None,
            stage_template: None,
            main_background_item: None,
            stage_background_item: None,
            background_audio_item: None,
            key_data_objects_page: KeyObjectsPage::new(),
        }
    }

    /// Id of the cue that follows this one in its script.
    pub fn next_cue_id(&self) -> Option<&str> {
        self.next_cue.as_deref()
    }

    /// Fail if the cue's content would not read back as written.
    pub fn validate(&self, path: &str) -> Result<()> {
        self.content.validate(self.kind, &format!("{path}.Content"))
    }

    /// Append a page.
    pub fn push_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    fn read_properties(&mut self, props: &RawObject<'_>) -> Result<()> {
        props.read("Name", &mut self.name)?;
        props.read_color("MainBackgroundColor", &mut self.main_background)?;
        props.read_color("StageBackgroundColor", &mut self.stage_background)?;
        props.read("Comment", &mut self.comment)?;
        props.read("IsExpanded", &mut self.is_expanded)?;
        read_date_time(props, "LastUpdateTime", &mut self.last_update_time)?;

        let mut kind = self.kind.to_wire();
        props.read_boxed("Type", &mut kind)?;
        self.kind = CueType::from_wire(kind);

        props.read("NextCueId", &mut self.next_cue)?;
        self.next_cue = self.next_cue.take().filter(|id| !id.is_empty());
        props.read("IsSkipped", &mut self.is_skipped)?;
        props.read("IsMirrorMainOnStage", &mut self.mirror_main_on_stage)?;
        props.read_boxed("SplittingOptionsType", &mut self.splitting_options)?;
        props.read("Source", &mut self.source)?;
        self.content =
            Content::decode(self.kind, props.boxed("Content"), &props.field_path("Content"))?;
        props.read_boxed("ScheduledPlaybackType", &mut self.scheduled_playback_type)?;
        read_date_time(props, "ScheduledPlaybackTime", &mut self.scheduled_playback_time)?;
        props.read("AdditionalInfo", &mut self.additional_info)?;
        props.read("WasWrapped", &mut self.was_wrapped)?;
        Ok(())
    }

    fn properties(&self) -> Map<String, Value> {
        let mut props = Map::new();
        props.insert("Name".into(), Value::String(self.name.clone()));
        props.insert(
            "MainBackgroundColor".into(),
            boxed(wire_type::INT32, self.main_background.to_int()),
        );
        props.insert(
            "StageBackgroundColor".into(),
            boxed(wire_type::INT32, self.stage_background.to_int()),
        );
        props.insert("Comment".into(), Value::String(self.comment.clone()));
        props.insert("IsExpanded".into(), Value::Bool(self.is_expanded));
        props.insert(
            "LastUpdateTime".into(),
            boxed(wire_type::DATE_TIME, self.last_update_time.as_str()),
        );
        props.insert("Type".into(), boxed(wire_type::CUE_TYPE, self.kind.to_wire()));
        props.insert(
            "NextCueId".into(),
            Value::String(self.next_cue.clone().unwrap_or_default()),
        );
        props.insert("IsSkipped".into(), Value::Bool(self.is_skipped));
        props.insert("IsMirrorMainOnStage".into(), Value::Bool(self.mirror_main_on_stage));
        props.insert(
            "SplittingOptionsType".into(),
            boxed(wire_type::SPLITTING_OPTIONS_TYPE, self.splitting_options),
        );
        props.insert("Source".into(), Value::String(self.source.clone()));
        props.insert("Content".into(), self.content.encode());
        props.insert(
            "ScheduledPlaybackType".into(),
            boxed(wire_type::SCHEDULED_PLAYBACK_TYPE, self.scheduled_playback_type),
        );
        props.insert(
            "ScheduledPlaybackTime".into(),
            boxed(wire_type::DATE_TIME, self.scheduled_playback_time.as_str()),
        );
        props.insert("AdditionalInfo".into(), nullable(self.additional_info.as_deref()));
        props.insert("WasWrapped".into(), Value::Bool(self.was_wrapped));
        props
    }
}

fn read_date_time(props: &RawObject<'_>, key: &str, out: &mut DateTimeValue) -> Result<()> {
    let mut text: Option<String> = None;
    props.read_boxed(key, &mut text)?;
    if let Some(text) = text {
        *out = DateTimeValue::from_wire(text);
    }
    Ok(())
}

fn decode_item(raw: &RawObject<'_>, key: &str) -> Result<Option<VisualItem>> {
    raw.object(key)?.map(|child| VISUAL_ITEMS.decode(&child)).transpose()
}

fn encode_optional<T: Record>(record: Option<&T>) -> Value {
    record.map_or(Value::Null, Record::encode)
}

impl Default for Cue {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for Cue {
    const TYPE_ID: &'static str = "Cue";
}

impl Record for Cue {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        let mut cue = Self::new();
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(cue);
        }
        cue.meta = ObjectMeta::decode(raw)?;
        cue.read_properties(&raw.properties()?)?;
        cue.pages = raw.records("Pages")?.iter().map(Page::decode).collect::<Result<_>>()?;
        cue.main_template = decode_nullable(raw, "MainAppliedTemplate")?;
        cue.stage_template = decode_nullable(raw, "StageAppliedTemplate")?;
        cue.main_background_item = decode_item(raw, "MainBackgroundItem")?;
        cue.stage_background_item = decode_item(raw, "StageBackgroundItem")?;
        cue.background_audio_item = decode_item(raw, "BackgroundAudioItem")?;
        cue.key_data_objects_page = decode_or(raw, "KeyDataObjectsPage", KeyObjectsPage::new)?;
        Ok(cue)
    }

    fn encode(&self) -> Value {
        let mut map = self.meta.envelope(Self::TYPE_ID, self.properties());
        map.insert("Pages".into(), encode_all(&self.pages));
        map.insert("MainAppliedTemplate".into(), encode_optional(self.main_template.as_ref()));
        map.insert("StageAppliedTemplate".into(), encode_optional(self.stage_template.as_ref()));
        map.insert(
            "MainBackgroundItem".into(),
            encode_optional(self.main_background_item.as_ref()),
        );
        map.insert(
            "StageBackgroundItem".into(),
            encode_optional(self.stage_background_item.as_ref()),
        );
        map.insert(
            "BackgroundAudioItem".into(),
            encode_optional(self.background_audio_item.as_ref()),
        );
        map.insert("KeyDataObjectsPage".into(), self.key_data_objects_page.encode());
        Value::Object(map)
    }
}
