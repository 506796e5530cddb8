//! Visual items placed on pages.
//!
//! Every item shares the geometry in [`ItemBase`]; media items add a
//! [`MediaSource`], and the stage text family (stage data, clock, timer,
//! news ribbon) shares a [`StageTextStyle`].

use serde_json::{Map, Value};

use super::effect::{Effect, EFFECTS};
use super::enums::{FontStyle, FontWeight, TextAlignment, TextItemType};
use super::object::{decode_or, encode_all, ObjectMeta, Record, Tagged};
use super::primitives::{Color, DateTimeValue, Rect, Size, Thickness};
use super::registry::{variant, Registry, UnknownRecord};
use super::transition::ObjectStoryboard;
use super::wire::{boxed, nullable, number, RawObject};
use crate::constants::wire_type;
use crate::error::{Error, Result};

/// Geometry, effects and storyboard common to every visual item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemBase {
    /// Record identity
    pub meta: ObjectMeta,
    /// Display name
    pub name: String,
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Rotation in degrees
    pub angle: f64,
    /// Whether the item is locked in the editor
    pub locked: bool,
    /// Whether the item is shown
    pub visible: bool,
    /// Effects in application order
    pub effects: Vec<Effect>,
    /// Entry animation
    pub storyboard: ObjectStoryboard,
}

impl ItemBase {
    /// A full-screen item with no effects.
    pub fn new() -> Self {
        Self {
            meta: ObjectMeta::new(),
            name: String::new(),
            x: 0.0,
            y: 0.0,
            width: 1920.0,
            height: 1080.0,
            angle: 0.0,
            locked: false,
            visible: false,
            effects: Vec::new(),
            storyboard: ObjectStoryboard::new(),
        }
    }

    fn decode(raw: &RawObject<'_>, props: &RawObject<'_>) -> Result<Self> {
        let mut base = Self::new();
        base.meta = ObjectMeta::decode(raw)?;
        props.read("Name", &mut base.name)?;
        props.read("X", &mut base.x)?;
        props.read("Y", &mut base.y)?;
        props.read("Width", &mut base.width)?;
        props.read("Height", &mut base.height)?;
        props.read("Angle", &mut base.angle)?;
        props.read("IsLocked", &mut base.locked)?;
        props.read("IsVisible", &mut base.visible)?;
        base.effects = EFFECTS.decode_list(raw, "Effects")?;
        base.storyboard = decode_or(raw, "Storyboard", ObjectStoryboard::new)?;
        Ok(base)
    }

    fn properties(&self) -> Map<String, Value> {
        let mut props = Map::new();
        props.insert("Name".into(), Value::String(self.name.clone()));
        props.insert("X".into(), number(self.x));
        props.insert("Y".into(), number(self.y));
        props.insert("Width".into(), number(self.width));
        props.insert("Height".into(), number(self.height));
        props.insert("Angle".into(), number(self.angle));
        props.insert("IsLocked".into(), Value::Bool(self.locked));
        props.insert("IsVisible".into(), Value::Bool(self.visible));
        props
    }

    fn envelope(&self, type_id: &str, props: Map<String, Value>) -> Value {
        let mut map = self.meta.envelope(type_id, props);
        map.insert("Effects".into(), encode_all(&self.effects));
        map.insert("Storyboard".into(), self.storyboard.encode());
        Value::Object(map)
    }
}

impl Default for ItemBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Implements [`Record`] for an item struct with a `base` field and
/// `read_properties` / `write_properties` methods.
macro_rules! item_record {
    ($($name:ident),+ $(,)?) => {
        $(
            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl Record for $name {
                fn decode(raw: &RawObject<'_>) -> Result<Self> {
                    let mut item = Self::new();
                    if !raw.is_type(Self::TYPE_ID) {
                        return Ok(item);
                    }
                    let props = raw.properties()?;
                    item.base = ItemBase::decode(raw, &props)?;
                    item.read_properties(&props)?;
                    Ok(item)
                }

                fn encode(&self) -> Value {
                    let mut props = self.base.properties();
                    self.write_properties(&mut props);
                    self.base.envelope(Self::TYPE_ID, props)
                }
            }
        )+
    };
}

/// A rich text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    /// Shared item fields
    pub base: ItemBase,
    /// RTF document
    pub text: String,
    /// What generated the text
    pub kind: TextItemType,
    /// Free-form description
    pub description: String,
    /// Id of the item this one is linked to
    pub linked_id: String,
    /// Position within the linked item
    pub linked_position: i32,
    /// Position of the split that produced this item
    pub separated_position: i32,
    /// Cached rendering, when the application stored one
    pub snapshot: Option<String>,
    /// Whether the text ends with a page break
    pub has_page_break: bool,
    /// Whether the text ends with a paragraph mark
    pub has_paragraph: bool,
}

impl Tagged for TextItem {
    const TYPE_ID: &'static str = "VisualItem+Text";
}

impl TextItem {
    /// An empty basic text box.
    pub fn new() -> Self {
        Self {
            base: ItemBase::new(),
            text: String::new(),
            kind: TextItemType::Basic,
            description: String::new(),
            linked_id: String::new(),
            linked_position: 0,
            separated_position: 0,
            snapshot: None,
            has_page_break: false,
            has_paragraph: false,
        }
    }

    fn read_properties(&mut self, props: &RawObject<'_>) -> Result<()> {
        props.read("Text", &mut self.text)?;
        let mut kind = self.kind.to_wire();
        props.read_boxed("Type", &mut kind)?;
        self.kind = TextItemType::from_wire(kind);
        props.read("Description", &mut self.description)?;
        props.read("LinkedId", &mut self.linked_id)?;
        props.read_boxed("LinkedPosition", &mut self.linked_position)?;
        props.read_boxed("SeparatedPosition", &mut self.separated_position)?;
        props.read("Snapshot", &mut self.snapshot)?;
        props.read("HasPageBreak", &mut self.has_page_break)?;
        props.read("HasParagraph", &mut self.has_paragraph)?;
        Ok(())
    }

    fn write_properties(&self, props: &mut Map<String, Value>) {
        props.insert("Text".into(), Value::String(self.text.clone()));
        props.insert("Type".into(), boxed(wire_type::TEXT_ITEM_TYPE, self.kind.to_wire()));
        props.insert("Description".into(), Value::String(self.description.clone()));
        props.insert("LinkedId".into(), Value::String(self.linked_id.clone()));
        props.insert("LinkedPosition".into(), boxed(wire_type::INT32, self.linked_position));
        props.insert("SeparatedPosition".into(), boxed(wire_type::INT32, self.separated_position));
        props.insert("Snapshot".into(), nullable(self.snapshot.as_deref()));
        props.insert("HasPageBreak".into(), Value::Bool(self.has_page_break));
        props.insert("HasParagraph".into(), Value::Bool(self.has_paragraph));
    }
}

/// Where a media item's content comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSource {
    /// Library identifier
    pub identifier: Option<String>,
    /// Path of the media in use
    pub source: Option<String>,
    /// Path the media was imported from
    pub original_source: String,
    /// Native size of the media
    pub initial_size: Size,
    /// `polino.model.Enums.FastPositioningState`
    pub fast_positioning_state: i32,
}

impl MediaSource {
    /// An empty file source.
    pub fn new() -> Self {
        Self {
            identifier: Some(String::new()),
            source: Some(String::new()),
            original_source: String::new(),
            initial_size: Size::new(0.0, 0.0),
            fast_positioning_state: 0,
        }
    }

    fn read(&mut self, props: &RawObject<'_>) -> Result<()> {
        props.read("Identifier", &mut self.identifier)?;
        props.read("Source", &mut self.source)?;
        props.read("OriginalSource", &mut self.original_source)?;
        props.read_boxed_with("InitialSize", &mut self.initial_size, Size::parse)?;
        props.read_boxed("FastPositioningState", &mut self.fast_positioning_state)?;
        Ok(())
    }

    fn write(&self, props: &mut Map<String, Value>) {
        props.insert("Identifier".into(), nullable(self.identifier.as_deref()));
        props.insert("Source".into(), nullable(self.source.as_deref()));
        props.insert("OriginalSource".into(), Value::String(self.original_source.clone()));
        props.insert(
            "InitialSize".into(),
            boxed(wire_type::DRAWING_SIZE, self.initial_size.to_string()),
        );
        props.insert(
            "FastPositioningState".into(),
            boxed(wire_type::FAST_POSITIONING_STATE, self.fast_positioning_state),
        );
    }
}

impl Default for MediaSource {
    fn default() -> Self {
        Self::new()
    }
}

/// A still image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageItem {
    /// Shared item fields
    pub base: ItemBase,
    /// Image file
    pub media: MediaSource,
    /// Visible part of the image
    pub visualize_rectangle: Rect,
    /// Horizontal resolution
    pub dpi_x: f64,
    /// Vertical resolution
    pub dpi_y: f64,
}

impl Tagged for ImageItem {
    const TYPE_ID: &'static str = "VisualItem+Image";
}

impl ImageItem {
    /// An image with no file.
    pub fn new() -> Self {
        Self {
            base: ItemBase::new(),
            media: MediaSource::new(),
            visualize_rectangle: Rect::new(0.0, 0.0, 0.0, 0.0),
            dpi_x: 96.0,
            dpi_y: 96.0,
        }
    }

    fn read_properties(&mut self, props: &RawObject<'_>) -> Result<()> {
        self.media.read(props)?;
        props.read_boxed_with("VisualizeRectangle", &mut self.visualize_rectangle, Rect::parse)?;
        props.read("DpiX", &mut self.dpi_x)?;
        props.read("DpiY", &mut self.dpi_y)?;
        Ok(())
    }

    fn write_properties(&self, props: &mut Map<String, Value>) {
        self.media.write(props);
        props.insert(
            "VisualizeRectangle".into(),
            boxed(wire_type::DRAWING_RECTANGLE, self.visualize_rectangle.to_string()),
        );
        props.insert("DpiX".into(), number(self.dpi_x));
        props.insert("DpiY".into(), number(self.dpi_y));
    }
}

/// A video clip.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoItem {
    /// Shared item fields
    pub base: ItemBase,
    /// Video file
    pub media: MediaSource,
    /// Playback rate multiplier
    pub rate: f64,
    /// Path of the preview frame
    pub thumbnail_source: String,
    /// Volume, 0-100
    pub volume: i32,
}

impl Tagged for VideoItem {
    const TYPE_ID: &'static str = "VisualItem+Video";
}

impl VideoItem {
    /// A video with no file, playing at normal speed.
    pub fn new() -> Self {
        Self {
            base: ItemBase::new(),
            media: MediaSource::new(),
            rate: 1.0,
            thumbnail_source: String::new(),
            volume: 100,
        }
    }

    fn read_properties(&mut self, props: &RawObject<'_>) -> Result<()> {
        self.media.read(props)?;
        props.read_boxed("Rate", &mut self.rate)?;
        props.read("ThumbnailSource", &mut self.thumbnail_source)?;
        props.read_boxed("Volume", &mut self.volume)?;
        Ok(())
    }

    fn write_properties(&self, props: &mut Map<String, Value>) {
        self.media.write(props);
        props.insert("Rate".into(), boxed(wire_type::SINGLE, number(self.rate)));
        props.insert("ThumbnailSource".into(), Value::String(self.thumbnail_source.clone()));
        props.insert("Volume".into(), boxed(wire_type::INT32, self.volume));
    }
}

/// A live NDI video feed.
#[derive(Debug, Clone, PartialEq)]
pub struct NdiSourceItem {
    /// Shared item fields
    pub base: ItemBase,
    /// Feed; identifier and source stay `None` until a feed is picked
    pub media: MediaSource,
    /// Volume, 0-100
    pub volume: i32,
}

impl Tagged for NdiSourceItem {
    const TYPE_ID: &'static str = "VisualItem+NdiVideoSource";
}

impl NdiSourceItem {
    /// An unconnected 640x360 feed.
    pub fn new() -> Self {
        Self {
            base: ItemBase::new(),
            media: MediaSource {
                identifier: None,
                source: None,
                initial_size: Size::new(640.0, 360.0),
                ..MediaSource::new()
            },
            volume: 100,
        }
    }

    fn read_properties(&mut self, props: &RawObject<'_>) -> Result<()> {
        self.media.read(props)?;
        props.read_boxed("Volume", &mut self.volume)?;
        Ok(())
    }

    fn write_properties(&self, props: &mut Map<String, Value>) {
        self.media.write(props);
        props.insert("Volume".into(), boxed(wire_type::INT32, self.volume));
    }
}

/// Font and layout of the stage text family.
#[derive(Debug, Clone, PartialEq)]
pub struct StageTextStyle {
    /// Whether the item shows on the main output
    pub is_main: bool,
    /// Per-cue visibility, keyed by cue id, in file order
    pub cues_visibility: Vec<(String, bool)>,
    /// Fixed text, when the item does not generate its own
    pub text: Option<String>,
    /// Font family name
    pub font_family: String,
    /// Font size in points
    pub font_size: f64,
    /// Font style
    pub font_style: FontStyle,
    /// Font weight
    pub font_weight: FontWeight,
    /// Text color
    pub foreground: Color,
    /// Highlight color
    pub highlight: Color,
    /// Horizontal alignment
    pub text_alignment: TextAlignment,
    /// Underlined text
    pub underline: bool,
    /// Struck-through text
    pub strikethrough: bool,
    /// Inner margin
    pub indent: Thickness,
}

impl StageTextStyle {
    /// White 48pt Arial, centered.
    pub fn new() -> Self {
        Self {
            is_main: false,
            cues_visibility: Vec::new(),
            text: None,
            font_family: "Arial".to_owned(),
            font_size: 48.0,
            font_style: FontStyle::Normal,
            font_weight: FontWeight::Normal,
            foreground: Color::WHITE,
            highlight: Color::TRANSPARENT,
            text_alignment: TextAlignment::Center,
            underline: false,
            strikethrough: false,
            indent: Thickness::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    fn read(&mut self, props: &RawObject<'_>) -> Result<()> {
        props.read("IsMain", &mut self.is_main)?;
        if let Some(visibility) = props.boxed("CuesVisibility") {
            self.cues_visibility = read_visibility(visibility, &props.field_path("CuesVisibility"))?;
        }
        props.read("Text", &mut self.text)?;
        props.read_boxed("FontFamily", &mut self.font_family)?;
        props.read("FontSize", &mut self.font_size)?;

        let mut name: Option<String> = None;
        props.read_boxed("FontStyle", &mut name)?;
        if let Some(name) = name.take() {
            self.font_style = FontStyle::from_wire(&name);
        }
        props.read_boxed("FontWeight", &mut name)?;
        if let Some(name) = name {
            self.font_weight = FontWeight::from_wire(&name);
        }

        props.read_boxed_with("Foreground", &mut self.foreground, Color::parse_hex)?;
        props.read_boxed_with("Highlight", &mut self.highlight, Color::parse_hex)?;
        let mut alignment = self.text_alignment.to_wire();
        props.read_boxed("TextAlignment", &mut alignment)?;
        self.text_alignment = TextAlignment::from_wire(alignment);
        props.read("IsUnderlineEnabled", &mut self.underline)?;
        props.read("IsStrikethroughEnabled", &mut self.strikethrough)?;
        props.read_boxed_with("Indent", &mut self.indent, Thickness::parse)?;
        Ok(())
    }

    fn write(&self, props: &mut Map<String, Value>) {
        let visibility: Map<String, Value> = self
            .cues_visibility
            .iter()
            .map(|(cue, visible)| (cue.clone(), Value::Bool(*visible)))
            .collect();

        props.insert("IsMain".into(), Value::Bool(self.is_main));
        props.insert(
            "CuesVisibility".into(),
            boxed(wire_type::BOOL_DICTIONARY, Value::Object(visibility)),
        );
        props.insert("Text".into(), nullable(self.text.as_deref()));
        props.insert("FontFamily".into(), boxed(wire_type::FONT_FAMILY, self.font_family.as_str()));
        props.insert("FontSize".into(), number(self.font_size));
        props.insert("FontStyle".into(), boxed(wire_type::FONT_STYLE, self.font_style.to_wire()));
        props.insert("FontWeight".into(), boxed(wire_type::FONT_WEIGHT, self.font_weight.to_wire()));
        props.insert("Foreground".into(), boxed(wire_type::MEDIA_COLOR, self.foreground.to_hex()));
        props.insert("Highlight".into(), boxed(wire_type::MEDIA_COLOR, self.highlight.to_hex()));
        props.insert(
            "TextAlignment".into(),
            boxed(wire_type::TEXT_ALIGNMENT, self.text_alignment.to_wire()),
        );
        props.insert("IsUnderlineEnabled".into(), Value::Bool(self.underline));
        props.insert("IsStrikethroughEnabled".into(), Value::Bool(self.strikethrough));
        props.insert("Indent".into(), boxed(wire_type::THICKNESS, self.indent.to_string()));
    }
}

impl Default for StageTextStyle {
    fn default() -> Self {
        Self::new()
    }
}

fn read_visibility(value: &Value, path: &str) -> Result<Vec<(String, bool)>> {
    let Value::Object(entries) = value else {
        return Err(Error::schema(path, "expected a cue visibility dictionary"));
    };
    entries
        .iter()
        .map(|(cue, visible)| match visible.as_bool() {
            Some(visible) => Ok((cue.clone(), visible)),
            None => Err(Error::schema(format!("{path}.{cue}"), "expected a boolean")),
        })
        .collect()
}

/// Stage display text fed by the running show.
#[derive(Debug, Clone, PartialEq)]
pub struct StageDataItem {
    /// Shared item fields
    pub base: ItemBase,
    /// Text styling
    pub style: StageTextStyle,
}

impl Tagged for StageDataItem {
    const TYPE_ID: &'static str = "VisualItem+StageDataText";
}

impl StageDataItem {
    /// Stage text in the default style.
    pub fn new() -> Self {
        Self { base: ItemBase::new(), style: StageTextStyle::new() }
    }

    fn read_properties(&mut self, props: &RawObject<'_>) -> Result<()> {
        self.style.read(props)
    }

    fn write_properties(&self, props: &mut Map<String, Value>) {
        self.style.write(props);
    }
}

/// A wall clock.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockItem {
    /// Shared item fields
    pub base: ItemBase,
    /// Text styling
    pub style: StageTextStyle,
    /// Time shown in the editor preview
    pub time: DateTimeValue,
    /// `polino.model.Enums.KeyObjects.TimeFormat`
    pub time_format: i32,
}

impl Tagged for ClockItem {
    const TYPE_ID: &'static str = "VisualItem+Clock";
}

impl ClockItem {
    /// A clock showing the current time.
    pub fn new() -> Self {
        Self {
            base: ItemBase::new(),
            style: StageTextStyle::new(),
            time: DateTimeValue::now(),
            time_format: 0,
        }
    }

    fn read_properties(&mut self, props: &RawObject<'_>) -> Result<()> {
        self.style.read(props)?;
        let mut time: Option<String> = None;
        props.read_boxed("Time", &mut time)?;
        if let Some(time) = time {
            self.time = DateTimeValue::from_wire(time);
        }
        props.read_boxed("TimeFormat", &mut self.time_format)?;
        Ok(())
    }

    fn write_properties(&self, props: &mut Map<String, Value>) {
        self.style.write(props);
        props.insert("Time".into(), boxed(wire_type::DATE_TIME, self.time.as_str()));
        props.insert("TimeFormat".into(), boxed(wire_type::TIME_FORMAT, self.time_format));
    }
}

/// A countdown timer.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerItem {
    /// Shared item fields
    pub base: ItemBase,
    /// Text styling
    pub style: StageTextStyle,
    /// `polino.model.Enums.KeyObjects.TimerFormat`
    pub timer_format: i32,
    /// Hours
    pub hours: i32,
    /// Minutes
    pub minutes: i32,
    /// Seconds
    pub seconds: i32,
    /// `polino.model.Enums.KeyObjects.CompletedAction`
    pub completed_action: i32,
}

impl Tagged for TimerItem {
    const TYPE_ID: &'static str = "VisualItem+Timer";
}

impl TimerItem {
    /// A one minute countdown.
    pub fn new() -> Self {
        Self {
            base: ItemBase::new(),
            style: StageTextStyle::new(),
            timer_format: 0,
            hours: 0,
            minutes: 1,
            seconds: 0,
            completed_action: 0,
        }
    }

    fn read_properties(&mut self, props: &RawObject<'_>) -> Result<()> {
        self.style.read(props)?;
        props.read_boxed("TimerFormat", &mut self.timer_format)?;
        props.read_boxed("Hours", &mut self.hours)?;
        props.read_boxed("Minutes", &mut self.minutes)?;
        props.read_boxed("Seconds", &mut self.seconds)?;
        props.read_boxed("CompletedAction", &mut self.completed_action)?;
        Ok(())
    }

    fn write_properties(&self, props: &mut Map<String, Value>) {
        self.style.write(props);
        props.insert("TimerFormat".into(), boxed(wire_type::TIMER_FORMAT, self.timer_format));
        props.insert("Hours".into(), boxed(wire_type::INT32, self.hours));
        props.insert("Minutes".into(), boxed(wire_type::INT32, self.minutes));
        props.insert("Seconds".into(), boxed(wire_type::INT32, self.seconds));
        props.insert(
            "CompletedAction".into(),
            boxed(wire_type::COMPLETED_ACTION, self.completed_action),
        );
    }
}

/// Scrolling ticker text.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsRibbonItem {
    /// Shared item fields
    pub base: ItemBase,
    /// Text styling
    pub style: StageTextStyle,
    /// Scroll speed
    pub speed: f64,
}

impl Tagged for NewsRibbonItem {
    const TYPE_ID: &'static str = "VisualItem+NewsRibbon";
}

impl NewsRibbonItem {
    /// A stationary ribbon.
    pub fn new() -> Self {
        Self { base: ItemBase::new(), style: StageTextStyle::new(), speed: 0.0 }
    }

    fn read_properties(&mut self, props: &RawObject<'_>) -> Result<()> {
        self.style.read(props)?;
        props.read("NewsRibbonSpeed", &mut self.speed)?;
        Ok(())
    }

    fn write_properties(&self, props: &mut Map<String, Value>) {
        self.style.write(props);
        props.insert("NewsRibbonSpeed".into(), number(self.speed));
    }
}

item_record!(
    TextItem,
    ImageItem,
    VideoItem,
    NdiSourceItem,
    StageDataItem,
    ClockItem,
    TimerItem,
    NewsRibbonItem,
);

/// Any item on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualItem {
    /// Rich text
    Text(TextItem),
    /// Still image
    Image(ImageItem),
    /// Video clip
    Video(VideoItem),
    /// NDI feed
    NdiSource(NdiSourceItem),
    /// Stage display text
    StageData(StageDataItem),
    /// Wall clock
    Clock(ClockItem),
    /// Countdown
    Timer(TimerItem),
    /// Ticker
    NewsRibbon(NewsRibbonItem),
    /// An item this library does not model, kept verbatim
    Unknown(UnknownRecord),
}

/// Registered visual item discriminators.
pub static VISUAL_ITEMS: Registry<VisualItem> = Registry::new(
    "visual item",
    &[
        (TextItem::TYPE_ID, variant::<TextItem, VisualItem>),
        (ImageItem::TYPE_ID, variant::<ImageItem, VisualItem>),
        (VideoItem::TYPE_ID, variant::<VideoItem, VisualItem>),
        (NdiSourceItem::TYPE_ID, variant::<NdiSourceItem, VisualItem>),
        (StageDataItem::TYPE_ID, variant::<StageDataItem, VisualItem>),
        (ClockItem::TYPE_ID, variant::<ClockItem, VisualItem>),
        (TimerItem::TYPE_ID, variant::<TimerItem, VisualItem>),
        (NewsRibbonItem::TYPE_ID, variant::<NewsRibbonItem, VisualItem>),
    ],
);

macro_rules! item_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for VisualItem {
                fn from(item: $ty) -> Self {
                    Self::$variant(item)
                }
            }
        )+
    };
}

item_from! {
    Text(TextItem),
    Image(ImageItem),
    Video(VideoItem),
    NdiSource(NdiSourceItem),
    StageData(StageDataItem),
    Clock(ClockItem),
    Timer(TimerItem),
    NewsRibbon(NewsRibbonItem),
    Unknown(UnknownRecord),
}

impl VisualItem {
    /// The discriminator this item is written with.
    pub fn type_id(&self) -> &str {
        match self {
            Self::Text(_) => TextItem::TYPE_ID,
            Self::Image(_) => ImageItem::TYPE_ID,
            Self::Video(_) => VideoItem::TYPE_ID,
            Self::NdiSource(_) => NdiSourceItem::TYPE_ID,
            Self::StageData(_) => StageDataItem::TYPE_ID,
            Self::Clock(_) => ClockItem::TYPE_ID,
            Self::Timer(_) => TimerItem::TYPE_ID,
            Self::NewsRibbon(_) => NewsRibbonItem::TYPE_ID,
            Self::Unknown(record) => &record.type_id,
        }
    }

    /// Shared fields; `None` for unknown items.
    pub const fn base(&self) -> Option<&ItemBase> {
        match self {
            Self::Text(item) => Some(&item.base),
            Self::Image(item) => Some(&item.base),
            Self::Video(item) => Some(&item.base),
            Self::NdiSource(item) => Some(&item.base),
            Self::StageData(item) => Some(&item.base),
            Self::Clock(item) => Some(&item.base),
            Self::Timer(item) => Some(&item.base),
            Self::NewsRibbon(item) => Some(&item.base),
            Self::Unknown(_) => None,
        }
    }

    /// Mutable shared fields; `None` for unknown items.
    pub fn base_mut(&mut self) -> Option<&mut ItemBase> {
        match self {
            Self::Text(item) => Some(&mut item.base),
            Self::Image(item) => Some(&mut item.base),
            Self::Video(item) => Some(&mut item.base),
            Self::NdiSource(item) => Some(&mut item.base),
            Self::StageData(item) => Some(&mut item.base),
            Self::Clock(item) => Some(&mut item.base),
            Self::Timer(item) => Some(&mut item.base),
            Self::NewsRibbon(item) => Some(&mut item.base),
            Self::Unknown(_) => None,
        }
    }

    /// The item's id.
    pub fn id(&self) -> &str {
        match self {
            Self::Unknown(record) => record.id(),
            known => known.base().map_or("", |base| base.meta.id.as_str()),
        }
    }

    /// The item's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Unknown(record) => record
                .raw
                .get("Properties")
                .and_then(|props| props.get("Name"))
                .and_then(Value::as_str)
                .unwrap_or_default(),
            known => known.base().map_or("", |base| base.name.as_str()),
        }
    }
}

impl Record for VisualItem {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        VISUAL_ITEMS.decode(raw)
    }

    fn encode(&self) -> Value {
        match self {
            Self::Text(item) => item.encode(),
            Self::Image(item) => item.encode(),
            Self::Video(item) => item.encode(),
            Self::NdiSource(item) => item.encode(),
            Self::StageData(item) => item.encode(),
            Self::Clock(item) => item.encode(),
            Self::Timer(item) => item.encode(),
            Self::NewsRibbon(item) => item.encode(),
            Self::Unknown(record) => record.encode(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::script::effect::{BlurEffect, CommonEffect};
    use serde_json::json;

    fn roundtrip(item: VisualItem) {
        let encoded = item.encode();
        let decoded = VisualItem::from_value(&encoded, "Items[0]").unwrap();
        assert_eq!(decoded, item);
    }

    #[test]
    fn test_every_variant_roundtrips() {
        let mut text = TextItem::new();
        text.text = r"{\rtf1 Amazing grace}".into();
        text.kind = TextItemType::Lyric;
        text.linked_id = "t3tfPDVDHka0CXSYc2vsYw==".into();
        text.base.effects.push(CommonEffect::new().into());
        text.base.effects.push(BlurEffect { radius: 4.0, ..BlurEffect::new() }.into());

        let mut image = ImageItem::new();
        image.media.source = Some(r"C:\media\cross.png".into());
        image.media.initial_size = Size::new(800.0, 600.0);
        image.visualize_rectangle = Rect::new(0.0, 0.0, 800.0, 600.0);

        let mut timer = TimerItem::new();
        timer.style.cues_visibility = vec![("b".into(), true), ("a".into(), false)];
        timer.style.font_weight = FontWeight::SemiBold;

        for item in [
            VisualItem::from(text),
            image.into(),
            VideoItem { rate: 1.5, ..VideoItem::new() }.into(),
            NdiSourceItem::new().into(),
            StageDataItem::new().into(),
            ClockItem::new().into(),
            timer.into(),
            NewsRibbonItem { speed: 2.5, ..NewsRibbonItem::new() }.into(),
        ] {
            roundtrip(item);
        }
    }

    #[test]
    fn test_text_item_wire_shape() {
        let encoded = VisualItem::from(TextItem::new()).encode();
        let keys: Vec<&str> = encoded.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["Id", "Version", "TypeId", "Properties", "Effects", "Storyboard"]);
        assert_eq!(encoded["Properties"]["Width"], 1920);
        assert_eq!(
            encoded["Properties"]["Type"],
            json!({ "$type": "polino.model.Enums.TextItemType, polino.model", "$value": 0 })
        );
        assert_eq!(encoded["Storyboard"]["TypeId"], "ObjectTransitionStoryboard");
    }

    #[test]
    fn test_linked_id_is_not_overwritten() {
        let mut text = TextItem::new();
        text.linked_id = "abc".into();
        assert_eq!(text.encode()["Properties"]["LinkedId"], "abc");
    }

    #[test]
    fn test_stage_style_wire_values() {
        let mut item = StageDataItem::new();
        item.style.cues_visibility = vec![("cue-1".into(), true)];
        let props = item.encode()["Properties"].clone();
        assert_eq!(props["Foreground"]["$value"], "#FFFFFFFF");
        assert_eq!(props["Highlight"]["$value"], "#00000000");
        assert_eq!(props["FontStyle"]["$value"], "Normal");
        assert_eq!(props["TextAlignment"]["$value"], 2);
        assert_eq!(props["Indent"]["$value"], "0, 0, 0, 0");
        assert_eq!(props["CuesVisibility"]["$value"], json!({ "cue-1": true }));
        assert!(props["Text"].is_null());
    }

    #[test]
    fn test_ndi_defaults() {
        let encoded = NdiSourceItem::new().encode();
        assert!(encoded["Properties"]["Identifier"].is_null());
        assert_eq!(encoded["Properties"]["InitialSize"]["$value"], "640, 360");
        assert_eq!(encoded["Properties"]["Volume"]["$value"], 100);
    }

    #[test]
    fn test_decode_reads_file_values() {
        let value = json!({
            "Id": "i1",
            "Version": "7.0.0.0",
            "TypeId": "VisualItem+Clock",
            "Properties": {
                "Name": "Clock",
                "X": 10,
                "Width": 400.5,
                "FontStyle": { "$type": "System.Windows.FontStyle, PresentationCore", "$value": "Italic" },
                "Foreground": { "$type": "System.Windows.Media.Color, PresentationCore", "$value": "#FF000080" },
                "TextAlignment": { "$type": "System.Windows.TextAlignment, PresentationCore", "$value": 9 },
                "Time": { "$type": "System.DateTime, mscorlib", "$value": "2024-05-01T09:30:00" }
            },
            "Effects": [],
            "Storyboard": null
        });
        let VisualItem::Clock(clock) = VisualItem::from_value(&value, "Items[0]").unwrap() else {
            panic!("Expected a clock");
        };
        assert_eq!(clock.base.meta.id, "i1");
        assert_eq!(clock.base.name, "Clock");
        assert!((clock.base.width - 400.5).abs() < f64::EPSILON);
        assert!((clock.base.height - 1080.0).abs() < f64::EPSILON);
        assert_eq!(clock.style.font_style, FontStyle::Italic);
        assert_eq!(clock.style.foreground, Color::new(255, 0, 0, 128));
        assert_eq!(clock.style.text_alignment, TextAlignment::Other(9));
        assert_eq!(clock.time.as_str(), "2024-05-01T09:30:00");
    }

    #[test]
    fn test_unknown_item_is_preserved() {
        let value = json!({ "Id": "w", "TypeId": "VisualItem+Web", "Properties": { "Name": "Site" } });
        let item = VisualItem::from_value(&value, "Items[0]").unwrap();
        assert_eq!(item.type_id(), "VisualItem+Web");
        assert_eq!(item.name(), "Site");
        assert!(item.base().is_none());
        assert_eq!(item.encode(), value);
    }

    #[test]
    fn test_bad_primitive_fails() {
        let value = json!({
            "TypeId": "VisualItem+Image",
            "Properties": { "InitialSize": { "$value": "wide, tall" } }
        });
        let err = VisualItem::from_value(&value, "Items[0]").unwrap_err();
        assert!(matches!(err, Error::Primitive { .. }), "{err:?}");
    }

    #[test]
    fn test_bad_visibility_names_the_cue() {
        let value = json!({
            "TypeId": "VisualItem+StageDataText",
            "Properties": { "CuesVisibility": { "$value": { "c1": "yes" } } }
        });
        match VisualItem::from_value(&value, "Items[0]").unwrap_err() {
            Error::Schema { path, .. } => assert_eq!(path, "Items[0].Properties.CuesVisibility.c1"),
            other => panic!("Expected schema error, got {other:?}"),
        }
    }
}
