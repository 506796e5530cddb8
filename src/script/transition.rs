//! Storyboards and transitions.
//!
//! Pages animate in through a [`PageStoryboard`] holding a
//! [`PageTransition`]; visual items through an [`ObjectStoryboard`]
//! holding an [`ObjectTransition`].

use serde_json::{Map, Value};

use super::object::{decode_nullable, ObjectMeta, Record, Tagged};
use super::registry::{variant, Registry, UnknownRecord};
use super::wire::{boxed, number, RawObject};
use crate::constants::wire_type;
use crate::error::Result;

/// `System.TimeSpan` text used for new storyboards and transitions.
pub const DEFAULT_DURATION: &str = "00:00:00";

/// Transition without an origin: `None`, `Cut` and `Dissolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicTransition {
    /// Record identity
    pub meta: ObjectMeta,
    /// `System.TimeSpan` text
    pub duration: String,
}

impl BasicTransition {
    /// A zero-length transition.
    pub fn new() -> Self {
        Self { meta: ObjectMeta::new(), duration: DEFAULT_DURATION.to_owned() }
    }

    fn read(raw: &RawObject<'_>) -> Result<Self> {
        let mut transition = Self::new();
        transition.meta = ObjectMeta::decode(raw)?;
        raw.properties()?.read_boxed("Duration", &mut transition.duration)?;
        Ok(transition)
    }

    fn properties(&self) -> Map<String, Value> {
        let mut props = Map::new();
        props.insert("Duration".into(), boxed(wire_type::TIME_SPAN, self.duration.as_str()));
        props
    }
}

impl Default for BasicTransition {
    fn default() -> Self {
        Self::new()
    }
}

/// Transition entering from an edge: `FlyIn` and `Ticker`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginTransition {
    /// Record identity
    pub meta: ObjectMeta,
    /// `System.TimeSpan` text
    pub duration: String,
    /// Edge the page enters from
    pub origin: i32,
}

impl OriginTransition {
    /// A zero-length transition from the default edge.
    pub fn new() -> Self {
        Self { meta: ObjectMeta::new(), duration: DEFAULT_DURATION.to_owned(), origin: 0 }
    }

    fn read(raw: &RawObject<'_>) -> Result<Self> {
        let mut transition = Self::new();
        transition.meta = ObjectMeta::decode(raw)?;
        let props = raw.properties()?;
        props.read_boxed("Duration", &mut transition.duration)?;
        props.read_boxed("Origin", &mut transition.origin)?;
        Ok(transition)
    }

    fn properties(&self, origin_type: &str) -> Map<String, Value> {
        let mut props = Map::new();
        props.insert("Duration".into(), boxed(wire_type::TIME_SPAN, self.duration.as_str()));
        props.insert("Origin".into(), boxed(origin_type, self.origin));
        props
    }
}

impl Default for OriginTransition {
    fn default() -> Self {
        Self::new()
    }
}

/// Zoom transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomTransition {
    /// Record identity
    pub meta: ObjectMeta,
    /// `System.TimeSpan` text
    pub duration: String,
    /// Point the zoom grows from
    pub origin: i32,
    /// Starting scale, when the file sets one
    pub origin_zoom: Option<f64>,
}

impl ZoomTransition {
    /// A zero-length zoom from the default origin.
    pub fn new() -> Self {
        Self {
            meta: ObjectMeta::new(),
            duration: DEFAULT_DURATION.to_owned(),
            origin: 0,
            origin_zoom: None,
        }
    }
}

impl Default for ZoomTransition {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for ZoomTransition {
    const TYPE_ID: &'static str = "PageTransition+Zoom";
}

impl Record for ZoomTransition {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        let mut transition = Self::new();
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(transition);
        }
        transition.meta = ObjectMeta::decode(raw)?;
        let props = raw.properties()?;
        props.read_boxed("Duration", &mut transition.duration)?;
        props.read_boxed("Origin", &mut transition.origin)?;
        props.read("OriginZoom", &mut transition.origin_zoom)?;
        Ok(transition)
    }

    fn encode(&self) -> Value {
        let mut props = Map::new();
        props.insert("Duration".into(), boxed(wire_type::TIME_SPAN, self.duration.as_str()));
        props.insert("Origin".into(), boxed(wire_type::ZOOM_ORIGIN, self.origin));
        if let Some(zoom) = self.origin_zoom {
            props.insert("OriginZoom".into(), number(zoom));
        }
        Value::Object(self.meta.envelope(Self::TYPE_ID, props))
    }
}

/// How a page replaces the previous one.
#[derive(Debug, Clone, PartialEq)]
pub enum PageTransition {
    /// Instant switch
    None(BasicTransition),
    /// Hard cut
    Cut(BasicTransition),
    /// Cross-fade
    Dissolve(BasicTransition),
    /// Slide in from an edge
    FlyIn(OriginTransition),
    /// Scroll in like a ticker
    Ticker(OriginTransition),
    /// Grow from a point
    Zoom(ZoomTransition),
    /// A transition this library does not model, kept verbatim
    Unknown(UnknownRecord),
}

impl PageTransition {
    /// Discriminator of [`PageTransition::None`].
    pub const NONE: &'static str = "PageTransition+None";
    /// Discriminator of [`PageTransition::Cut`].
    pub const CUT: &'static str = "PageTransition+Cut";
    /// Discriminator of [`PageTransition::Dissolve`].
    pub const DISSOLVE: &'static str = "PageTransition+Dissolve";
    /// Discriminator of [`PageTransition::FlyIn`].
    pub const FLY_IN: &'static str = "PageTransition+FlyIn";
    /// Discriminator of [`PageTransition::Ticker`].
    pub const TICKER: &'static str = "PageTransition+Ticker";

    /// The discriminator this transition is written with.
    pub fn type_id(&self) -> &str {
        match self {
            Self::None(_) => Self::NONE,
            Self::Cut(_) => Self::CUT,
            Self::Dissolve(_) => Self::DISSOLVE,
            Self::FlyIn(_) => Self::FLY_IN,
            Self::Ticker(_) => Self::TICKER,
            Self::Zoom(_) => ZoomTransition::TYPE_ID,
            Self::Unknown(record) => &record.type_id,
        }
    }
}

impl Default for PageTransition {
    fn default() -> Self {
        Self::None(BasicTransition::new())
    }
}

impl From<ZoomTransition> for PageTransition {
    fn from(transition: ZoomTransition) -> Self {
        Self::Zoom(transition)
    }
}

impl From<UnknownRecord> for PageTransition {
    fn from(record: UnknownRecord) -> Self {
        Self::Unknown(record)
    }
}

fn decode_none(raw: &RawObject<'_>) -> Result<PageTransition> {
    BasicTransition::read(raw).map(PageTransition::None)
}

fn decode_cut(raw: &RawObject<'_>) -> Result<PageTransition> {
    BasicTransition::read(raw).map(PageTransition::Cut)
}

fn decode_dissolve(raw: &RawObject<'_>) -> Result<PageTransition> {
    BasicTransition::read(raw).map(PageTransition::Dissolve)
}

fn decode_fly_in(raw: &RawObject<'_>) -> Result<PageTransition> {
    OriginTransition::read(raw).map(PageTransition::FlyIn)
}

fn decode_ticker(raw: &RawObject<'_>) -> Result<PageTransition> {
    OriginTransition::read(raw).map(PageTransition::Ticker)
}

/// Registered page transition discriminators.
pub static PAGE_TRANSITIONS: Registry<PageTransition> = Registry::new(
    "page transition",
    &[
        (PageTransition::NONE, decode_none),
        (PageTransition::CUT, decode_cut),
        (PageTransition::DISSOLVE, decode_dissolve),
        (PageTransition::FLY_IN, decode_fly_in),
        (PageTransition::TICKER, decode_ticker),
        (ZoomTransition::TYPE_ID, variant::<ZoomTransition, PageTransition>),
    ],
);

impl Record for PageTransition {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        PAGE_TRANSITIONS.decode(raw)
    }

    fn encode(&self) -> Value {
        let (meta, props) = match self {
            Self::None(t) | Self::Cut(t) | Self::Dissolve(t) => (&t.meta, t.properties()),
            Self::FlyIn(t) => (&t.meta, t.properties(wire_type::FLY_IN_ORIGIN)),
            Self::Ticker(t) => (&t.meta, t.properties(wire_type::TICKER_ORIGIN)),
            Self::Zoom(t) => return t.encode(),
            Self::Unknown(record) => return record.encode(),
        };
        Value::Object(meta.envelope(self.type_id(), props))
    }
}

/// Page-level storyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStoryboard {
    /// Record identity
    pub meta: ObjectMeta,
    /// `System.TimeSpan` text
    pub duration: String,
    /// `polino.enums.TransitionDirection`
    pub direction: i32,
    /// The storyboard's own top-level `Duration`
    pub timeline_duration: String,
    /// The page transition; `None` when the file has `null`
    pub transition: Option<PageTransition>,
}

impl PageStoryboard {
    /// A storyboard with no visible transition.
    pub fn new() -> Self {
        Self {
            meta: ObjectMeta::new(),
            duration: DEFAULT_DURATION.to_owned(),
            direction: 0,
            timeline_duration: DEFAULT_DURATION.to_owned(),
            transition: Some(PageTransition::default()),
        }
    }
}

impl Default for PageStoryboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for PageStoryboard {
    const TYPE_ID: &'static str = "PageTransitionStoryboard";
}

impl Record for PageStoryboard {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        let mut storyboard = Self::new();
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(storyboard);
        }
        storyboard.meta = ObjectMeta::decode(raw)?;
        let props = raw.properties()?;
        props.read_boxed("Duration", &mut storyboard.duration)?;
        props.read_boxed("Direction", &mut storyboard.direction)?;
        raw.read("Duration", &mut storyboard.timeline_duration)?;
        storyboard.transition = decode_nullable(raw, "Transition")?;
        Ok(storyboard)
    }

    fn encode(&self) -> Value {
        let mut props = Map::new();
        props.insert("Duration".into(), boxed(wire_type::TIME_SPAN, self.duration.as_str()));
        props.insert("Direction".into(), boxed(wire_type::TRANSITION_DIRECTION, self.direction));

        let mut map = self.meta.envelope(Self::TYPE_ID, props);
        map.insert("Duration".into(), Value::String(self.timeline_duration.clone()));
        map.insert(
            "Transition".into(),
            self.transition.as_ref().map_or(Value::Null, Record::encode),
        );
        Value::Object(map)
    }
}

/// The only modelled object transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoObjectTransition {
    /// Record identity
    pub meta: ObjectMeta,
}

impl NoObjectTransition {
    /// A new "none" transition.
    pub fn new() -> Self {
        Self { meta: ObjectMeta::new() }
    }
}

impl Default for NoObjectTransition {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for NoObjectTransition {
    const TYPE_ID: &'static str = "ObjectTransition+None";
}

impl Record for NoObjectTransition {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(Self::new());
        }
        Ok(Self { meta: ObjectMeta::decode(raw)? })
    }

    fn encode(&self) -> Value {
        Value::Object(self.meta.envelope(Self::TYPE_ID, Map::new()))
    }
}

/// How a visual item enters.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectTransition {
    /// No animation
    None(NoObjectTransition),
    /// A transition this library does not model, kept verbatim
    Unknown(UnknownRecord),
}

impl ObjectTransition {
    /// The discriminator this transition is written with.
    pub fn type_id(&self) -> &str {
        match self {
            Self::None(_) => NoObjectTransition::TYPE_ID,
            Self::Unknown(record) => &record.type_id,
        }
    }
}

impl Default for ObjectTransition {
    fn default() -> Self {
        Self::None(NoObjectTransition::new())
    }
}

impl From<NoObjectTransition> for ObjectTransition {
    fn from(transition: NoObjectTransition) -> Self {
        Self::None(transition)
    }
}

impl From<UnknownRecord> for ObjectTransition {
    fn from(record: UnknownRecord) -> Self {
        Self::Unknown(record)
    }
}

/// Registered object transition discriminators.
pub static OBJECT_TRANSITIONS: Registry<ObjectTransition> = Registry::new(
    "object transition",
    &[(NoObjectTransition::TYPE_ID, variant::<NoObjectTransition, ObjectTransition>)],
);

impl Record for ObjectTransition {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        OBJECT_TRANSITIONS.decode(raw)
    }

    fn encode(&self) -> Value {
        match self {
            Self::None(t) => t.encode(),
            Self::Unknown(record) => record.encode(),
        }
    }
}

/// Visual item storyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectStoryboard {
    /// Record identity
    pub meta: ObjectMeta,
    /// `System.TimeSpan` text
    pub duration: String,
    /// `polino.enums.TransitionDirection`
    pub direction: i32,
    /// `System.TimeSpan` text
    pub delay: String,
    /// Stagger between steps
    pub steps_offset: u32,
    /// The storyboard's own top-level `Duration`
    pub timeline_duration: String,
    /// The storyboard's own top-level `StepsOffset`
    pub timeline_steps_offset: u32,
    /// The storyboard's own top-level `Delay`
    pub timeline_delay: String,
    /// The item transition; `None` when the file has `null`
    pub transition: Option<ObjectTransition>,
}

impl ObjectStoryboard {
    /// A storyboard with no animation.
    pub fn new() -> Self {
        Self {
            meta: ObjectMeta::new(),
            duration: DEFAULT_DURATION.to_owned(),
            direction: 0,
            delay: DEFAULT_DURATION.to_owned(),
            steps_offset: 0,
            timeline_duration: DEFAULT_DURATION.to_owned(),
            timeline_steps_offset: 0,
            timeline_delay: DEFAULT_DURATION.to_owned(),
            transition: Some(ObjectTransition::default()),
        }
    }
}

impl Default for ObjectStoryboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for ObjectStoryboard {
    const TYPE_ID: &'static str = "ObjectTransitionStoryboard";
}

impl Record for ObjectStoryboard {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        let mut storyboard = Self::new();
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(storyboard);
        }
        storyboard.meta = ObjectMeta::decode(raw)?;
        let props = raw.properties()?;
        props.read_boxed("Duration", &mut storyboard.duration)?;
        props.read_boxed("Direction", &mut storyboard.direction)?;
        props.read_boxed("Delay", &mut storyboard.delay)?;
        props.read_boxed("StepsOffset", &mut storyboard.steps_offset)?;
        raw.read("Duration", &mut storyboard.timeline_duration)?;
        raw.read("StepsOffset", &mut storyboard.timeline_steps_offset)?;
        raw.read("Delay", &mut storyboard.timeline_delay)?;
        storyboard.transition = decode_nullable(raw, "Transition")?;
        Ok(storyboard)
    }

    fn encode(&self) -> Value {
        let mut props = Map::new();
        props.insert("Duration".into(), boxed(wire_type::TIME_SPAN, self.duration.as_str()));
        props.insert("Direction".into(), boxed(wire_type::TRANSITION_DIRECTION, self.direction));
        props.insert("Delay".into(), boxed(wire_type::TIME_SPAN, self.delay.as_str()));
        props.insert("StepsOffset".into(), boxed(wire_type::UINT32, self.steps_offset));

        let mut map = self.meta.envelope(Self::TYPE_ID, props);
        map.insert("Duration".into(), Value::String(self.timeline_duration.clone()));
        map.insert("StepsOffset".into(), Value::from(self.timeline_steps_offset));
        map.insert("Delay".into(), Value::String(self.timeline_delay.clone()));
        map.insert(
            "Transition".into(),
            self.transition.as_ref().map_or(Value::Null, Record::encode),
        );
        Value::Object(map)
    }
}
