//! Visual item effects.
//!
//! Fourteen flat property records, dispatched by `TypeId` through
//! [`EFFECTS`].

use serde_json::{Map, Value};

use super::enums::VerticalAlignment;
use super::object::{ObjectMeta, Record, Tagged};
use super::primitives::Color;
use super::registry::{variant, Registry, UnknownRecord};
use super::wire::{boxed, number, RawObject, ToWire};
use crate::constants::wire_type;
use crate::error::Result;

/// Effects whose properties are all unboxed scalars.
macro_rules! plain_effect {
    (
        $(#[$meta:meta])*
        $name:ident = $tag:literal {
            $( $(#[$fmeta:meta])* $field:ident: $ty:ty = $default:expr => $wire:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            /// Record identity
            pub meta: ObjectMeta,
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $name {
            /// A new effect with default settings.
            pub fn new() -> Self {
                Self { meta: ObjectMeta::new(), $( $field: $default, )* }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Tagged for $name {
            const TYPE_ID: &'static str = $tag;
        }

        impl Record for $name {
            fn decode(raw: &RawObject<'_>) -> Result<Self> {
                let mut effect = Self::new();
                if !raw.is_type(Self::TYPE_ID) {
                    return Ok(effect);
                }
                effect.meta = ObjectMeta::decode(raw)?;
                let props = raw.properties()?;
                $( props.read($wire, &mut effect.$field)?; )*
                Ok(effect)
            }

            fn encode(&self) -> Value {
                let mut props = Map::new();
                $( props.insert($wire.into(), self.$field.to_wire()); )*
                Value::Object(self.meta.envelope(Self::TYPE_ID, props))
            }
        }
    };
}

plain_effect! {
    /// Item opacity.
    CommonEffect = "Effect+CommonEffect" {
        /// Opacity, 0-1
        opacity: f64 = 1.0 => "Opacity",
    }
}

plain_effect! {
    /// Mirror the item.
    FlipEffect = "Effect+FlipEffect" {
        /// Flip left to right
        flip_horizontal: bool = false => "FlipHorizontal",
        /// Flip top to bottom
        flip_vertical: bool = false => "FlipVertical",
    }
}

plain_effect! {
    /// Sepia tone.
    SepiaEffect = "Effect+SepiaEffect" {
        /// Whether the effect applies
        is_enabled: bool = false => "IsEnabled",
    }
}

plain_effect! {
    /// Grayscale.
    GrayscaleEffect = "Effect+GrayscaleEffect" {
        /// Whether the effect applies
        is_enabled: bool = false => "IsEnabled",
    }
}

plain_effect! {
    /// Gaussian blur.
    BlurEffect = "Effect+BlurEffect" {
        /// Whether the effect applies
        is_enabled: bool = false => "IsEnabled",
        /// Blur radius
        radius: f64 = 0.0 => "Radius",
    }
}

plain_effect! {
    /// Color inversion.
    InvertColorsEffect = "Effect+InvertColorsEffect" {
        /// Whether the effect applies
        is_enabled: bool = false => "IsEnabled",
    }
}

plain_effect! {
    /// Hue rotation.
    HueRotateEffect = "Effect+HueRotateEffect" {
        /// Whether the effect applies
        is_enabled: bool = false => "IsEnabled",
        /// Rotation applied to every hue
        hue_offset: f64 = 0.0 => "HueOffset",
    }
}

plain_effect! {
    /// Saturation adjustment.
    SaturationAdjustEffect = "Effect+SaturationAdjustEffect" {
        /// Whether the effect applies
        is_enabled: bool = false => "IsEnabled",
        /// Saturation change
        saturation_adjust: f64 = 0.0 => "SaturationAdjust",
    }
}

plain_effect! {
    /// Contrast and brightness adjustment.
    ///
    /// The discriminator's spelling (`Brighness`) is what the application writes.
    ContrastBrightnessAdjustEffect = "Effect+ContrastBrighnessAdjustEffect" {
        /// Whether the effect applies
        is_enabled: bool = false => "IsEnabled",
        /// Contrast change
        contrast_adjust: f64 = 0.0 => "ContrastAdjust",
        /// Brightness change
        brightness_adjust: f64 = 0.0 => "BrightnessAdjust",
    }
}

plain_effect! {
    /// Trim a video.
    VideoCropEffect = "Effect+VideoCropEffect" {
        /// Start of the played range
        start_position: f64 = 0.0 => "StartPosition",
        /// End of the played range
        end_position: f64 = 0.0 => "EndPosition",
    }
}

/// Outline around the item.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEffect {
    /// Record identity
    pub meta: ObjectMeta,
    /// Outline color
    pub color: Color,
    /// Outline opacity, 0-1
    pub opacity: f64,
    /// Outline width
    pub size: f64,
}

impl OutlineEffect {
    /// A new effect with default settings.
    pub fn new() -> Self {
        Self { meta: ObjectMeta::new(), color: Color::BLACK, opacity: 1.0, size: 0.0 }
    }
}

impl Default for OutlineEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for OutlineEffect {
    const TYPE_ID: &'static str = "Effect+OutlineEffect";
}

impl Record for OutlineEffect {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        let mut effect = Self::new();
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(effect);
        }
        effect.meta = ObjectMeta::decode(raw)?;
        let props = raw.properties()?;
        props.read_color("Color", &mut effect.color)?;
        props.read("Opacity", &mut effect.opacity)?;
        props.read("Size", &mut effect.size)?;
        Ok(effect)
    }

    fn encode(&self) -> Value {
        let mut props = Map::new();
        props.insert("Color".into(), boxed(wire_type::INT32, self.color.to_int()));
        props.insert("Opacity".into(), number(self.opacity));
        props.insert("Size".into(), number(self.size));
        Value::Object(self.meta.envelope(Self::TYPE_ID, props))
    }
}

/// Text background, outline and shadow styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEffect {
    /// Record identity
    pub meta: ObjectMeta,
    /// Box behind the text
    pub background_color: Color,
    /// Text outline color
    pub outline_color: Color,
    /// Text shadow color
    pub shadow_color: Color,
    /// Background opacity, 0-1
    pub background_opacity: f64,
    /// Outline opacity, 0-1
    pub outline_opacity: f64,
    /// Shadow opacity, 0-1
    pub shadow_opacity: f64,
    /// Outline width
    pub outline_thickness: f64,
    /// Shadow direction in degrees
    pub shadow_angle: f64,
    /// Shadow distance
    pub shadow_offset: f64,
    /// Shadow blur
    pub shadow_blur_radius: i32,
    /// Vertical placement of the text in its box
    pub vertical_alignment: VerticalAlignment,
}

impl TextEffect {
    /// A new effect with default settings.
    pub fn new() -> Self {
        Self {
            meta: ObjectMeta::new(),
            background_color: Color::new(255, 0, 0, 0),
            outline_color: Color::BLACK,
            shadow_color: Color::BLACK,
            background_opacity: 0.0,
            outline_opacity: 1.0,
            shadow_opacity: 0.0,
            outline_thickness: 0.0,
            shadow_angle: 135.0,
            shadow_offset: 0.0,
            shadow_blur_radius: 0,
            vertical_alignment: VerticalAlignment::Center,
        }
    }
}

impl Default for TextEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for TextEffect {
    const TYPE_ID: &'static str = "Effect+TextEffect";
}

impl Record for TextEffect {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        let mut effect = Self::new();
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(effect);
        }
        effect.meta = ObjectMeta::decode(raw)?;
        let props = raw.properties()?;
        props.read_color("BackgroundColor", &mut effect.background_color)?;
        props.read_color("OutlineColor", &mut effect.outline_color)?;
        props.read_color("ShadowColor", &mut effect.shadow_color)?;
        props.read("BackgroundOpacity", &mut effect.background_opacity)?;
        props.read("OutlineOpacity", &mut effect.outline_opacity)?;
        props.read("ShadowOpacity", &mut effect.shadow_opacity)?;
        props.read("OutlineThickness", &mut effect.outline_thickness)?;
        props.read("ShadowAngle", &mut effect.shadow_angle)?;
        props.read("ShadowOffset", &mut effect.shadow_offset)?;
        props.read_boxed("ShadowBlurRadius", &mut effect.shadow_blur_radius)?;

        let mut alignment = effect.vertical_alignment.to_wire();
        props.read_boxed("VerticalAlignment", &mut alignment)?;
        effect.vertical_alignment = VerticalAlignment::from_wire(alignment);
        Ok(effect)
    }

    fn encode(&self) -> Value {
        let mut props = Map::new();
        props.insert("BackgroundColor".into(), boxed(wire_type::INT32, self.background_color.to_int()));
        props.insert("OutlineColor".into(), boxed(wire_type::INT32, self.outline_color.to_int()));
        props.insert("ShadowColor".into(), boxed(wire_type::INT32, self.shadow_color.to_int()));
        props.insert("BackgroundOpacity".into(), number(self.background_opacity));
        props.insert("OutlineOpacity".into(), number(self.outline_opacity));
        props.insert("ShadowOpacity".into(), number(self.shadow_opacity));
        props.insert("OutlineThickness".into(), number(self.outline_thickness));
        props.insert("ShadowAngle".into(), number(self.shadow_angle));
        props.insert("ShadowOffset".into(), number(self.shadow_offset));
        props.insert("ShadowBlurRadius".into(), boxed(wire_type::INT32, self.shadow_blur_radius));
        props.insert(
            "VerticalAlignment".into(),
            boxed(wire_type::VERTICAL_ALIGNMENT, self.vertical_alignment.to_wire()),
        );
        Value::Object(self.meta.envelope(Self::TYPE_ID, props))
    }
}

/// Drop shadow behind the item.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowEffect {
    /// Record identity
    pub meta: ObjectMeta,
    /// Shadow blur
    pub blur_radius: i32,
    /// Shadow color
    pub color: Color,
    /// Shadow opacity, 0-1
    pub opacity: f64,
    /// Shadow distance
    pub offset: f64,
    /// Shadow direction in degrees
    pub angle: f64,
}

impl ShadowEffect {
    /// A new effect with default settings.
    pub fn new() -> Self {
        Self {
            meta: ObjectMeta::new(),
            blur_radius: 0,
            color: Color::BLACK,
            opacity: 1.0,
            offset: 0.0,
            angle: 0.0,
        }
    }
}

impl Default for ShadowEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for ShadowEffect {
    const TYPE_ID: &'static str = "Effect+ShadowEffect";
}

impl Record for ShadowEffect {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        let mut effect = Self::new();
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(effect);
        }
        effect.meta = ObjectMeta::decode(raw)?;
        let props = raw.properties()?;
        props.read_boxed("BlurRadius", &mut effect.blur_radius)?;
        props.read_color("Color", &mut effect.color)?;
        props.read("Opacity", &mut effect.opacity)?;
        props.read("Offset", &mut effect.offset)?;
        props.read("Angle", &mut effect.angle)?;
        Ok(effect)
    }

    fn encode(&self) -> Value {
        let mut props = Map::new();
        props.insert("BlurRadius".into(), boxed(wire_type::INT32, self.blur_radius));
        props.insert("Color".into(), boxed(wire_type::INT32, self.color.to_int()));
        props.insert("Opacity".into(), number(self.opacity));
        props.insert("Offset".into(), number(self.offset));
        props.insert("Angle".into(), number(self.angle));
        Value::Object(self.meta.envelope(Self::TYPE_ID, props))
    }
}

/// Number of times a video plays.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoPlayTimesEffect {
    /// Record identity
    pub meta: ObjectMeta,
    /// Play count
    pub play_times: i32,
}

impl VideoPlayTimesEffect {
    /// A new effect that plays once.
    pub fn new() -> Self {
        Self { meta: ObjectMeta::new(), play_times: 1 }
    }
}

impl Default for VideoPlayTimesEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for VideoPlayTimesEffect {
    const TYPE_ID: &'static str = "Effect+VideoPlayTimesEffect";
}

impl Record for VideoPlayTimesEffect {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        let mut effect = Self::new();
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(effect);
        }
        effect.meta = ObjectMeta::decode(raw)?;
        raw.properties()?.read_boxed("PlayTimes", &mut effect.play_times)?;
        Ok(effect)
    }

    fn encode(&self) -> Value {
        let mut props = Map::new();
        props.insert("PlayTimes".into(), boxed(wire_type::INT32, self.play_times));
        Value::Object(self.meta.envelope(Self::TYPE_ID, props))
    }
}

/// Any effect attached to a visual item.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Opacity
    Common(CommonEffect),
    /// Mirroring
    Flip(FlipEffect),
    /// Outline
    Outline(OutlineEffect),
    /// Text styling
    Text(TextEffect),
    /// Drop shadow
    Shadow(ShadowEffect),
    /// Sepia tone
    Sepia(SepiaEffect),
    /// Grayscale
    Grayscale(GrayscaleEffect),
    /// Blur
    Blur(BlurEffect),
    /// Color inversion
    InvertColors(InvertColorsEffect),
    /// Hue rotation
    HueRotate(HueRotateEffect),
    /// Saturation
    SaturationAdjust(SaturationAdjustEffect),
    /// Contrast and brightness
    ContrastBrightnessAdjust(ContrastBrightnessAdjustEffect),
    /// Video trimming
    VideoCrop(VideoCropEffect),
    /// Video repeat count
    VideoPlayTimes(VideoPlayTimesEffect),
    /// An effect this library does not model, kept verbatim
    Unknown(UnknownRecord),
}

/// Registered effect discriminators.
pub static EFFECTS: Registry<Effect> = Registry::new(
    "effect",
    &[
        (CommonEffect::TYPE_ID, variant::<CommonEffect, Effect>),
        (FlipEffect::TYPE_ID, variant::<FlipEffect, Effect>),
        (OutlineEffect::TYPE_ID, variant::<OutlineEffect, Effect>),
        (TextEffect::TYPE_ID, variant::<TextEffect, Effect>),
        (ShadowEffect::TYPE_ID, variant::<ShadowEffect, Effect>),
        (SepiaEffect::TYPE_ID, variant::<SepiaEffect, Effect>),
        (GrayscaleEffect::TYPE_ID, variant::<GrayscaleEffect, Effect>),
        (BlurEffect::TYPE_ID, variant::<BlurEffect, Effect>),
        (InvertColorsEffect::TYPE_ID, variant::<InvertColorsEffect, Effect>),
        (HueRotateEffect::TYPE_ID, variant::<HueRotateEffect, Effect>),
        (SaturationAdjustEffect::TYPE_ID, variant::<SaturationAdjustEffect, Effect>),
        (
            ContrastBrightnessAdjustEffect::TYPE_ID,
            variant::<ContrastBrightnessAdjustEffect, Effect>,
        ),
        (VideoCropEffect::TYPE_ID, variant::<VideoCropEffect, Effect>),
        (VideoPlayTimesEffect::TYPE_ID, variant::<VideoPlayTimesEffect, Effect>),
    ],
);

macro_rules! effect_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Effect {
                fn from(effect: $ty) -> Self {
                    Self::$variant(effect)
                }
            }
        )+
    };
}

effect_from! {
    Common(CommonEffect),
    Flip(FlipEffect),
    Outline(OutlineEffect),
    Text(TextEffect),
    Shadow(ShadowEffect),
    Sepia(SepiaEffect),
    Grayscale(GrayscaleEffect),
    Blur(BlurEffect),
    InvertColors(InvertColorsEffect),
    HueRotate(HueRotateEffect),
    SaturationAdjust(SaturationAdjustEffect),
    ContrastBrightnessAdjust(ContrastBrightnessAdjustEffect),
    VideoCrop(VideoCropEffect),
    VideoPlayTimes(VideoPlayTimesEffect),
    Unknown(UnknownRecord),
}

impl Effect {
    /// The discriminator this effect is written with.
    pub fn type_id(&self) -> &str {
        match self {
            Self::Common(_) => CommonEffect::TYPE_ID,
            Self::Flip(_) => FlipEffect::TYPE_ID,
            Self::Outline(_) => OutlineEffect::TYPE_ID,
            Self::Text(_) => TextEffect::TYPE_ID,
            Self::Shadow(_) => ShadowEffect::TYPE_ID,
            Self::Sepia(_) => SepiaEffect::TYPE_ID,
            Self::Grayscale(_) => GrayscaleEffect::TYPE_ID,
            Self::Blur(_) => BlurEffect::TYPE_ID,
            Self::InvertColors(_) => InvertColorsEffect::TYPE_ID,
            Self::HueRotate(_) => HueRotateEffect::TYPE_ID,
            Self::SaturationAdjust(_) => SaturationAdjustEffect::TYPE_ID,
            Self::ContrastBrightnessAdjust(_) => ContrastBrightnessAdjustEffect::TYPE_ID,
            Self::VideoCrop(_) => VideoCropEffect::TYPE_ID,
            Self::VideoPlayTimes(_) => VideoPlayTimesEffect::TYPE_ID,
            Self::Unknown(record) => &record.type_id,
        }
    }

    /// The effect's id.
    pub fn id(&self) -> &str {
        match self {
            Self::Common(e) => &e.meta.id,
            Self::Flip(e) => &e.meta.id,
            Self::Outline(e) => &e.meta.id,
            Self::Text(e) => &e.meta.id,
            Self::Shadow(e) => &e.meta.id,
            Self::Sepia(e) => &e.meta.id,
            Self::Grayscale(e) => &e.meta.id,
            Self::Blur(e) => &e.meta.id,
            Self::InvertColors(e) => &e.meta.id,
            Self::HueRotate(e) => &e.meta.id,
            Self::SaturationAdjust(e) => &e.meta.id,
            Self::ContrastBrightnessAdjust(e) => &e.meta.id,
            Self::VideoCrop(e) => &e.meta.id,
            Self::VideoPlayTimes(e) => &e.meta.id,
            Self::Unknown(record) => record.id(),
        }
    }
}

impl Record for Effect {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        EFFECTS.decode(raw)
    }

    fn encode(&self) -> Value {
        match self {
            Self::Common(e) => e.encode(),
            Self::Flip(e) => e.encode(),
            Self::Outline(e) => e.encode(),
            Self::Text(e) => e.encode(),
            Self::Shadow(e) => e.encode(),
            Self::Sepia(e) => e.encode(),
            Self::Grayscale(e) => e.encode(),
            Self::Blur(e) => e.encode(),
            Self::InvertColors(e) => e.encode(),
            Self::HueRotate(e) => e.encode(),
            Self::SaturationAdjust(e) => e.encode(),
            Self::ContrastBrightnessAdjust(e) => e.encode(),
            Self::VideoCrop(e) => e.encode(),
            Self::VideoPlayTimes(e) => e.encode(),
            Self::Unknown(record) => record.encode(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    fn decode(value: &Value) -> Effect {
        Effect::from_value(value, "Effects[0]").unwrap()
    }

    #[test]
    fn test_all_fourteen_registered() {
        assert_eq!(EFFECTS.type_ids().count(), 14);
        assert!(EFFECTS.contains("Effect+ContrastBrighnessAdjustEffect"));
        assert!(!EFFECTS.contains("Effect+BrighnessAdjustEffect"));
    }

    #[test]
    fn test_text_effect_decode() {
        let value = json!({
            "Id": "e1",
            "Version": "7.0.0.0",
            "TypeId": "Effect+TextEffect",
            "Properties": {
                "BackgroundColor": { "$type": "System.Int32, mscorlib", "$value": -16_777_216 },
                "OutlineColor": { "$type": "System.Int32, mscorlib", "$value": 255 },
                "ShadowColor": { "$type": "System.Int32, mscorlib", "$value": 0 },
                "BackgroundOpacity": 0.5,
                "OutlineOpacity": 1,
                "ShadowOpacity": 0,
                "OutlineThickness": 2,
                "ShadowAngle": 135,
                "ShadowOffset": 3,
                "ShadowBlurRadius": { "$type": "System.Int32, mscorlib", "$value": 4 },
                "VerticalAlignment": { "$type": "System.Windows.VerticalAlignment, PresentationFramework", "$value": 2 }
            }
        });

        let Effect::Text(text) = decode(&value) else {
            panic!("Expected a text effect");
        };
        assert_eq!(text.meta.id, "e1");
        assert_eq!(text.background_color, Color::BLACK);
        assert_eq!(text.outline_color, Color::new(255, 0, 0, 0));
        assert!((text.background_opacity - 0.5).abs() < f64::EPSILON);
        assert_eq!(text.shadow_blur_radius, 4);
        assert_eq!(text.vertical_alignment, VerticalAlignment::Bottom);
        assert_eq!(Effect::Text(text).encode(), value);
    }

    #[test]
    fn test_contrast_effect_keeps_wire_spelling() {
        let effect = Effect::from(ContrastBrightnessAdjustEffect::new());
        let encoded = effect.encode();
        assert_eq!(encoded["TypeId"], "Effect+ContrastBrighnessAdjustEffect");
        assert_eq!(decode(&encoded), effect);
    }

    #[test]
    fn test_boxed_fields_are_enveloped() {
        let encoded = Effect::from(VideoPlayTimesEffect::new()).encode();
        assert_eq!(
            encoded["Properties"]["PlayTimes"],
            json!({ "$type": "System.Int32, mscorlib", "$value": 1 })
        );
        let outline = Effect::from(OutlineEffect::new()).encode();
        assert_eq!(outline["Properties"]["Color"]["$value"], -16_777_216);
    }

    #[test]
    fn test_unknown_effect_survives() {
        let value = json!({
            "Id": "e9",
            "Version": "7.0.0.0",
            "TypeId": "Effect+GlowEffect",
            "Properties": { "Radius": 3 }
        });
        let effect = decode(&value);
        assert_eq!(effect.type_id(), "Effect+GlowEffect");
        assert_eq!(effect.id(), "e9");
        assert_eq!(effect.encode(), value);
    }

    #[test]
    fn test_mismatched_type_yields_default() {
        let value = json!({ "Id": "x", "TypeId": "Effect+FlipEffect", "Properties": { "Opacity": 0.2 } });
        let common = CommonEffect::from_value(&value, "").unwrap();
        assert_ne!(common.meta.id, "x");
        assert!((common.opacity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let value = json!({ "TypeId": "Effect+BlurEffect", "Properties": { "Radius": "big" } });
        assert!(Effect::from_value(&value, "Effects[0]").is_err());
    }
}
