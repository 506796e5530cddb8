//! Wire primitive codecs.
//!
//! Colors travel either as a packed little-endian `Int32` or as a
//! `#RRGGBBAA` string. Geometry travels as comma separated number lists.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::error::{Error, Result};

/// An RGBA color with one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack as `r | g << 8 | b << 16 | a << 24`, read as a signed 32-bit value.
    pub const fn to_int(self) -> i32 {
        i32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    /// Inverse of [`Color::to_int`].
    pub const fn from_int(packed: i32) -> Self {
        let [r, g, b, a] = packed.to_le_bytes();
        Self { r, g, b, a }
    }

    /// Unpack a wire integer, keeping only its low 32 bits.
    ///
    /// Files written by other tools sometimes store the packed value as an
    /// unsigned number above `i32::MAX`.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_wire(packed: i64) -> Self {
        Self::from_int(packed as i32)
    }

    /// Format as `#RRGGBBAA` with uppercase hex digits.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parse a `#RRGGBBAA` string.
    pub fn parse_hex(input: &str) -> Result<Self> {
        let channel = |range: std::ops::Range<usize>| {
            input
                .get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| Error::primitive("hex color", input))
        };

        if input.len() != 9 || !input.starts_with('#') {
            return Err(Error::primitive("hex color", input));
        }

        Ok(Self {
            r: channel(1..3)?,
            g: channel(3..5)?,
            b: channel(5..7)?,
            a: channel(7..9)?,
        })
    }
}

/// Split a comma separated number list into exactly `N` values.
///
/// Blank components read as zero.
fn parse_numbers<const N: usize>(kind: &'static str, input: &str) -> Result<[f64; N]> {
    let mut out = [0.0; N];
    let mut parts = input.split(',');

    for slot in &mut out {
        let part = parts.next().ok_or_else(|| Error::primitive(kind, input))?.trim();
        *slot = if part.is_empty() {
            0.0
        } else {
            part.parse().map_err(|_| Error::primitive(kind, input))?
        };
    }

    if parts.next().is_some() {
        return Err(Error::primitive(kind, input));
    }
    Ok(out)
}

/// A width/height pair, `System.Drawing.Size` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Size {
    /// Create a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Parse `"<width>, <height>"`.
    pub fn parse(input: &str) -> Result<Self> {
        let [width, height] = parse_numbers("size", input)?;
        Ok(Self { width, height })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.width, self.height)
    }
}

/// A positioned rectangle, `System.Drawing.Rectangle` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Parse `"<x>, <y>, <width>, <height>"`.
    pub fn parse(input: &str) -> Result<Self> {
        let [x, y, width, height] = parse_numbers("rectangle", input)?;
        Ok(Self { x, y, width, height })
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.x, self.y, self.width, self.height)
    }
}

/// A four-sided margin, `System.Windows.Thickness` on the wire.
///
/// Sides are written in WPF order: left, top, right, bottom.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thickness {
    /// Left side
    pub left: f64,
    /// Top side
    pub top: f64,
    /// Right side
    pub right: f64,
    /// Bottom side
    pub bottom: f64,
}

impl Thickness {
    /// Create a thickness.
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Parse `"<left>, <top>, <right>, <bottom>"`.
    ///
    /// WPF also accepts a single uniform value, which is expanded to all sides.
    pub fn parse(input: &str) -> Result<Self> {
        if !input.contains(',') && !input.trim().is_empty() {
            let [uniform] = parse_numbers("thickness", input)?;
            return Ok(Self::new(uniform, uniform, uniform, uniform));
        }
        let [left, top, right, bottom] = parse_numbers("thickness", input)?;
        Ok(Self { left, top, right, bottom })
    }
}

impl fmt::Display for Thickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.left, self.top, self.right, self.bottom)
    }
}

/// A `System.DateTime` value, kept as its wire text.
///
/// Holding the text rather than a parsed instant keeps values the
/// consuming application wrote without a zone untouched on re-encode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTimeValue(String);

impl DateTimeValue {
    /// The current time, formatted like `2024-05-01T09:30:00.000Z`.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// The Unix epoch.
    pub fn epoch() -> Self {
        Self::from_datetime(DateTime::<Utc>::default())
    }

    /// Format an instant with millisecond precision and a `Z` suffix.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Wrap wire text without interpreting it.
    pub fn from_wire(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The wire text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the value as an instant.
    ///
    /// Values without an offset are taken as UTC.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.0)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(&self.0, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| Utc.from_utc_datetime(&naive))
            })
    }
}

impl Default for DateTimeValue {
    fn default() -> Self {
        Self::epoch()
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
