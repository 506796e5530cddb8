//! Format constants.
//!
//! Centralizes magic numbers and wire type tags so the codec and the
//! document model agree on them.

/// Object versioning constants.
pub mod version {
    /// Version tag written on freshly created objects.
    pub const BASELINE: &str = "7.0.0.0";

    /// Value of the root `GeneratedBy` field.
    pub const GENERATOR: &str = "mediascript";
}

/// Outer container layout.
pub mod container {
    /// Magic tag at the start of every script file.
    pub const MAGIC: [u8; 4] = *b"sc7x";

    /// Length of the fixed header in bytes.
    pub const HEADER_LEN: usize = 20;

    /// Padding bytes written between the thumbnail and the archive.
    pub const PADDING_LEN: usize = 1;

    /// Name of the archive entry holding the script model.
    pub const SCRIPT_MODEL_ENTRY: &str = "ScriptModel.json";

    /// Built-in blank thumbnail (PNG) used for new scripts.
    pub const DEFAULT_THUMBNAIL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAgAAAAEgCAYAAADCPMtRAAAAAXNSR0IArs4c6QAAAARnQU1BAACxjwv8YQUAAAAJcEhZcwAADsMAAA7DAcdvqGQAAATDSURBVHhe7dZBDcAwAAOxdPw5b32MxdlSFAp3tr13AEDI8z8AECIAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAAQJAAAIEgAAECQAACBIAABAkAAAgCABAABBAgAAggQAAORsH38RAz/EUWvnAAAAAElFTkSuQmCC";
}

/// `$type` tags the consuming application expects on boxed values.
pub mod wire_type {
    /// 32-bit signed integer.
    pub const INT32: &str = "System.Int32, mscorlib";
    /// 32-bit unsigned integer.
    pub const UINT32: &str = "System.UInt32, mscorlib";
    /// Single precision float.
    pub const SINGLE: &str = "System.Single, mscorlib";
    /// Date and time.
    pub const DATE_TIME: &str = "System.DateTime, mscorlib";
    /// Time span.
    pub const TIME_SPAN: &str = "System.TimeSpan, mscorlib";
    /// `"<width>, <height>"` size.
    pub const DRAWING_SIZE: &str = "System.Drawing.Size, System.Drawing";
    /// `"<x>, <y>, <width>, <height>"` rectangle.
    pub const DRAWING_RECTANGLE: &str = "System.Drawing.Rectangle, System.Drawing";
    /// Four-sided margin.
    pub const THICKNESS: &str = "System.Windows.Thickness, PresentationFramework";
    /// Vertical alignment enum.
    pub const VERTICAL_ALIGNMENT: &str = "System.Windows.VerticalAlignment, PresentationFramework";
    /// `#RRGGBBAA` color.
    pub const MEDIA_COLOR: &str = "System.Windows.Media.Color, PresentationCore";
    /// Font family name.
    pub const FONT_FAMILY: &str = "System.Windows.Media.FontFamily, PresentationCore";
    /// Font style name.
    pub const FONT_STYLE: &str = "System.Windows.FontStyle, PresentationCore";
    /// Font weight name.
    pub const FONT_WEIGHT: &str = "System.Windows.FontWeight, PresentationCore";
    /// Text alignment enum.
    pub const TEXT_ALIGNMENT: &str = "System.Windows.TextAlignment, PresentationCore";
    /// Cue type enum.
    pub const CUE_TYPE: &str = "polino.model.Enums.CueType, polino.model";
    /// Splitting options enum.
    pub const SPLITTING_OPTIONS_TYPE: &str = "polino.model.Enums.SplittingOptionsType, polino.model";
    /// Scheduled playback enum.
    pub const SCHEDULED_PLAYBACK_TYPE: &str = "polino.model.Enums.ScheduledPlaybackType, polino.model";
    /// Text item type enum.
    pub const TEXT_ITEM_TYPE: &str = "polino.model.Enums.TextItemType, polino.model";
    /// Fast positioning state enum.
    pub const FAST_POSITIONING_STATE: &str = "polino.model.Enums.FastPositioningState, polino.model";
    /// Clock time format enum.
    pub const TIME_FORMAT: &str = "polino.model.Enums.KeyObjects.TimeFormat, polino.model";
    /// Timer format enum.
    pub const TIMER_FORMAT: &str = "polino.model.Enums.KeyObjects.TimerFormat, polino.model";
    /// Timer completion action enum.
    pub const COMPLETED_ACTION: &str = "polino.model.Enums.KeyObjects.CompletedAction, polino.model";
    /// Transition direction enum.
    pub const TRANSITION_DIRECTION: &str = "polino.enums.TransitionDirection, polino.enums";
    /// Fly-in transition origin enum.
    pub const FLY_IN_ORIGIN: &str = "polino.enums.FlyInOrigin, polino.enums";
    /// Ticker transition origin enum.
    pub const TICKER_ORIGIN: &str = "polino.enums.TickerOrigin, polino.enums";
    /// Zoom transition origin enum.
    pub const ZOOM_ORIGIN: &str = "polino.enums.ZoomOrigin, polino.enums";
    /// String to string dictionary.
    pub const STRING_DICTIONARY: &str = "System.Collections.Generic.Dictionary`2[[System.String, mscorlib],[System.String, mscorlib]], mscorlib";
    /// String to bool dictionary.
    pub const BOOL_DICTIONARY: &str = "System.Collections.Generic.Dictionary`2[[System.String, mscorlib],[System.Boolean, mscorlib]], mscorlib";
    /// Type tag stamped on inline visual item bodies.
    pub const VISUAL_ITEM: &str = "polino.persistence.Models.VisualItem, polino.persistence";
    /// Marker written into bible cue content.
    pub const BIBLE_TEXT_ITEMS: &str = "System.Collections.Generic.List`1[polino.wpf.modules.bibles.Model.VerseDTO]";
}

/// Command line defaults.
pub mod cli {
    /// File extensions recognised as script files.
    pub const SCRIPT_EXTENSIONS: &[&str] = &["sc7x", "sc7"];

    /// Default number of files processed concurrently by `batch`.
    pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;
}
