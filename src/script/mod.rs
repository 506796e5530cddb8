//! Typed script model and its raw-record mapping.

pub mod audio;
pub mod cue;
pub mod document;
pub mod effect;
pub mod enums;
pub mod id;
pub mod item;
pub mod key_objects;
pub mod object;
pub mod page;
pub mod primitives;
pub mod registry;
pub mod transition;
pub mod wire;

// Re-export commonly used types
pub use audio::AudioPlayer;
pub use cue::{BibleContent, Content, Cue, Stanza, Template};
pub use document::{Script, ScriptProperties};
pub use effect::Effect;
pub use enums::{CueType, FontStyle, FontWeight, TextAlignment, TextItemType, VerticalAlignment};
pub use item::{ItemBase, VisualItem};
pub use key_objects::KeyObjectsPage;
pub use object::{ObjectMeta, Record, Tagged};
pub use page::{Page, PageContent, PageProperties, StagePage};
pub use primitives::{Color, DateTimeValue, Rect, Size, Thickness};
pub use registry::UnknownRecord;
pub use transition::{ObjectStoryboard, ObjectTransition, PageStoryboard, PageTransition};
