//! `mediascript` - reader and writer for `MediaShout` 7 script files.
//!
//! A script (`.sc7x`) is a small binary envelope around a zip archive that
//! holds the `ScriptModel.json` document. This crate decodes that document
//! into a typed [`Script`] and writes it back without losing fields it does
//! not understand.
//!
//! ```no_run
//! # async fn run() -> mediascript::error::Result<()> {
//! use mediascript::script::CueType;
//!
//! let mut script = mediascript::create_script("Sunday Service");
//! script.add_cue(CueType::Lyric).name = "Amazing Grace".into();
//! mediascript::save(&script, "Sunday Service.sc7x").await?;
//!
//! let reloaded = mediascript::load("Sunday Service.sc7x").await?;
//! assert_eq!(reloaded.cue_count(), 1);
//! # Ok(())
//! # }
//! ```

// Re-export public modules for use in integration tests and as a library
pub mod config;
pub mod constants;
pub mod container;
pub mod error;
pub mod script;

pub use container::{load, save, CodecOptions};
pub use error::{Error, Result};
pub use script::Script;

/// A new, empty script called `name`.
pub fn create_script(name: impl Into<String>) -> Script {
    Script::new(name)
}

/// Decode script file bytes.
pub async fn decode(bytes: &[u8]) -> Result<Script> {
    container::decode(bytes).await
}

/// Encode a script to file bytes.
pub async fn encode(script: &Script) -> Result<Vec<u8>> {
    container::encode(script).await
}
