//! Binary script container.
//!
//! A script file is a fixed header, a thumbnail image and a zip archive
//! holding the `ScriptModel.json` document:
//!
//! ```text
//! header (20) | thumbnail (T) | padding (1) | archive (A)
//! ```

pub mod archive;
pub mod deserialize;
pub mod header;
pub mod serialize;

use flate2::Compression;

pub use archive::{ArchiveEntries, ArchiveService, ZipArchiveService};
pub use deserialize::{decode, decode_with, load};
pub use header::ContainerHeader;
pub use serialize::{encode, encode_with, save};

/// Knobs for reading and writing containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Deflate effort for the embedded archive
    pub compression: Compression,
    /// Reject containers whose magic tag is not `sc7x`
    pub strict_magic: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self { compression: Compression::best(), strict_magic: false }
    }
}
