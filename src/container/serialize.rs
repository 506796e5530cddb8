//! [`Script`] to container bytes.

use std::path::Path;
use tracing::debug;

use super::archive::{ArchiveEntries, ArchiveService, ZipArchiveService};
use super::header::ContainerHeader;
use super::CodecOptions;
use crate::constants::container::{PADDING_LEN, SCRIPT_MODEL_ENTRY};
use crate::error::{Error, Result};
use crate::script::Script;

/// Encode a script with the default archive service at best compression.
pub async fn encode(script: &Script) -> Result<Vec<u8>> {
    encode_with(script, &ZipArchiveService, &CodecOptions::default()).await
}

/// Encode a script through `service`.
///
/// The model is projected before anything is compressed, so an invalid
/// script fails without producing bytes.
pub async fn encode_with(
    script: &Script,
    service: &dyn ArchiveService,
    options: &CodecOptions,
) -> Result<Vec<u8>> {
    let document = script.encode()?;
    let text = serde_json::to_vec_pretty(&document)?;
    debug!("{} is {} bytes", SCRIPT_MODEL_ENTRY, text.len());

    let mut entries = ArchiveEntries::new();
    entries.insert(SCRIPT_MODEL_ENTRY.to_owned(), text);
    let archive = service.compress(entries, options.compression).await?;

    let header = ContainerHeader::for_payload(script.thumbnail.len(), archive.len())?;
    let mut bytes = Vec::with_capacity(header.total_len());
    bytes.extend_from_slice(&header.to_bytes());
    bytes.extend_from_slice(&script.thumbnail);
    bytes.resize(bytes.len() + PADDING_LEN, 0);
    bytes.extend_from_slice(&archive);

    debug!(
        "Encoded container: thumbnail={} archive={} total={}",
        header.thumbnail_len,
        header.archive_len,
        bytes.len()
    );
    Ok(bytes)
}

/// Encode `script` and write it to `path`, creating parent directories.
pub async fn save(script: &Script, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(script).await?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::tokio::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(e, parent.to_path_buf()))?;
    }
    fs_err::tokio::write(path, bytes)
        .await
        .map_err(|e| Error::io(e, path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::container::decode;
    use crate::script::enums::CueType;
    use async_trait::async_trait;
    use flate2::Compression;
    use std::sync::Mutex;

    /// Records what it was asked to compress and returns a fixed payload.
    #[derive(Default)]
    struct RecordingArchive {
        seen: Mutex<Vec<(Vec<String>, u32)>>,
    }

    #[async_trait]
    impl ArchiveService for RecordingArchive {
        async fn decompress(&self, _bytes: Vec<u8>) -> Result<ArchiveEntries> {
            Ok(ArchiveEntries::new())
        }

        async fn compress(&self, entries: ArchiveEntries, compression: Compression) -> Result<Vec<u8>> {
            self.seen.lock().unwrap().push((entries.keys().cloned().collect(), compression.level()));
            Ok(vec![7; 11])
        }
    }

    #[tokio::test]
    async fn test_layout_with_fixed_archive() {
        let mut script = Script::new("Layout");
        script.thumbnail = vec![0xDE, 0xAD, 0xBE, 0xEF];
        let service = RecordingArchive::default();
        let options = CodecOptions { compression: Compression::new(3), strict_magic: false };

        let bytes = encode_with(&script, &service, &options).await.unwrap();
        assert_eq!(bytes.len(), 20 + 4 + 1 + 11);
        assert_eq!(&bytes[0..4], b"sc7x");
        assert_eq!(&bytes[20..24], &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(bytes[24], 0);
        assert_eq!(&bytes[25..], &[7; 11]);

        let seen = service.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[(vec!["ScriptModel.json".to_owned()], 3)]);
    }

    #[tokio::test]
    async fn test_invalid_script_never_reaches_the_archive() {
        let mut script = Script::new("Broken");
        script.properties.main_width = 1920.5;
        let service = RecordingArchive::default();

        let err = encode_with(&script, &service, &CodecOptions::default()).await.unwrap_err();
        assert!(matches!(err, Error::InvariantViolation { field: "mainWidth", .. }));
        assert!(service.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zip_roundtrip() {
        let mut script = Script::new("Sunday");
        script.add_cue(CueType::Lyric).name = "Amazing Grace".into();
        script.add_cue(CueType::Blank);

        let bytes = encode(&script).await.unwrap();
        let decoded = decode(&bytes).await.unwrap();
        assert_eq!(decoded, script);
    }

    #[tokio::test]
    async fn test_empty_thumbnail() {
        let mut script = Script::new("Plain");
        script.thumbnail.clear();

        let bytes = encode(&script).await.unwrap();
        let header = ContainerHeader::from_bytes(&bytes).unwrap();
        assert_eq!(header.thumbnail_len, 0);
        assert_eq!(header.archive_offset, 21);
        assert_eq!(header.total_len(), bytes.len());
    }
}
