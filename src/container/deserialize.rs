//! Container bytes to [`Script`].

use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use super::archive::{find_entry, ArchiveService, ZipArchiveService};
use super::header::ContainerHeader;
use super::CodecOptions;
use crate::constants::container::SCRIPT_MODEL_ENTRY;
use crate::error::{Error, Result};
use crate::script::Script;

/// Decode a script container with the default archive service.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> mediascript::error::Result<()> {
/// let bytes = fs_err::read("Sunday.sc7x")?;
/// let script = mediascript::container::decode(&bytes).await?;
/// println!("{} has {} cues", script.properties.name, script.cue_count());
/// # Ok(())
/// # }
/// ```
pub async fn decode(bytes: &[u8]) -> Result<Script> {
    decode_with(bytes, &ZipArchiveService, &CodecOptions::default()).await
}

/// Decode a script container through `service`.
///
/// Any failure aborts the whole decode; there is no partial result.
pub async fn decode_with(
    bytes: &[u8],
    service: &dyn ArchiveService,
    options: &CodecOptions,
) -> Result<Script> {
    let header = ContainerHeader::from_bytes(bytes)?;
    debug!(
        "Container header: magic={:?} thumbnail={}+{} archive={}+{} total={}",
        header.magic_lossy(),
        header.thumbnail_offset,
        header.thumbnail_len,
        header.archive_offset,
        header.archive_len,
        bytes.len()
    );

    if !header.has_expected_magic() {
        if options.strict_magic {
            return Err(Error::container(format!(
                "unexpected magic tag {:?}",
                header.magic_lossy()
            )));
        }
        warn!("Container magic tag is {:?}, expected \"sc7x\"", header.magic_lossy());
    }

    let thumbnail = header.thumbnail(bytes)?.to_vec();
    let archive = header.archive(bytes)?.to_vec();

    let entries = service.decompress(archive).await?;
    let model = find_entry(&entries, SCRIPT_MODEL_ENTRY)
        .ok_or_else(|| Error::MissingEntry { name: SCRIPT_MODEL_ENTRY.to_owned() })?;
    debug!("{} is {} bytes", SCRIPT_MODEL_ENTRY, model.len());

    let document: Value = serde_json::from_slice(model)?;
    let mut script = Script::from_value(&document)?;
    script.thumbnail = thumbnail;
    Ok(script)
}

/// Read and decode a script file.
pub async fn load(path: impl AsRef<Path>) -> Result<Script> {
    let path = path.as_ref();
    let bytes = fs_err::tokio::read(path)
        .await
        .map_err(|e| Error::io(e, path.to_path_buf()))?;
    decode(&bytes).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::container::archive::ArchiveEntries;
    use async_trait::async_trait;
    use flate2::Compression;
    use serde_json::json;

    /// Serves a fixed entry set regardless of the archive bytes.
    struct FixedArchive(ArchiveEntries);

    #[async_trait]
    impl ArchiveService for FixedArchive {
        async fn decompress(&self, _bytes: Vec<u8>) -> Result<ArchiveEntries> {
            Ok(self.0.clone())
        }

        async fn compress(&self, _entries: ArchiveEntries, _c: Compression) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    fn container(magic: &[u8; 4], thumbnail: &[u8], archive: &[u8]) -> Vec<u8> {
        let mut header = ContainerHeader::for_payload(thumbnail.len(), archive.len()).unwrap();
        header.magic = *magic;
        let mut bytes = header.to_bytes().to_vec();
        bytes.extend_from_slice(thumbnail);
        bytes.push(0);
        bytes.extend_from_slice(archive);
        bytes
    }

    fn model_entries(model: &Value) -> ArchiveEntries {
        let mut entries = ArchiveEntries::new();
        entries.insert(SCRIPT_MODEL_ENTRY.to_owned(), serde_json::to_vec(model).unwrap());
        entries
    }

    fn minimal_model() -> Value {
        json!({
            "Id": "root",
            "Version": "7.0.0.0",
            "TypeId": "Script",
            "Properties": { "Name": "Evening" },
            "Cues": []
        })
    }

    #[tokio::test]
    async fn test_decode_attaches_thumbnail() {
        let service = FixedArchive(model_entries(&minimal_model()));
        let bytes = container(b"sc7x", &[1, 2, 3], b"zip");

        let script = decode_with(&bytes, &service, &CodecOptions::default()).await.unwrap();
        assert_eq!(script.properties.name, "Evening");
        assert_eq!(script.meta.id, "root");
        assert_eq!(script.thumbnail, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_magic_is_checked_only_when_strict() {
        let service = FixedArchive(model_entries(&minimal_model()));
        let bytes = container(b"ABCD", &[], b"zip");

        let lenient = decode_with(&bytes, &service, &CodecOptions::default()).await;
        assert!(lenient.is_ok());

        let strict = CodecOptions { strict_magic: true, ..CodecOptions::default() };
        let err = decode_with(&bytes, &service, &strict).await.unwrap_err();
        assert!(matches!(err, Error::MalformedContainer { .. }));
    }

    #[tokio::test]
    async fn test_missing_entry() {
        let mut entries = ArchiveEntries::new();
        entries.insert("Other.json".into(), b"{}".to_vec());
        let bytes = container(b"sc7x", &[], b"zip");

        let err = decode_with(&bytes, &FixedArchive(entries), &CodecOptions::default())
            .await
            .unwrap_err();
        match err {
            Error::MissingEntry { name } => assert_eq!(name, "ScriptModel.json"),
            other => panic!("Expected missing entry, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_fatal() {
        let mut entries = ArchiveEntries::new();
        entries.insert(SCRIPT_MODEL_ENTRY.to_owned(), b"{\"Id\":".to_vec());
        let bytes = container(b"sc7x", &[], b"zip");

        let err = decode_with(&bytes, &FixedArchive(entries), &CodecOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_schema_error_aborts_decode() {
        let mut model = minimal_model();
        model["Cues"] = json!([{ "Id": "c", "TypeId": "Cue", "Properties": { "Name": 7 } }]);
        let bytes = container(b"sc7x", &[], b"zip");

        let err = decode_with(&bytes, &FixedArchive(model_entries(&model)), &CodecOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Schema { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_archive_outside_buffer() {
        let mut bytes = container(b"sc7x", &[9, 9], b"zip");
        bytes.truncate(bytes.len() - 1);

        let err = decode(&bytes).await.unwrap_err();
        assert!(matches!(err, Error::MalformedContainer { .. }));
    }

    #[tokio::test]
    async fn test_load_missing_file_keeps_path() {
        let err = load("/definitely/not/here.sc7x").await.unwrap_err();
        match err {
            Error::Io { path, .. } => assert!(path.unwrap().ends_with("here.sc7x")),
            other => panic!("Expected IO error, got {other:?}"),
        }
    }
}
