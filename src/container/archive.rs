//! Embedded archive service.
//!
//! The container stores its model inside a zip archive. Compression is
//! reached through the [`ArchiveService`] port so callers can swap in
//! another implementation; [`ZipArchiveService`] is the default.

use async_trait::async_trait;
use flate2::Compression;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Error, Result};

/// Decompressed archive contents, keyed by entry name.
pub type ArchiveEntries = BTreeMap<String, Vec<u8>>;

/// Port for archive (de)compression.
#[async_trait]
pub trait ArchiveService: Send + Sync {
    /// Expand an archive into its named entries.
    async fn decompress(&self, bytes: Vec<u8>) -> Result<ArchiveEntries>;

    /// Pack `entries` into an archive at the given effort.
    async fn compress(&self, entries: ArchiveEntries, compression: Compression) -> Result<Vec<u8>>;
}

/// Deflate zip archives, run on the blocking thread pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveService;

#[async_trait]
impl ArchiveService for ZipArchiveService {
    async fn decompress(&self, bytes: Vec<u8>) -> Result<ArchiveEntries> {
        tokio::task::spawn_blocking(move || unzip(&bytes))
            .await
            .map_err(|e| Error::archive(format!("decompression task failed: {e}")))?
    }

    async fn compress(&self, entries: ArchiveEntries, compression: Compression) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || zip_entries(&entries, compression))
            .await
            .map_err(|e| Error::archive(format!("compression task failed: {e}")))?
    }
}

fn unzip(bytes: &[u8]) -> Result<ArchiveEntries> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = ArchiveEntries::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_owned();
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| Error::archive(format!("failed to read entry {name}: {e}")))?;
        debug!("Archive entry {} is {} bytes", name, data.len());
        entries.insert(name, data);
    }

    Ok(entries)
}

fn zip_entries(entries: &ArchiveEntries, compression: Compression) -> Result<Vec<u8>> {
    let level = i32::try_from(compression.level()).ok();
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(level);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer.start_file(name.as_str(), options)?;
        writer
            .write_all(data)
            .map_err(|e| Error::archive(format!("failed to write entry {name}: {e}")))?;
    }
    let bytes = writer.finish()?.into_inner();
    debug!("Compressed {} entries into {} bytes", entries.len(), bytes.len());
    Ok(bytes)
}

/// Look up `name`, exactly first and then ignoring ASCII case.
pub fn find_entry<'a>(entries: &'a ArchiveEntries, name: &str) -> Option<&'a [u8]> {
    entries
        .get(name)
        .or_else(|| {
            entries
                .iter()
                .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
                .map(|(_, data)| data)
        })
        .map(Vec::as_slice)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn entries(pairs: &[(&str, &[u8])]) -> ArchiveEntries {
        pairs.iter().map(|(name, data)| ((*name).to_owned(), data.to_vec())).collect()
    }

    #[tokio::test]
    async fn test_zip_roundtrip() {
        let service = ZipArchiveService;
        let original = entries(&[("ScriptModel.json", b"{\"Id\":\"x\"}"), ("notes.txt", b"hello")]);

        let packed = service.compress(original.clone(), Compression::best()).await.unwrap();
        assert_eq!(&packed[0..2], b"PK");
        let unpacked = service.decompress(packed).await.unwrap();
        assert_eq!(unpacked, original);
    }

    #[tokio::test]
    async fn test_compression_level_is_applied() {
        let service = ZipArchiveService;
        let text = "All creatures of our God and King ".repeat(200);
        let payload = entries(&[("ScriptModel.json", text.as_bytes())]);

        let stored = service.compress(payload.clone(), Compression::none()).await.unwrap();
        let best = service.compress(payload, Compression::best()).await.unwrap();
        assert!(best.len() < stored.len());
    }

    #[tokio::test]
    async fn test_garbage_is_an_archive_error() {
        let err = ZipArchiveService.decompress(b"not a zip file".to_vec()).await.unwrap_err();
        assert!(matches!(err, Error::Archive { .. }), "got {err:?}");
    }

    #[test]
    fn test_find_entry_prefers_exact_name() {
        let set = entries(&[("scriptmodel.json", b"lower"), ("ScriptModel.json", b"exact")]);
        assert_eq!(find_entry(&set, "ScriptModel.json"), Some(&b"exact"[..]));

        let set = entries(&[("SCRIPTMODEL.JSON", b"upper")]);
        assert_eq!(find_entry(&set, "ScriptModel.json"), Some(&b"upper"[..]));
        assert_eq!(find_entry(&set, "Other.json"), None);
    }
}
