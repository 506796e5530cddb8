//! Fixed 20-byte container header.
//!
//! Layout (all integers little-endian `u32`):
//!
//! | Offset | Field            |
//! |--------|------------------|
//! | 0      | magic (`sc7x`)   |
//! | 4      | thumbnail offset |
//! | 8      | thumbnail length |
//! | 12     | archive offset   |
//! | 16     | archive length   |

use crate::constants::container::{HEADER_LEN, MAGIC, PADDING_LEN};
use crate::error::{Error, Result};

/// Parsed container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Four-byte tag at the start of the file
    pub magic: [u8; 4],
    /// Start of the thumbnail blob
    pub thumbnail_offset: u32,
    /// Length of the thumbnail blob
    pub thumbnail_len: u32,
    /// Start of the compressed archive
    pub archive_offset: u32,
    /// Length of the compressed archive
    pub archive_len: u32,
}

impl ContainerHeader {
    /// Header for a thumbnail of `thumbnail_len` bytes followed by an
    /// archive of `archive_len` bytes, laid out back to back with one
    /// padding byte between them.
    pub fn for_payload(thumbnail_len: usize, archive_len: usize) -> Result<Self> {
        let thumbnail_offset = to_u32(HEADER_LEN, "thumbnail offset")?;
        let thumbnail_len = to_u32(thumbnail_len, "thumbnail length")?;
        let padding = to_u32(PADDING_LEN, "padding")?;
        let archive_offset = thumbnail_offset
            .checked_add(thumbnail_len)
            .and_then(|end| end.checked_add(padding))
            .ok_or_else(|| Error::container("archive offset does not fit in 32 bits"))?;
        let archive_len = to_u32(archive_len, "archive length")?;
        archive_offset
            .checked_add(archive_len)
            .ok_or_else(|| Error::container("container does not fit in 32 bits"))?;

        Ok(Self { magic: MAGIC, thumbnail_offset, thumbnail_len, archive_offset, archive_len })
    }

    /// Read the header from the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(Error::container(format!(
                "header must be {HEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);

        Ok(Self {
            magic,
            thumbnail_offset: read_u32(bytes, 4)?,
            thumbnail_len: read_u32(bytes, 8)?,
            archive_offset: read_u32(bytes, 12)?,
            archive_len: read_u32(bytes, 16)?,
        })
    }

    /// Write the header in wire layout.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&self.magic);
        out[4..8].copy_from_slice(&self.thumbnail_offset.to_le_bytes());
        out[8..12].copy_from_slice(&self.thumbnail_len.to_le_bytes());
        out[12..16].copy_from_slice(&self.archive_offset.to_le_bytes());
        out[16..20].copy_from_slice(&self.archive_len.to_le_bytes());
        out
    }

    /// Whether the magic tag is `sc7x`.
    pub fn has_expected_magic(&self) -> bool {
        self.magic == MAGIC
    }

    /// The magic tag as text, for diagnostics.
    pub fn magic_lossy(&self) -> String {
        String::from_utf8_lossy(&self.magic).into_owned()
    }

    /// The thumbnail blob inside `bytes`.
    pub fn thumbnail<'a>(&self, bytes: &'a [u8]) -> Result<&'a [u8]> {
        slice(bytes, self.thumbnail_offset, self.thumbnail_len, "thumbnail")
    }

    /// The compressed archive inside `bytes`.
    pub fn archive<'a>(&self, bytes: &'a [u8]) -> Result<&'a [u8]> {
        slice(bytes, self.archive_offset, self.archive_len, "archive")
    }

    /// Total container length implied by the archive position.
    pub fn total_len(&self) -> usize {
        self.archive_offset as usize + self.archive_len as usize
    }
}

fn to_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::container(format!("{what} {value} does not fit in 32 bits")))
}

fn read_u32(bytes: &[u8], at: usize) -> Result<u32> {
    bytes
        .get(at..at + 4)
        .and_then(|field| <[u8; 4]>::try_from(field).ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| Error::container(format!("header field at byte {at} is truncated")))
}

fn slice<'a>(bytes: &'a [u8], offset: u32, len: u32, what: &str) -> Result<&'a [u8]> {
    let start = offset as usize;
    start
        .checked_add(len as usize)
        .and_then(|end| bytes.get(start..end))
        .ok_or_else(|| {
            Error::container(format!(
                "{what} at {offset}+{len} lies outside the {}-byte container",
                bytes.len()
            ))
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_payload_layout() {
        let header = ContainerHeader::for_payload(4, 100).unwrap();
        assert_eq!(header.thumbnail_offset, 20);
        assert_eq!(header.thumbnail_len, 4);
        assert_eq!(header.archive_offset, 25);
        assert_eq!(header.archive_len, 100);
        assert_eq!(header.total_len(), 125);
        assert!(header.has_expected_magic());
    }

    #[test]
    fn test_wire_layout() {
        let header = ContainerHeader::for_payload(4, 0x0102).unwrap();
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], b"sc7x");
        assert_eq!(&bytes[4..8], &[20, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[4, 0, 0, 0]);
        assert_eq!(&bytes[12..16], &[25, 0, 0, 0]);
        assert_eq!(&bytes[16..20], &[0x02, 0x01, 0, 0]);
        assert_eq!(ContainerHeader::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn test_short_buffer_is_malformed() {
        let err = ContainerHeader::from_bytes(b"sc7x\x14\x00").unwrap_err();
        assert!(matches!(err, Error::MalformedContainer { .. }));
    }

    #[test]
    fn test_slices_are_bounds_checked() {
        let mut bytes = ContainerHeader::for_payload(4, 10).unwrap().to_bytes().to_vec();
        bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF, 0]);
        let header = ContainerHeader::from_bytes(&bytes).unwrap();

        assert_eq!(header.thumbnail(&bytes).unwrap(), &[0xDE, 0xAD, 0xBE, 0xEF]);
        let err = header.archive(&bytes).unwrap_err();
        assert!(err.to_string().contains("archive at 25+10"));
    }

    #[test]
    fn test_offset_overflow_is_malformed() {
        let header = ContainerHeader {
            magic: MAGIC,
            thumbnail_offset: u32::MAX,
            thumbnail_len: u32::MAX,
            archive_offset: 0,
            archive_len: 0,
        };
        assert!(matches!(header.thumbnail(&[0; 32]), Err(Error::MalformedContainer { .. })));
    }

    #[test]
    fn test_foreign_magic_is_reported() {
        let mut header = ContainerHeader::for_payload(0, 0).unwrap();
        header.magic = *b"abcd";
        assert!(!header.has_expected_magic());
        assert_eq!(header.magic_lossy(), "abcd");
    }
}
