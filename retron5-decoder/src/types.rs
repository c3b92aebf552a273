//! Core types for the Retron5 container decoder
//!
//! This module defines the on-disk header record, the decoded payload handed
//! back to callers, and the error taxonomy. The decoder is stateless: every
//! value here lives for the duration of a single decode call.

use serde::Serialize;
use std::fmt;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Container signature: the ASCII bytes "RTN5" read as a little-endian word
pub const MAGIC: u32 = 0x354E_5452;

/// Highest container format version this decoder understands
pub const SUPPORTED_VERSION: u16 = 1;

/// Fixed size of the container header in bytes (4+2+2+4+4+4+4, no padding)
pub const HEADER_SIZE: usize = 24;

/// Flag bit: payload is stored zlib-compressed
pub const FLAG_ZLIB_PACKED: u16 = 0x01;

/// Fixed-size container header as stored at the start of the file
///
/// All fields are little-endian on disk and appear in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerHeader {
    /// Container signature, must equal [`MAGIC`]
    pub magic: u32,
    /// Format version, must not exceed [`SUPPORTED_VERSION`]
    pub format_version: u16,
    /// Bitfield; bit 0 = payload is compressed
    pub flags: u16,
    /// Payload length after decompression
    pub original_size: u32,
    /// Payload length as stored in the file
    pub packed_size: u32,
    /// Offset from file start to payload start, must equal [`HEADER_SIZE`]
    pub data_offset: u32,
    /// CRC-32 of the decompressed payload
    pub crc32: u32,
}

impl ContainerHeader {
    /// True if the payload is stored zlib-compressed
    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_ZLIB_PACKED != 0
    }
}

/// Non-fatal inconsistency found while decoding
///
/// Warnings never cause a payload to be withheld on their own; the caller
/// decides whether to report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeWarning {
    /// Payload length disagrees with the header's declared original size,
    /// but the checksum matched
    SizeMismatch { expected: u32, found: usize },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::SizeMismatch { expected, found } => write!(
                f,
                "payload size mismatch: header declares {} bytes, decoded {} bytes",
                expected, found
            ),
        }
    }
}

/// Validated save payload extracted from a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    /// Decompressed, checksum-verified save data
    pub data: Vec<u8>,
    /// Inconsistencies tolerated under the lenient size policy
    pub warnings: Vec<DecodeWarning>,
}

impl DecodedPayload {
    /// Consume the payload and return the raw save bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl AsRef<[u8]> for DecodedPayload {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Errors that can occur during decoding
///
/// Every variant is terminal for the current decode call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecoderError {
    #[error("Truncated header: need {expected} bytes, got {found}")]
    TruncatedHeader { expected: usize, found: usize },

    #[error("Bad magic: expected 0x{expected:08X}, found 0x{found:08X}")]
    BadMagic { expected: u32, found: u32 },

    #[error("Unsupported format version: supports up to {expected}, found {found}")]
    UnsupportedVersion { expected: u16, found: u16 },

    #[error("Bad data offset: expected {expected}, found {found}")]
    BadDataOffset { expected: u32, found: u32 },

    #[error("Packed size mismatch: header declares {expected} bytes, file carries {found}")]
    PackedSizeMismatch { expected: u32, found: usize },

    #[error("Decompression failed: {0}")]
    DecompressionError(String),

    #[error("Payload size mismatch: header declares {expected} bytes, decoded {found}")]
    SizeMismatch { expected: u32, found: usize },

    #[error("Checksum mismatch: header declares 0x{expected:08X}, computed 0x{found:08X}")]
    ChecksumMismatch { expected: u32, found: u32 },

    #[error("Payload too large: limit is {limit} bytes, found {found}")]
    PayloadTooLarge { limit: usize, found: usize },
}

impl DecoderError {
    /// True if the input is not a container this decoder can read at all
    /// (wrong signature, newer version, or different header layout)
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            DecoderError::BadMagic { .. }
                | DecoderError::UnsupportedVersion { .. }
                | DecoderError::BadDataOffset { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_spells_rtn5() {
        assert_eq!(&MAGIC.to_le_bytes(), b"RTN5");
    }

    #[test]
    fn test_compressed_flag() {
        let mut header = ContainerHeader {
            magic: MAGIC,
            format_version: 1,
            flags: 0,
            original_size: 0,
            packed_size: 0,
            data_offset: HEADER_SIZE as u32,
            crc32: 0,
        };
        assert!(!header.is_compressed());

        header.flags = FLAG_ZLIB_PACKED;
        assert!(header.is_compressed());

        // Only bit 0 matters
        header.flags = 0x0002;
        assert!(!header.is_compressed());
    }

    #[test]
    fn test_error_display_carries_context() {
        let err = DecoderError::BadMagic {
            expected: MAGIC,
            found: 0xDEAD_BEEF,
        };
        assert_eq!(
            err.to_string(),
            "Bad magic: expected 0x354E5452, found 0xDEADBEEF"
        );

        let err = DecoderError::ChecksumMismatch {
            expected: 0x3610_A686,
            found: 0,
        };
        assert!(err.to_string().contains("0x3610A686"));
    }

    #[test]
    fn test_format_errors() {
        assert!(DecoderError::BadMagic { expected: MAGIC, found: 0 }.is_format_error());
        assert!(DecoderError::UnsupportedVersion { expected: 1, found: 2 }.is_format_error());
        assert!(DecoderError::BadDataOffset { expected: 24, found: 32 }.is_format_error());
        assert!(!DecoderError::ChecksumMismatch { expected: 1, found: 2 }.is_format_error());
        assert!(!DecoderError::DecompressionError("bad".into()).is_format_error());
    }

    #[test]
    fn test_payload_accessors() {
        let payload = DecodedPayload {
            data: b"hello".to_vec(),
            warnings: Vec::new(),
        };
        assert_eq!(payload.len(), 5);
        assert!(!payload.is_empty());
        assert_eq!(payload.as_ref(), b"hello");
        assert_eq!(payload.into_bytes(), b"hello".to_vec());
    }
}
