//! Main decoder API
//!
//! This module provides the primary interface for the decoder library.
//! Decoding is a single linear pipeline with early exit on the first failure:
//!
//! 1. Parse the fixed header
//! 2. Validate magic, version, data offset and packed size
//! 3. Inflate (if flagged), check the declared length, verify the CRC-32

use crate::config::DecoderConfig;
use crate::header::{parse_header, validate_header};
use crate::payload::extract_payload;
use crate::types::{DecodedPayload, Result, HEADER_SIZE};

/// The main decoder struct - entry point for all decoding operations
///
/// A `Decoder` holds only its configuration, so one instance can be shared
/// across threads and used on any number of independent buffers.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given configuration
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// The configuration this decoder was built with
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a complete container image and return the verified payload
    ///
    /// # Arguments
    /// * `buffer` - The whole container file: header followed by payload
    ///
    /// # Example
    /// ```no_run
    /// use retron5_decoder::Decoder;
    ///
    /// let bytes = std::fs::read("game.sav").unwrap();
    /// let payload = Decoder::new().decode(&bytes).unwrap();
    /// std::fs::write("game.srm", payload.data).unwrap();
    /// ```
    pub fn decode(&self, buffer: &[u8]) -> Result<DecodedPayload> {
        let header = parse_header(buffer)?;
        let raw = &buffer[HEADER_SIZE..];
        validate_header(&header, raw.len())?;
        extract_payload(&header, raw, &self.config)
    }
}

/// Decode a container image with the default configuration
pub fn decode(buffer: &[u8]) -> Result<DecodedPayload> {
    Decoder::new().decode(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DecodeWarning, DecoderError, FLAG_ZLIB_PACKED, MAGIC};
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    /// Build a container image around `stored`, declaring `payload` as the
    /// decoded contents
    fn container(payload: &[u8], stored: &[u8], flags: u16) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&MAGIC.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&(stored.len() as u32).to_le_bytes());
        out.extend_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
        out.extend_from_slice(&crc32fast::hash(payload).to_le_bytes());
        out.extend_from_slice(stored);
        out
    }

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn test_hello_uncompressed() {
        let image = container(b"hello", b"hello", 0);
        assert_eq!(image.len(), HEADER_SIZE + 5);
        assert_eq!(&image[20..24], &0x3610_A686u32.to_le_bytes());

        let payload = decode(&image).unwrap();
        assert_eq!(payload.data, b"hello");
    }

    #[test]
    fn test_hello_compressed() {
        let packed = zlib(b"hello");
        let image = container(b"hello", &packed, FLAG_ZLIB_PACKED);

        let payload = decode(&image).unwrap();
        assert_eq!(payload.data, b"hello");
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(
            decode(&[]),
            Err(DecoderError::TruncatedHeader {
                expected: HEADER_SIZE,
                found: 0
            })
        );
    }

    #[test]
    fn test_header_only_empty_payload() {
        let image = container(b"", b"", 0);
        let payload = decode(&image).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_validation_runs_before_extraction() {
        // Corrupt compressed data behind a bad magic: magic is reported
        let mut image = container(b"hello", b"garbage", FLAG_ZLIB_PACKED);
        image[0] = b'X';
        assert!(matches!(decode(&image), Err(DecoderError::BadMagic { .. })));
    }

    #[test]
    fn test_config_is_applied() {
        let mut image = container(b"hello", b"hello", 0);
        // original_size = 4
        image[8..12].copy_from_slice(&4u32.to_le_bytes());

        let lenient = Decoder::new().decode(&image).unwrap();
        assert_eq!(
            lenient.warnings,
            vec![DecodeWarning::SizeMismatch {
                expected: 4,
                found: 5
            }]
        );

        let strict = Decoder::with_config(DecoderConfig::new().with_strict_size(true));
        assert!(strict.config().strict_size);
        assert!(matches!(
            strict.decode(&image),
            Err(DecoderError::SizeMismatch { expected: 4, found: 5 })
        ));
    }
}
