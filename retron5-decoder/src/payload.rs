//! Payload extraction: decompression, length check and CRC-32 verification

use crate::config::DecoderConfig;
use crate::types::{ContainerHeader, DecodeWarning, DecodedPayload, DecoderError, Result};
use flate2::read::ZlibDecoder;
use std::io::Read;

/// Extract and verify the payload that follows a validated header
///
/// `raw` is the stored payload (exactly `packed_size` bytes). If the header's
/// compressed flag is set, `raw` is inflated as a zlib stream; otherwise it is
/// taken as-is. The result is then checked against `original_size` and the
/// header CRC-32.
///
/// A length mismatch is fatal only under `strict_size`. Otherwise it is kept
/// as a [`DecodeWarning`] and the checksum alone decides whether the payload
/// is released. A checksum mismatch is always fatal.
pub fn extract_payload(
    header: &ContainerHeader,
    raw: &[u8],
    config: &DecoderConfig,
) -> Result<DecodedPayload> {
    let limit = config.max_payload_size;
    if header.original_size as usize > limit {
        return Err(DecoderError::PayloadTooLarge {
            limit,
            found: header.original_size as usize,
        });
    }

    let data = if header.is_compressed() {
        inflate(raw, header.original_size as usize, limit)?
    } else {
        if raw.len() > limit {
            return Err(DecoderError::PayloadTooLarge {
                limit,
                found: raw.len(),
            });
        }
        raw.to_vec()
    };

    let mut warnings = Vec::new();
    if data.len() != header.original_size as usize {
        if config.strict_size {
            return Err(DecoderError::SizeMismatch {
                expected: header.original_size,
                found: data.len(),
            });
        }
        warnings.push(DecodeWarning::SizeMismatch {
            expected: header.original_size,
            found: data.len(),
        });
    }

    let computed = crc32fast::hash(&data);
    if computed != header.crc32 {
        return Err(DecoderError::ChecksumMismatch {
            expected: header.crc32,
            found: computed,
        });
    }

    Ok(DecodedPayload { data, warnings })
}

/// Inflate a zlib stream, never producing more than `limit` bytes
fn inflate(raw: &[u8], size_hint: usize, limit: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(size_hint.min(limit));

    // One byte past the limit is enough to tell "fits" from "too large"
    let bound = (limit as u64).saturating_add(1);
    ZlibDecoder::new(raw)
        .take(bound)
        .read_to_end(&mut out)
        .map_err(|e| DecoderError::DecompressionError(e.to_string()))?;

    if out.len() > limit {
        return Err(DecoderError::PayloadTooLarge {
            limit,
            found: out.len(),
        });
    }

    Ok(out)
}
