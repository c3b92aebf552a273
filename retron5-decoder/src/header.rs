//! Container header parsing and validation
//!
//! The header is a fixed 24-byte little-endian record:
//!
//! | Offset | Size | Field          |
//! |--------|------|----------------|
//! | 0      | 4    | magic ("RTN5") |
//! | 4      | 2    | format version |
//! | 6      | 2    | flags          |
//! | 8      | 4    | original size  |
//! | 12     | 4    | packed size    |
//! | 16     | 4    | data offset    |
//! | 20     | 4    | CRC-32         |
//!
//! The payload follows immediately and runs to the end of the file.

use crate::types::{ContainerHeader, DecoderError, Result, HEADER_SIZE, MAGIC, SUPPORTED_VERSION};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

/// Parse the fixed header from the start of `buffer`
///
/// Bytes past the header are ignored. Fails with `TruncatedHeader` if the
/// buffer is shorter than [`HEADER_SIZE`].
pub fn parse_header(buffer: &[u8]) -> Result<ContainerHeader> {
    if buffer.len() < HEADER_SIZE {
        return Err(DecoderError::TruncatedHeader {
            expected: HEADER_SIZE,
            found: buffer.len(),
        });
    }

    let mut cur = Cursor::new(&buffer[..HEADER_SIZE]);
    read_fields(&mut cur).map_err(|_| DecoderError::TruncatedHeader {
        expected: HEADER_SIZE,
        found: buffer.len(),
    })
}

fn read_fields(cur: &mut Cursor<&[u8]>) -> std::io::Result<ContainerHeader> {
    Ok(ContainerHeader {
        magic: cur.read_u32::<LittleEndian>()?,
        format_version: cur.read_u16::<LittleEndian>()?,
        flags: cur.read_u16::<LittleEndian>()?,
        original_size: cur.read_u32::<LittleEndian>()?,
        packed_size: cur.read_u32::<LittleEndian>()?,
        data_offset: cur.read_u32::<LittleEndian>()?,
        crc32: cur.read_u32::<LittleEndian>()?,
    })
}

/// Validate a parsed header against the length of the trailing payload
///
/// Checks run in a fixed order and the first failure wins:
/// magic, format version, data offset, packed size.
pub fn validate_header(header: &ContainerHeader, payload_len: usize) -> Result<()> {
    if header.magic != MAGIC {
        return Err(DecoderError::BadMagic {
            expected: MAGIC,
            found: header.magic,
        });
    }

    // Older versions are accepted; the layout has not changed since v1
    if header.format_version > SUPPORTED_VERSION {
        return Err(DecoderError::UnsupportedVersion {
            expected: SUPPORTED_VERSION,
            found: header.format_version,
        });
    }

    if header.data_offset as usize != HEADER_SIZE {
        return Err(DecoderError::BadDataOffset {
            expected: HEADER_SIZE as u32,
            found: header.data_offset,
        });
    }

    if header.packed_size as usize != payload_len {
        return Err(DecoderError::PackedSizeMismatch {
            expected: header.packed_size,
            found: payload_len,
        });
    }

    Ok(())
}
