//! Reading container files from disk
//!
//! The console saves through a temp file: it writes `<name>.TMP`, then renames
//! it over `<name>`. A leftover temp file means the last save was interrupted
//! after the data was written, so it is tried first and the regular file is
//! the fallback.

use anyhow::{Context, Result};
use retron5_decoder::{parse_header, DecodedPayload, Decoder, HEADER_SIZE};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix the console appends while a save is in flight
pub const TEMP_SUFFIX: &str = ".TMP";

/// A decoded container and the file it actually came from
#[derive(Debug)]
pub struct Extracted {
    pub source: PathBuf,
    pub payload: DecodedPayload,
}

/// Path of the in-flight temp file for `path`
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Read a whole container file
pub fn read_container(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read container file: {:?}", path))
}

/// Decode `path`, preferring a leftover temp file if one decodes cleanly
pub fn decode_with_recovery(path: &Path, decoder: &Decoder) -> Result<Extracted> {
    let tmp = temp_path(path);
    if tmp.is_file() {
        log::warn!("Temp container left over from an interrupted save: {:?}", tmp);
        match decode_file(&tmp, decoder) {
            Ok(payload) => {
                return Ok(Extracted {
                    source: tmp,
                    payload,
                })
            }
            Err(e) => log::warn!("Ignoring temp container {:?}: {:#}", tmp, e),
        }
    }

    let payload = decode_file(path, decoder)?;
    Ok(Extracted {
        source: path.to_path_buf(),
        payload,
    })
}

fn decode_file(path: &Path, decoder: &Decoder) -> Result<DecodedPayload> {
    let bytes = read_container(path)?;
    trace_header(path, &bytes);
    let payload = decoder
        .decode(&bytes)
        .with_context(|| format!("Failed to decode {:?}", path))?;
    log::debug!("{:?}: decoded {} payload bytes", path, payload.len());
    Ok(payload)
}

/// Debug dump of the header fields and sizes, ahead of the real decode
fn trace_header(path: &Path, bytes: &[u8]) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    log::debug!("{:?}: {} bytes on disk", path, bytes.len());
    match parse_header(bytes) {
        Ok(header) => {
            log::debug!("  magic:          0x{:08X}", header.magic);
            log::debug!("  format version: {}", header.format_version);
            log::debug!("  flags:          0x{:04X} (compressed: {})", header.flags, header.is_compressed());
            log::debug!("  original size:  {}", header.original_size);
            log::debug!("  packed size:    {}", header.packed_size);
            log::debug!("  data offset:    {}", header.data_offset);
            log::debug!("  crc32:          0x{:08X}", header.crc32);
            log::debug!("  trailing bytes: {}", bytes.len() - HEADER_SIZE);
        }
        Err(e) => log::debug!("  header unreadable: {}", e),
    }
}
