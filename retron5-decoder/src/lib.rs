//! Retron5 Save Container Decoder Library
//!
//! A stateless, reusable library for extracting emulator save payloads from
//! the data containers written by the Retron5 console.
//!
//! # Architecture
//!
//! A container is a fixed 24-byte little-endian header followed by the save
//! payload, optionally zlib-compressed. Decoding is a pure function over an
//! in-memory buffer:
//! - Parses and validates the header (magic, version, data offset, packed size)
//! - Inflates the payload when the compressed flag is set
//! - Verifies the declared length and the CRC-32 of the decoded bytes
//!
//! The library does NOT:
//! - Read or write files
//! - Log anything
//! - Write or re-encode containers
//!
//! File handling and diagnostics are in the application layer (retron5-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use retron5_decoder::{Decoder, DecoderConfig};
//!
//! let bytes = std::fs::read("Super Metroid.sav").unwrap();
//!
//! let decoder = Decoder::with_config(DecoderConfig::new().with_strict_size(true));
//! match decoder.decode(&bytes) {
//!     Ok(payload) => std::fs::write("Super Metroid.srm", payload.data).unwrap(),
//!     Err(e) => eprintln!("Decode error: {}", e),
//! }
//! ```

// Public modules
pub mod config;
pub mod decoder;
pub mod header;
pub mod payload;
pub mod types;

// Re-export main types for convenience
pub use config::{DecoderConfig, DEFAULT_MAX_PAYLOAD_SIZE};
pub use decoder::{decode, Decoder};
pub use header::{parse_header, validate_header};
pub use payload::extract_payload;
pub use types::{
    ContainerHeader, DecodeWarning, DecodedPayload, DecoderError, Result, FLAG_ZLIB_PACKED,
    HEADER_SIZE, MAGIC, SUPPORTED_VERSION,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
