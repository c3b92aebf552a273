//! Decoder configuration types
//!
//! The decoder needs very little configuration: a policy for the declared
//! payload length and an upper bound on how much memory a single payload may
//! occupy after decompression.

use serde::{Deserialize, Serialize};

/// Default upper bound on a decoded payload (64 MiB)
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 64 * 1024 * 1024;

/// Configuration for the decoder library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Fail with `SizeMismatch` as soon as the decoded length disagrees with
    /// the header (false = record a warning and let the checksum decide)
    #[serde(default)]
    pub strict_size: bool,

    /// Maximum number of payload bytes produced by a single decode
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,
}

fn default_max_payload_size() -> usize {
    DEFAULT_MAX_PAYLOAD_SIZE
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strict_size: false,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: make a declared-size mismatch fatal
    pub fn with_strict_size(mut self, strict: bool) -> Self {
        self.strict_size = strict;
        self
    }

    /// Builder method: set the decoded payload size limit
    pub fn with_max_payload_size(mut self, limit: usize) -> Self {
        self.max_payload_size = limit;
        self
    }
}
