use serde::{Deserialize, Serialize};

/// Upper bounds applied while decoding.
///
/// Length prefixes come from untrusted bytes; a prefix above these bounds is reported as
/// corrupt data before anything is allocated for it. `Default` holds conservative bounds for
/// peers that opt in; plain decoding uses [`CodecLimits::unbounded`] so every snapshot the
/// encoder produces decodes again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum number of shard entries in one index snapshot.
    pub max_shards: u32,
    /// Maximum number of validation failure strings in one index snapshot.
    pub max_validation_failures: u32,
    /// Maximum length in bytes of any single string.
    pub max_string_bytes: u32,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_shards: 65_536,
            max_validation_failures: 65_536,
            max_string_bytes: 1024 * 1024,
        }
    }
}

impl CodecLimits {
    /// No bounds beyond what the wire format can express.
    pub const fn unbounded() -> Self {
        Self {
            max_shards: u32::MAX,
            max_validation_failures: u32::MAX,
            max_string_bytes: u32::MAX,
        }
    }

    /// Set the maximum shard entry count
    pub fn max_shards(mut self, max: u32) -> Self {
        self.max_shards = max;
        self
    }

    /// Set the maximum validation failure count
    pub fn max_validation_failures(mut self, max: u32) -> Self {
        self.max_validation_failures = max;
        self
    }

    /// Set the maximum string length in bytes
    pub fn max_string_bytes(mut self, max: u32) -> Self {
        self.max_string_bytes = max;
        self
    }
}
