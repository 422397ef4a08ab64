//! Decoder configuration types
//!
//! The record layout is fixed, so the only knob is how much of a stream to
//! decode.

use serde::{Deserialize, Serialize};

/// Configuration for the decoder library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Optional: stop cleanly after this many records
    #[serde(default)]
    pub max_records: Option<usize>,
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: limit the number of decoded records
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = Some(max);
        self
    }

    /// Check whether another record may be decoded after `decoded` records
    pub fn allows_more(&self, decoded: u64) -> bool {
        match self.max_records {
            Some(max) => decoded < max as u64,
            None => true,
        }
    }
}
