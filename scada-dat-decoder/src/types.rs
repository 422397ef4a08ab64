//! Core types for the SCADA .dat decoder library
//!
//! This module defines the decoded record and the error taxonomy. A record is
//! either produced whole or not at all; truncation is reported through
//! [`DecoderError::TruncatedRecord`], never as a partially filled [`Record`].

use chrono::{DateTime, Utc};
use std::io;

/// Size of one encoded record in bytes: timestamp(4) + status(2) + 4 x channel(4)
pub const RECORD_LEN: usize = 22;

/// Number of float channels carried by every record
pub const CHANNEL_COUNT: usize = 4;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// One decoded log entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Seconds since the Unix epoch
    pub timestamp: u32,
    /// Opaque status word, rendered as 4 hex digits
    pub status: u16,
    /// Channel readings, bit-cast from the raw little-endian words
    pub channels: [f32; CHANNEL_COUNT],
}

impl Record {
    /// Timestamp as a UTC date-time
    pub fn utc_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.timestamp), 0)
    }

    /// Raw bit patterns of the channel readings
    pub fn channel_bits(&self) -> [u32; CHANNEL_COUNT] {
        self.channels.map(f32::to_bits)
    }
}

/// Errors that can occur during decoding
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("truncated record #{index} at byte offset {offset}: only {available} of 22 bytes present")]
    TruncatedRecord {
        /// Zero-based index of the incomplete record
        index: u64,
        /// Byte offset where the incomplete record starts
        offset: u64,
        /// Bytes of the record that were present before the input ended
        available: usize,
    },

    #[error("Timestamp {0} cannot be represented as a calendar date")]
    TimestampOutOfRange(u32),

    #[error("Malformed line: {0}")]
    MalformedLine(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl DecoderError {
    /// True for the mid-stream truncation condition
    pub fn is_truncation(&self) -> bool {
        matches!(self, DecoderError::TruncatedRecord { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_utc_time() {
        let record = Record {
            timestamp: 0,
            status: 0,
            channels: [0.0; CHANNEL_COUNT],
        };
        let utc = record.utc_time().unwrap();
        assert_eq!(utc.format("%Y-%m-%d %H:%M:%S").to_string(), "1970-01-01 00:00:00");

        let late = Record {
            timestamp: u32::MAX,
            ..record
        };
        assert_eq!(late.utc_time().unwrap().timestamp(), 4_294_967_295);
    }

    #[test]
    fn test_channel_bits() {
        let record = Record {
            timestamp: 1,
            status: 0xBEEF,
            channels: [1.0, -0.0, f32::INFINITY, 0.5],
        };
        assert_eq!(
            record.channel_bits(),
            [0x3F80_0000, 0x8000_0000, 0x7F80_0000, 0x3F00_0000]
        );
    }

    #[test]
    fn test_truncation_message() {
        let err = DecoderError::TruncatedRecord {
            index: 3,
            offset: 66,
            available: 7,
        };
        assert!(err.is_truncation());
        assert_eq!(
            err.to_string(),
            "truncated record #3 at byte offset 66: only 7 of 22 bytes present"
        );
        assert!(!DecoderError::MalformedLine("x".into()).is_truncation());
    }
}
