//! Record decoder
//!
//! Assembles [`Record`]s from a byte stream by issuing the fixed read
//! sequence: timestamp (u32), status (u16), then four channel words (u32)
//! that are bit-cast to `f32`. Reading stops at the first incomplete word.

use crate::bits::reinterpret_f32;
use crate::config::DecoderConfig;
use crate::reader::{LittleEndianReader, ReadError};
use crate::types::{DecoderError, Record, Result, CHANNEL_COUNT};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Streaming decoder over a `.dat` byte source
pub struct RecordDecoder<R> {
    reader: LittleEndianReader<R>,
    config: DecoderConfig,
    decoded: u64,
    finished: bool,
}

impl RecordDecoder<BufReader<File>> {
    /// Open a `.dat` file for decoding
    pub fn open(path: &Path, config: DecoderConfig) -> Result<Self> {
        log::info!("Opening SCADA log: {:?}", path);
        let file = File::open(path)?;
        Ok(Self::with_config(BufReader::new(file), config))
    }
}

impl<R: Read> RecordDecoder<R> {
    /// Create a decoder with default settings
    pub fn new(source: R) -> Self {
        Self::with_config(source, DecoderConfig::default())
    }

    pub fn with_config(source: R, config: DecoderConfig) -> Self {
        Self {
            reader: LittleEndianReader::new(source),
            config,
            decoded: 0,
            finished: false,
        }
    }

    /// Number of complete records decoded so far
    pub fn records_decoded(&self) -> u64 {
        self.decoded
    }

    /// Bytes consumed from the source so far
    pub fn bytes_consumed(&self) -> u64 {
        self.reader.position()
    }

    /// Decode the next record
    ///
    /// # Returns
    /// * `Ok(Some(record))` - a complete record; the source advanced 22 bytes
    /// * `Ok(None)` - the input ended on a record boundary, or the configured
    ///   record limit was reached
    /// * `Err(DecoderError::TruncatedRecord)` - the input ended mid-record
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        if self.finished {
            return Ok(None);
        }
        if !self.config.allows_more(self.decoded) {
            log::debug!("Record limit reached after {} records", self.decoded);
            self.finished = true;
            return Ok(None);
        }

        let start = self.reader.position();
        let result = self.read_record(start);
        match &result {
            Ok(Some(record)) => {
                self.decoded += 1;
                log::trace!("Record #{}: {:?}", self.decoded - 1, record);
            }
            Ok(None) => {
                log::debug!("Clean end of stream after {} records", self.decoded);
                self.finished = true;
            }
            Err(e) => {
                log::debug!("Decoding stopped: {}", e);
                self.finished = true;
            }
        }
        result
    }

    fn read_record(&mut self, start: u64) -> Result<Option<Record>> {
        let timestamp = match self.reader.read_u32() {
            Ok(word) => word,
            Err(ReadError::Incomplete { consumed: 0, .. }) => return Ok(None),
            Err(e) => return Err(self.abort(e, start)),
        };

        let status = self.reader.read_u16().map_err(|e| self.abort(e, start))?;

        let mut channels = [0.0f32; CHANNEL_COUNT];
        for channel in channels.iter_mut() {
            let word = self.reader.read_u32().map_err(|e| self.abort(e, start))?;
            *channel = reinterpret_f32(word);
        }

        Ok(Some(Record {
            timestamp,
            status,
            channels,
        }))
    }

    /// Map a failed word read to the decoder taxonomy
    fn abort(&self, err: ReadError, start: u64) -> DecoderError {
        match err {
            ReadError::Incomplete { .. } => DecoderError::TruncatedRecord {
                index: self.decoded,
                offset: start,
                available: (self.reader.position() - start) as usize,
            },
            ReadError::Io(e) => DecoderError::IoError(e),
        }
    }
}

/// Yields records until clean end-of-stream; an error is yielded once and
/// ends the iteration.
impl<R: Read> Iterator for RecordDecoder<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RECORD_LEN;
    use std::io::Cursor;

    fn encode(timestamp: u32, status: u16, channels: [u32; 4]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(RECORD_LEN);
        bytes.extend_from_slice(&timestamp.to_le_bytes());
        bytes.extend_from_slice(&status.to_le_bytes());
        for word in channels {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_decode_single_record() {
        let bytes = encode(
            1_262_304_000,
            0x00A5,
            [0x4049_0FDB, 0x3F80_0000, 0xC000_0000, 0x0000_0000],
        );
        assert_eq!(bytes.len(), RECORD_LEN);

        let mut decoder = RecordDecoder::new(Cursor::new(bytes));
        let record = decoder.next_record().unwrap().unwrap();
        assert_eq!(record.timestamp, 1_262_304_000);
        assert_eq!(record.status, 0x00A5);
        assert_eq!(record.channel_bits(), [0x4049_0FDB, 0x3F80_0000, 0xC000_0000, 0]);
        assert_eq!(decoder.bytes_consumed(), RECORD_LEN as u64);

        assert!(decoder.next_record().unwrap().is_none());
        assert_eq!(decoder.records_decoded(), 1);
    }

    #[test]
    fn test_field_order_is_fixed() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]); // timestamp
        bytes.extend_from_slice(&[0x02, 0x00]); // status
        bytes.extend_from_slice(&[0x00, 0x00, 0x80, 0x3F]); // 1.0
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x40]); // 2.0
        bytes.extend_from_slice(&[0x00, 0x00, 0x40, 0x40]); // 3.0
        bytes.extend_from_slice(&[0x00, 0x00, 0x80, 0x40]); // 4.0

        let record = RecordDecoder::new(Cursor::new(bytes))
            .next_record()
            .unwrap()
            .unwrap();
        assert_eq!(record.timestamp, 1);
        assert_eq!(record.status, 2);
        assert_eq!(record.channels, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_empty_input_is_clean_end() {
        let mut decoder = RecordDecoder::new(Cursor::new(Vec::new()));
        assert!(decoder.next_record().unwrap().is_none());
        assert_eq!(decoder.records_decoded(), 0);
    }

    #[test]
    fn test_truncation_inside_timestamp() {
        let mut bytes = encode(5, 5, [0; 4]);
        bytes.extend_from_slice(&[0xAA, 0xBB]);

        let mut decoder = RecordDecoder::new(Cursor::new(bytes));
        assert!(decoder.next_record().unwrap().is_some());
        match decoder.next_record() {
            Err(DecoderError::TruncatedRecord {
                index,
                offset,
                available,
            }) => {
                assert_eq!(index, 1);
                assert_eq!(offset, RECORD_LEN as u64);
                assert_eq!(available, 2);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn test_truncation_inside_channels() {
        let bytes = encode(7, 0xFFFF, [1, 2, 3, 4]);
        let mut decoder = RecordDecoder::new(Cursor::new(bytes[..15].to_vec()));
        match decoder.next_record() {
            Err(DecoderError::TruncatedRecord {
                index, available, ..
            }) => {
                assert_eq!(index, 0);
                assert_eq!(available, 15);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
        // Decoder stays finished after an error
        assert!(decoder.next_record().unwrap().is_none());
        assert_eq!(decoder.records_decoded(), 0);
    }

    #[test]
    fn test_iterator_stops_after_truncation() {
        let mut bytes = encode(1, 1, [0; 4]);
        bytes.extend(encode(2, 2, [0; 4]));
        bytes.extend_from_slice(&[0u8; 10]);

        let results: Vec<_> = RecordDecoder::new(Cursor::new(bytes)).collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert!(results[2].as_ref().unwrap_err().is_truncation());
    }

    #[test]
    fn test_max_records() {
        let mut bytes = Vec::new();
        for ts in 0..5 {
            bytes.extend(encode(ts, 0, [0; 4]));
        }
        let config = DecoderConfig::new().with_max_records(3);
        let records: Vec<_> = RecordDecoder::with_config(Cursor::new(bytes), config)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].timestamp, 2);
    }

    #[test]
    fn test_open_missing_file() {
        let result = RecordDecoder::open(Path::new("nonexistent.dat"), DecoderConfig::new());
        assert!(matches!(result, Err(DecoderError::IoError(_))));
    }
}
