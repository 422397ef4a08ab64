//! SCADA .dat Decoder Library
//!
//! Decodes the fixed-length binary telemetry log written by the SCADA
//! data-acquisition system into delimited text.
//!
//! # Record layout
//!
//! Every record is 22 bytes, little-endian, with no header or padding:
//!
//! | Offset | Size | Field                                  |
//! |--------|------|----------------------------------------|
//! | 0      | 4    | timestamp (Unix epoch seconds, u32)    |
//! | 4      | 2    | status (opaque u16)                    |
//! | 6      | 16   | 4 channel words, bit-cast to `f32`     |
//!
//! # Example Usage
//!
//! ```no_run
//! use scada_dat_decoder::{DecoderConfig, RecordDecoder, RecordFormatter};
//! use std::path::Path;
//!
//! let decoder = RecordDecoder::open(Path::new("ROOM1_T.DAT"), DecoderConfig::new()).unwrap();
//! let formatter = RecordFormatter::new();
//!
//! for record in decoder {
//!     match record {
//!         Ok(record) => print!("{}", formatter.format(&record).unwrap()),
//!         Err(e) => eprintln!("Decode error: {}", e),
//!     }
//! }
//! ```

// Public modules
pub mod bits;
pub mod config;
pub mod decoder;
pub mod format;
pub mod reader;
pub mod text;
pub mod types;

// Re-export main types for convenience
pub use bits::reinterpret_f32;
pub use config::DecoderConfig;
pub use decoder::RecordDecoder;
pub use format::RecordFormatter;
pub use reader::{LittleEndianReader, ReadError};
pub use text::{parse_line, ParsedLine};
pub use types::{DecoderError, Record, Result, CHANNEL_COUNT, RECORD_LEN};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
