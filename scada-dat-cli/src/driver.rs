//! Decode loop: records in, text lines out
//!
//! Each record is formatted and written as soon as it is decoded. The writer
//! is flushed before returning, so lines for complete records survive a
//! truncated input.

use anyhow::{Context, Result};
use chrono::TimeZone;
use scada_dat_decoder::{DecoderError, RecordDecoder, RecordFormatter};
use std::fmt::Display;
use std::io::{Read, Write};

/// Outcome of one pass over an input stream
#[derive(Debug)]
pub struct DriveSummary {
    /// Complete records written
    pub records: u64,
    /// Set when the input ended partway through a record
    pub truncation: Option<DecoderError>,
}

/// Decode every record from `decoder` and write its line to `out`
pub fn drive<R, Tz, W>(
    decoder: &mut RecordDecoder<R>,
    formatter: &RecordFormatter<Tz>,
    out: &mut W,
) -> Result<DriveSummary>
where
    R: Read,
    Tz: TimeZone,
    Tz::Offset: Display,
    W: Write,
{
    let mut records = 0u64;
    let mut truncation = None;

    loop {
        match decoder.next_record() {
            Ok(Some(record)) => {
                formatter
                    .write_record(&mut *out, &record)
                    .with_context(|| format!("Failed to write record #{}", records))?;
                records += 1;
            }
            Ok(None) => break,
            Err(e) if e.is_truncation() => {
                truncation = Some(e);
                break;
            }
            Err(e) => {
                out.flush().ok();
                return Err(e).context("Failed to read input");
            }
        }
    }

    out.flush().context("Failed to flush output")?;
    log::info!("Wrote {} records", records);

    Ok(DriveSummary {
        records,
        truncation,
    })
}
