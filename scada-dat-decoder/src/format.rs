//! Text rendering of decoded records
//!
//! Line layout (fields joined by `,\t`, terminated by `\n`):
//!
//! ```text
//! <timestamp>,\t<YYYY-MM-DD HH:MM:SS>,\t<STATUS>,\t<ch0>,\t<ch1>,\t<ch2>,\t<ch3>
//! ```
//!
//! The calendar text is rendered in the formatter's time zone, which is the
//! host's local zone unless a different one is supplied.

use crate::types::{DecoderError, Record, Result};
use chrono::{Local, TimeZone};
use std::fmt::{self, Write as _};
use std::io::Write;

/// Separator placed between fields
pub const FIELD_SEPARATOR: &str = ",\t";

/// `strftime`-style layout of the calendar timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders records as delimited text lines
#[derive(Debug, Clone)]
pub struct RecordFormatter<Tz: TimeZone = Local> {
    tz: Tz,
    label: Option<String>,
}

impl RecordFormatter<Local> {
    /// Formatter using the host's local time zone
    pub fn new() -> Self {
        Self::with_time_zone(Local)
    }
}

impl Default for RecordFormatter<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> RecordFormatter<Tz>
where
    Tz::Offset: fmt::Display,
{
    pub fn with_time_zone(tz: Tz) -> Self {
        Self { tz, label: None }
    }

    /// Prefix every line with `label` as an extra leading field
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Render an epoch timestamp as calendar text in this formatter's zone
    pub fn timestamp_text(&self, timestamp: u32) -> Result<String> {
        let utc = chrono::DateTime::from_timestamp(i64::from(timestamp), 0)
            .ok_or(DecoderError::TimestampOutOfRange(timestamp))?;
        Ok(utc
            .with_timezone(&self.tz)
            .format(TIMESTAMP_FORMAT)
            .to_string())
    }

    /// Render one record as a complete line, including the trailing newline
    pub fn format(&self, record: &Record) -> Result<String> {
        let time_text = self.timestamp_text(record.timestamp)?;

        let mut line = String::with_capacity(96);
        if let Some(label) = &self.label {
            line.push_str(label);
            line.push_str(FIELD_SEPARATOR);
        }
        // Writing into a String cannot fail
        let _ = write!(
            line,
            "{}{sep}{}{sep}{:04X}",
            record.timestamp,
            time_text,
            record.status,
            sep = FIELD_SEPARATOR
        );
        for value in record.channels {
            line.push_str(FIELD_SEPARATOR);
            push_channel(&mut line, value);
        }
        line.push('\n');
        Ok(line)
    }

    /// Format a record and write it to `out`
    pub fn write_record<W: Write>(&self, out: &mut W, record: &Record) -> Result<()> {
        let line = self.format(record)?;
        out.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Two-decimal rendering in the style of C's `%.2f`
fn push_channel(line: &mut String, value: f32) {
    if value.is_nan() {
        line.push_str(if value.is_sign_negative() { "-nan" } else { "nan" });
    } else {
        let _ = write!(line, "{:.2}", value);
    }
}
