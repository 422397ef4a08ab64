//! Parsing of formatted lines back into typed fields
//!
//! Analysis tooling reads the decoded text rather than the binary log, so the
//! line layout produced by [`RecordFormatter`](crate::RecordFormatter) is
//! parsed here. An optional leading source label is accepted.

use crate::format::FIELD_SEPARATOR;
use crate::types::{DecoderError, Result, CHANNEL_COUNT};

/// Fields recovered from one text line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub label: Option<String>,
    pub timestamp: u32,
    pub timestamp_text: String,
    pub status: u16,
    pub channels: [f64; CHANNEL_COUNT],
}

const FIELD_COUNT: usize = 3 + CHANNEL_COUNT;

/// Parse one formatted line (a trailing newline is ignored)
pub fn parse_line(line: &str) -> Result<ParsedLine> {
    let line = line.trim_end_matches(['\n', '\r']);
    let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

    let label = match fields.len() {
        FIELD_COUNT => None,
        n if n == FIELD_COUNT + 1 => Some(fields.remove(0).to_string()),
        n => {
            return Err(DecoderError::MalformedLine(format!(
                "expected {} fields, found {}",
                FIELD_COUNT, n
            )))
        }
    };

    let timestamp = fields[0]
        .parse::<u32>()
        .map_err(|e| malformed("timestamp", fields[0], e))?;

    let timestamp_text = fields[1].to_string();

    if fields[2].len() != 4 {
        return Err(DecoderError::MalformedLine(format!(
            "status must be 4 hex digits: {:?}",
            fields[2]
        )));
    }
    let status =
        u16::from_str_radix(fields[2], 16).map_err(|e| malformed("status", fields[2], e))?;

    let mut channels = [0.0f64; CHANNEL_COUNT];
    for (slot, text) in channels.iter_mut().zip(&fields[3..]) {
        *slot = parse_channel(text)?;
    }

    Ok(ParsedLine {
        label,
        timestamp,
        timestamp_text,
        status,
        channels,
    })
}

fn parse_channel(text: &str) -> Result<f64> {
    match text {
        "nan" => Ok(f64::NAN),
        "-nan" => Ok(-f64::NAN),
        _ => text.parse::<f64>().map_err(|e| malformed("channel", text, e)),
    }
}

fn malformed(field: &str, text: &str, err: impl std::fmt::Display) -> DecoderError {
    DecoderError::MalformedLine(format!("bad {} {:?}: {}", field, text, err))
}
