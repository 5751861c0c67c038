//! CSV encoding of call records
//!
//! The payload is a header line followed by one line per record:
//!
//! ```text
//! number,type,date,duration,name
//! "555-1234","INCOMING","2024-01-01 10:00:00","42","Jane ""J"" Doe"
//! ```
//!
//! Every field is wrapped in double quotes and embedded quotes are doubled,
//! so any RFC 4180 reader recovers the original field text. Dates are
//! rendered in local time without an offset, matching the format collectors
//! already consume.

use std::fmt::{Display, Write};

use chrono::{Local, TimeZone};

use crate::error::{Error, Result};
use crate::types::CallRecord;

/// Header line naming the five exported columns
pub const HEADER: &str = "number,type,date,duration,name";

/// `YYYY-MM-DD HH:MM:SS`
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An encoded call-log export, ready to upload.
///
/// Immutable once built. The uploader takes it by value, so each payload is
/// sent at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    text: String,
    records: usize,
}

impl EncodedPayload {
    /// The full CSV text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of data rows (excluding the header)
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Size of the payload in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false: a payload carries at least the header line
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consume the payload, yielding the CSV text
    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Display for EncodedPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Encode records using the host's local timezone.
pub fn encode(records: &[CallRecord]) -> Result<EncodedPayload> {
    encode_in(records, &Local)
}

/// Encode records, rendering dates in `tz`.
///
/// Records are written in the order given.
pub fn encode_in<Tz>(records: &[CallRecord], tz: &Tz) -> Result<EncodedPayload>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut text = String::with_capacity(HEADER.len() + 1 + records.len() * 64);
    text.push_str(HEADER);
    text.push('\n');

    for record in records {
        let date = format_timestamp(record.timestamp, tz)?;
        let duration = record.duration_secs.to_string();

        let fields = [
            record.number.as_str(),
            record.call_type.as_str(),
            date.as_str(),
            duration.as_str(),
            record.name.as_str(),
        ];
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                text.push(',');
            }
            push_quoted(&mut text, field);
        }
        text.push('\n');
    }

    tracing::trace!(records = records.len(), bytes = text.len(), "Encoded call log");

    Ok(EncodedPayload {
        text,
        records: records.len(),
    })
}

/// Render epoch milliseconds as a zone-less wall-clock string in `tz`.
pub fn format_timestamp<Tz>(timestamp_ms: i64, tz: &Tz) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let datetime = tz.timestamp_millis_opt(timestamp_ms).single().ok_or_else(|| {
        Error::Encoding(format!("timestamp {} ms is out of range", timestamp_ms))
    })?;

    let mut out = String::with_capacity(19);
    write!(out, "{}", datetime.format(DATE_FORMAT))
        .map_err(|_| Error::Encoding(format!("cannot format timestamp {}", timestamp_ms)))?;
    Ok(out)
}

fn push_quoted(out: &mut String, field: &str) {
    out.push('"');
    for ch in field.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}
