//! Call-log database source
//!
//! Reads the `calls` table of a platform call-log database. Only the five
//! exported columns are touched and the file is opened read-only.

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};

use crate::error::{Error, Result};
use crate::types::{CallRecord, CallType};

use super::RecordSource;

const CALLS_QUERY: &str = "SELECT number, type, date, duration, name FROM calls ORDER BY date DESC";

/// A call-log database on disk
#[derive(Debug, Clone)]
pub struct SqliteCallLog {
    path: PathBuf,
}

impl SqliteCallLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            Error::SourceRead(format!(
                "cannot open call-log database {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl RecordSource for SqliteCallLog {
    fn read_records(&self) -> Result<Vec<CallRecord>> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(CALLS_QUERY)?;
        let rows = stmt
            .query_map([], RawCall::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let records = rows
            .into_iter()
            .map(RawCall::into_record)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Read call-log database"
        );

        Ok(records)
    }

    fn describe(&self) -> String {
        format!("call-log database {}", self.path.display())
    }
}

/// Row as stored, before range and encoding checks
struct RawCall {
    number: RawText,
    code: i64,
    date: i64,
    duration: i64,
    name: RawText,
}

impl RawCall {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            number: RawText::from_row(row, 0)?,
            code: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
            date: row.get(2)?,
            duration: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
            name: RawText::from_row(row, 4)?,
        })
    }

    fn into_record(self) -> Result<CallRecord> {
        let code = i32::try_from(self.code).map_err(|_| {
            Error::SourceRead(format!("call type {} out of range", self.code))
        })?;
        let duration_secs = u64::try_from(self.duration).map_err(|_| {
            Error::SourceRead(format!("negative call duration {}", self.duration))
        })?;

        Ok(CallRecord {
            number: self.number.decode("number", self.date)?,
            call_type: CallType::from_code(code),
            timestamp: self.date,
            duration_secs,
            name: self.name.decode("name", self.date)?,
        })
    }
}

/// Text column where NULL reads as empty and numbers keep their digits.
///
/// Bytes that are not UTF-8, and BLOB values, are kept as failures so the
/// record is refused rather than rewritten.
enum RawText {
    Value(String),
    InvalidUtf8(std::str::Utf8Error),
    Blob,
}

impl RawText {
    fn from_row(row: &Row<'_>, idx: usize) -> rusqlite::Result<Self> {
        Ok(match row.get_ref(idx)? {
            ValueRef::Null => Self::Value(String::new()),
            ValueRef::Integer(i) => Self::Value(i.to_string()),
            ValueRef::Real(f) => Self::Value(f.to_string()),
            ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => Self::Value(text.to_owned()),
                Err(e) => Self::InvalidUtf8(e),
            },
            ValueRef::Blob(_) => Self::Blob,
        })
    }

    fn decode(self, column: &str, date: i64) -> Result<String> {
        match self {
            Self::Value(text) => Ok(text),
            Self::InvalidUtf8(e) => Err(Error::SourceRead(format!(
                "{} of call dated {} is not valid UTF-8: {}",
                column, date, e
            ))),
            Self::Blob => Err(Error::SourceRead(format!(
                "{} of call dated {} is binary, expected text",
                column, date
            ))),
        }
    }
}
