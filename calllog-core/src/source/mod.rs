//! Record sources
//!
//! A [`RecordSource`] produces the ordered list of [`CallRecord`]s that get
//! exported. Sources return records newest first; the encoder keeps
//! whatever order it is given.
//!
//! Two on-disk formats are supported:
//! - [`SqliteCallLog`]: a call-log database with a `calls` table
//! - [`JsonLinesCallLog`]: one JSON object per line using the same column names

mod json;
mod sqlite;

pub use json::JsonLinesCallLog;
pub use sqlite::SqliteCallLog;

use std::path::Path;

use crate::error::Result;
use crate::types::CallRecord;

/// Trait implemented by everything that can supply call records.
pub trait RecordSource {
    /// Read every record, newest first.
    ///
    /// Any failure aborts the whole read; partial record lists are never
    /// returned.
    fn read_records(&self) -> Result<Vec<CallRecord>>;

    /// Human-readable description for logging
    fn describe(&self) -> String;
}

/// Records already held in memory, returned as-is.
impl RecordSource for Vec<CallRecord> {
    fn read_records(&self) -> Result<Vec<CallRecord>> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory record(s)", self.len())
    }
}

/// Open a source file, picking the format from its extension.
///
/// `.db`, `.sqlite` and `.sqlite3` are read as call-log databases; anything
/// else is read as JSON lines.
pub fn open(path: &Path) -> Box<dyn RecordSource> {
    let is_sqlite = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "db" | "sqlite" | "sqlite3"))
        .unwrap_or(false);

    if is_sqlite {
        Box::new(SqliteCallLog::new(path))
    } else {
        Box::new(JsonLinesCallLog::new(path))
    }
}
