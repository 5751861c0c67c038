//! JSON lines source
//!
//! Each non-blank line is one call:
//!
//! ```json
//! {"number": "555-1234", "type": 1, "date": 1704103200000, "duration": 42, "name": "Jane"}
//! ```

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::CallRecord;

use super::RecordSource;

/// A JSON lines call-log export on disk
#[derive(Debug, Clone)]
pub struct JsonLinesCallLog {
    path: PathBuf,
}

impl JsonLinesCallLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonLinesCallLog {
    fn read_records(&self) -> Result<Vec<CallRecord>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::SourceRead(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        let mut records = parse_lines(&content).map_err(|(line, e)| {
            Error::SourceRead(format!("{}:{}: {}", self.path.display(), line, e))
        })?;

        // Stable sort keeps file order for calls sharing a timestamp
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Read JSON lines call log"
        );

        Ok(records)
    }

    fn describe(&self) -> String {
        format!("JSON lines file {}", self.path.display())
    }
}

/// Parse every non-blank line; on failure returns the 1-based line number
fn parse_lines(content: &str) -> std::result::Result<Vec<CallRecord>, (usize, serde_json::Error)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| serde_json::from_str(line).map_err(|e| (idx + 1, e)))
        .collect()
}
