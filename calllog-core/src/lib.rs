//! # calllog-core
//!
//! Core library for calllog-export - exports a phone call log as CSV and
//! uploads it to a collector over HTTP.
//!
//! This library provides:
//! - Domain types for call records
//! - Record sources (call-log database, JSON lines)
//! - The CSV encoder
//! - The one-shot collector uploader
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows in one direction, once per export:
//! - **Source:** an ordered list of [`CallRecord`]s, newest first
//! - **Encoder:** a header line plus one quoted CSV row per record
//! - **Uploader:** a single `POST` whose result is reported as an [`UploadOutcome`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use calllog_core::source::SqliteCallLog;
//! use calllog_core::upload::BlockingUploader;
//! use calllog_core::Config;
//!
//! let config = Config::load().expect("failed to load config");
//! let source = SqliteCallLog::new("/sdcard/calllog.db");
//!
//! let payload = calllog_core::export::prepare(&source).expect("failed to read call log");
//! let uploader = BlockingUploader::new(config.upload).expect("invalid upload config");
//! let outcome = uploader.dispatch(payload).wait_blocking();
//! println!("{outcome}");
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use encode::{encode, EncodedPayload};
pub use error::{Error, Result};
pub use export::Exporter;
pub use source::RecordSource;
pub use types::*;
pub use upload::{PendingUpload, UploadOutcome, Uploader};

// Public modules
pub mod config;
pub mod encode;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod source;
pub mod types;
pub mod upload;
