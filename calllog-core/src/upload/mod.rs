//! Collector upload
//!
//! Sends an encoded call log to the configured collector as a single
//! `POST` with `Content-Type: text/csv`.
//!
//! ## Delivery model
//!
//! - Exactly one attempt per payload: no retry, no backoff, no queue
//! - The request runs in a task spawned for that upload, never on the caller
//! - The caller is notified once, through a [`PendingUpload`]
//!
//! Every attempt ends in one of three [`UploadOutcome`]s:
//! the collector answered `200` ([`UploadOutcome::Delivered`]), it answered
//! anything else ([`UploadOutcome::Rejected`]), or no answer was received
//! ([`UploadOutcome::TransportError`]).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use calllog_core::config::UploadConfig;
//! use calllog_core::encode::encode;
//! use calllog_core::upload::Uploader;
//!
//! # async fn run() -> calllog_core::Result<()> {
//! let uploader = Uploader::new(UploadConfig::for_endpoint("http://127.0.0.1:8080"))?;
//! let payload = encode(&[])?;
//! let outcome = uploader.dispatch(payload).wait().await;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

mod blocking;
mod client;
mod outcome;

pub use blocking::BlockingUploader;
pub use client::{PendingUpload, Uploader, CSV_CONTENT_TYPE};
pub use outcome::{UploadOutcome, DELIVERED_STATUS};
