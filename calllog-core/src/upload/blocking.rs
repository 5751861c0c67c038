//! Synchronous wrapper for [`Uploader`]
//!
//! Owns a single-worker tokio runtime. Uploads run on that worker while the
//! calling thread stays free until it chooses to wait.

use crate::config::UploadConfig;
use crate::encode::EncodedPayload;
use crate::error::{Error, Result};

use super::client::{PendingUpload, Uploader};
use super::outcome::UploadOutcome;

/// Blocking front-end for synchronous callers.
///
/// Must be created and dropped outside of any async context.
pub struct BlockingUploader {
    inner: Uploader,
    runtime: tokio::runtime::Runtime,
}

impl BlockingUploader {
    /// Create a new blocking uploader from configuration
    pub fn new(config: UploadConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("calllog-upload")
            .enable_all()
            .build()
            .map_err(|e| Error::Config(format!("failed to create runtime: {}", e)))?;

        Ok(Self {
            inner: Uploader::new(config)?,
            runtime,
        })
    }

    /// Start an upload on the background worker
    pub fn dispatch(&self, payload: EncodedPayload) -> PendingUpload {
        self.inner.dispatch_on(self.runtime.handle(), payload)
    }

    /// Upload and block until the outcome is known
    pub fn upload(&self, payload: EncodedPayload) -> UploadOutcome {
        self.dispatch(payload).wait_blocking()
    }

    /// The wrapped async uploader
    pub fn uploader(&self) -> &Uploader {
        &self.inner
    }
}
