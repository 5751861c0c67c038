//! Export pipeline: read → encode → upload
//!
//! Source and encoding failures are returned before any network activity.
//! Once a payload is dispatched, the only thing left to observe is its
//! [`UploadOutcome`](crate::upload::UploadOutcome).
//!
//! [`Exporter`] dispatches on the ambient tokio runtime and is meant for
//! async callers. Synchronous callers pair [`prepare`] with a
//! [`BlockingUploader`](crate::upload::BlockingUploader), which brings its
//! own runtime.

use crate::encode::{self, EncodedPayload};
use crate::error::Result;
use crate::source::RecordSource;
use crate::upload::{PendingUpload, Uploader};

/// Drives one export per call to [`Exporter::run`].
///
/// Concurrent runs are independent of each other.
#[derive(Debug, Clone)]
pub struct Exporter {
    uploader: Uploader,
}

impl Exporter {
    pub fn new(uploader: Uploader) -> Self {
        Self { uploader }
    }

    pub fn uploader(&self) -> &Uploader {
        &self.uploader
    }

    /// Read all records from `source` and encode them.
    pub fn prepare(&self, source: &dyn RecordSource) -> Result<EncodedPayload> {
        prepare(source)
    }

    /// Upload a prepared payload in the background.
    pub fn dispatch(&self, payload: EncodedPayload) -> PendingUpload {
        self.uploader.dispatch(payload)
    }

    /// Prepare and dispatch in one step.
    pub fn run(&self, source: &dyn RecordSource) -> Result<PendingUpload> {
        let payload = self.prepare(source)?;
        Ok(self.dispatch(payload))
    }
}

/// Read and encode without uploading.
pub fn prepare(source: &dyn RecordSource) -> Result<EncodedPayload> {
    let records = source.read_records()?;
    tracing::debug!(
        source = %source.describe(),
        records = records.len(),
        "Encoding call log"
    );
    encode::encode(&records)
}
