//! HTTP client for the collector endpoint
//!
//! One [`Uploader`] can serve any number of uploads; each call to
//! [`Uploader::dispatch`] spawns its own task and hands back a
//! [`PendingUpload`] for the result.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use crate::config::UploadConfig;
use crate::encode::EncodedPayload;
use crate::error::{Error, Result};

use super::outcome::UploadOutcome;

/// Content type sent with every payload
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Sends encoded payloads to the collector
#[derive(Debug, Clone)]
pub struct Uploader {
    endpoint: Url,
    http_client: reqwest::Client,
}

impl Uploader {
    /// Create a new uploader from configuration
    ///
    /// Returns an error if the endpoint is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: UploadConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = config.endpoint_url()?;

        // One payload, one request, straight to the configured host:
        // no redirects and no proxies from the environment.
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            http_client,
        })
    }

    /// Collector URL payloads are sent to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send a payload and wait for the collector's answer.
    ///
    /// Runs on the calling task. Use [`Uploader::dispatch`] to keep the
    /// caller free while the request is in flight.
    pub async fn send(&self, payload: EncodedPayload) -> UploadOutcome {
        tracing::debug!(
            endpoint = %self.endpoint,
            records = payload.record_count(),
            bytes = payload.len(),
            "Uploading call log"
        );

        let result = self
            .http_client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE))
            .body(payload.into_string())
            .send()
            .await;

        let outcome = match result {
            Ok(response) => UploadOutcome::from_status(response.status().as_u16()),
            Err(e) => UploadOutcome::transport(&e),
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            outcome = outcome.as_str(),
            status = ?outcome.status(),
            "Upload finished"
        );

        outcome
    }

    /// Start an upload in the background on the current tokio runtime.
    ///
    /// Without a runtime in scope the returned handle resolves immediately
    /// to a [`UploadOutcome::TransportError`].
    pub fn dispatch(&self, payload: EncodedPayload) -> PendingUpload {
        match Handle::try_current() {
            Ok(handle) => self.dispatch_on(&handle, payload),
            Err(e) => PendingUpload::finished(UploadOutcome::TransportError(format!(
                "no async runtime to run the upload: {}",
                e
            ))),
        }
    }

    /// Start an upload in the background on `handle`.
    ///
    /// The spawned task runs to completion even if the [`PendingUpload`] is
    /// dropped; its outcome is then discarded.
    pub fn dispatch_on(&self, handle: &Handle, payload: EncodedPayload) -> PendingUpload {
        let (tx, rx) = oneshot::channel();
        let uploader = self.clone();

        handle.spawn(async move {
            let outcome = uploader.send(payload).await;
            if tx.send(outcome).is_err() {
                tracing::trace!("Upload outcome dropped, caller stopped waiting");
            }
        });

        PendingUpload { rx }
    }
}

/// An upload in flight.
///
/// Waiting consumes the handle, so each outcome is observed exactly once.
#[derive(Debug)]
pub struct PendingUpload {
    rx: oneshot::Receiver<UploadOutcome>,
}

impl PendingUpload {
    fn finished(outcome: UploadOutcome) -> Self {
        let (tx, rx) = oneshot::channel();
        // Receiver is alive, send cannot fail
        let _ = tx.send(outcome);
        Self { rx }
    }

    /// Wait for the outcome from async code
    pub async fn wait(self) -> UploadOutcome {
        self.rx.await.unwrap_or_else(|_| worker_lost())
    }

    /// Block the current thread until the outcome arrives.
    ///
    /// Must not be called from inside an async task.
    pub fn wait_blocking(self) -> UploadOutcome {
        self.rx.blocking_recv().unwrap_or_else(|_| worker_lost())
    }

    /// Non-blocking check; returns the handle back if still in flight
    pub fn try_outcome(mut self) -> std::result::Result<UploadOutcome, Self> {
        match self.rx.try_recv() {
            Ok(outcome) => Ok(outcome),
            Err(oneshot::error::TryRecvError::Empty) => Err(self),
            Err(oneshot::error::TryRecvError::Closed) => Ok(worker_lost()),
        }
    }
}

fn worker_lost() -> UploadOutcome {
    UploadOutcome::TransportError("upload task ended without reporting an outcome".to_string())
}
