//! Snapshot encoding and delivery
//!
//! A snapshot is encoded as JSON, gzip-compressed and sent in a single POST.
//! Nothing is retried. Pipeline failures abort the upload before anything
//! reaches the network, and a non-200 answer is reported but is not an error.

use std::io::Write;
use std::time::Duration;

use flate2::write::GzEncoder;
use flate2::Compression;
use log::{error, info, warn};
use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE};
use reqwest::{Client, StatusCode};

use crate::constants::UPLOAD_TIMEOUT;
use crate::models::Snapshot;

/// Failures that abort an upload
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("serializing host data: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("compressing data: {0}")]
    Compress(#[source] std::io::Error),
    #[error("closing gzip writer: {0}")]
    CompressFinish(#[source] std::io::Error),
    #[error("creating http request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("uploading data: {0}")]
    Upload(#[source] reqwest::Error),
}

/// Outcome of a completed round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub status: u16,
    pub body: String,
}

impl UploadReport {
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }
}

/// Serialize a snapshot to JSON and gzip it
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<Vec<u8>, TransportError> {
    let json = serde_json::to_vec(snapshot).map_err(TransportError::Serialize)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&json)
        .map_err(TransportError::Compress)?;
    encoder.finish().map_err(TransportError::CompressFinish)
}

/// HTTP client bound to one collector endpoint
pub struct Uploader {
    client: Client,
    url: String,
}

impl Uploader {
    pub fn new(url: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_timeout(url, UPLOAD_TIMEOUT)
    }

    /// Build an uploader whose round trip is abandoned after `timeout`
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("libcensus/{}", env!("LIBCENSUS_VERSION")))
            .build()
            .map_err(TransportError::Request)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Encode and POST the snapshot.
    ///
    /// Any completed round trip is `Ok`, whatever its status; the response
    /// body is drained and logged when non-empty.
    pub async fn upload(&self, snapshot: &Snapshot) -> Result<UploadReport, TransportError> {
        let payload = encode_snapshot(snapshot)?;

        info!(
            "Sending hostname={}, os={}, libcount={}",
            snapshot.hostname,
            snapshot.os,
            snapshot.library_count()
        );

        let request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_ENCODING, "gzip")
            .body(payload)
            .build()
            .map_err(TransportError::Request)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(TransportError::Upload)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("ERROR http response status code != 200: {}", status.as_u16());
        }

        // A body that fails to arrive in full is not worth failing the run over
        let body = response.text().await.unwrap_or_default();
        if !body.is_empty() {
            info!("server response: {}", body.trim_end());
        }

        Ok(UploadReport {
            status: status.as_u16(),
            body,
        })
    }
}

/// Send the snapshot once, logging rather than returning any failure
pub async fn deliver(uploader: &Uploader, snapshot: &Snapshot) -> Option<UploadReport> {
    match uploader.upload(snapshot).await {
        Ok(report) => Some(report),
        Err(err) => {
            error!("ERROR {}", err);
            None
        }
    }
}
