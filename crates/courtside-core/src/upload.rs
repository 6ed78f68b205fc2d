//! Image upload.
//!
//! Three steps, each a single call:
//!
//! 1. ask the backend for a short-lived upload URL
//! 2. POST the raw bytes there with the image's content type; the storage
//!    answers `{"storageId": "..."}`
//! 3. attach the storage id to the team, player or profile
//!
//! Nothing is sent unless the platform granted media access and the bytes
//! look like a PNG, JPEG or WebP image.

use std::time::Duration;

use async_trait::async_trait;
use image::ImageFormat;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::backend::{DataBackend, ImageTarget};
use crate::error::{CourtsideError, CourtsideResult};
use crate::types::StorageId;

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Answer from the platform's media-library prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaPermission {
    Granted,
    Denied,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    storage_id: StorageId,
}

/// Sends image bytes to an upload URL.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn post(
        &self,
        upload_url: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> CourtsideResult<StorageId>;
}

/// [`UploadTransport`] over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpUploadTransport {
    client: reqwest::Client,
}

impl HttpUploadTransport {
    pub fn new() -> CourtsideResult<Self> {
        let client = reqwest::Client::builder().timeout(UPLOAD_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UploadTransport for HttpUploadTransport {
    async fn post(
        &self,
        upload_url: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> CourtsideResult<StorageId> {
        let response = self
            .client
            .post(upload_url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CourtsideError::Upload(format!(
                "storage answered {}",
                status
            )));
        }

        let body: UploadResponse = response.json().await?;
        Ok(body.storage_id)
    }
}

/// MIME type of an image we accept, from its leading bytes.
pub fn sniff_content_type(bytes: &[u8]) -> CourtsideResult<&'static str> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => Ok("image/png"),
        Ok(ImageFormat::Jpeg) => Ok("image/jpeg"),
        Ok(ImageFormat::WebP) => Ok("image/webp"),
        Ok(other) => Err(CourtsideError::Upload(format!(
            "{:?} images are not supported",
            other
        ))),
        Err(_) => Err(CourtsideError::Upload(
            "file is not a recognized image".to_string(),
        )),
    }
}

/// Upload `bytes` and attach the result to `target`.
pub async fn upload_image(
    backend: &dyn DataBackend,
    transport: &dyn UploadTransport,
    permission: MediaPermission,
    target: &ImageTarget,
    bytes: Vec<u8>,
) -> CourtsideResult<StorageId> {
    if permission == MediaPermission::Denied {
        warn!("Media library access denied");
        return Err(CourtsideError::PermissionDenied("photo library".to_string()));
    }
    let content_type = sniff_content_type(&bytes)?;

    let upload_url = backend.generate_upload_url().await?;
    debug!(content_type, size = bytes.len(), "Posting image");
    let storage_id = transport.post(&upload_url, content_type, bytes).await?;

    backend.attach_image(target, &storage_id).await?;
    info!(?target, %storage_id, "Image attached");
    Ok(storage_id)
}
