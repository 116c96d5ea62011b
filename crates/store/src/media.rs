//! Media pipeline: turn an uploaded file into a public URL, and back.
//!
//! Limits are checked before any work. Images are compressed on a blocking
//! thread before upload; PDFs and videos are stored unmodified. Deletes are
//! best effort and never fail the caller.

use std::sync::Arc;

use serde::Serialize;

use acfruit_core::compress::{compress_image, CompressedImage};
use acfruit_core::error::CoreError;
use acfruit_core::media::{self, MediaKind};
use acfruit_core::video;
use acfruit_db::ObjectStorage;

use crate::error::StoreError;

/// A file received from a client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Where an upload ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredMedia {
    pub url: String,
    pub bucket: String,
    pub path: String,
}

/// A validated YouTube link and its embeddable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeVideo {
    pub url: String,
    pub embed_url: String,
}

pub struct MediaPipeline {
    storage: Arc<dyn ObjectStorage>,
}

impl MediaPipeline {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// Reject over 10 MiB, compress, then upload as JPEG.
    pub async fn upload_image(&self, upload: Upload) -> Result<StoredMedia, StoreError> {
        MediaKind::Image.check_size(upload.bytes.len())?;
        let original = upload.bytes.len();

        let compressed = tokio::task::spawn_blocking(move || compress_image(&upload.bytes))
            .await
            .map_err(|e| CoreError::Internal(format!("Image compression task failed: {e}")))??;
        tracing::debug!(
            original,
            compressed = compressed.bytes.len(),
            quality = compressed.quality,
            "Compressed image",
        );

        self.store(
            MediaKind::Image,
            CompressedImage::EXTENSION,
            compressed.bytes,
            CompressedImage::CONTENT_TYPE,
        )
        .await
    }

    /// Reject over 10 MiB, upload unmodified.
    pub async fn upload_pdf(&self, upload: Upload) -> Result<StoredMedia, StoreError> {
        MediaKind::Pdf.check_size(upload.bytes.len())?;
        let extension = media::file_extension(&upload.file_name)
            .unwrap_or("pdf")
            .to_string();
        let content_type = if upload.content_type.is_empty() {
            "application/pdf".to_string()
        } else {
            upload.content_type
        };
        self.store(MediaKind::Pdf, &extension, upload.bytes, &content_type)
            .await
    }

    /// Reject over 50 MiB or outside the accepted video types, upload
    /// unmodified.
    pub async fn upload_video(&self, upload: Upload) -> Result<StoredMedia, StoreError> {
        MediaKind::Video.check_size(upload.bytes.len())?;
        media::check_video_type(&upload.content_type)?;
        let extension = media::file_extension(&upload.file_name)
            .unwrap_or_else(|| media::video_extension(&upload.content_type))
            .to_string();
        self.store(MediaKind::Video, &extension, upload.bytes, &upload.content_type)
            .await
    }

    /// Resolve a YouTube link without uploading anything.
    pub fn youtube(&self, url: &str) -> Result<YoutubeVideo, CoreError> {
        let url = url.trim();
        let embed_url = video::youtube_embed_url(url);
        if embed_url.is_empty() {
            return Err(CoreError::Media("Invalid YouTube URL".into()));
        }
        Ok(YoutubeVideo {
            url: url.to_string(),
            embed_url,
        })
    }

    /// Public URL for a stored reference that may be a bare file name or a
    /// storage path instead of a full URL.
    pub fn resolve_url(&self, bucket: &str, url: &str) -> String {
        media::resolve_public_url(self.storage.base_url(), bucket, url)
    }

    async fn store(
        &self,
        kind: MediaKind,
        extension: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredMedia, StoreError> {
        let bucket = kind.bucket();
        let path = media::upload_path(kind, extension);
        let size = bytes.len();
        let path = self
            .storage
            .upload(bucket, &path, bytes, content_type)
            .await
            .inspect_err(|e| tracing::error!(bucket, path = %path, error = %e, "Upload failed"))?;
        let url = self.storage.public_url(bucket, &path);
        tracing::info!(bucket, path = %path, size, "Stored media");
        Ok(StoredMedia {
            url,
            bucket: bucket.to_string(),
            path,
        })
    }

    /// Best-effort removal of the object behind `url`.
    ///
    /// The bucket is taken from `bucket` or, failing that, from the URL.
    /// Returns whether a remove was issued and succeeded; failures are logged
    /// only.
    pub async fn delete(&self, url: &str, bucket: Option<&str>) -> bool {
        let Some(bucket) = bucket.or_else(|| media::bucket_from_url(url)) else {
            tracing::warn!(url, "Cannot tell which bucket holds this media, not deleting");
            return false;
        };
        let public = self.resolve_url(bucket, url);
        let path = media::object_path_from_url(&public);
        if path.is_empty() {
            tracing::warn!(url, bucket, "No object path in media URL, not deleting");
            return false;
        }

        match self.storage.remove(bucket, std::slice::from_ref(&path)).await {
            Ok(()) => {
                tracing::info!(bucket, path = %path, "Deleted media");
                true
            }
            Err(e) => {
                tracing::error!(bucket, path = %path, error = %e, "Failed to delete media");
                false
            }
        }
    }
}
