//! Product image hosting.
//!
//! Images never enter the document store; they go to an external CDN
//! and only the returned URL is kept on the product.

use crate::{MediaConfig, StorefrontError};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

/// Where product images get uploaded.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload one image, returning its public URL.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, StorefrontError>;
}

/// Unsigned-preset uploader for a Cloudinary-style endpoint.
#[derive(Clone)]
pub struct CdnUploader {
    client: reqwest::Client,
    endpoint: String,
    upload_preset: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CdnUploader {
    /// Create an uploader from media settings.
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            upload_preset: config.upload_preset.clone(),
        }
    }
}

#[async_trait]
impl ImageHost for CdnUploader {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, StorefrontError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorefrontError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorefrontError::Upload(format!(
                "endpoint returned {}",
                status
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorefrontError::Upload(e.to_string()))?;

        info!(file = file_name, url = %body.secure_url, "image uploaded");
        Ok(body.secure_url)
    }
}
