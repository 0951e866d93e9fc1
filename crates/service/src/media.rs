//! Photo upload adapter: hands optional photo payloads to a remote image host.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::errors::ServiceError;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image host is not configured")]
    NotConfigured,
    #[error("image host request failed: {0}")]
    Transport(String),
    #[error("image host rejected the upload: {0}")]
    Rejected(String),
    #[error("unexpected image host response: {0}")]
    Response(String),
}

impl From<UploadError> for ServiceError {
    fn from(e: UploadError) -> Self {
        ServiceError::internal("Photo upload failed", Some(e.to_string()))
    }
}

/// Remote image store. `payload` is a URL or embedded (data URI / base64) image data.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, payload: &str, target_path: &str) -> Result<String, UploadError>;
}

/// Settings for [`CloudinaryHost`].
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub api_base: String,
    pub cloud_name: String,
    pub upload_preset: String,
    pub timeout: Duration,
}

/// Cloudinary unsigned-upload client.
pub struct CloudinaryHost {
    client: reqwest::Client,
    endpoint: String,
    upload_preset: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorMessage,
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

impl CloudinaryHost {
    pub fn new(cfg: &UploadConfig) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| UploadError::Transport(e.to_string()))?;
        let endpoint = format!("{}/{}/image/upload", cfg.api_base.trim_end_matches('/'), cfg.cloud_name);
        Ok(Self { client, endpoint, upload_preset: cfg.upload_preset.clone() })
    }
}

#[async_trait]
impl ImageHost for CloudinaryHost {
    async fn upload(&self, payload: &str, target_path: &str) -> Result<String, UploadError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("file", payload),
                ("upload_preset", self.upload_preset.as_str()),
                ("folder", target_path),
            ])
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| UploadError::Transport(e.to_string()))?;
        if !status.is_success() {
            let msg = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("status {}", status));
            return Err(UploadError::Rejected(msg));
        }
        let parsed: UploadResponse =
            serde_json::from_str(&body).map_err(|e| UploadError::Response(e.to_string()))?;
        parsed
            .secure_url
            .or(parsed.url)
            .ok_or_else(|| UploadError::Response("missing url".into()))
    }
}

/// Optional-photo front for an [`ImageHost`], storing under a fixed folder.
pub struct PhotoUploader {
    host: Option<Arc<dyn ImageHost>>,
    folder: String,
}

impl PhotoUploader {
    pub fn new(host: Arc<dyn ImageHost>, folder: impl Into<String>) -> Self {
        Self { host: Some(host), folder: folder.into() }
    }

    /// Uploader without a backing host; any supplied photo fails with `NotConfigured`.
    pub fn disabled() -> Self {
        Self { host: None, folder: String::new() }
    }

    /// Upload `payload` if present and return its retrieval URL.
    #[instrument(skip_all, fields(folder = %self.folder))]
    pub async fn upload(&self, payload: Option<&str>) -> Result<Option<String>, ServiceError> {
        let Some(payload) = payload.map(str::trim).filter(|p| !p.is_empty()) else {
            return Ok(None);
        };
        let host = self.host.as_ref().ok_or(UploadError::NotConfigured)?;
        match host.upload(payload, &self.folder).await {
            Ok(url) => {
                info!(%url, "photo_uploaded");
                Ok(Some(url))
            }
            Err(e) => {
                error!(err = %e, "photo upload failed");
                Err(e.into())
            }
        }
    }
}

/// In-memory image host for tests and local runs.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct StubImageHost {
        uploads: Mutex<Vec<(String, String)>>,
        failure: Option<String>,
    }

    impl StubImageHost {
        /// A host whose every upload fails with `message`.
        pub fn failing(message: &str) -> Self {
            Self { uploads: Mutex::default(), failure: Some(message.to_string()) }
        }

        /// `(payload, target_path)` pairs received so far.
        pub fn uploads(&self) -> Vec<(String, String)> {
            self.uploads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageHost for StubImageHost {
        async fn upload(&self, payload: &str, target_path: &str) -> Result<String, UploadError> {
            if let Some(msg) = &self.failure {
                return Err(UploadError::Rejected(msg.clone()));
            }
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push((payload.to_string(), target_path.to_string()));
            Ok(format!("https://images.test/{}/{}.jpg", target_path, uploads.len()))
        }
    }
}
