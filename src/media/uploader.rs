use crate::config::MediaConfig;
use crate::media::kind::{detect_file_kind, FileKind};
use crate::utils::error::{Result, UploadError};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A file-like object: a name used for classification plus the raw payload.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Load a file from disk, classifying by its file name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                UploadError::validation(format!("not a file path: {}", path.display()))
            })?;
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }
}

/// Normalized upload result, serialized with the media host's field names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpload {
    pub url: String,
    pub public_id: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub original_filename: String,
    pub size: u64,
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MediaHostResponse {
    secure_url: String,
    public_id: String,
    #[serde(default)]
    bytes: u64,
    #[serde(default)]
    format: Option<String>,
}

/// Client for the media host's unsigned upload endpoint. Each call is a
/// single round trip with no retry and no timeout.
pub struct MediaUploader {
    client: Client,
    config: MediaConfig,
}

impl MediaUploader {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Upload one file, routed by its detected kind.
    pub async fn upload(&self, file: MediaFile) -> Result<MediaUpload> {
        let MediaFile { name, bytes } = file;
        let kind = detect_file_kind(&name);
        let endpoint = format!(
            "{}/v1_1/{}/{}/upload",
            self.config.api_base,
            self.config.cloud_name,
            kind.resource_type()
        );

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(name.clone()))
            .text("upload_preset", self.config.upload_preset.clone());

        tracing::debug!("uploading {name} as {kind} to {endpoint}");
        let response = self.client.post(&endpoint).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            return Err(UploadError::UploadFailed(reason));
        }

        let body: MediaHostResponse = response.json().await?;

        // Documents land on the raw pipeline; flip their delivery URL to the
        // attachment route so browsers can render them. Blind substitution,
        // a no-op when the marker is absent.
        let url = if matches!(kind, FileKind::Pdf | FileKind::Document) {
            body.secure_url
                .replace("/raw/upload/", "/image/upload/fl_attachment/")
        } else {
            body.secure_url
        };

        Ok(MediaUpload {
            url,
            public_id: body.public_id,
            kind,
            original_filename: name,
            size: body.bytes,
            format: body.format,
        })
    }
}
