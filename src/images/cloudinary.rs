//! Cloudinary-backed [`ImageStore`] implementation.

use chrono::Utc;
use reqwest::multipart;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::images::{ImageStore, ImageStoreError, ImageStoreResult};
use crate::models::config::ImageHostConfig;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

pub struct CloudinaryStore {
    http: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

impl CloudinaryStore {
    pub fn new(config: &ImageHostConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            folder: config.folder.clone(),
        }
    }

    /// SHA-256 request signature over the alphabetically ordered parameters,
    /// as the host's signed-upload contract requires.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
        sorted.sort_by_key(|(name, _)| *name);

        let to_sign = sorted
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{API_BASE}/{}/image/{action}", self.cloud_name)
    }
}

/// Derives the host-side public id (`folder/name`) from a secure URL.
///
/// URLs look like `https://res.cloudinary.com/.../products/product-123-0.png`;
/// the id is the last two path segments with the extension stripped.
pub fn public_id_from_url(url: &str) -> Option<String> {
    let mut segments = url.rsplit('/');
    let file = segments.next()?;
    let folder = segments.next()?;
    let name = file.split('.').next()?;
    if name.is_empty() || folder.is_empty() {
        return None;
    }
    Some(format!("{folder}/{name}"))
}

#[async_trait::async_trait]
impl ImageStore for CloudinaryStore {
    async fn upload(&self, bytes: Vec<u8>, public_id: &str) -> ImageStoreResult<String> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("folder", &self.folder),
            ("overwrite", "true"),
            ("public_id", public_id),
            ("timestamp", &timestamp),
            ("signature_algorithm", "sha256"),
        ]);

        let form = multipart::Form::new()
            .part(
                "file",
                multipart::Part::bytes(bytes).file_name(public_id.to_string()),
            )
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
            .text("public_id", public_id.to_string())
            .text("folder", self.folder.clone())
            .text("overwrite", "true");

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ImageStoreError::Upload(format!("{status}: {body}")));
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| ImageStoreError::UnexpectedResponse(e.to_string()))?;

        Ok(upload.secure_url)
    }

    async fn delete(&self, url: &str) -> ImageStoreResult<()> {
        let public_id = public_id_from_url(url)
            .ok_or_else(|| ImageStoreError::Delete(format!("unrecognized image url: {url}")))?;

        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("public_id", &public_id),
            ("timestamp", &timestamp),
            ("signature_algorithm", "sha256"),
        ]);

        let response = self
            .http
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", public_id.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature", signature.as_str()),
                ("signature_algorithm", "sha256"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ImageStoreError::Delete(format!("{status}: {body}")));
        }

        let destroyed: DestroyResponse = response
            .json()
            .await
            .map_err(|e| ImageStoreError::UnexpectedResponse(e.to_string()))?;

        // "not found" is treated as already deleted.
        match destroyed.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(ImageStoreError::Delete(other.to_string())),
        }
    }
}
