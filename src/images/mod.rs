//! Image hosting boundary.
//!
//! Uploads go out before the product row is written; deletions are
//! best-effort during product removal. The trait keeps the HTTP host behind
//! a seam so tests can substitute an in-memory store.

use async_trait::async_trait;
use thiserror::Error;

pub mod cloudinary;

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("image upload failed: {0}")]
    Upload(String),

    #[error("image deletion failed: {0}")]
    Delete(String),

    #[error("image host request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected image host response: {0}")]
    UnexpectedResponse(String),
}

pub type ImageStoreResult<T> = Result<T, ImageStoreError>;

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Uploads the image bytes under the given public id and returns the
    /// secure URL the host assigned.
    async fn upload(&self, bytes: Vec<u8>, public_id: &str) -> ImageStoreResult<String>;

    /// Removes the stored image addressed by its secure URL.
    async fn delete(&self, url: &str) -> ImageStoreResult<()>;
}
