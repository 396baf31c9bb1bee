//! HTTP client for the remote product API consumed by the store.

use reqwest::StatusCode;
use reqwest::multipart;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::product::Product;
use crate::pagination::PageInfo;

/// Errors surfaced by the remote API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: no usable response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with `success: false` or an error status; the
    /// server-provided message is carried verbatim.
    #[error("{message}")]
    Server { status: StatusCode, message: String },

    #[error("An unknown error occurred")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    success: bool,
    message: Option<String>,
    #[serde(default)]
    products: Vec<Product>,
    #[allow(dead_code)]
    pagination: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    success: bool,
    message: Option<String>,
    product: Option<Product>,
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    success: bool,
    message: Option<String>,
}

/// An image file attached to the create-product request.
#[derive(Clone, Debug)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Pre-validated multipart payload for the create-product endpoint.
#[derive(Clone, Debug, Default)]
pub struct AddProductPayload {
    pub name: String,
    pub price: String,
    /// Up to four files, sent as `image-0` .. `image-3`.
    pub images: Vec<ImageFile>,
}

/// Thin client over the three product endpoints.
///
/// No timeout is configured: a stuck call simply stays outstanding, and the
/// caller re-triggers on failure.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn server_error(status: StatusCode, message: Option<String>, fallback: &str) -> ApiError {
        ApiError::Server {
            status,
            message: message.unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// `GET /products` — the full product list.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self
            .http
            .get(format!("{}/products", self.base_url))
            .send()
            .await?;

        let status = response.status();
        let envelope: ListEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if !status.is_success() || !envelope.success {
            return Err(Self::server_error(
                status,
                envelope.message,
                "Failed to fetch products",
            ));
        }

        Ok(envelope.products)
    }

    /// `POST /products/add-product` — multipart create.
    pub async fn add_product(&self, payload: &AddProductPayload) -> Result<Product, ApiError> {
        let mut form = multipart::Form::new()
            .text("productName", payload.name.clone())
            .text("price", payload.price.clone());

        for (index, image) in payload.images.iter().enumerate() {
            form = form.part(
                format!("image-{index}"),
                multipart::Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
            );
        }

        let response = self
            .http
            .post(format!("{}/products/add-product", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let envelope: ProductEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if !status.is_success() || !envelope.success {
            return Err(Self::server_error(
                status,
                envelope.message,
                "Failed to add product",
            ));
        }

        envelope
            .product
            .ok_or_else(|| ApiError::Parse("missing product in response".to_string()))
    }

    /// `DELETE /products/delete-product/{id}`.
    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(format!("{}/products/delete-product/{id}", self.base_url))
            .send()
            .await?;

        let status = response.status();
        let envelope: StatusEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if !status.is_success() || !envelope.success {
            return Err(Self::server_error(
                status,
                envelope.message,
                "Failed to delete product",
            ));
        }

        Ok(())
    }
}
