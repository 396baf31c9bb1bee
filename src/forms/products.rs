use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use validator::Validate;

use crate::forms::FormError;

/// Multipart payload for the create-product endpoint.
///
/// Field names mirror the dashboard's wire format: `productName`, `price`
/// and up to four `image-N` file slots.
#[derive(MultipartForm)]
pub struct AddProductForm {
    #[multipart(rename = "productName")]
    pub product_name: Text<String>,
    pub price: Text<String>,
    #[multipart(rename = "image-0", limit = "10MB")]
    pub image_0: Option<TempFile>,
    #[multipart(rename = "image-1", limit = "10MB")]
    pub image_1: Option<TempFile>,
    #[multipart(rename = "image-2", limit = "10MB")]
    pub image_2: Option<TempFile>,
    #[multipart(rename = "image-3", limit = "10MB")]
    pub image_3: Option<TempFile>,
}

impl AddProductForm {
    /// Scalar fields extracted for validation.
    pub fn payload(&self) -> NewProductPayload {
        NewProductPayload {
            product_name: self.product_name.trim().to_string(),
            price: self.price.trim().to_string(),
        }
    }

    /// Non-empty uploaded files in slot order. Empty slots are skipped the
    /// same way the dashboard skips unused pickers.
    pub fn images(&self) -> Vec<&TempFile> {
        [&self.image_0, &self.image_1, &self.image_2, &self.image_3]
            .into_iter()
            .filter_map(|slot| slot.as_ref())
            .filter(|file| file.size > 0)
            .collect()
    }
}

#[derive(Debug, Validate)]
/// Scalar product fields validated before any upload happens.
pub struct NewProductPayload {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: String,
    #[validate(length(min = 1, message = "Price is required"))]
    pub price: String,
}

impl NewProductPayload {
    /// Parses the price string, requiring a strictly positive number.
    pub fn parsed_price(&self) -> Result<f64, FormError> {
        match self.price.parse::<f64>() {
            Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
            _ => Err(FormError::InvalidPrice),
        }
    }
}
