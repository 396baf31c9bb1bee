//! Form definitions backing the catalog routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod products;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Price must be a positive number")]
    InvalidPrice,

    #[error("At least one image is required")]
    NoImages,
}
