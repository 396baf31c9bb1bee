//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce the catalog invariants (non-empty lowercased name,
//! non-negative price, 1..=4 image URLs) so that once a value reaches the
//! domain layer it can be treated as trusted.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateUrl;

/// Maximum number of images a product may carry.
pub const MAX_PRODUCT_IMAGES: usize = 4;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided price is negative or not a finite number.
    #[error("price must be a non-negative number")]
    InvalidPrice,
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
    /// Image sequence length is outside 1..=4.
    #[error("a product requires between 1 and {MAX_PRODUCT_IMAGES} images")]
    InvalidImageCount,
}

/// Product name, trimmed and lowercased at construction.
///
/// Persistence-time case normalization lives here so every write path goes
/// through the same rule.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductName(String);

impl ProductName {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = value.into().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ProductName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProductName {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ProductName {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductName> for String {
    fn from(value: ProductName) -> Self {
        value.0
    }
}

/// Non-negative, finite product price.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidPrice)
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Ordered sequence of 1..=4 stored image URLs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ImageSet(Vec<String>);

impl ImageSet {
    pub fn new(urls: Vec<String>) -> Result<Self, TypeConstraintError> {
        if urls.is_empty() || urls.len() > MAX_PRODUCT_IMAGES {
            return Err(TypeConstraintError::InvalidImageCount);
        }
        for url in &urls {
            if !url.validate_url() {
                return Err(TypeConstraintError::InvalidUrl);
            }
        }
        Ok(Self(urls))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl TryFrom<Vec<String>> for ImageSet {
    type Error = TypeConstraintError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImageSet> for Vec<String> {
    fn from(value: ImageSet) -> Self {
        value.0
    }
}
