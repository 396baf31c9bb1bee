use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ImageSet, Price, ProductName};

/// A catalog entry as served to clients.
///
/// Serialized in the wire format the dashboard consumes: `_id` for the
/// server-assigned identifier and camelCase timestamps.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to persist a new product. Identifier and timestamps are
/// assigned by the repository.
#[derive(Clone, Debug)]
pub struct NewProduct {
    pub name: ProductName,
    pub price: Price,
    pub images: ImageSet,
    pub category: Option<String>,
}

impl NewProduct {
    pub fn new(
        name: ProductName,
        price: Price,
        images: ImageSet,
        category: Option<String>,
    ) -> Self {
        Self {
            name,
            price,
            images,
            category: category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        }
    }
}

/// Orderings accepted by both the list endpoint and the client store.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "price-low-high")]
    PriceLowHigh,
    #[serde(rename = "price-high-low")]
    PriceHighLow,
}

impl SortOrder {
    /// Parses the wire value, falling back to the newest-first default for
    /// anything unrecognized.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "oldest" => Self::Oldest,
            "price-low-high" => Self::PriceLowHigh,
            "price-high-low" => Self::PriceHighLow,
            _ => Self::Newest,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::PriceLowHigh => "price-low-high",
            Self::PriceHighLow => "price-high-low",
        }
    }
}
