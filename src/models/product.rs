use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
/// Diesel model for [`crate::domain::product::Product`].
///
/// The image URL sequence is persisted as a JSON array in a text column.
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub images: String,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
/// Insertable form of [`Product`].
pub struct NewProduct<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub price: f64,
    pub images: String,
    pub category: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            // The insert path only ever writes a valid JSON array.
            images: serde_json::from_str(&product.images).unwrap_or_default(),
            category: product.category,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl<'a> NewProduct<'a> {
    /// Builds an insertable row with the server-assigned id and timestamps.
    pub fn from_domain(product: &'a DomainNewProduct, id: &'a str, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: product.name.as_str(),
            price: product.price.get(),
            images: serde_json::to_string(product.images.as_slice()).unwrap_or_default(),
            category: product.category.as_deref(),
            created_at: now,
            updated_at: now,
        }
    }
}
