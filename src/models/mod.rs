//! Database models shared across the catalog repository.

pub mod config;
pub mod product;
