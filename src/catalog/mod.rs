//! Product Catalog Module
//!
//! This module contains everything the storefront knows about products:
//! - Domain models (Product, normalization, fallback data)
//! - Remote loading with fallback
//! - Search and sort
//! - REST API handlers

pub mod filter;
pub mod handlers;
pub mod loader;
pub mod models;

pub use filter::{filter_products, SortKey};
pub use handlers::routes;
pub use loader::{load_catalog, CatalogError};
pub use models::Product;
