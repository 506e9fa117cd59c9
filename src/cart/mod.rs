//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (CartLine, Totals, outcomes, read models)
//! - The cart engine with stock enforcement
//! - Formatting helpers
//! - REST API handlers

pub mod engine;
pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use engine::Cart;
pub use handlers::routes;
pub use models::{CartLine, CartOutcome, Totals};
