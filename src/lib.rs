//! Storefront Library
//!
//! This library provides the core functionality of a single-page storefront:
//! a product catalog, per-session shopping carts with stock enforcement, and
//! the simulated login → review → checkout → confirmation flow.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod session;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;
