//! Session Module
//!
//! This module contains the per-user login and checkout flow:
//! - Domain models (SessionState, View, Notification, Effects, snapshots)
//! - The navigation state machine that owns a cart
//! - Cookie-based session resolution
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod machine;
pub mod models;

pub use handlers::routes;
pub use machine::Session;
pub use models::{Credentials, Effects, Notification, Redirect, Severity, SessionState, View};
