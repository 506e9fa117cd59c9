//! REST API handlers for shopping cart operations
//!
//! This module implements HTTP endpoints for adding products and adjusting
//! line quantities. Both go through the caller's session so every change
//! comes back with its notifications and a fresh snapshot.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    response::Response,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::session::handlers::run_on_session;
use crate::state::SharedState;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart/items", post(add_to_cart))
        .route("/cart/items/:product_id/quantity", post(change_quantity))
}

/// Input for the add-to-cart endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartInput {
    pub product_id: String,
}

/// Input for the quantity endpoint
#[derive(Debug, Deserialize)]
pub struct ChangeQuantityInput {
    /// +1 or -1
    pub delta: i32,
}

/// Endpoint: POST /cart/items
/// Adds one unit of a catalog product to the caller's cart.
async fn add_to_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Result<Json<AddToCartInput>, JsonRejection>,
) -> AppResult<Response> {
    let Json(payload) = payload?;
    let product = state
        .product(&payload.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", payload.product_id)))?;

    run_on_session(&state, &headers, |s| s.add_to_cart(product))
}

/// Endpoint: POST /cart/items/:product_id/quantity
/// Increments or decrements a cart line by one unit.
async fn change_quantity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
    payload: Result<Json<ChangeQuantityInput>, JsonRejection>,
) -> AppResult<Response> {
    let Json(payload) = payload?;
    if payload.delta != 1 && payload.delta != -1 {
        return Err(AppError::BadRequest(format!(
            "delta must be 1 or -1, got {}",
            payload.delta
        )));
    }

    run_on_session(&state, &headers, |s| {
        s.change_quantity(&product_id, payload.delta)
    })
}
