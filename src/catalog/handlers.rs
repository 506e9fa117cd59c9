//! REST API handlers for the product catalog

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::filter::{filter_products, SortKey};
use super::models::Product;
use crate::error::AppResult;
use crate::state::SharedState;

/// Creates routes for catalog browsing
pub fn routes() -> Router<SharedState> {
    Router::new().route("/products", get(list_products))
}

/// Query string of the product grid
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub sort: SortKey,
}

#[derive(Debug, Serialize)]
pub struct ProductList {
    pub count: usize,
    pub products: Vec<Arc<Product>>,
}

/// Endpoint: GET /products?q=&sort=
async fn list_products(
    State(state): State<SharedState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> AppResult<Json<ProductList>> {
    let Query(query) = query?;
    let products = filter_products(&state.catalog, &query.q, query.sort);
    Ok(Json(ProductList {
        count: products.len(),
        products,
    }))
}
