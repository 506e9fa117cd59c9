//! Catalog search and ordering
//!
//! Pure derivation of the product grid from a text query and a sort key.

use std::sync::Arc;

use serde::Deserialize;

use super::models::Product;

/// Orderings offered by the product grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Catalog order
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    /// Highest rating first, ties broken by ratings count
    TopRated,
}

/// Returns the products whose name or category contains `query`
/// (case-insensitive), ordered by `sort`.
///
/// A blank query keeps every product. Sorting is stable, so equal keys keep
/// catalog order.
pub fn filter_products(products: &[Arc<Product>], query: &str, sort: SortKey) -> Vec<Arc<Product>> {
    let needle = query.trim().to_lowercase();

    let mut filtered: Vec<Arc<Product>> = products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    match sort {
        SortKey::Relevance => {}
        SortKey::PriceAsc => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::TopRated => filtered.sort_by(|a, b| {
            b.ratings
                .cmp(&a.ratings)
                .then_with(|| b.ratings_count.cmp(&a.ratings_count))
        }),
    }

    filtered
}
