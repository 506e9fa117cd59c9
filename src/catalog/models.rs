//! Catalog Domain Models
//!
//! This module contains the `Product` record and the rules used to turn a
//! loosely-shaped JSON object from the catalog source into one.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use serde_json::{Map, Value};

// =============================================================================
// Constants
// =============================================================================

/// Stock assumed when a record carries no usable stock value
pub const DEFAULT_STOCK: u32 = 10;
/// Name used when a record has no name
pub const UNNAMED_PRODUCT: &str = "Unnamed product";
/// Upper bound of the rating scale
pub const MAX_RATING: u32 = 5;

// =============================================================================
// Product
// =============================================================================

/// An immutable catalog entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier within the catalog
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: Decimal,

    /// Product image location
    pub image_url: String,

    pub category: String,
    pub seller: String,

    /// Units available for a single cart line (0 means sold out)
    pub stock: u32,

    /// Average rating on a 0-5 scale
    pub ratings: Decimal,

    /// Number of ratings behind `ratings`
    pub ratings_count: u32,

    /// Per-unit shipping surcharge
    pub shipping: Decimal,
}

impl Product {
    /// Builds a product from one raw catalog record.
    ///
    /// `index` is the record's position in the source array and becomes the id
    /// when the record carries none. Alternative field names (`image`,
    /// `quantity`, `rating`, `ratingCount`) are accepted, numbers may arrive as
    /// strings, and anything unusable collapses to its default.
    pub fn from_record(index: usize, record: &Map<String, Value>) -> Self {
        let id = match record.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => index.to_string(),
            Some(other) => other.to_string(),
        };

        let name = text_field(record, "name")
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNNAMED_PRODUCT.to_string());

        let image_url = text_field(record, "img")
            .filter(|s| !s.is_empty())
            .or_else(|| text_field(record, "image"))
            .unwrap_or_default();

        let stock = first_present(record, &["stock", "quantity"])
            .and_then(integer_value)
            .unwrap_or(DEFAULT_STOCK as i64);

        let ratings = first_present(record, &["ratings", "rating"])
            .and_then(decimal_value)
            .unwrap_or_default()
            .clamp(Decimal::ZERO, Decimal::from(MAX_RATING));

        let ratings_count = first_present(record, &["ratingsCount", "ratingCount"])
            .and_then(integer_value)
            .unwrap_or(0);

        Self {
            id,
            name,
            price: money_field(record, "price"),
            image_url,
            category: text_field(record, "category").unwrap_or_default(),
            seller: text_field(record, "seller").unwrap_or_default(),
            stock: clamp_count(stock),
            ratings,
            ratings_count: clamp_count(ratings_count),
            shipping: money_field(record, "shipping"),
        }
    }
}

// =============================================================================
// Field coercion
// =============================================================================

fn first_present<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .find(|v| !v.is_null())
}

fn text_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn decimal_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integer_value(value: &Value) -> Option<i64> {
    decimal_value(value).and_then(|d| d.trunc().to_i64())
}

/// Non-negative amount with at most two decimal places.
fn money_field(record: &Map<String, Value>, key: &str) -> Decimal {
    record
        .get(key)
        .and_then(decimal_value)
        .unwrap_or_default()
        .max(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn clamp_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

// =============================================================================
// Fallback catalog
// =============================================================================

/// Fallback rows: id, name, price (cents), image label, stock, rating (tenths),
/// ratings count, shipping (cents).
const FALLBACK_ROWS: [(&str, &str, i64, &str, u32, i64, u32, i64); 5] = [
    ("f1", "Headphones, Premium Studio Quality", 19999, "Headphones", 10, 48, 340, 500),
    ("f2", "Ceramic Coffee Mug with Ergonomic Handle", 750, "Mug", 15, 46, 80, 300),
    ("f3", "4K Ultra HD Webcam with Auto-Focus", 8999, "Webcam", 5, 41, 120, 450),
    ("f4", "Mechanical Keyboard, RGB Backlit", 12000, "Keyboard", 25, 49, 550, 600),
    ("f5", "Wireless Charging Pad, Fast Charge", 2500, "Charger", 30, 43, 90, 200),
];

/// The fixed catalog served when the remote source cannot be loaded.
pub fn fallback_products() -> Vec<Product> {
    FALLBACK_ROWS
        .iter()
        .map(
            |&(id, name, price, label, stock, ratings, ratings_count, shipping)| Product {
                id: id.to_string(),
                name: name.to_string(),
                price: Decimal::new(price, 2),
                image_url: format!("https://via.placeholder.com/220x160?text={label}"),
                category: String::new(),
                seller: String::new(),
                stock,
                ratings: Decimal::new(ratings, 1),
                ratings_count,
                shipping: Decimal::new(shipping, 2),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_full_record_is_kept() {
        let p = Product::from_record(
            0,
            &record(json!({
                "id": "abc",
                "name": "Shoe",
                "price": 42.5,
                "img": "http://img/shoe.png",
                "category": "Men's Sneaker",
                "seller": "Addidas",
                "stock": 20,
                "ratings": 4,
                "ratingsCount": 3725,
                "shipping": 1
            })),
        );

        assert_eq!(p.id, "abc");
        assert_eq!(p.price, Decimal::new(4250, 2));
        assert_eq!(p.image_url, "http://img/shoe.png");
        assert_eq!(p.stock, 20);
        assert_eq!(p.ratings, Decimal::from(4));
        assert_eq!(p.ratings_count, 3725);
        assert_eq!(p.shipping, Decimal::from(1));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let p = Product::from_record(7, &record(json!({})));

        assert_eq!(p.id, "7");
        assert_eq!(p.name, UNNAMED_PRODUCT);
        assert_eq!(p.price, Decimal::ZERO);
        assert_eq!(p.stock, DEFAULT_STOCK);
        assert_eq!(p.ratings_count, 0);
        assert!(p.image_url.is_empty());
    }

    #[test]
    fn test_alternative_field_names() {
        let p = Product::from_record(
            0,
            &record(json!({
                "id": 12,
                "image": "http://img/alt.png",
                "quantity": 3,
                "rating": "3.5",
                "ratingCount": 9
            })),
        );

        assert_eq!(p.id, "12");
        assert_eq!(p.image_url, "http://img/alt.png");
        assert_eq!(p.stock, 3);
        assert_eq!(p.ratings, Decimal::new(35, 1));
        assert_eq!(p.ratings_count, 9);
    }

    #[test]
    fn test_invalid_values_are_clamped() {
        let p = Product::from_record(
            0,
            &record(json!({
                "price": -3,
                "stock": "lots",
                "ratings": 9,
                "shipping": "-1"
            })),
        );

        assert_eq!(p.price, Decimal::ZERO);
        assert_eq!(p.stock, DEFAULT_STOCK);
        assert_eq!(p.ratings, Decimal::from(MAX_RATING));
        assert_eq!(p.shipping, Decimal::ZERO);
    }

    #[test]
    fn test_money_rounds_half_away_from_zero() {
        let p = Product::from_record(
            0,
            &record(json!({ "price": "0.125", "shipping": "2.345" })),
        );

        assert_eq!(p.price, Decimal::new(13, 2));
        assert_eq!(p.shipping, Decimal::new(235, 2));
    }

    #[test]
    fn test_fallback_catalog_shape() {
        let products = fallback_products();
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["f1", "f2", "f3", "f4", "f5"]);
        assert_eq!(products[0].price, Decimal::new(19999, 2));
        assert_eq!(products[2].stock, 5);
    }
}
