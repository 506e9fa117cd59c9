//! Shopping Cart Domain Models
//!
//! This module contains the data structures related to the shopping cart:
//! the line item, the derived totals and the read models handed to renderers.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use super::helpers::format_money;
use crate::catalog::Product;

// =============================================================================
// Cart Domain Models
// =============================================================================

/// One product's aggregated quantity within the cart.
///
/// Invariant: `1 <= qty <= product.stock`. The engine removes a line instead of
/// storing a zero quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Shared catalog entry
    pub product: Arc<Product>,

    /// Units of `product` in the cart
    pub qty: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        saturating_mul(self.product.price, self.qty)
    }

    pub fn line_shipping(&self) -> Decimal {
        saturating_mul(self.product.shipping, self.qty)
    }
}

/// Amounts are non-negative, so an overflow always saturates at the top.
fn saturating_mul(amount: Decimal, qty: u32) -> Decimal {
    amount.checked_mul(Decimal::from(qty)).unwrap_or(Decimal::MAX)
}

fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}

/// Cart totals, always derived from the current lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub grand_total: Decimal,
}

impl Totals {
    /// Sums price and shipping over `lines`.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> Self {
        let (subtotal, shipping) = lines
            .into_iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(sub, ship), line| {
                (
                    saturating_add(sub, line.line_total()),
                    saturating_add(ship, line.line_shipping()),
                )
            });

        Self {
            subtotal,
            shipping,
            grand_total: saturating_add(subtotal, shipping),
        }
    }
}

/// What a single cart mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    /// A new line was created or an existing one grew by one unit
    Added { qty: u32 },

    /// The quantity changed without leaving the 1..=stock range
    Updated { qty: u32 },

    /// The quantity reached zero and the line was deleted
    Removed,

    /// The request would exceed stock; the line holds `qty`, which equals the
    /// stock (0 when nothing could be added)
    StockLimit { qty: u32 },

    /// No line exists for the product
    Missing,
}

impl CartOutcome {
    /// Whether the cart contents changed.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            CartOutcome::Added { .. } | CartOutcome::Updated { .. } | CartOutcome::Removed
        )
    }
}

// =============================================================================
// Read Models
// =============================================================================

/// Totals in both exact and display form.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TotalsView {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub grand_total: Decimal,
    pub subtotal_display: String,
    pub shipping_display: String,
    pub grand_total_display: String,
}

impl From<Totals> for TotalsView {
    fn from(t: Totals) -> Self {
        Self {
            subtotal: t.subtotal,
            shipping: t.shipping,
            grand_total: t.grand_total,
            subtotal_display: format_money(t.subtotal),
            shipping_display: format_money(t.shipping),
            grand_total_display: format_money(t.grand_total),
        }
    }
}

/// One cart row as shown in the cart panel and order review.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub image_url: String,
    pub unit_price: Decimal,
    pub qty: u32,
    pub stock: u32,
    pub line_total: Decimal,
    pub line_total_display: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        let line_total = line.line_total();
        Self {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            image_url: line.product.image_url.clone(),
            unit_price: line.product.price,
            qty: line.qty,
            stock: line.product.stock,
            line_total,
            line_total_display: format_money(line_total),
        }
    }
}
