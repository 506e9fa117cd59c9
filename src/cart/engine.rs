//! Cart Engine
//!
//! Owns the lines of one cart and applies every quantity change against the
//! product's stock. Totals are never stored; `Cart::totals` derives them from
//! the lines on each call.
//!
//! Both ways of growing a line (adding from the catalog and the `+` control in
//! the cart) follow the same rule: a request past the available stock is
//! clamped to the stock and reported as `CartOutcome::StockLimit`.

use std::sync::Arc;

use super::models::{CartLine, CartOutcome, Totals};
use crate::catalog::Product;

/// The shopping cart of one session. Line order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds one unit of `product`, creating its line on first add.
    pub fn add(&mut self, product: Arc<Product>) -> CartOutcome {
        let Some(index) = self.position(&product.id) else {
            if product.stock == 0 {
                return CartOutcome::StockLimit { qty: 0 };
            }
            self.lines.push(CartLine { product, qty: 1 });
            return CartOutcome::Added { qty: 1 };
        };

        let requested = self.lines[index].qty.saturating_add(1);
        match self.set_quantity(index, requested) {
            CartOutcome::Updated { qty } => CartOutcome::Added { qty },
            other => other,
        }
    }

    /// Moves the quantity of `product_id` by `delta` units.
    ///
    /// Unknown products are ignored. A result at or below zero deletes the line.
    pub fn change_quantity(&mut self, product_id: &str, delta: i32) -> CartOutcome {
        let Some(index) = self.position(product_id) else {
            return CartOutcome::Missing;
        };

        let requested = i64::from(self.lines[index].qty) + i64::from(delta);
        if requested <= 0 {
            self.lines.remove(index);
            return CartOutcome::Removed;
        }

        self.set_quantity(index, u32::try_from(requested).unwrap_or(u32::MAX))
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Current totals, freshly derived from the lines.
    pub fn totals(&self) -> Totals {
        Totals::from_lines(&self.lines)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product.id == product_id)
    }

    /// Applies a positive quantity, clamping to stock.
    fn set_quantity(&mut self, index: usize, requested: u32) -> CartOutcome {
        let line = &mut self.lines[index];
        let stock = line.product.stock;

        if requested > stock {
            line.qty = stock;
            if line.qty == 0 {
                self.lines.remove(index);
            }
            return CartOutcome::StockLimit { qty: stock };
        }

        line.qty = requested;
        CartOutcome::Updated { qty: requested }
    }
}
