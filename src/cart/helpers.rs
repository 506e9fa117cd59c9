//! Shopping Cart Business Logic Helpers
//!
//! This module contains helper functions for cart formatting.

use rust_decimal::{Decimal, RoundingStrategy};

use super::models::CartLine;

/// Currency symbol prefixed to every displayed amount.
pub const CURRENCY_SYMBOL: &str = "€";

/// Formats an amount with two decimals and thousands separators.
///
/// Example output: `"€1,234.50"`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}{CURRENCY_SYMBOL}{grouped}.{cents}")
}

/// Produces a human-readable one-line summary for a list of cart lines.
///
/// Example output: `"2x Mug, 1x Keyboard"`.
pub fn format_item_summary(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(|l| format!("{}x {}", l.qty, l.product.name))
        .collect::<Vec<_>>()
        .join(", ")
}
