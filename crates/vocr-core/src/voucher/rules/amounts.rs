//! Amount parsing and rounding.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an amount such as `1,234.50`; thousands commas are dropped.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Round a money value to two decimal places.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}
