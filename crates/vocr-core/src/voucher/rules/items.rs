//! Line item extraction.

use rust_decimal::Decimal;

use crate::models::voucher::LineItem;

use super::amounts::parse_amount;
use super::patterns::LINE_ITEM;
use super::LineMatcher;

/// Matches a whole line shaped like `3 x 10.50 = 31.50` or `3 10.50 31.50`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineItemMatcher;

impl LineMatcher for LineItemMatcher {
    type Output = LineItem;

    fn try_match(&self, line: &str) -> Option<LineItem> {
        let caps = LINE_ITEM.captures(line)?;

        let quantity: u32 = caps[1].parse().ok()?;
        let unit_price = parse_amount(&caps[2])?;
        let amount = parse_amount(&caps[3])?;

        Some(LineItem {
            quantity,
            unit_price,
            amount,
        })
    }
}

/// Items found on a voucher with their running totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemScan {
    /// Items in order of appearance.
    pub items: Vec<LineItem>,
    /// Sum of item quantities.
    pub total_qty: u64,
}

impl ItemScan {
    /// Unrounded sum of item amounts, `None` if the sum overflows.
    pub fn amount_sum(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.amount))
    }
}

/// Collect every line item; lines that do not have the exact shape are skipped.
pub fn extract_items(lines: &[&str]) -> ItemScan {
    let mut scan = ItemScan::default();

    for item in LineItemMatcher.find_all(lines) {
        scan.total_qty += u64::from(item.value.quantity);
        scan.items.push(item.value);
    }

    scan
}
