//! Voucher data models produced by the field-extraction engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supplier code assigned when no supplier label is found on the voucher.
pub const DEFAULT_SUPPLIER_CODE: &str = "A";

/// Canonical textual date format (`DD-MM-YYYY`).
pub const VOUCHER_DATE_FORMAT: &str = "%d-%m-%Y";

/// Structured fields extracted from a receipt/voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Voucher number (digit run).
    pub voucher_no: Option<String>,

    /// Voucher date, serialized as `DD-MM-YYYY`.
    #[serde(default, with = "voucher_date_format")]
    pub voucher_date: Option<NaiveDate>,

    /// Supplier code, never empty.
    pub supplier_code: String,

    /// Sum of all item quantities.
    pub total_qty: u64,

    /// Pre-deduction total, matched or summed from items.
    pub gross_total: Option<Decimal>,

    /// Sum of all deduction lines.
    pub total_deductions: Option<Decimal>,

    /// Post-deduction total, matched or derived.
    pub net_total: Option<Decimal>,

    /// Line items in order of appearance.
    pub items: Vec<LineItem>,
}

impl ExtractedRecord {
    /// Voucher date in canonical `DD-MM-YYYY` form.
    pub fn voucher_date_text(&self) -> Option<String> {
        self.voucher_date
            .map(|d| d.format(VOUCHER_DATE_FORMAT).to_string())
    }

    /// Sum of item amounts, unrounded; `None` if the sum overflows.
    pub fn items_amount(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.amount))
    }

    /// Check the quantity invariant against the item list.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let qty: u64 = self.items.iter().map(|i| u64::from(i.quantity)).sum();
        if qty != self.total_qty {
            issues.push(format!(
                "Item quantities ({}) differ from total_qty ({})",
                qty, self.total_qty
            ));
        }

        if self.supplier_code.is_empty() {
            issues.push("Missing supplier code".to_string());
        }

        issues
    }
}

impl Default for ExtractedRecord {
    fn default() -> Self {
        Self {
            voucher_no: None,
            voucher_date: None,
            supplier_code: DEFAULT_SUPPLIER_CODE.to_string(),
            total_qty: 0,
            gross_total: None,
            total_deductions: None,
            net_total: None,
            items: Vec::new(),
        }
    }
}

/// One quantity/price/amount row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Quantity.
    #[serde(rename = "qty")]
    pub quantity: u32,

    /// Unit price.
    pub unit_price: Decimal,

    /// Line amount as printed.
    pub amount: Decimal,
}

mod voucher_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::VOUCHER_DATE_FORMAT;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(VOUCHER_DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| NaiveDate::parse_from_str(&s, VOUCHER_DATE_FORMAT))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_record() {
        let record = ExtractedRecord::default();
        assert_eq!(record.supplier_code, "A");
        assert_eq!(record.total_qty, 0);
        assert!(record.items.is_empty());
        assert!(record.validate().is_empty());
    }

    #[test]
    fn test_date_serialized_as_dd_mm_yyyy() {
        let record = ExtractedRecord {
            voucher_date: NaiveDate::from_ymd_opt(2023, 5, 2),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["voucher_date"], "02-05-2023");
        assert_eq!(record.voucher_date_text().as_deref(), Some("02-05-2023"));

        let back: ExtractedRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_line_item_uses_qty_key() {
        let item = LineItem {
            quantity: 3,
            unit_price: dec("10.50"),
            amount: dec("31.50"),
        };

        let json = serde_json::to_value(item).unwrap();
        assert_eq!(json["qty"], 3);
        assert!(json.get("quantity").is_none());
    }

    #[test]
    fn test_validate_flags_quantity_mismatch() {
        let record = ExtractedRecord {
            total_qty: 5,
            items: vec![LineItem {
                quantity: 2,
                unit_price: dec("1.00"),
                amount: dec("2.00"),
            }],
            ..Default::default()
        };

        assert_eq!(record.validate().len(), 1);
    }
}
