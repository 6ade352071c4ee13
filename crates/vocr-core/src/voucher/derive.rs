//! Fallbacks applied once every matcher has run.

use tracing::debug;

use crate::models::voucher::{ExtractedRecord, DEFAULT_SUPPLIER_CODE};

use super::parser::MatchedFields;
use super::rules::round_money;

/// Fill derivable gaps and build the final record.
///
/// Order is fixed: gross from items, then net from gross and deductions,
/// then the supplier default.
pub fn derive_record(fields: MatchedFields) -> ExtractedRecord {
    let MatchedFields {
        voucher_no,
        voucher_date,
        supplier_code,
        items,
        totals,
    } = fields;

    let mut gross_total = totals.gross_total;
    if gross_total.is_none() && !items.items.is_empty() {
        match items.amount_sum() {
            Some(sum) => {
                let summed = round_money(sum);
                debug!("Gross total derived from {} items: {}", items.items.len(), summed);
                gross_total = Some(summed);
            }
            None => debug!("Item amounts overflow, gross total left unset"),
        }
    }

    let mut net_total = totals.net_total;
    if net_total.is_none() {
        if let (Some(gross), Some(deductions)) = (gross_total, totals.total_deductions) {
            if let Some(diff) = gross.checked_sub(deductions) {
                let net = round_money(diff);
                debug!("Net total derived as {} - {} = {}", gross, deductions, net);
                net_total = Some(net);
            }
        }
    }

    let supplier_code = supplier_code.unwrap_or_else(|| DEFAULT_SUPPLIER_CODE.to_string());

    ExtractedRecord {
        voucher_no,
        voucher_date,
        supplier_code,
        total_qty: items.total_qty,
        gross_total,
        total_deductions: totals.total_deductions,
        net_total,
        items: items.items,
    }
}
