//! Regex patterns for voucher field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Voucher number: label, optional "No"/"Number"/"#", then up to 8 digits
    pub static ref VOUCHER_NO: Regex = Regex::new(
        r"(?i)(?:Voucher|Vou|Vouch|V)\s*(?:No\.?|Number|#)?\s*[:\-]?\s*([0-9]{1,8})"
    ).unwrap();

    // Date token: D/M/Y or D-M-Y with a 2-4 digit year
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4})"
    ).unwrap();

    // Contiguous DDMMYYYY
    pub static ref DATE_COMPACT: Regex = Regex::new(
        r"^([0-9]{2})([0-9]{2})([0-9]{4})$"
    ).unwrap();

    // Supplier code: "Supplier", "Supp" or "Supp." with optional "Code" and colon
    pub static ref SUPPLIER_CODE: Regex = Regex::new(
        r"(?i)(?:Supplier|Supp|Supp\.)\s*(?:Code\s*)?:?\s*([A-Za-z0-9\-]{1,8})"
    ).unwrap();

    // Whole-line item: qty [x] price (= | space) amount
    pub static ref LINE_ITEM: Regex = Regex::new(
        r"^\s*([0-9]{1,4})\s*(?:x|X)?\s*([0-9,]+(?:\.[0-9]{1,2})?)\s*(?:=|\s)\s*([0-9,]+(?:\.[0-9]{1,2})?)\s*$"
    ).unwrap();

    // Net/grand total
    pub static ref NET_TOTAL: Regex = Regex::new(
        r"(?i)(?:Grand\s+Total|Total\s+Amount|Net\s+Total|Net\s+Amount)\s*[:\-]?\s*([0-9,]+(?:\.[0-9]{1,2})?)"
    ).unwrap();

    // Gross total, including a bare "Total"
    pub static ref GROSS_TOTAL: Regex = Regex::new(
        r"(?i)(?:Gross\s+Total|Total)\s*[:\-]?\s*([0-9,]+(?:\.[0-9]{1,2})?)"
    ).unwrap();

    // Deductions charged against the gross total
    pub static ref DEDUCTION: Regex = Regex::new(
        r"(?i)(?:Commission|Damages|Un\s*Loading|L/?F\s*&\s*Cash|L/F)\s*[:\-]?\s*([0-9,]+(?:\.[0-9]{1,2})?)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_rejects_trailing_text() {
        assert!(LINE_ITEM.is_match("3 x 10.50 = 31.50"));
        assert!(LINE_ITEM.is_match("2 1,200.00 2,400.00"));
        assert!(!LINE_ITEM.is_match("3 x 10.50 = 31.50 Rs"));
        assert!(!LINE_ITEM.is_match("99 x abc = 10"));
    }

    #[test]
    fn test_deduction_variants() {
        for line in [
            "Commission: 5.00",
            "DAMAGES - 2",
            "UnLoading 3.00",
            "Un Loading 3.00",
            "L/F & Cash: 10",
            "LF&Cash 10",
            "L/F 4.50",
        ] {
            assert!(DEDUCTION.is_match(line), "{line}");
        }
    }
}
