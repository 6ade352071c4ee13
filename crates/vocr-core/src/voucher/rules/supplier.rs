//! Supplier code extraction.

use super::patterns::SUPPLIER_CODE;
use super::LineMatcher;

/// Matches a short supplier token after a `Supplier`/`Supp` label.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupplierCodeMatcher;

impl LineMatcher for SupplierCodeMatcher {
    type Output = String;

    fn try_match(&self, line: &str) -> Option<String> {
        SUPPLIER_CODE
            .captures(line)
            .map(|caps| caps[1].to_string())
    }
}
