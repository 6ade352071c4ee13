//! Rule-based voucher parser.
//!
//! Runs four passes over the same text, strictly in order: line
//! normalization, field matchers, the totals window, and the fallback pass.

use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::voucher::ExtractedRecord;
use crate::ocr::{OcrMode, OcrProvider};

use super::derive::derive_record;
use super::rules::{
    extract_items, normalize_lines, resolve_totals, DateMatcher, ItemScan, LineMatcher,
    SupplierCodeMatcher, Totals, VoucherNoMatcher,
};
use super::{Result, VoucherExtractor};

/// Result of voucher extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted voucher data.
    pub record: ExtractedRecord,
    /// Raw text the record was extracted from.
    pub raw_text: String,
    /// Fields that could not be detected.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for voucher parsing.
pub trait VoucherParser {
    /// Parse a voucher from OCR text. Never fails; undetected fields stay unset.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Fields as matched in the text, before any fallback is applied.
#[derive(Debug, Clone, Default)]
pub struct MatchedFields {
    pub voucher_no: Option<String>,
    pub voucher_date: Option<NaiveDate>,
    pub supplier_code: Option<String>,
    pub items: ItemScan,
    pub totals: Totals,
}

/// Run every matcher over normalized lines.
pub fn match_fields(lines: &[&str]) -> MatchedFields {
    let voucher_no = VoucherNoMatcher.find_first(lines);
    if let Some(m) = &voucher_no {
        debug!("Voucher number {} on line {:?}", m.value, m.line);
    }

    let voucher_date = DateMatcher.find_first(lines);
    if let Some(m) = &voucher_date {
        debug!("Voucher date {} on line {:?}", m.value, m.line);
    }

    let supplier_code = SupplierCodeMatcher.find_first(lines);
    if let Some(m) = &supplier_code {
        debug!("Supplier code {} on line {:?}", m.value, m.line);
    }

    let items = extract_items(lines);
    debug!("Found {} line items, total quantity {}", items.items.len(), items.total_qty);

    MatchedFields {
        voucher_no: voucher_no.map(|m| m.value),
        voucher_date: voucher_date.map(|m| m.value),
        supplier_code: supplier_code.map(|m| m.value),
        items,
        totals: resolve_totals(lines),
    }
}

/// Extract a voucher record from OCR text; absent text yields the default record.
pub fn parse_receipt_text(text: Option<&str>) -> ExtractedRecord {
    let lines = normalize_lines(text);
    derive_record(match_fields(&lines))
}

/// Parser built from the line matchers in [`super::rules`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedParser;

impl RuleBasedParser {
    /// Create a new rule-based parser.
    pub fn new() -> Self {
        Self
    }

    fn warnings(&self, fields: &MatchedFields, record: &ExtractedRecord) -> Vec<String> {
        let mut warnings = Vec::new();

        if fields.voucher_no.is_none() {
            warnings.push("Could not extract voucher number".to_string());
        }
        if fields.voucher_date.is_none() {
            warnings.push("Could not extract voucher date".to_string());
        }
        if fields.supplier_code.is_none() {
            warnings.push(format!(
                "Could not extract supplier code, defaulted to {}",
                record.supplier_code
            ));
        }
        if record.items.is_empty() {
            warnings.push("No line items found".to_string());
        }
        if record.gross_total.is_none() {
            warnings.push("Gross total could not be determined".to_string());
        }
        if record.net_total.is_none() {
            warnings.push("Net total could not be determined".to_string());
        }

        warnings
    }
}

impl VoucherParser for RuleBasedParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing voucher from {} characters of text", text.len());

        let lines = normalize_lines(Some(text));
        let fields = match_fields(&lines);
        let matched = fields.clone();
        let record = derive_record(fields);
        let warnings = self.warnings(&matched, &record);

        debug!(
            "Extracted voucher {:?} with {} warnings",
            record.voucher_no,
            warnings.len()
        );

        ExtractionResult {
            record,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl VoucherExtractor for RuleBasedParser {
    fn extract(
        &self,
        provider: &dyn OcrProvider,
        image: &Path,
        mode: OcrMode,
    ) -> Result<ExtractionResult> {
        let start = Instant::now();
        let text = provider.extract_text(image, mode)?;
        debug!(
            "{} produced {} characters for {}",
            provider.name(),
            text.len(),
            image.display()
        );

        let mut result = self.parse(&text);
        result.processing_time_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }
}
