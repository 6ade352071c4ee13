//! Voucher field extraction module.

mod derive;
mod parser;
pub mod rules;

pub use derive::derive_record;
pub use parser::{
    match_fields, parse_receipt_text, ExtractionResult, MatchedFields, RuleBasedParser,
    VoucherParser,
};

use std::path::Path;

use crate::error::OcrError;
use crate::ocr::{OcrMode, OcrProvider};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// Trait for extracting vouchers straight from images.
pub trait VoucherExtractor {
    /// Run `provider` over `image` and parse the text it returns.
    fn extract(
        &self,
        provider: &dyn OcrProvider,
        image: &Path,
        mode: OcrMode,
    ) -> Result<ExtractionResult>;
}
