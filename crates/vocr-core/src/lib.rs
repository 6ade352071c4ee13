//! Core library for receipt/voucher OCR processing.
//!
//! This crate provides:
//! - Voucher field extraction from OCR text (voucher number, date, supplier
//!   code, line items, totals and deductions)
//! - OCR provider adapters (sidecar transcriptions, tesseract) and image cropping
//! - A JSON-file store for validated vouchers

pub mod error;
pub mod models;
pub mod ocr;
pub mod storage;
pub mod voucher;

pub use error::{OcrError, Result, StorageError, VocrError};
pub use models::config::VocrConfig;
pub use models::voucher::{ExtractedRecord, LineItem, DEFAULT_SUPPLIER_CODE};
pub use ocr::{CropBox, OcrMode, OcrProvider, SidecarTextProvider, TesseractProvider};
#[cfg(feature = "native")]
pub use ocr::crop_image;
pub use storage::{JsonFileStore, NewVoucher, StoredVoucher, VoucherStore};
pub use voucher::{
    parse_receipt_text, ExtractionResult, RuleBasedParser, VoucherExtractor, VoucherParser,
};
