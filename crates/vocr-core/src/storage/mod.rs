//! Persistence for validated vouchers.

mod json_file;

pub use json_file::JsonFileStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::voucher::ExtractedRecord;
use crate::ocr::CropBox;

/// A voucher ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoucher {
    /// Original file name; unique within a store.
    pub file_name: String,
    /// Raw OCR text the record came from.
    pub raw_ocr: String,
    /// Record as validated by the user.
    pub parsed: ExtractedRecord,
    /// Crop applied before OCR, if any.
    pub crop: Option<CropBox>,
}

/// A voucher as kept in a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredVoucher {
    pub id: u64,
    pub file_name: String,
    pub voucher_no: Option<String>,
    /// Voucher date as `DD-MM-YYYY`.
    pub voucher_date: Option<String>,
    pub supplier_code: String,
    pub raw_ocr: String,
    pub parsed: ExtractedRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropBox>,
    pub created_at: DateTime<Utc>,
}

impl StoredVoucher {
    /// Build the stored form of `voucher` with the given id and timestamp.
    pub fn from_new(id: u64, voucher: NewVoucher, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            voucher_no: voucher.parsed.voucher_no.clone(),
            voucher_date: voucher.parsed.voucher_date_text(),
            supplier_code: voucher.parsed.supplier_code.clone(),
            file_name: voucher.file_name,
            raw_ocr: voucher.raw_ocr,
            parsed: voucher.parsed,
            crop: voucher.crop,
            created_at,
        }
    }
}

/// A store of saved vouchers.
pub trait VoucherStore {
    /// Save a voucher and return its id.
    ///
    /// Fails with [`crate::error::StorageError::Duplicate`] if a voucher with
    /// the same file name was already saved.
    fn insert(&self, voucher: NewVoucher) -> Result<StoredVoucher>;

    /// Look up a voucher by id.
    fn get(&self, id: u64) -> Result<Option<StoredVoucher>>;

    /// Look up a voucher by its original file name.
    fn find_by_file_name(&self, file_name: &str) -> Result<Option<StoredVoucher>>;

    /// All vouchers, newest first.
    fn list(&self) -> Result<Vec<StoredVoucher>>;

    /// Remove every voucher and return how many were removed.
    fn delete_all(&self) -> Result<usize>;
}
