//! Voucher store kept in a single JSON file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{NewVoucher, StoredVoucher, VoucherStore};
use crate::error::{Result, StorageError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    next_id: u64,
    vouchers: Vec<StoredVoucher>,
}

/// Store backed by one JSON document, rewritten atomically on every change.
///
/// A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open the store at `path`. Nothing is read or created until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreFile> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoreFile::default()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            StorageError::Corrupt {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn write(&self, store: &StoreFile) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, store)?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::Write(e.to_string()))?;

        debug!("Wrote {} vouchers to {}", store.vouchers.len(), self.path.display());
        Ok(())
    }
}

impl VoucherStore for JsonFileStore {
    fn insert(&self, voucher: NewVoucher) -> Result<StoredVoucher> {
        let mut store = self.load()?;

        if store.vouchers.iter().any(|v| v.file_name == voucher.file_name) {
            return Err(StorageError::Duplicate(voucher.file_name).into());
        }

        store.next_id = store.next_id.max(1);
        let stored = StoredVoucher::from_new(store.next_id, voucher, Utc::now());
        store.next_id += 1;
        store.vouchers.push(stored.clone());
        self.write(&store)?;

        info!("Saved voucher {} ({})", stored.id, stored.file_name);
        Ok(stored)
    }

    fn get(&self, id: u64) -> Result<Option<StoredVoucher>> {
        Ok(self.load()?.vouchers.into_iter().find(|v| v.id == id))
    }

    fn find_by_file_name(&self, file_name: &str) -> Result<Option<StoredVoucher>> {
        Ok(self
            .load()?
            .vouchers
            .into_iter()
            .find(|v| v.file_name == file_name))
    }

    fn list(&self) -> Result<Vec<StoredVoucher>> {
        let mut vouchers = self.load()?.vouchers;
        vouchers.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(vouchers)
    }

    fn delete_all(&self) -> Result<usize> {
        let mut store = self.load()?;
        let removed = store.vouchers.len();
        if removed > 0 {
            store.vouchers.clear();
            self.write(&store)?;
        }
        info!("Deleted {} vouchers", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VocrError;
    use crate::models::voucher::ExtractedRecord;
    use crate::ocr::CropBox;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn voucher(file_name: &str, voucher_no: &str) -> NewVoucher {
        NewVoucher {
            file_name: file_name.to_string(),
            raw_ocr: format!("Voucher No: {}", voucher_no),
            parsed: ExtractedRecord {
                voucher_no: Some(voucher_no.to_string()),
                voucher_date: NaiveDate::from_ymd_opt(2023, 5, 12),
                supplier_code: "K9".to_string(),
                ..Default::default()
            },
            crop: None,
        }
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("none.json"));

        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.get(1).unwrap(), None);
        assert_eq!(store.delete_all().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/vouchers.json"));

        let mut new = voucher("a.jpg", "4521");
        new.crop = Some(CropBox::new(1, 2, 3, 4));
        let saved = store.insert(new).unwrap();

        assert_eq!(saved.id, 1);
        assert_eq!(saved.voucher_no.as_deref(), Some("4521"));
        assert_eq!(saved.voucher_date.as_deref(), Some("12-05-2023"));
        assert_eq!(saved.supplier_code, "K9");

        let reopened = JsonFileStore::new(store.path());
        assert_eq!(reopened.get(1).unwrap(), Some(saved.clone()));
        assert_eq!(reopened.find_by_file_name("a.jpg").unwrap(), Some(saved));
        assert_eq!(reopened.find_by_file_name("b.jpg").unwrap(), None);
    }

    #[test]
    fn test_duplicate_file_name_rejected() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("vouchers.json"));

        store.insert(voucher("a.jpg", "1")).unwrap();
        let err = store.insert(voucher("a.jpg", "2")).unwrap_err();

        assert!(matches!(
            err,
            VocrError::Storage(StorageError::Duplicate(name)) if name == "a.jpg"
        ));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_list_newest_first_and_delete_all() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("vouchers.json"));

        store.insert(voucher("a.jpg", "1")).unwrap();
        store.insert(voucher("b.jpg", "2")).unwrap();
        store.insert(voucher("c.jpg", "3")).unwrap();

        let ids: Vec<u64> = store.list().unwrap().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        assert_eq!(store.delete_all().unwrap(), 3);
        assert!(store.list().unwrap().is_empty());

        // Ids are not reused after a clear.
        assert_eq!(store.insert(voucher("a.jpg", "4")).unwrap().id, 4);
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vouchers.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            JsonFileStore::new(&path).list(),
            Err(VocrError::Storage(StorageError::Corrupt { .. }))
        ));
    }
}
