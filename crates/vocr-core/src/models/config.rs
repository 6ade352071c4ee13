//! Configuration structures for the vocr pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ocr::OcrMode;

/// Main configuration for the vocr pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VocrConfig {
    /// OCR provider configuration.
    pub ocr: OcrConfig,

    /// Voucher store configuration.
    pub storage: StorageConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Which OCR provider turns images into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Read pre-computed transcriptions stored next to the image.
    #[default]
    Sidecar,
    /// Run the `tesseract` command-line engine.
    Tesseract,
}

/// OCR provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Provider used for images.
    pub provider: ProviderKind,

    /// Operating mode passed to the provider.
    pub mode: OcrMode,

    /// Path or name of the tesseract binary.
    pub tesseract_bin: PathBuf,

    /// Tesseract language code.
    pub language: String,

    /// Extension of sidecar transcription files.
    pub sidecar_extension: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Sidecar,
            mode: OcrMode::Default,
            tesseract_bin: PathBuf::from("tesseract"),
            language: "eng".to_string(),
            sidecar_extension: "txt".to_string(),
        }
    }
}

/// Voucher store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding saved vouchers.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data").join("vouchers.json"),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Print extraction warnings (undetected fields) to stderr.
    pub report_warnings: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            report_warnings: true,
        }
    }
}

impl VocrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
