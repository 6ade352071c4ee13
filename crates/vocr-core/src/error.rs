//! Error types for the vocr-core library.
//!
//! Field extraction itself never fails; these errors cover the collaborators
//! around it (OCR providers, image cropping, the voucher store).

use thiserror::Error;

/// Main error type for the vocr library.
#[derive(Error, Debug)]
pub enum VocrError {
    /// OCR provider error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Voucher store error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Image processing error.
    #[cfg(feature = "native")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by OCR providers.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The input image does not exist or is not readable.
    #[error("image not found: {0}")]
    ImageNotFound(String),

    /// A transcription file could not be read.
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    /// No transcription was found for the image.
    #[error("no transcription available for {0}")]
    MissingTranscription(String),

    /// The external OCR engine could not be started.
    #[error("failed to launch {engine}: {reason}")]
    Launch { engine: String, reason: String },

    /// The external OCR engine exited with an error.
    #[error("{engine} exited with status {status}: {stderr}")]
    EngineFailed {
        engine: String,
        status: i32,
        stderr: String,
    },

    /// Unknown OCR mode string.
    #[error("unknown OCR mode: {0}")]
    UnknownMode(String),

    /// Invalid crop region.
    #[error("invalid crop region: {0}")]
    InvalidCrop(String),
}

/// Errors raised by voucher stores.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A voucher for this file was already saved.
    #[error("file already saved: {0}")]
    Duplicate(String),

    /// The store file could not be decoded.
    #[error("corrupt store at {path}: {reason}")]
    Corrupt { path: String, reason: String },

    /// The store file could not be written.
    #[error("failed to write store: {0}")]
    Write(String),
}

/// Result type for the vocr library.
pub type Result<T> = std::result::Result<T, VocrError>;
