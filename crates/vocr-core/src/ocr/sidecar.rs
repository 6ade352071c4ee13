//! Provider that reads a transcription stored next to the image.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{OcrMode, OcrProvider};
use crate::error::OcrError;

/// Reads `<image>.<ext>` (or `<stem>.<ext>`) instead of running OCR.
///
/// A path that already carries the transcription extension is read as-is.
#[derive(Debug, Clone)]
pub struct SidecarTextProvider {
    extension: String,
}

impl SidecarTextProvider {
    /// Create a provider looking for files with the given extension.
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Transcription extension, without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    fn is_transcription(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }

    fn candidates(&self, image: &Path) -> Vec<PathBuf> {
        let mut appended = image.as_os_str().to_owned();
        appended.push(".");
        appended.push(&self.extension);

        vec![PathBuf::from(appended), image.with_extension(&self.extension)]
    }
}

impl Default for SidecarTextProvider {
    fn default() -> Self {
        Self::new("txt")
    }
}

impl OcrProvider for SidecarTextProvider {
    fn name(&self) -> &str {
        "sidecar"
    }

    fn extract_text(&self, image: &Path, _mode: OcrMode) -> Result<String, OcrError> {
        if !image.exists() {
            return Err(OcrError::ImageNotFound(image.display().to_string()));
        }

        let source = if self.is_transcription(image) {
            image.to_path_buf()
        } else {
            self.candidates(image)
                .into_iter()
                .find(|p| p.is_file())
                .ok_or_else(|| OcrError::MissingTranscription(image.display().to_string()))?
        };

        debug!("Reading transcription from {}", source.display());

        fs::read_to_string(&source).map_err(|e| OcrError::Read {
            path: source.display().to_string(),
            reason: e.to_string(),
        })
    }
}
