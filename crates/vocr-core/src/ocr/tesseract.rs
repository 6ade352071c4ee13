//! Provider backed by the `tesseract` command-line engine.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use super::{OcrMode, OcrProvider};
use crate::error::OcrError;

/// Runs `tesseract <image> stdout -l <language> --psm <n>`.
#[derive(Debug, Clone)]
pub struct TesseractProvider {
    binary: PathBuf,
    language: String,
}

impl TesseractProvider {
    /// Create a provider for the given binary and language.
    pub fn new(binary: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }

    fn engine(&self) -> String {
        self.binary.display().to_string()
    }

    fn command(&self, image: &Path, mode: OcrMode) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(mode.page_segmentation_mode().to_string());
        cmd
    }
}

impl Default for TesseractProvider {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

impl OcrProvider for TesseractProvider {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn extract_text(&self, image: &Path, mode: OcrMode) -> Result<String, OcrError> {
        if !image.exists() {
            return Err(OcrError::ImageNotFound(image.display().to_string()));
        }

        debug!(
            "Running {} on {} (psm {})",
            self.engine(),
            image.display(),
            mode.page_segmentation_mode()
        );

        let output = self
            .command(image, mode)
            .output()
            .map_err(|e| OcrError::Launch {
                engine: self.engine(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("{} failed on {}: {}", self.engine(), image.display(), stderr);
            return Err(OcrError::EngineFailed {
                engine: self.engine(),
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_command_arguments() {
        let provider = TesseractProvider::new("/opt/tess", "hin");
        let cmd = provider.command(Path::new("v.png"), OcrMode::Handwritten);

        assert_eq!(cmd.get_program(), "/opt/tess");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["v.png", "stdout", "-l", "hin", "--psm", "11"]);
    }

    #[test]
    fn test_missing_binary_is_launch_error() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("v.png");
        fs::write(&image, b"png").unwrap();

        let provider = TesseractProvider::new(dir.path().join("no-such-tesseract"), "eng");
        assert!(matches!(
            provider.extract_text(&image, OcrMode::Default),
            Err(OcrError::Launch { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_engine_failure() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("v.png");
        fs::write(&image, b"png").unwrap();

        let provider = TesseractProvider::new("false", "eng");
        assert!(matches!(
            provider.extract_text(&image, OcrMode::Printed),
            Err(OcrError::EngineFailed { status: 1, .. })
        ));
    }

    #[test]
    fn test_missing_image() {
        let provider = TesseractProvider::default();
        assert!(matches!(
            provider.extract_text(Path::new("/definitely/not/here.png"), OcrMode::Default),
            Err(OcrError::ImageNotFound(_))
        ));
    }
}
