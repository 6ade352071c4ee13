//! OCR providers that turn a voucher image into raw text.
//!
//! Field extraction only consumes text; these adapters are the seam where
//! an image enters the pipeline.

mod crop;
mod sidecar;
mod tesseract;

pub use crop::CropBox;
pub use sidecar::SidecarTextProvider;
pub use tesseract::TesseractProvider;

#[cfg(feature = "native")]
pub use crop::crop_image;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Recognition mode requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrMode {
    /// Fully automatic page segmentation.
    #[default]
    Default,
    /// A single uniform block of printed text.
    Printed,
    /// Sparse handwritten text.
    Handwritten,
}

impl OcrMode {
    /// All modes, in display order.
    pub const ALL: [OcrMode; 3] = [OcrMode::Default, OcrMode::Printed, OcrMode::Handwritten];

    /// Mode name as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            OcrMode::Default => "default",
            OcrMode::Printed => "printed",
            OcrMode::Handwritten => "handwritten",
        }
    }

    /// Tesseract page segmentation mode for this recognition mode.
    pub fn page_segmentation_mode(&self) -> u8 {
        match self {
            OcrMode::Default => 3,
            OcrMode::Printed => 6,
            OcrMode::Handwritten => 11,
        }
    }
}

impl fmt::Display for OcrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OcrMode {
    type Err = OcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        OcrMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| OcrError::UnknownMode(s.to_string()))
    }
}

/// Something that can read the text off a voucher image.
pub trait OcrProvider {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Extract raw text from the image at `image`.
    fn extract_text(&self, image: &Path, mode: OcrMode) -> Result<String, OcrError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("printed".parse::<OcrMode>().unwrap(), OcrMode::Printed);
        assert_eq!(" Handwritten ".parse::<OcrMode>().unwrap(), OcrMode::Handwritten);
        assert_eq!("default".parse::<OcrMode>().unwrap(), OcrMode::Default);
        assert!(matches!(
            "cursive".parse::<OcrMode>(),
            Err(OcrError::UnknownMode(m)) if m == "cursive"
        ));
    }

    #[test]
    fn test_mode_display_round_trips() {
        for mode in OcrMode::ALL {
            assert_eq!(mode.to_string().parse::<OcrMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&OcrMode::Handwritten).unwrap(), "\"handwritten\"");
        assert_eq!(OcrMode::default(), OcrMode::Default);
    }

    #[test]
    fn test_page_segmentation_modes() {
        assert_eq!(OcrMode::Default.page_segmentation_mode(), 3);
        assert_eq!(OcrMode::Printed.page_segmentation_mode(), 6);
        assert_eq!(OcrMode::Handwritten.page_segmentation_mode(), 11);
    }
}
