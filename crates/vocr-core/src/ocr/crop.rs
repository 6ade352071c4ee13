//! Rectangular crop applied to an image before OCR.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Pixel rectangle within an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl CropBox {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// A crop with zero width or height is ignored.
    pub fn is_valid(&self) -> bool {
        self.w > 0 && self.h > 0
    }

    /// Intersect with a `width` x `height` image.
    ///
    /// Returns `None` when the crop lies entirely outside the image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<CropBox> {
        if !self.is_valid() || self.x >= width || self.y >= height {
            return None;
        }

        Some(CropBox {
            x: self.x,
            y: self.y,
            w: self.w.min(width - self.x),
            h: self.h.min(height - self.y),
        })
    }
}

impl fmt::Display for CropBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.w, self.h)
    }
}

impl FromStr for CropBox {
    type Err = OcrError;

    /// Parse `x,y,w,h`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<u32> = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|e| OcrError::InvalidCrop(format!("{}: {}", s, e)))?;

        match parts.as_slice() {
            &[x, y, w, h] => Ok(CropBox::new(x, y, w, h)),
            _ => Err(OcrError::InvalidCrop(format!(
                "expected x,y,w,h but got {}",
                s
            ))),
        }
    }
}

/// Crop the image at `path` and write the region to a temporary PNG.
///
/// The file is removed when the returned handle is dropped.
#[cfg(feature = "native")]
pub fn crop_image(
    path: &std::path::Path,
    crop: CropBox,
) -> crate::error::Result<tempfile::NamedTempFile> {
    let img = image::open(path)?;
    let region = crop.clamp_to(img.width(), img.height()).ok_or_else(|| {
        OcrError::InvalidCrop(format!(
            "{} outside {}x{} image",
            crop,
            img.width(),
            img.height()
        ))
    })?;

    tracing::debug!("Cropping {} to {}", path.display(), region);

    let cropped = img.crop_imm(region.x, region.y, region.w, region.h);
    let file = tempfile::Builder::new()
        .prefix("vocr-crop-")
        .suffix(".png")
        .tempfile()?;
    cropped.save_with_format(file.path(), image::ImageFormat::Png)?;

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crop() {
        assert_eq!("10,20,30,40".parse::<CropBox>().unwrap(), CropBox::new(10, 20, 30, 40));
        assert_eq!(" 1, 2 ,3,4".parse::<CropBox>().unwrap(), CropBox::new(1, 2, 3, 4));
        assert!("1,2,3".parse::<CropBox>().is_err());
        assert!("1,2,3,-4".parse::<CropBox>().is_err());
    }

    #[test]
    fn test_validity() {
        assert!(CropBox::new(0, 0, 1, 1).is_valid());
        assert!(!CropBox::new(5, 5, 0, 10).is_valid());
        assert!(!CropBox::new(5, 5, 10, 0).is_valid());
    }

    #[test]
    fn test_clamp() {
        let crop = CropBox::new(8, 2, 10, 3);
        assert_eq!(crop.clamp_to(10, 10), Some(CropBox::new(8, 2, 2, 3)));
        assert_eq!(CropBox::new(10, 0, 5, 5).clamp_to(10, 10), None);
        assert_eq!(CropBox::new(0, 0, 0, 5).clamp_to(10, 10), None);
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_crop_image_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("voucher.png");
        image::RgbImage::new(20, 10).save(&source).unwrap();

        let cropped = crop_image(&source, CropBox::new(15, 2, 10, 4)).unwrap();
        assert!(cropped.path().to_string_lossy().ends_with(".png"));

        let img = image::open(cropped.path()).unwrap();
        assert_eq!((img.width(), img.height()), (5, 4));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_crop_outside_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("voucher.png");
        image::RgbImage::new(4, 4).save(&source).unwrap();

        assert!(matches!(
            crop_image(&source, CropBox::new(4, 0, 2, 2)),
            Err(crate::error::VocrError::Ocr(OcrError::InvalidCrop(_)))
        ));
    }
}
