//! OCR engine seam.

pub mod tesseract;

use async_trait::async_trait;

use crate::error::OcrError;

pub use tesseract::TesseractOcr;

/// Turns image bytes into text.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Extract all discernible text from an image.
    ///
    /// An image with no readable text yields an empty string, not an error.
    async fn extract_text(&self, image: &[u8]) -> Result<String, OcrError>;
}
