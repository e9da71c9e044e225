//! Text extraction from uploaded PDFs and images.
//!
//! Three ways in, matching what a caller can upload:
//! - `simple_pdf`: the PDF already has a text layer, read it directly
//! - `scanned_pdf`: rasterize every page and OCR the images
//! - `image`: OCR a single picture
//!
//! The actual work is behind [`OcrBackend`] so the HTTP layer never cares
//! which tools do it.

mod cli;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use cli::CliOcrBackend;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("uploaded file is empty")]
    EmptyUpload,
    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanType {
    SimplePdf,
    ScannedPdf,
    Image,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::SimplePdf => "simple_pdf",
            ScanType::ScannedPdf => "scanned_pdf",
            ScanType::Image => "image",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Text already embedded in the PDF, pages joined by `\n`.
    async fn text_layer(&self, pdf: &[u8]) -> Result<String, OcrError>;

    /// Render each page to an image and OCR it, pages joined by `\n`.
    async fn rasterize_and_recognize(&self, pdf: &[u8]) -> Result<String, OcrError>;

    async fn recognize_image(&self, image: &[u8]) -> Result<String, OcrError>;
}

pub async fn extract(backend: &dyn OcrBackend, scan_type: ScanType, bytes: &[u8]) -> Result<String, OcrError> {
    if bytes.is_empty() {
        return Err(OcrError::EmptyUpload);
    }

    match scan_type {
        ScanType::SimplePdf => backend.text_layer(bytes).await,
        ScanType::ScannedPdf => backend.rasterize_and_recognize(bytes).await,
        ScanType::Image => backend.recognize_image(bytes).await,
    }
}

/// Pick an extraction path from the file name. PDFs try their text layer
/// first and fall back to OCR when it is blank; everything else is treated
/// as an image.
pub async fn auto_detect(backend: &dyn OcrBackend, file_name: &str, bytes: &[u8]) -> Result<(String, ScanType), OcrError> {
    if bytes.is_empty() {
        return Err(OcrError::EmptyUpload);
    }

    if !file_name.to_lowercase().ends_with(".pdf") {
        return Ok((backend.recognize_image(bytes).await?, ScanType::Image));
    }

    let text = backend.text_layer(bytes).await?;
    if !text.trim().is_empty() {
        return Ok((text, ScanType::SimplePdf));
    }

    debug!("{file_name} has no text layer, falling back to OCR");
    Ok((backend.rasterize_and_recognize(bytes).await?, ScanType::ScannedPdf))
}
