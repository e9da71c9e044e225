use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info};

use super::{OcrBackend, OcrError};
use crate::config::OcrConfig;

/// Shells out to poppler (`pdftotext`, `pdftoppm`) and `tesseract`.
///
/// Each call works in its own temp directory, removed when the call returns.
#[derive(Clone, Debug)]
pub struct CliOcrBackend {
    config: OcrConfig,
}

impl CliOcrBackend {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    async fn run<I, S>(&self, program: &str, args: I) -> Result<Vec<u8>, OcrError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            return Err(OcrError::ToolFailed {
                tool: program.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }

    async fn tesseract(&self, image: &Path) -> Result<String, OcrError> {
        let stdout = self
            .run(
                &self.config.tesseract_cmd,
                [image.as_os_str(), OsStr::new("stdout"), OsStr::new("-l"), OsStr::new(&self.config.lang)],
            )
            .await?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

fn workdir() -> Result<TempDir, OcrError> {
    Ok(tempfile::Builder::new().prefix("ocr-").tempdir()?)
}

async fn stage(dir: &TempDir, name: &str, bytes: &[u8]) -> Result<PathBuf, OcrError> {
    let path = dir.path().join(name);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

/// pdftotext ends every page with a form feed.
fn join_pages(raw: &str) -> String {
    let mut pages: Vec<&str> = raw.split('\u{c}').collect();
    if pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages.join("\n")
}

/// pdftoppm names pages `<prefix>-<n>.png`, zero-padding `n` to the width of
/// the page count.
fn page_number(path: &Path) -> Option<u32> {
    path.file_stem()?.to_str()?.rsplit_once('-')?.1.parse().ok()
}

#[async_trait]
impl OcrBackend for CliOcrBackend {
    async fn text_layer(&self, pdf: &[u8]) -> Result<String, OcrError> {
        let dir = workdir()?;
        let input = stage(&dir, "input.pdf", pdf).await?;

        let stdout = self
            .run(
                &self.config.pdftotext_cmd,
                [OsStr::new("-enc"), OsStr::new("UTF-8"), input.as_os_str(), OsStr::new("-")],
            )
            .await?;

        Ok(join_pages(&String::from_utf8_lossy(&stdout)))
    }

    async fn rasterize_and_recognize(&self, pdf: &[u8]) -> Result<String, OcrError> {
        let dir = workdir()?;
        let input = stage(&dir, "input.pdf", pdf).await?;
        let prefix = dir.path().join("page");
        let dpi = self.config.dpi.to_string();

        self.run(
            &self.config.pdftoppm_cmd,
            [OsStr::new("-r"), OsStr::new(&dpi), OsStr::new("-png"), input.as_os_str(), prefix.as_os_str()],
        )
        .await?;

        let mut pages = Vec::new();
        let mut entries = tokio::fs::read_dir(dir.path()).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "png") {
                if let Some(n) = page_number(&path) {
                    pages.push((n, path));
                }
            }
        }
        pages.sort_by_key(|(n, _)| *n);
        info!("rasterized {} page(s) at {} dpi", pages.len(), self.config.dpi);

        let mut text = Vec::with_capacity(pages.len());
        for (n, page) in &pages {
            debug!("recognizing page {n}");
            text.push(self.tesseract(page).await?);
        }

        Ok(text.join("\n"))
    }

    async fn recognize_image(&self, image: &[u8]) -> Result<String, OcrError> {
        let dir = workdir()?;
        let input = stage(&dir, "input.img", image).await?;
        self.tesseract(&input).await
    }
}
