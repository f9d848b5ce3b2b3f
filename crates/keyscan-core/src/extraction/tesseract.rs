use crate::config::OcrConfig;
use crate::error::KeyscanError;
use crate::extraction::OcrEngine;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

/// OCR backend that rasterises a page with `pdftoppm` and recognises it with
/// the `tesseract` command-line tool.
pub struct TesseractOcr {
    dpi: u32,
    language: String,
}

impl TesseractOcr {
    pub fn new(dpi: u32, language: impl Into<String>) -> Self {
        TesseractOcr {
            dpi,
            language: language.into(),
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.dpi, config.language.clone())
    }

    /// Check if both pdftoppm and tesseract are available on the system.
    pub fn is_available() -> bool {
        let pdftoppm = Command::new("pdftoppm")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false);
        let tesseract = Command::new("tesseract")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);

        if !pdftoppm {
            log::debug!("pdftoppm not found - install poppler-utils for OCR support");
        }
        if !tesseract {
            log::debug!("tesseract not found - install tesseract-ocr for OCR support");
        }

        pdftoppm && tesseract
    }

    fn rasterize(&self, pdf_path: &Path, page_number: usize, prefix: &Path) -> Result<(), KeyscanError> {
        let page = page_number.to_string();
        let output = run_tool(
            "pdftoppm",
            Command::new("pdftoppm")
                .arg("-f")
                .arg(&page)
                .arg("-l")
                .arg(&page)
                .arg("-r")
                .arg(self.dpi.to_string())
                .arg("-png")
                .arg("-singlefile")
                .arg(pdf_path)
                .arg(prefix),
        )?;
        check_status("pdftoppm", page_number, &output)
    }

    fn recognize_image(&self, image_path: &Path, page_number: usize) -> Result<String, KeyscanError> {
        let output = run_tool(
            "tesseract",
            Command::new("tesseract")
                .arg(image_path)
                .arg("stdout")
                .arg("-l")
                .arg(&self.language),
        )?;
        check_status("tesseract", page_number, &output)?;

        if !output.stderr.is_empty() {
            // tesseract reports resolution estimates etc. on stderr even on success
            log::debug!(
                "tesseract page {page_number}: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::from_config(&OcrConfig::default())
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize_page(&self, pdf_bytes: &[u8], page_number: usize) -> Result<String, KeyscanError> {
        let dir = tempfile::tempdir()?;
        let pdf_path = dir.path().join("input.pdf");
        let mut file = std::fs::File::create(&pdf_path)?;
        file.write_all(pdf_bytes)?;
        drop(file);

        // -singlefile writes exactly <prefix>.png
        let prefix = dir.path().join("page");
        self.rasterize(&pdf_path, page_number, &prefix)?;

        let image_path = prefix.with_extension("png");
        if !image_path.exists() {
            return Err(KeyscanError::Extraction(format!(
                "pdftoppm produced no image for page {page_number}"
            )));
        }

        log::debug!(
            "rendered page {page_number} at {} dpi, running tesseract ({})",
            self.dpi,
            self.language
        );
        self.recognize_image(&image_path, page_number)
    }

    fn backend_name(&self) -> &str {
        "tesseract"
    }
}

fn run_tool(tool: &'static str, command: &mut Command) -> Result<Output, KeyscanError> {
    command.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            KeyscanError::OcrToolNotFound { tool }
        } else {
            KeyscanError::Extraction(format!("{tool} failed to start: {e}"))
        }
    })
}

fn check_status(tool: &'static str, page: usize, output: &Output) -> Result<(), KeyscanError> {
    if output.status.success() {
        return Ok(());
    }
    Err(KeyscanError::OcrFailed {
        tool,
        page,
        code: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}
