pub mod config;
pub mod lines;
pub mod search;
pub mod table;

use clap::Args;
use keyscan_core::config::{load_config, validate_config, SearchConfig};
use keyscan_core::error::KeyscanError;
use keyscan_core::extraction::pdftotext::PdftotextExtractor;
use keyscan_core::extraction::tesseract::TesseractOcr;
use std::path::{Path, PathBuf};

/// Flags shared by every command that reads a PDF.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// JSON config file (defaults apply to anything it leaves out)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// OCR raster resolution for pages without a text layer
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Tesseract language, e.g. "eng" or "eng+hin"
    #[arg(long = "lang", value_name = "LANG")]
    pub language: Option<String>,

    /// Do not OCR pages without a text layer
    #[arg(long)]
    pub no_ocr: bool,
}

impl SettingsArgs {
    /// Load the config file (if any) and apply flag overrides on top.
    pub fn resolve(&self) -> Result<SearchConfig, KeyscanError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SearchConfig::default(),
        };

        if let Some(dpi) = self.dpi {
            config.ocr.dpi = dpi;
        }
        if let Some(ref language) = self.language {
            config.ocr.language = language.clone();
        }
        if self.no_ocr {
            config.ocr.enabled = false;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

/// Read the PDF named on the command line. An unreadable or zero-byte file is
/// a document error, not missing input: the path argument is required.
pub fn read_pdf(path: &Path) -> Result<Vec<u8>, KeyscanError> {
    let bytes = std::fs::read(path)
        .map_err(|e| KeyscanError::Extraction(format!("cannot read {}: {e}", path.display())))?;
    if bytes.is_empty() {
        return Err(KeyscanError::Extraction(format!(
            "{} is an empty file",
            path.display()
        )));
    }
    Ok(bytes)
}

/// Build the poppler/tesseract backends for a resolved config.
pub fn backends(config: &SearchConfig) -> (PdftotextExtractor, TesseractOcr) {
    if config.ocr.enabled && !TesseractOcr::is_available() {
        log::warn!("OCR is enabled but pdftoppm/tesseract are missing; scanned pages will fail");
    }
    (PdftotextExtractor::new(), TesseractOcr::from_config(&config.ocr))
}
