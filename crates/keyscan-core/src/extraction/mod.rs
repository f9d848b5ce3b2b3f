pub mod cache;
pub mod pdftotext;
pub mod tesseract;

use crate::config::OcrConfig;
use crate::error::KeyscanError;
use crate::model::Line;
use serde::{Deserialize, Serialize};

/// Where a page's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    Native,
    Ocr,
    /// No text layer and OCR disabled.
    Empty,
}

/// Text extracted from a single page of a PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub page_number: usize,
    pub text: String,
    pub source: TextSource,
}

/// Trait for native text-layer extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract the text layer of every page, one entry per page in page
    /// order. Pages without a text layer yield an empty (or blank) string.
    fn extract_native(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, KeyscanError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Trait for OCR backends that rasterise and recognise a single page.
pub trait OcrEngine: Send + Sync {
    /// Recognise the text of one page (1-based). An empty string is a valid
    /// result, not an error.
    fn recognize_page(&self, pdf_bytes: &[u8], page_number: usize)
        -> Result<String, KeyscanError>;

    fn backend_name(&self) -> &str;
}

/// Resolve the text of one page, falling back to OCR only when the native
/// text is blank.
pub fn extract_page_text(
    native: String,
    page_number: usize,
    pdf_bytes: &[u8],
    ocr: &dyn OcrEngine,
    ocr_config: &OcrConfig,
) -> Result<PageContent, KeyscanError> {
    if !native.trim().is_empty() {
        log::debug!("page {page_number}: using native text layer");
        return Ok(PageContent {
            page_number,
            text: native,
            source: TextSource::Native,
        });
    }

    if !ocr_config.enabled {
        log::debug!("page {page_number}: no text layer and OCR disabled");
        return Ok(PageContent {
            page_number,
            text: String::new(),
            source: TextSource::Empty,
        });
    }

    log::info!(
        "page {page_number}: no text layer, running OCR ({})",
        ocr.backend_name()
    );
    let text = ocr.recognize_page(pdf_bytes, page_number)?;
    if text.trim().is_empty() {
        log::debug!("page {page_number}: OCR produced no text");
    }

    Ok(PageContent {
        page_number,
        text,
        source: TextSource::Ocr,
    })
}

/// Extract every page of a document, in page order.
pub fn collect_pages(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    ocr: &dyn OcrEngine,
    ocr_config: &OcrConfig,
) -> Result<Vec<PageContent>, KeyscanError> {
    let native_pages = extractor.extract_native(pdf_bytes)?;
    log::debug!(
        "{} returned {} page(s)",
        extractor.backend_name(),
        native_pages.len()
    );

    native_pages
        .into_iter()
        .enumerate()
        .map(|(i, native)| extract_page_text(native, i + 1, pdf_bytes, ocr, ocr_config))
        .collect()
}

/// Flatten pages into trimmed, non-empty lines in reading order.
/// Duplicate lines are kept.
pub fn collect_lines(pages: &[PageContent]) -> Vec<Line> {
    pages
        .iter()
        .flat_map(|p| {
            p.text.lines().filter_map(move |l| {
                let trimmed = l.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Line {
                        page_number: p.page_number,
                        text: trimmed.to_string(),
                    })
                }
            })
        })
        .collect()
}
