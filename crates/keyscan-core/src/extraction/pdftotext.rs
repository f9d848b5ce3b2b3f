use crate::error::KeyscanError;
use crate::extraction::PdfExtractor;
use std::io::Write;
use std::process::Command;

/// Native text extraction using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` so that table columns stay separated by runs of
/// spaces, which the column splitter relies on.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_native(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, KeyscanError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| KeyscanError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| KeyscanError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg("-enc")
            .arg("UTF-8")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    KeyscanError::PdftotextNotFound
                } else {
                    KeyscanError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(KeyscanError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(split_pages(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages.
///
/// pdftotext terminates every page with a form feed, so the text after the
/// last one is not a page. Empty pages are kept: they are the OCR candidates.
fn split_pages(text: &str) -> Vec<String> {
    let body = text.strip_suffix('\x0c').unwrap_or(text);
    if body.is_empty() && !text.contains('\x0c') {
        return Vec::new();
    }
    body.split('\x0c').map(|p| p.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_keeps_empty_pages() {
        let pages = split_pages("Invoice 2024\n\x0c\x0cTotal: 500\n\x0c");
        assert_eq!(pages, vec!["Invoice 2024\n", "", "Total: 500\n"]);
    }

    #[test]
    fn test_split_pages_single_blank_page() {
        assert_eq!(split_pages("\x0c"), vec![String::new()]);
    }

    #[test]
    fn test_split_pages_without_trailing_form_feed() {
        assert_eq!(split_pages("a\x0cb"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_pages_no_output() {
        assert!(split_pages("").is_empty());
    }
}
