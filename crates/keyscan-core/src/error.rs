use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum KeyscanError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("{tool} not found. OCR needs pdftoppm (poppler-utils) and tesseract-ocr installed")]
    OcrToolNotFound { tool: &'static str },

    #[error("{tool} failed on page {page} with exit code {code}: {stderr}")]
    OcrFailed {
        tool: &'static str,
        page: usize,
        code: i32,
        stderr: String,
    },

    #[error("{0}")]
    MissingInput(String),

    #[error("no table header detected (expected a line with one of: {tokens} and at least {min_columns} columns)")]
    NoHeaderDetected { tokens: String, min_columns: usize },

    #[error("failed to load keywords from {path}: {reason}")]
    KeywordFile { path: PathBuf, reason: String },

    #[error("unsupported keyword file '{0}'. Use a .txt, .csv or .xlsx file")]
    UnsupportedKeywordFile(String),

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KeyscanError {
    /// True for failures raised while reading the document itself, which the
    /// CLI reports as "unable to process file".
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            KeyscanError::Extraction(_)
                | KeyscanError::PdftotextNotFound
                | KeyscanError::PdftotextFailed { .. }
                | KeyscanError::OcrToolNotFound { .. }
                | KeyscanError::OcrFailed { .. }
        )
    }
}
