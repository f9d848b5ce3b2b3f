pub mod config;
pub mod error;
pub mod extraction;
pub mod matching;
pub mod model;
pub mod parsing;
pub mod report;

use std::sync::Arc;

use config::SearchConfig;
use error::KeyscanError;
use extraction::cache::ExtractionCache;
use extraction::{OcrEngine, PageContent, PdfExtractor};
use model::{Line, SearchMode, SearchOutcome, Table};
use parsing::keywords::normalize_keywords;

/// Runs searches against PDF documents with one extractor/OCR pair and one
/// config, reusing extraction results for repeated documents.
pub struct Searcher<'a> {
    extractor: &'a dyn PdfExtractor,
    ocr: &'a dyn OcrEngine,
    config: SearchConfig,
    cache: ExtractionCache,
}

impl<'a> Searcher<'a> {
    pub fn new(
        extractor: &'a dyn PdfExtractor,
        ocr: &'a dyn OcrEngine,
        config: SearchConfig,
    ) -> Self {
        let cache = ExtractionCache::new(config.cache);
        Searcher {
            extractor,
            ocr,
            config,
            cache,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn cache(&self) -> &ExtractionCache {
        &self.cache
    }

    /// Extract every page, falling back to OCR for pages without a text layer.
    pub fn pages(&self, pdf_bytes: &[u8]) -> Result<Arc<Vec<PageContent>>, KeyscanError> {
        require_document(pdf_bytes)?;
        self.cache.get_or_extract(pdf_bytes, || {
            extraction::collect_pages(pdf_bytes, self.extractor, self.ocr, &self.config.ocr)
        })
    }

    /// Trimmed, non-empty lines of the whole document in reading order.
    pub fn lines(&self, pdf_bytes: &[u8]) -> Result<Vec<Line>, KeyscanError> {
        let pages = self.pages(pdf_bytes)?;
        Ok(extraction::collect_lines(&pages))
    }

    /// Extract the header-driven table from the document.
    pub fn table(&self, pdf_bytes: &[u8]) -> Result<Table, KeyscanError> {
        let lines = self.lines(pdf_bytes)?;
        parsing::table::extract_table(&lines, &self.config.table).ok_or_else(|| {
            KeyscanError::NoHeaderDetected {
                tokens: self.config.table.header_tokens.join(", "),
                min_columns: self.config.table.min_columns,
            }
        })
    }

    /// Search the document for each keyword using the configured mode.
    ///
    /// Blank keywords are dropped first; the outcome holds exactly one
    /// result per remaining keyword, in order.
    pub fn search<S: AsRef<str>>(
        &self,
        pdf_bytes: &[u8],
        keywords: &[S],
    ) -> Result<SearchOutcome, KeyscanError> {
        require_document(pdf_bytes)?;
        let keywords = normalize_keywords(keywords);
        if keywords.is_empty() {
            return Err(KeyscanError::MissingInput(
                "no keywords given. Enter keywords or provide a keyword file".into(),
            ));
        }

        let mode = self.config.mode;
        let (results, table) = match mode {
            SearchMode::Pages => {
                let pages = self.pages(pdf_bytes)?;
                (matching::match_pages(&pages, &keywords), None)
            }
            SearchMode::Lines => {
                let lines = self.lines(pdf_bytes)?;
                (matching::match_lines(&lines, &keywords), None)
            }
            SearchMode::Fields => {
                let lines = self.lines(pdf_bytes)?;
                let results = matching::match_fields(&lines, &keywords, &self.config.fields);
                (results, None)
            }
            SearchMode::Table => {
                let table = self.table(pdf_bytes)?;
                (matching::match_table_rows(&table, &keywords), Some(table))
            }
        };

        let outcome = SearchOutcome {
            mode,
            results,
            table,
        };
        log::info!(
            "{} search: {} of {} keyword(s) found",
            mode,
            outcome.found_count(),
            outcome.results.len()
        );
        Ok(outcome)
    }
}

/// Main API entry point: search a PDF for keywords in one call.
pub fn search_pdf<S: AsRef<str>>(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    ocr: &dyn OcrEngine,
    keywords: &[S],
    config: &SearchConfig,
) -> Result<SearchOutcome, KeyscanError> {
    Searcher::new(extractor, ocr, config.clone()).search(pdf_bytes, keywords)
}

fn require_document(pdf_bytes: &[u8]) -> Result<(), KeyscanError> {
    if pdf_bytes.is_empty() {
        return Err(KeyscanError::MissingInput(
            "no document given. Provide a PDF file".into(),
        ));
    }
    Ok(())
}
