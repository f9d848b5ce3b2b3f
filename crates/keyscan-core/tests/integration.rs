//! Integration tests for the search pipeline end to end.
//!
//! Uses mock extractor and OCR backends so these tests run without
//! poppler-utils or tesseract installed.

use std::sync::atomic::{AtomicUsize, Ordering};

use keyscan_core::config::{CachePolicy, SearchConfig};
use keyscan_core::error::KeyscanError;
use keyscan_core::extraction::{OcrEngine, PdfExtractor, TextSource};
use keyscan_core::model::{MatchDetail, SearchMode};
use keyscan_core::report::ResultTable;
use keyscan_core::{search_pdf, Searcher};

const PDF: &[u8] = b"%PDF-1.7 mock document";

struct MockExtractor {
    pages: Vec<&'static str>,
    calls: AtomicUsize,
}

impl MockExtractor {
    fn new(pages: &[&'static str]) -> Self {
        MockExtractor {
            pages: pages.to_vec(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl PdfExtractor for MockExtractor {
    fn extract_native(&self, _pdf_bytes: &[u8]) -> Result<Vec<String>, KeyscanError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.iter().map(|s| s.to_string()).collect())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

/// Returns a fixed text for each listed page and fails for any other page.
struct MockOcr {
    pages: Vec<(usize, &'static str)>,
    calls: AtomicUsize,
}

impl MockOcr {
    fn new(pages: &[(usize, &'static str)]) -> Self {
        MockOcr {
            pages: pages.to_vec(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl OcrEngine for MockOcr {
    fn recognize_page(&self, _pdf_bytes: &[u8], page_number: usize) -> Result<String, KeyscanError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .iter()
            .find(|(n, _)| *n == page_number)
            .map(|(_, text)| text.to_string())
            .ok_or_else(|| {
                KeyscanError::Extraction(format!("OCR called for page {page_number} with native text"))
            })
    }

    fn backend_name(&self) -> &str {
        "mock-ocr"
    }
}

struct FailingExtractor;

impl PdfExtractor for FailingExtractor {
    fn extract_native(&self, _pdf_bytes: &[u8]) -> Result<Vec<String>, KeyscanError> {
        Err(KeyscanError::PdftotextFailed {
            code: 1,
            stderr: "Syntax Error: Couldn't find trailer dictionary".into(),
        })
    }

    fn backend_name(&self) -> &str {
        "failing"
    }
}

fn config(mode: SearchMode) -> SearchConfig {
    SearchConfig {
        mode,
        ..Default::default()
    }
}

fn pages_of(detail: &MatchDetail) -> Vec<usize> {
    match detail {
        MatchDetail::Pages { pages } => pages.clone(),
        other => panic!("expected page detail, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Page-level search with OCR fallback on the blank page
// ---------------------------------------------------------------------------
#[test]
fn page_search_with_ocr_fallback() {
    let extractor = MockExtractor::new(&["Invoice 2024", "", "Total: 500"]);
    let ocr = MockOcr::new(&[(2, "Page intentionally blank")]);

    let outcome = search_pdf(
        PDF,
        &extractor,
        &ocr,
        &["Invoice", "500", "Blank"],
        &config(SearchMode::Pages),
    )
    .unwrap();

    assert_eq!(outcome.results.len(), 3);
    assert_eq!(pages_of(&outcome.results[0].detail), vec![1]);
    assert_eq!(pages_of(&outcome.results[1].detail), vec![3]);
    assert_eq!(pages_of(&outcome.results[2].detail), vec![2]);
    assert!(outcome.results.iter().all(|r| r.found));
    // only the page without native text went through OCR
    assert_eq!(ocr.calls.load(Ordering::SeqCst), 1);

    let table = ResultTable::from_outcome(&outcome, &SearchConfig::default().fields);
    assert_eq!(table.rows[2], vec!["Blank", "Yes", "2"]);
}

// ---------------------------------------------------------------------------
// OCR is never invoked when every page has a text layer
// ---------------------------------------------------------------------------
#[test]
fn native_text_never_triggers_ocr() {
    let extractor = MockExtractor::new(&["alpha", "beta", "gamma"]);
    let ocr = MockOcr::new(&[]);
    let searcher = Searcher::new(&extractor, &ocr, config(SearchMode::Pages));

    let pages = searcher.pages(PDF).unwrap();
    assert!(pages.iter().all(|p| p.source == TextSource::Native));
    assert_eq!(ocr.calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Blank keywords are dropped, the rest keep order and duplicates
// ---------------------------------------------------------------------------
#[test]
fn blank_keywords_dropped_and_order_kept() {
    let extractor = MockExtractor::new(&["Roll 14 present", "Roll 15 absent"]);
    let ocr = MockOcr::new(&[]);

    let outcome = search_pdf(
        PDF,
        &extractor,
        &ocr,
        &["  ", "absent", "", "ROLL", "absent"],
        &config(SearchMode::Pages),
    )
    .unwrap();

    let keywords: Vec<&str> = outcome.results.iter().map(|r| r.keyword.as_str()).collect();
    assert_eq!(keywords, vec!["absent", "ROLL", "absent"]);
    assert_eq!(pages_of(&outcome.results[1].detail), vec![1, 2]);
}

// ---------------------------------------------------------------------------
// Line-level search reports the first matching line only
// ---------------------------------------------------------------------------
#[test]
fn line_search_reports_first_line() {
    let extractor = MockExtractor::new(&[
        "Notice\n  APP-1001 provisionally allotted  \n",
        "APP-1001 reporting date 12 July\n",
    ]);
    let ocr = MockOcr::new(&[]);

    let outcome =
        search_pdf(PDF, &extractor, &ocr, &["app-1001", "APP-2"], &config(SearchMode::Lines))
            .unwrap();

    match &outcome.results[0].detail {
        MatchDetail::Line { line: Some(line) } => {
            assert_eq!(line.text, "APP-1001 provisionally allotted");
            assert_eq!(line.page_number, 1);
        }
        other => panic!("unexpected detail {other:?}"),
    }
    assert!(!outcome.results[1].found);
    assert_eq!(outcome.found_count(), 1);
}

// ---------------------------------------------------------------------------
// Fixed-field parsing of pipe-delimited rows
// ---------------------------------------------------------------------------
#[test]
fn fields_search_parses_matched_row() {
    let extractor = MockExtractor::new(&[
        "Common Merit No | Application No | Seat No | Category | Remarks\n\
         118 | 24100233 | MED-0042 | OBC | Joined\n\
         119 | 24100871 | MED-0043 | GEN |\n",
    ]);
    let ocr = MockOcr::new(&[]);

    let outcome = search_pdf(
        PDF,
        &extractor,
        &ocr,
        &["24100871", "99999999"],
        &config(SearchMode::Fields),
    )
    .unwrap();

    let table = ResultTable::from_outcome(&outcome, &SearchConfig::default().fields);
    assert_eq!(
        table.columns,
        vec![
            "Keyword",
            "Found",
            "Common Merit No",
            "Application No",
            "Seat No",
            "Category",
            "Remarks",
            "Raw Line"
        ]
    );
    assert_eq!(
        table.rows[0],
        vec![
            "24100871",
            "Yes",
            "119",
            "24100871",
            "MED-0043",
            "GEN",
            "",
            "119 | 24100871 | MED-0043 | GEN |"
        ]
    );
    assert_eq!(table.rows[1][1], "No");
}

// ---------------------------------------------------------------------------
// Header-driven table spanning two pages
// ---------------------------------------------------------------------------
#[test]
fn table_search_across_pages() {
    let extractor = MockExtractor::new(&[
        "Allotment List Round 2\n\
         Merit No    Application No    Seat No    Category    Remarks\n\
         1           24100001          ENG-11     GEN         Allotted\n\
         2           24100002          ENG-12     SC          Allotted\n\
         Page 1\n",
        "",
    ]);
    let ocr = MockOcr::new(&[(
        2,
        "3           24100003          ENG-13     OBC         Waitlisted\n\
         4           24100004          ENG-14     GEN\n",
    )]);

    let searcher = Searcher::new(&extractor, &ocr, config(SearchMode::Table));
    let outcome = searcher.search(PDF, &["24100003", "ENG-14"]).unwrap();

    let table = outcome.table.as_ref().unwrap();
    assert_eq!(table.column_count(), 5);
    assert_eq!(table.rows.len(), 3);
    assert!(table.rows.iter().all(|r| r.cells.len() == 5));

    match &outcome.results[0].detail {
        MatchDetail::Row { cells, .. } => assert_eq!(cells[4], "Waitlisted"),
        other => panic!("unexpected detail {other:?}"),
    }
    // the ENG-14 line has only four columns and was dropped
    assert!(!outcome.results[1].found);

    let flat = ResultTable::from_outcome(&outcome, &searcher.config().fields);
    assert_eq!(flat.columns[2], "Merit No");
    assert_eq!(flat.columns.last().map(String::as_str), Some("Raw Line"));
}

#[test]
fn table_mode_without_header_is_a_distinct_error() {
    let extractor = MockExtractor::new(&["Plain prose only.\nNothing tabular here."]);
    let ocr = MockOcr::new(&[]);

    let err = search_pdf(PDF, &extractor, &ocr, &["prose"], &config(SearchMode::Table))
        .unwrap_err();
    assert!(matches!(err, KeyscanError::NoHeaderDetected { .. }));
}

// ---------------------------------------------------------------------------
// Missing input and extraction failures
// ---------------------------------------------------------------------------
#[test]
fn missing_keywords_is_reported() {
    let extractor = MockExtractor::new(&["text"]);
    let ocr = MockOcr::new(&[]);

    let err = search_pdf(PDF, &extractor, &ocr, &["   ", ""], &config(SearchMode::Pages))
        .unwrap_err();
    assert!(matches!(err, KeyscanError::MissingInput(_)));
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_document_is_reported() {
    let extractor = MockExtractor::new(&["text"]);
    let ocr = MockOcr::new(&[]);

    let err = search_pdf(&[], &extractor, &ocr, &["text"], &config(SearchMode::Pages))
        .unwrap_err();
    assert!(matches!(err, KeyscanError::MissingInput(_)));
}

#[test]
fn extraction_failure_propagates() {
    let ocr = MockOcr::new(&[]);
    let err = search_pdf(PDF, &FailingExtractor, &ocr, &["x"], &config(SearchMode::Pages))
        .unwrap_err();
    assert!(err.is_document_error());
}

#[test]
fn ocr_failure_fails_the_whole_search() {
    let extractor = MockExtractor::new(&["ok", ""]);
    // no OCR text registered for page 2, so the mock errors
    let ocr = MockOcr::new(&[]);
    let err = search_pdf(PDF, &extractor, &ocr, &["ok"], &config(SearchMode::Pages))
        .unwrap_err();
    assert!(err.is_document_error());
}

#[test]
fn empty_document_gives_all_no() {
    let extractor = MockExtractor::new(&[]);
    let ocr = MockOcr::new(&[]);

    let outcome =
        search_pdf(PDF, &extractor, &ocr, &["a", "b"], &config(SearchMode::Lines)).unwrap();
    assert_eq!(outcome.results.len(), 2);
    assert!(!outcome.has_matches());
}

// ---------------------------------------------------------------------------
// Extraction cache
// ---------------------------------------------------------------------------
#[test]
fn repeated_searches_reuse_extraction() {
    let extractor = MockExtractor::new(&["", "text"]);
    let ocr = MockOcr::new(&[(1, "scanned")]);
    let searcher = Searcher::new(&extractor, &ocr, config(SearchMode::Pages));

    searcher.search(PDF, &["scanned"]).unwrap();
    searcher.search(PDF, &["text"]).unwrap();
    searcher.lines(PDF).unwrap();

    assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    assert_eq!(ocr.calls.load(Ordering::SeqCst), 1);
    assert_eq!(searcher.cache().len(), 1);
}

#[test]
fn disabled_cache_extracts_every_time() {
    let extractor = MockExtractor::new(&["text"]);
    let ocr = MockOcr::new(&[]);
    let mut cfg = config(SearchMode::Pages);
    cfg.cache = CachePolicy::Disabled;
    let searcher = Searcher::new(&extractor, &ocr, cfg);

    searcher.search(PDF, &["text"]).unwrap();
    searcher.search(PDF, &["text"]).unwrap();

    assert_eq!(extractor.calls.load(Ordering::SeqCst), 2);
}

// ---------------------------------------------------------------------------
// CSV export round trip
// ---------------------------------------------------------------------------
#[test]
fn csv_export_round_trips() {
    let extractor = MockExtractor::new(&["Alpha, Inc.", "alpha \"quoted\"", "beta"]);
    let ocr = MockOcr::new(&[]);

    let outcome =
        search_pdf(PDF, &extractor, &ocr, &["alpha", "zeta"], &config(SearchMode::Pages)).unwrap();
    let table = ResultTable::from_outcome(&outcome, &SearchConfig::default().fields);
    let csv = table.to_csv().unwrap();

    assert!(csv.starts_with("Keyword,Found,Pages Found On\n"));
    assert_eq!(ResultTable::from_csv(&csv).unwrap(), table);
    assert_eq!(table.rows[0], vec!["alpha", "Yes", "1, 2"]);
}
