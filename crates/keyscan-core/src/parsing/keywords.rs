use std::io::Cursor;
use std::path::Path;

use calamine::{Reader, Xlsx};

use crate::error::KeyscanError;

/// Trim keywords and drop blank ones. Order and duplicates are preserved.
pub fn normalize_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse newline-delimited free text, one keyword per line.
pub fn parse_keyword_text(text: &str) -> Vec<String> {
    normalize_keywords(&text.lines().collect::<Vec<_>>())
}

/// Parse a header-less CSV file and take its first column.
pub fn parse_keyword_csv(bytes: &[u8]) -> Result<Vec<String>, KeyscanError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut keywords = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(first) = record.get(0) {
            keywords.push(first.to_string());
        }
    }

    Ok(normalize_keywords(&keywords))
}

/// Take the first column of the first worksheet of an xlsx workbook.
pub fn parse_keyword_xlsx(bytes: &[u8]) -> Result<Vec<String>, KeyscanError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| KeyscanError::Extraction(format!("failed to open xlsx: {e}")))?;

    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| KeyscanError::Extraction("xlsx workbook has no worksheets".into()))?
        .map_err(|e| KeyscanError::Extraction(format!("failed to read worksheet: {e}")))?;

    let keywords: Vec<String> = sheet
        .rows()
        .filter_map(|row| row.first())
        .filter_map(cell_as_string)
        .collect();

    Ok(normalize_keywords(&keywords))
}

/// Load keywords from a `.txt`, `.csv` or `.xlsx` file.
pub fn load_keyword_file(path: &Path) -> Result<Vec<String>, KeyscanError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !matches!(extension.as_str(), "txt" | "csv" | "xlsx") {
        return Err(KeyscanError::UnsupportedKeywordFile(
            path.display().to_string(),
        ));
    }

    let bytes = std::fs::read(path).map_err(|e| KeyscanError::KeywordFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let wrap = |e: KeyscanError| KeyscanError::KeywordFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    match extension.as_str() {
        "txt" => {
            let text = String::from_utf8(bytes).map_err(|e| KeyscanError::KeywordFile {
                path: path.to_path_buf(),
                reason: format!("not valid UTF-8: {e}"),
            })?;
            Ok(parse_keyword_text(text.strip_prefix('\u{feff}').unwrap_or(&text)))
        }
        "csv" => parse_keyword_csv(&bytes).map_err(wrap),
        _ => parse_keyword_xlsx(&bytes).map_err(wrap),
    }
}

fn cell_as_string(cell: &calamine::Data) -> Option<String> {
    match cell {
        calamine::Data::String(s) => Some(s.clone()),
        calamine::Data::Float(f) => Some(f.to_string()),
        calamine::Data::Int(i) => Some(i.to_string()),
        calamine::Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}
