pub mod fields;
pub mod keywords;
pub mod table;

use regex::Regex;
use std::sync::LazyLock;

/// Runs of two or more whitespace characters, or a pipe with any surrounding
/// whitespace.
static COLUMN_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\|\s*|\s{2,}").expect("column delimiter regex is valid"));

/// Split a layout line into columns.
///
/// `pdftotext -layout` separates table cells with runs of spaces, while
/// single spaces occur inside cell values, so only gaps of 2+ whitespace
/// characters (or pipes) count as delimiters. Empty segments are dropped.
pub fn split_columns(line: &str) -> Vec<&str> {
    COLUMN_DELIMITER
        .split(line)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
