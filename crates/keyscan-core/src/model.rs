use serde::{Deserialize, Serialize};
use std::fmt;

/// Which matching strategy a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Every page whose text contains the keyword.
    #[default]
    Pages,
    /// The first line containing the keyword.
    Lines,
    /// The first row of the detected table containing the keyword.
    Table,
    /// The first line containing the keyword, split into fixed fields.
    Fields,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Pages => write!(f, "pages"),
            SearchMode::Lines => write!(f, "lines"),
            SearchMode::Table => write!(f, "table"),
            SearchMode::Fields => write!(f, "fields"),
        }
    }
}

impl SearchMode {
    pub fn from_str_loose(s: &str) -> Option<SearchMode> {
        match s.trim().to_lowercase().as_str() {
            "pages" | "page" => Some(SearchMode::Pages),
            "lines" | "line" => Some(SearchMode::Lines),
            "table" | "tables" => Some(SearchMode::Table),
            "fields" | "field" | "fixed" => Some(SearchMode::Fields),
            _ => None,
        }
    }
}

/// A trimmed, non-empty line of page text, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub page_number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// Rows sharing the column count of the first detected header line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub raw_line: String,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchDetail {
    /// 1-based page numbers, ascending.
    Pages { pages: Vec<usize> },
    Line { line: Option<Line> },
    Fields {
        fields: Vec<Field>,
        raw_line: Option<String>,
    },
    Row {
        cells: Vec<String>,
        raw_line: Option<String>,
    },
}

/// One result per requested keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub keyword: String,
    pub found: bool,
    pub detail: MatchDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub mode: SearchMode,
    pub results: Vec<MatchResult>,
    /// The table the row matches were drawn from (table mode only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Table>,
}

impl SearchOutcome {
    pub fn found_count(&self) -> usize {
        self.results.iter().filter(|r| r.found).count()
    }

    pub fn has_matches(&self) -> bool {
        self.found_count() > 0
    }
}
