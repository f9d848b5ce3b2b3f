//! Case-insensitive keyword matching at page, line, field and table-row
//! granularity. Every function returns exactly one result per keyword, in
//! the order given; callers normalize the keyword list first.

use crate::config::FieldLayout;
use crate::extraction::PageContent;
use crate::model::{Line, MatchDetail, MatchResult, Table};
use crate::parsing::fields::{empty_fields, parse_fixed_fields};

/// Substring test on lowercased text. `needle` must already be lowercase.
fn contains_lower(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Record every page whose full text contains each keyword.
pub fn match_pages(pages: &[PageContent], keywords: &[String]) -> Vec<MatchResult> {
    let lowered: Vec<String> = pages.iter().map(|p| p.text.to_lowercase()).collect();

    keywords
        .iter()
        .map(|keyword| {
            let needle = keyword.to_lowercase();
            let mut found_on: Vec<usize> = pages
                .iter()
                .zip(&lowered)
                .filter(|(_, text)| text.contains(&needle))
                .map(|(p, _)| p.page_number)
                .collect();
            found_on.sort_unstable();
            found_on.dedup();

            MatchResult {
                keyword: keyword.clone(),
                found: !found_on.is_empty(),
                detail: MatchDetail::Pages { pages: found_on },
            }
        })
        .collect()
}

/// Find the first line, in document order, containing the keyword.
pub fn first_matching_line<'a>(lines: &'a [Line], keyword: &str) -> Option<&'a Line> {
    let needle = keyword.to_lowercase();
    lines.iter().find(|l| contains_lower(&l.text, &needle))
}

/// Report the first matching line for each keyword.
pub fn match_lines(lines: &[Line], keywords: &[String]) -> Vec<MatchResult> {
    keywords
        .iter()
        .map(|keyword| {
            let line = first_matching_line(lines, keyword).cloned();
            MatchResult {
                keyword: keyword.clone(),
                found: line.is_some(),
                detail: MatchDetail::Line { line },
            }
        })
        .collect()
}

/// Report the first matching line for each keyword, split into fixed fields.
pub fn match_fields(lines: &[Line], keywords: &[String], layout: &FieldLayout) -> Vec<MatchResult> {
    keywords
        .iter()
        .map(|keyword| match first_matching_line(lines, keyword) {
            Some(line) => MatchResult {
                keyword: keyword.clone(),
                found: true,
                detail: MatchDetail::Fields {
                    fields: parse_fixed_fields(&line.text, layout),
                    raw_line: Some(line.text.clone()),
                },
            },
            None => MatchResult {
                keyword: keyword.clone(),
                found: false,
                detail: MatchDetail::Fields {
                    fields: empty_fields(layout),
                    raw_line: None,
                },
            },
        })
        .collect()
}

/// Report the first table row with any cell containing the keyword.
pub fn match_table_rows(table: &Table, keywords: &[String]) -> Vec<MatchResult> {
    keywords
        .iter()
        .map(|keyword| {
            let needle = keyword.to_lowercase();
            let row = table
                .rows
                .iter()
                .find(|r| r.cells.iter().any(|c| contains_lower(c, &needle)));

            match row {
                Some(row) => MatchResult {
                    keyword: keyword.clone(),
                    found: true,
                    detail: MatchDetail::Row {
                        cells: row.cells.clone(),
                        raw_line: Some(row.raw_line.clone()),
                    },
                },
                None => MatchResult {
                    keyword: keyword.clone(),
                    found: false,
                    detail: MatchDetail::Row {
                        cells: vec![String::new(); table.column_count()],
                        raw_line: None,
                    },
                },
            }
        })
        .collect()
}
