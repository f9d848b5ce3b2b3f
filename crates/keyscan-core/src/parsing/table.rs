use crate::config::{RepeatedHeaders, TableConfig};
use crate::model::{Line, Table, TableRow};
use crate::parsing::split_columns;

/// Detect if a line looks like a table header row: it must mention one of
/// the header tokens and split into at least `min_columns` columns.
pub fn is_table_header(line: &str, config: &TableConfig) -> bool {
    let lower = line.to_lowercase();
    let has_token = config
        .header_tokens
        .iter()
        .map(|t| t.trim().to_lowercase())
        .any(|t| !t.is_empty() && lower.contains(&t));

    has_token && split_columns(line).len() >= config.min_columns
}

/// Reconstruct the table anchored at the first header line.
///
/// Every later line with exactly as many columns as the header becomes a
/// row; lines with any other column count are skipped. Returns `None` when
/// no line qualifies as a header.
pub fn extract_table(lines: &[Line], config: &TableConfig) -> Option<Table> {
    let header_index = lines
        .iter()
        .position(|l| is_table_header(&l.text, config))?;

    let header: Vec<String> = split_columns(&lines[header_index].text)
        .into_iter()
        .map(str::to_string)
        .collect();
    let column_count = header.len();
    log::debug!(
        "table header on page {} with {} columns: {:?}",
        lines[header_index].page_number,
        column_count,
        header
    );

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for line in &lines[header_index + 1..] {
        let cells = split_columns(&line.text);
        if cells.len() != column_count {
            skipped += 1;
            continue;
        }

        if config.repeated_headers == RepeatedHeaders::Skip && is_repeated_header(&cells, &header)
        {
            log::debug!("skipping repeated header on page {}", line.page_number);
            continue;
        }

        rows.push(TableRow {
            cells: cells.into_iter().map(str::to_string).collect(),
            raw_line: line.text.clone(),
        });
    }

    log::debug!(
        "table: {} row(s) kept, {} line(s) with a different column count skipped",
        rows.len(),
        skipped
    );

    Some(Table { header, rows })
}

fn is_repeated_header(cells: &[&str], header: &[String]) -> bool {
    cells
        .iter()
        .zip(header)
        .all(|(c, h)| c.to_lowercase() == h.to_lowercase())
}
