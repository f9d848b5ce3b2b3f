use keyscan_core::report::ResultTable;

/// Longest cell shown before truncation; raw lines can be very wide.
const MAX_CELL_WIDTH: usize = 60;

pub fn print(table: &ResultTable) {
    print!("{}", format_table(table));
}

/// Render a result table as aligned plain-text columns.
pub fn format_table(table: &ResultTable) -> String {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| truncate(c)).collect())
        .collect();

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(&table.columns, &widths));
    out.push_str(&format!(
        "  {}\n",
        "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1))
    ));
    for row in &cells {
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect();
    format!("  {}\n", padded.join("  ").trim_end())
}

fn truncate(cell: &str) -> String {
    // multi-line cells (OCR output) are flattened for display
    let flat = cell.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let mut short: String = flat.chars().take(MAX_CELL_WIDTH - 3).collect();
    short.push_str("...");
    short
}
