use crate::config::FieldLayout;
use crate::error::KeyscanError;
use crate::model::{MatchDetail, SearchMode, SearchOutcome, Table};
use serde::Serialize;

/// File name offered for the CSV export.
pub const DEFAULT_EXPORT_NAME: &str = "keyword_search_results.csv";

/// A flat, display-ready table: Keyword and Found first, then the
/// mode-specific columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Flatten a search outcome. `layout` supplies the column names for
    /// fields mode when the outcome has no results to take them from.
    pub fn from_outcome(outcome: &SearchOutcome, layout: &FieldLayout) -> Self {
        let mut columns = vec!["Keyword".to_string(), "Found".to_string()];
        match outcome.mode {
            SearchMode::Pages => columns.push("Pages Found On".into()),
            SearchMode::Lines => columns.push("Line".into()),
            SearchMode::Fields => {
                columns.extend(layout.names.iter().cloned());
                columns.push("Raw Line".into());
            }
            SearchMode::Table => {
                if let Some(table) = &outcome.table {
                    columns.extend(table.header.iter().cloned());
                }
                columns.push("Raw Line".into());
            }
        }

        let rows = outcome
            .results
            .iter()
            .map(|result| {
                let mut row = vec![result.keyword.clone(), yes_no(result.found).to_string()];
                match &result.detail {
                    MatchDetail::Pages { pages } => row.push(
                        pages
                            .iter()
                            .map(|p| p.to_string())
                            .collect::<Vec<_>>()
                            .join(", "),
                    ),
                    MatchDetail::Line { line } => {
                        row.push(line.as_ref().map(|l| l.text.clone()).unwrap_or_default())
                    }
                    MatchDetail::Fields { fields, raw_line } => {
                        row.extend(fields.iter().map(|f| f.value.clone()));
                        row.push(raw_line.clone().unwrap_or_default());
                    }
                    MatchDetail::Row { cells, raw_line } => {
                        row.extend(cells.iter().cloned());
                        row.push(raw_line.clone().unwrap_or_default());
                    }
                }
                row
            })
            .collect();

        ResultTable { columns, rows }
    }

    /// The extracted table itself, header as columns.
    pub fn from_table(table: &Table) -> Self {
        ResultTable {
            columns: table.header.clone(),
            rows: table.rows.iter().map(|r| r.cells.clone()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize as UTF-8 CSV with a header row. Fields are quoted only when
    /// they contain a delimiter, quote or line break.
    pub fn to_csv(&self) -> Result<String, KeyscanError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(false)
            .from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| KeyscanError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| KeyscanError::Extraction(format!("CSV output is not UTF-8: {e}")))
    }

    /// Parse CSV produced by [`ResultTable::to_csv`].
    pub fn from_csv(data: &str) -> Result<Self, KeyscanError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes());
        let columns = reader.headers()?.iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|r| r.map(|rec| rec.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;
        Ok(ResultTable { columns, rows })
    }
}

fn yes_no(found: bool) -> &'static str {
    if found {
        "Yes"
    } else {
        "No"
    }
}
