use keyscan_core::error::KeyscanError;
use keyscan_core::report::ResultTable;
use std::path::Path;

/// Write the CSV export of `table` to `path`.
pub fn write(path: &Path, table: &ResultTable, what: &str) -> Result<(), KeyscanError> {
    let csv = table.to_csv()?;
    std::fs::write(path, csv)?;
    eprintln!("Wrote {} {} to {}", table.rows.len(), what, path.display());
    Ok(())
}
