use keyscan_core::error::KeyscanError;
use keyscan_core::report::ResultTable;
use keyscan_core::Searcher;
use std::path::PathBuf;

use super::SettingsArgs;
use crate::output;

pub fn run(
    input_file: PathBuf,
    settings: &SettingsArgs,
    output_format: &str,
    out: Option<PathBuf>,
) -> Result<(), KeyscanError> {
    let config = settings.resolve()?;
    let pdf_bytes = super::read_pdf(&input_file)?;
    let (extractor, ocr) = super::backends(&config);
    let searcher = Searcher::new(&extractor, &ocr, config);

    let table = searcher.table(&pdf_bytes)?;
    let flat = ResultTable::from_table(&table);

    match output_format {
        "json" => output::json::print(&table)?,
        "csv" => print!("{}", flat.to_csv()?),
        _ => output::table::print(&flat),
    }

    if flat.is_empty() {
        eprintln!("Header found, but no rows share its {} columns.", table.column_count());
    }

    if let Some(path) = out {
        output::csv::write(&path, &flat, "row(s)")?;
    }

    Ok(())
}
