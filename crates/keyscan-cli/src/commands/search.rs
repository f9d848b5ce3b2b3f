use keyscan_core::error::KeyscanError;
use keyscan_core::model::SearchMode;
use keyscan_core::parsing::keywords::{load_keyword_file, parse_keyword_text};
use keyscan_core::report::ResultTable;
use keyscan_core::Searcher;
use std::path::PathBuf;

use super::SettingsArgs;
use crate::output;

pub fn run(
    input_file: PathBuf,
    keyword_args: Vec<String>,
    keywords_file: Option<PathBuf>,
    mode: Option<&str>,
    settings: &SettingsArgs,
    output_format: &str,
    out: Option<PathBuf>,
) -> Result<(), KeyscanError> {
    let mut config = settings.resolve()?;
    if let Some(mode) = mode {
        config.mode = SearchMode::from_str_loose(mode).ok_or_else(|| {
            KeyscanError::ConfigInvalid(format!(
                "unknown mode '{mode}'. Available: pages, lines, table, fields"
            ))
        })?;
    }

    // Typed keywords first, then the file's, in order
    let mut keywords: Vec<String> = keyword_args
        .iter()
        .flat_map(|k| parse_keyword_text(k))
        .collect();
    if let Some(path) = &keywords_file {
        keywords.extend(load_keyword_file(path)?);
    }

    let pdf_bytes = super::read_pdf(&input_file)?;
    log::debug!(
        "searching {} for {} keyword(s) in {} mode",
        input_file.display(),
        keywords.len(),
        config.mode
    );
    let (extractor, ocr) = super::backends(&config);
    let searcher = Searcher::new(&extractor, &ocr, config);

    let outcome = searcher.search(&pdf_bytes, &keywords)?;
    let table = ResultTable::from_outcome(&outcome, &searcher.config().fields);

    match output_format {
        "json" => output::json::print(&outcome)?,
        "csv" => print!("{}", table.to_csv()?),
        _ => output::table::print(&table),
    }

    if !outcome.has_matches() {
        eprintln!("No matches found.");
    }

    if let Some(path) = out {
        output::csv::write(&path, &table, "result(s)")?;
    }

    Ok(())
}
