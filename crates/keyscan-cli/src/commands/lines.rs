use keyscan_core::error::KeyscanError;
use keyscan_core::Searcher;
use std::path::PathBuf;

use super::SettingsArgs;
use crate::output;

pub fn run(
    input_file: PathBuf,
    settings: &SettingsArgs,
    output_format: &str,
) -> Result<(), KeyscanError> {
    let config = settings.resolve()?;
    let pdf_bytes = super::read_pdf(&input_file)?;
    let (extractor, ocr) = super::backends(&config);
    let searcher = Searcher::new(&extractor, &ocr, config);

    let lines = searcher.lines(&pdf_bytes)?;

    match output_format {
        "json" => output::json::print(&lines)?,
        _ => {
            for line in &lines {
                println!("{:>4}  {}", line.page_number, line.text);
            }
        }
    }

    if lines.is_empty() {
        eprintln!("No text found in document.");
    }

    Ok(())
}
