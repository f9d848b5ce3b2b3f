use keyscan_core::config::{load_config, CachePolicy, SearchConfig};
use keyscan_core::error::KeyscanError;
use std::path::Path;

pub fn show() -> Result<(), KeyscanError> {
    let json = serde_json::to_string_pretty(&SearchConfig::default())?;
    println!("{json}");
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), KeyscanError> {
    let config = load_config(file)?;

    println!("Config '{}' is valid.", file.display());
    println!("  Mode: {}", config.mode);
    if config.ocr.enabled {
        println!(
            "  OCR: {} at {} dpi",
            config.ocr.language, config.ocr.dpi
        );
    } else {
        println!("  OCR: disabled");
    }
    println!(
        "  Table header tokens: {} (min {} columns)",
        config.table.header_tokens.join(", "),
        config.table.min_columns
    );
    println!(
        "  Fields: {} (split on '{}')",
        config.fields.names.join(", "),
        config.fields.delimiter
    );
    let cache = match config.cache {
        CachePolicy::Disabled => "disabled".to_string(),
        CachePolicy::Unbounded => "unbounded".to_string(),
        CachePolicy::Lru { capacity } => format!("LRU, {capacity} document(s)"),
    };
    println!("  Cache: {cache}");

    Ok(())
}
