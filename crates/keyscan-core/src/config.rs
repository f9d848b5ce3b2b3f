use crate::error::KeyscanError;
use crate::model::SearchMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Search settings, usually loaded from a JSON file and then overridden by
/// command-line flags. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub mode: SearchMode,
    pub ocr: OcrConfig,
    pub table: TableConfig,
    pub fields: FieldLayout,
    pub cache: CachePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// When false, pages without a text layer are reported as empty.
    pub enabled: bool,
    /// Raster resolution used before running OCR.
    pub dpi: u32,
    /// Tesseract language code(s), e.g. "eng" or "eng+hin".
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        OcrConfig {
            enabled: true,
            dpi: 300,
            language: "eng".into(),
        }
    }
}

/// Header heuristic for the header-driven table parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// A header line must contain at least one of these (case-insensitive).
    pub header_tokens: Vec<String>,
    /// A header line must split into at least this many columns.
    pub min_columns: usize,
    pub repeated_headers: RepeatedHeaders,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            header_tokens: ["application", "seat", "category", "merit", "remarks"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_columns: 3,
            repeated_headers: RepeatedHeaders::default(),
        }
    }
}

/// What to do with a later line that repeats the active header, as happens
/// when a table continues across pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatedHeaders {
    /// Keep it as a data row when its column count matches.
    #[default]
    AsData,
    /// Drop lines whose cells equal the header's cells.
    Skip,
}

/// Positional field names for fixed-field row parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLayout {
    pub delimiter: String,
    pub names: Vec<String>,
}

impl Default for FieldLayout {
    fn default() -> Self {
        FieldLayout {
            delimiter: "|".into(),
            names: [
                "Common Merit No",
                "Application No",
                "Seat No",
                "Category",
                "Remarks",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Eviction policy for the per-document extraction cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum CachePolicy {
    Disabled,
    Unbounded,
    Lru { capacity: usize },
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy::Lru { capacity: 16 }
    }
}

/// Load a search config from a JSON file.
pub fn load_config(path: &Path) -> Result<SearchConfig, KeyscanError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeyscanError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: SearchConfig =
        serde_json::from_str(&content).map_err(|e| KeyscanError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a search config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<SearchConfig, KeyscanError> {
    let config: SearchConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &SearchConfig) -> Result<(), KeyscanError> {
    if !(72..=1200).contains(&config.ocr.dpi) {
        return Err(KeyscanError::ConfigInvalid(format!(
            "ocr.dpi {} is out of range (72-1200)",
            config.ocr.dpi
        )));
    }

    if config.ocr.language.trim().is_empty() {
        return Err(KeyscanError::ConfigInvalid(
            "ocr.language must not be empty".into(),
        ));
    }

    if config.table.min_columns == 0 {
        return Err(KeyscanError::ConfigInvalid(
            "table.min_columns must be at least 1".into(),
        ));
    }

    if config
        .table
        .header_tokens
        .iter()
        .all(|t| t.trim().is_empty())
    {
        return Err(KeyscanError::ConfigInvalid(
            "table.header_tokens must contain at least one token".into(),
        ));
    }

    if config.fields.delimiter.is_empty() {
        return Err(KeyscanError::ConfigInvalid(
            "fields.delimiter must not be empty".into(),
        ));
    }

    if config.fields.names.is_empty() {
        return Err(KeyscanError::ConfigInvalid(
            "fields.names must not be empty".into(),
        ));
    }

    if let CachePolicy::Lru { capacity: 0 } = config.cache {
        return Err(KeyscanError::ConfigInvalid(
            "cache capacity must be at least 1 (use \"disabled\" to turn caching off)".into(),
        ));
    }

    Ok(())
}
