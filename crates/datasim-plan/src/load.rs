use std::path::Path;

use crate::errors::{PlanError, Result};
use crate::model::SchemaDocument;

#[derive(Clone, Copy)]
enum DocumentFormat {
    Toml,
    Json,
}

/// Read a schema document, picking the parser from the file extension.
pub fn load_document(path: &Path) -> Result<SchemaDocument> {
    let format = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("toml") => DocumentFormat::Toml,
        Some("json") => DocumentFormat::Json,
        _ => {
            return Err(PlanError::Schema(format!(
                "unsupported schema document '{}': expected .toml or .json",
                path.display()
            )));
        }
    };

    let contents = std::fs::read_to_string(path)?;
    match format {
        DocumentFormat::Toml => parse_toml(&contents),
        DocumentFormat::Json => parse_json(&contents),
    }
}

pub fn parse_toml(contents: &str) -> Result<SchemaDocument> {
    Ok(toml::from_str(contents)?)
}

pub fn parse_json(contents: &str) -> Result<SchemaDocument> {
    Ok(serde_json::from_str(contents)?)
}
