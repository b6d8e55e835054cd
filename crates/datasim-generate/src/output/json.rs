use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use datasim_core::Row;

use super::{Writer, write_atomic};
use crate::errors::GenerationError;

/// Pretty-printed JSON array of row objects.
#[derive(Debug, Clone)]
pub struct JsonWriter {
    indent: Vec<u8>,
}

impl JsonWriter {
    pub fn with_indent(indent: usize) -> Self {
        Self {
            indent: vec![b' '; indent],
        }
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::with_indent(4)
    }
}

impl Writer for JsonWriter {
    fn format(&self) -> &str {
        "json"
    }

    fn write(&self, path: &Path, rows: &[Row]) -> Result<u64, GenerationError> {
        write_atomic(path, |out| {
            let formatter = PrettyFormatter::with_indent(&self.indent);
            let mut serializer = serde_json::Serializer::with_formatter(out, formatter);
            rows.serialize(&mut serializer)?;
            Ok(())
        })
    }
}
