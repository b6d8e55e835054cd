use std::path::Path;

use datasim_core::Row;

use super::{Writer, write_atomic};
use crate::errors::GenerationError;

/// CSV with a header taken from the first row's keys.
///
/// Values are written with [`Value::to_text`](datasim_core::Value::to_text);
/// an empty row set produces an empty file.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl Writer for CsvWriter {
    fn format(&self) -> &str {
        "csv"
    }

    fn write(&self, path: &Path, rows: &[Row]) -> Result<u64, GenerationError> {
        write_atomic(path, |out| {
            let Some(first) = rows.first() else {
                return Ok(());
            };
            let header: Vec<&str> = first.keys().collect();

            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(out);
            writer.write_record(&header)?;
            for row in rows {
                let record: Vec<String> = header
                    .iter()
                    .map(|name| row.get(name).map(|value| value.to_text()).unwrap_or_default())
                    .collect();
                writer.write_record(&record)?;
            }
            writer.flush()?;
            Ok(())
        })
    }
}
