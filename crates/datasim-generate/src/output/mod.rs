//! Writers that persist a generated dataset.

pub mod csv;
pub mod json;

use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use datasim_core::{Error, Row};

use crate::errors::GenerationError;

pub use self::csv::CsvWriter;
pub use self::json::JsonWriter;

/// Serializes rows to a file.
pub trait Writer {
    /// Short format identifier, e.g. `csv`.
    fn format(&self) -> &str;

    /// Write `rows` to `path` and return the number of bytes written.
    fn write(&self, path: &Path, rows: &[Row]) -> Result<u64, GenerationError>;
}

/// Built-in output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    pub fn writer(&self) -> Box<dyn Writer> {
        match self {
            OutputFormat::Csv => Box::new(CsvWriter),
            OutputFormat::Json => Box::new(JsonWriter::default()),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::configuration(format!(
                "unsupported file format: {other}"
            ))),
        }
    }
}

/// Resolve a writer for a format identifier.
pub fn writer_for(format: &str) -> Result<Box<dyn Writer>, Error> {
    Ok(format.parse::<OutputFormat>()?.writer())
}

/// Write through a temporary sibling file renamed over `path` on success, so
/// a failed write never leaves a partial file at `path`.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> Result<u64, GenerationError>
where
    F: FnOnce(&mut CountingWriter<BufWriter<File>>) -> Result<(), GenerationError>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let result = (|| -> Result<u64, GenerationError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&tmp_path)?;
        let mut counting = CountingWriter::new(BufWriter::new(file));
        write(&mut counting)?;
        counting.flush()?;
        let bytes = counting.bytes_written();
        let file = counting
            .into_inner()
            .into_inner()
            .map_err(|err| err.into_error())?;
        file.sync_all()?;
        std::fs::rename(&tmp_path, path)?;
        Ok(bytes)
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}

fn temp_path(path: &Path) -> Result<PathBuf, GenerationError> {
    let file_name = path.file_name().ok_or_else(|| {
        GenerationError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid output path '{}'", path.display()),
        ))
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

/// Byte-counting pass-through writer.
pub(crate) struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }

    fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
