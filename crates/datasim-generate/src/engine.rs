use std::path::Path;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use datasim_core::{Error, Row};

use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport};
use crate::output::{OutputFormat, Writer};
use crate::row::RowGenerator;
use crate::schema::Schema;

/// Rows produced by one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn head(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn tail(&self, n: usize) -> &[Row] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// Drives row generation for a schema and hands the rows to a writer.
///
/// The generator owns its random source: seeded from the schema seed when
/// one is set, from OS entropy otherwise. Rows are generated on first use and
/// cached, so `head`, `tail`, `rows`, `count` and repeated writes all see the
/// same dataset.
#[derive(Debug)]
pub struct DatasetGenerator<'a> {
    schema: &'a Schema,
    options: GenerateOptions,
    format: OutputFormat,
    rng: ChaCha8Rng,
    dataset: Option<Dataset>,
}

impl<'a> DatasetGenerator<'a> {
    pub fn new(schema: &'a Schema) -> Result<Self, GenerationError> {
        Self::with_options(schema, GenerateOptions::default())
    }

    /// Fails with a configuration error when the schema's format is not a
    /// built-in one.
    pub fn with_options(
        schema: &'a Schema,
        options: GenerateOptions,
    ) -> Result<Self, GenerationError> {
        let format: OutputFormat = schema.format().parse()?;
        let rng = match schema.seed() {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            schema,
            options,
            format,
            rng,
            dataset: None,
        })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Generated rows, computing them on first call.
    pub fn dataset(&mut self) -> &Dataset {
        let schema = self.schema;
        let interval = self.options.progress_interval;
        self.dataset
            .get_or_insert_with(|| generate_dataset(schema, interval, &mut self.rng))
    }

    pub fn rows(&mut self) -> &[Row] {
        self.dataset().rows()
    }

    pub fn head(&mut self, n: usize) -> &[Row] {
        self.dataset().head(n)
    }

    pub fn tail(&mut self, n: usize) -> &[Row] {
        self.dataset().tail(n)
    }

    pub fn count(&mut self) -> usize {
        self.dataset().len()
    }

    pub fn into_dataset(mut self) -> Dataset {
        self.dataset();
        self.dataset.unwrap_or_default()
    }

    /// Write the dataset in the schema's format.
    pub fn write(&mut self, path: &Path) -> Result<GenerationReport, GenerationError> {
        let writer = self.format.writer();
        self.write_with(path, writer.as_ref())
    }

    /// Write the dataset in `format`, which is resolved before any row is
    /// generated.
    pub fn write_as(
        &mut self,
        path: &Path,
        format: &str,
    ) -> Result<GenerationReport, GenerationError> {
        let writer = format.parse::<OutputFormat>()?.writer();
        self.write_with(path, writer.as_ref())
    }

    /// Write the dataset through a caller-supplied writer.
    pub fn write_with(
        &mut self,
        path: &Path,
        writer: &dyn Writer,
    ) -> Result<GenerationReport, GenerationError> {
        if !self.options.overwrite && path.exists() {
            return Err(Error::configuration(format!(
                "output '{}' already exists",
                path.display()
            ))
            .into());
        }

        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let rows_requested = self.schema.count();
        let seed = self.schema.seed();
        let rows = self.dataset().rows();

        let bytes_written = match writer.write(path, rows) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(run_id = %run_id, path = %path.display(), error = %err, "write failed");
                return Err(err);
            }
        };

        let report = GenerationReport {
            run_id,
            path: path.to_path_buf(),
            format: writer.format().to_string(),
            rows_requested,
            rows_written: rows.len(),
            bytes_written,
            seed,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            run_id = %report.run_id,
            path = %path.display(),
            format = %report.format,
            rows = report.rows_written,
            bytes_written = report.bytes_written,
            "dataset written"
        );
        Ok(report)
    }
}

fn generate_dataset(schema: &Schema, interval: usize, rng: &mut ChaCha8Rng) -> Dataset {
    let start = Instant::now();
    let count = schema.count();
    let fields = schema.fields().len();
    let log = schema.log();
    if log {
        info!(rows = count, fields, seed = schema.seed(), "generation started");
    } else {
        debug!(rows = count, fields, seed = schema.seed(), "generation started");
    }

    let generator = RowGenerator::new(schema);
    let mut rows = Vec::with_capacity(count);
    for index in 0..count {
        rows.push(generator.generate(rng));
        let generated = index + 1;
        if log && interval > 0 && generated % interval == 0 && generated < count {
            info!(generated, total = count, "rows generated");
        }
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    if log {
        info!(rows = rows.len(), duration_ms, "generation completed");
    } else {
        debug!(rows = rows.len(), duration_ms, "generation completed");
    }
    Dataset { rows }
}

#[cfg(test)]
mod tests {
    use datasim_core::{RowContext, Value};

    use super::*;
    use crate::fields::{CustomGenerator, FieldSpec, IntField, SequenceField};

    fn schema(count: usize) -> Schema {
        Schema::builder()
            .field("id", SequenceField::new(1, 1))
            .field("score", IntField::new(0, 1000).expect("bounds"))
            .count(count)
            .seed(99)
            .build()
            .expect("valid schema")
    }

    #[test]
    fn dataset_is_generated_once_and_cached() {
        let schema = schema(10);
        let mut generator = DatasetGenerator::new(&schema).expect("csv format");

        let first = generator.rows().to_vec();
        assert_eq!(generator.count(), 10);
        assert_eq!(generator.rows(), first.as_slice());
        assert_eq!(generator.head(3), &first[..3]);
        assert_eq!(generator.tail(2), &first[8..]);
        assert_eq!(first[9]["id"], Value::Int(10), "sequence ran exactly 10 times");
    }

    #[test]
    fn head_and_tail_clamp_to_dataset() {
        let schema = schema(3);
        let mut generator = DatasetGenerator::new(&schema).expect("csv format");
        assert_eq!(generator.head(10).len(), 3);
        assert_eq!(generator.tail(10).len(), 3);
        assert!(generator.head(0).is_empty());
    }

    #[test]
    fn unknown_format_fails_before_generation() {
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = calls.clone();
        let schema = Schema::builder()
            .field(
                "x",
                FieldSpec::custom(CustomGenerator::no_arg(move || {
                    counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst) as i64
                })),
            )
            .format("xml")
            .build()
            .expect("valid schema");

        let err = DatasetGenerator::new(&schema).expect_err("xml unsupported");
        assert!(err.is_configuration());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn progress_logging_does_not_change_rows() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        let build = |log: bool| {
            Schema::builder()
                .field("score", IntField::new(0, 1_000_000).expect("bounds"))
                .field(
                    "noise",
                    FieldSpec::custom(CustomGenerator::random(|_: &RowContext, rng| {
                        use rand::Rng;
                        rng.random::<u32>() as i64
                    })),
                )
                .count(25)
                .seed(5)
                .log(log)
                .build()
                .expect("valid schema")
        };
        let (logged, quiet) = (build(true), build(false));
        let options = GenerateOptions {
            progress_interval: 2,
            ..Default::default()
        };

        let rows_logged = DatasetGenerator::with_options(&logged, options.clone())
            .expect("format")
            .into_dataset();
        let rows_quiet = DatasetGenerator::with_options(&quiet, options)
            .expect("format")
            .into_dataset();
        assert_eq!(rows_logged.len(), 25);
        assert_eq!(rows_logged, rows_quiet);
    }

    #[test]
    fn same_seed_reproduces_rows() {
        let build = || {
            Schema::builder()
                .field("a", IntField::new(0, 1_000_000).expect("bounds"))
                .field(
                    "b",
                    FieldSpec::custom(CustomGenerator::random(|ctx: &RowContext, rng| {
                        use rand::Rng;
                        ctx["a"].as_i64().unwrap_or(0) + rng.random_range(0..10)
                    })),
                )
                .count(50)
                .seed(2024)
                .build()
                .expect("valid schema")
        };
        let (first, second) = (build(), build());

        let rows_a = DatasetGenerator::new(&first).expect("format").into_dataset();
        let rows_b = DatasetGenerator::new(&second).expect("format").into_dataset();
        assert_eq!(rows_a, rows_b);
    }
}
