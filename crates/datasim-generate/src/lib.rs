//! Field and row generation engine for datasim.
//!
//! A [`Schema`] is an ordered set of named [`FieldSpec`]s. The
//! [`RowGenerator`] evaluates fields in declaration order so later fields can
//! read earlier values from the row context, and the [`DatasetGenerator`]
//! drives it `count` times with its own seeded random source before handing
//! the cached rows to a [`Writer`](output::Writer).

pub mod compile;
pub mod engine;
pub mod errors;
pub mod fields;
pub mod model;
pub mod output;
pub mod row;
pub mod schema;

pub use compile::compile_document;
pub use engine::{Dataset, DatasetGenerator};
pub use errors::GenerationError;
pub use fields::{CustomGenerator, Field, FieldSpec, GeneratorRegistry};
pub use model::{GenerateOptions, GenerationReport};
pub use output::{OutputFormat, Writer};
pub use row::RowGenerator;
pub use schema::{Schema, SchemaBuilder, SchemaSettings};

pub use datasim_core::{Error, Row, RowContext, Value};
