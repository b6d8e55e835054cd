//! Core contracts for datasim.
//!
//! This crate defines the error taxonomy, the generated value model and the
//! ordered row type shared by the generation engine, the schema document
//! loader and the CLI.

pub mod error;
pub mod row;
pub mod value;

pub use error::{Error, Result};
pub use row::{Row, RowContext};
pub use value::Value;
