//! Declarative schema documents for datasim.
//!
//! A document lists fields in order plus the generation settings, and is
//! read from TOML or JSON. Structural checks live in [`validate`]; turning a
//! document into a runnable schema is done by the generation crate.

pub mod errors;
pub mod load;
pub mod model;
pub mod validate;

pub use errors::{IssueSeverity, PlanError, Result, ValidationIssue, ValidationReport};
pub use load::{load_document, parse_json, parse_toml};
pub use model::{FieldDef, FieldEntry, FieldKind, Literal, SchemaDocument};
pub use validate::validate_document;
