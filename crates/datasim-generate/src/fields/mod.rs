//! Field types and the generation contract they share.
//!
//! Every field validates its parameters when it is built, so a malformed
//! schema fails before any row is produced. Generation itself is infallible.

mod boolean;
mod choice;
mod custom;
mod dict;
mod list;
mod nullable;
mod numeric;
mod temporal;
mod text;

use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use datasim_core::{RowContext, Value};

pub use boolean::BoolField;
pub use choice::ChoiceField;
pub use custom::{CustomGenerator, GeneratorRegistry};
pub use dict::DictField;
pub use list::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, ListField};
pub use nullable::{DEFAULT_NULL_PROBABILITY, NullableField};
pub use numeric::{
    DEFAULT_FLOAT_MAX, DEFAULT_FLOAT_MIN, DEFAULT_INT_MAX, DEFAULT_INT_MIN, DEFAULT_PRECISION,
    FloatField, IntField, SequenceField,
};
pub use temporal::{DateField, DateTimeField, parse_date, parse_datetime};
pub use text::{DEFAULT_STR_LENGTH, StrField, TemplateField};

/// Default generation rule of a field.
pub trait Field: Send + Sync {
    /// Short identifier used in logs.
    fn kind(&self) -> &'static str;

    /// Produce one value. `ctx` holds the values already generated for the
    /// current row; fields that do not depend on it ignore it.
    fn generate(&self, ctx: &RowContext, rng: &mut dyn RngCore) -> Value;
}

/// A field rule plus an optional custom generator that replaces it.
///
/// Cloning is cheap and clones share state, so a cloned `SequenceField`
/// keeps counting where the original left off.
#[derive(Clone)]
pub struct FieldSpec {
    rule: Arc<dyn Field>,
    custom: Option<CustomGenerator>,
}

impl FieldSpec {
    pub fn new(rule: impl Field + 'static) -> Self {
        Self {
            rule: Arc::new(rule),
            custom: None,
        }
    }

    /// A field whose values come only from `generator`.
    pub fn custom(generator: CustomGenerator) -> Self {
        Self::new(generator)
    }

    /// Replace the default rule with `generator`.
    pub fn with_generator(mut self, generator: CustomGenerator) -> Self {
        self.custom = Some(generator);
        self
    }

    pub fn has_custom_generator(&self) -> bool {
        self.custom.is_some()
    }

    pub fn kind(&self) -> &'static str {
        self.rule.kind()
    }

    pub fn generate(&self, ctx: &RowContext, rng: &mut dyn RngCore) -> Value {
        match &self.custom {
            Some(generator) => generator.invoke(ctx, rng),
            None => self.rule.generate(ctx, rng),
        }
    }
}

impl<F: Field + 'static> From<F> for FieldSpec {
    fn from(rule: F) -> Self {
        FieldSpec::new(rule)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("kind", &self.rule.kind())
            .field("custom", &self.custom.is_some())
            .finish()
    }
}
