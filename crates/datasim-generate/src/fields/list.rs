use rand::{Rng, RngCore};

use datasim_core::{Error, Result, RowContext, Value};

use super::{Field, FieldSpec};

pub const DEFAULT_MIN_LENGTH: usize = 1;
pub const DEFAULT_MAX_LENGTH: usize = 5;

/// Sequence of independently generated child values.
///
/// Every element sees the same row context; elements do not see each other.
#[derive(Debug, Clone)]
pub struct ListField {
    child: FieldSpec,
    min_length: usize,
    max_length: usize,
}

impl ListField {
    pub fn new(child: impl Into<FieldSpec>, min_length: usize, max_length: usize) -> Result<Self> {
        if min_length > max_length {
            return Err(Error::validation("list min_length must be <= max_length"));
        }
        Ok(Self {
            child: child.into(),
            min_length,
            max_length,
        })
    }

    pub fn with_default_length(child: impl Into<FieldSpec>) -> Self {
        Self {
            child: child.into(),
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl Field for ListField {
    fn kind(&self) -> &'static str {
        "list"
    }

    fn generate(&self, ctx: &RowContext, rng: &mut dyn RngCore) -> Value {
        let length = rng.random_range(self.min_length..=self.max_length);
        let items = (0..length).map(|_| self.child.generate(ctx, rng)).collect();
        Value::List(items)
    }
}
