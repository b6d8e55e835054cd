use rand::RngCore;

use datasim_core::Row;

use crate::fields::FieldSpec;
use crate::schema::Schema;

/// Builds one row by evaluating fields in declaration order.
///
/// Each value is inserted into the row before the next field runs, so the
/// row under construction doubles as the context later fields read.
#[derive(Debug, Clone, Copy)]
pub struct RowGenerator<'a> {
    fields: &'a [(String, FieldSpec)],
}

impl<'a> RowGenerator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self::from_fields(schema.fields())
    }

    pub fn from_fields(fields: &'a [(String, FieldSpec)]) -> Self {
        Self { fields }
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> Row {
        let mut row = Row::with_capacity(self.fields.len());
        for (name, field) in self.fields {
            let value = field.generate(&row, rng);
            row.insert(name.clone(), value);
        }
        row
    }
}
