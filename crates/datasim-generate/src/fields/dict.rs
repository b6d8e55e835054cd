use rand::RngCore;

use datasim_core::{Error, Result, Row, RowContext, Value};

use super::{Field, FieldSpec};

/// Nested mapping generated from an ordered set of child fields.
///
/// Children read the enclosing row context but only through a shared
/// borrow; they never see the values of their sibling keys.
#[derive(Debug, Clone)]
pub struct DictField {
    entries: Vec<(String, FieldSpec)>,
}

impl DictField {
    pub fn new<I, K, F>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, F)>,
        K: Into<String>,
        F: Into<FieldSpec>,
    {
        let mut collected: Vec<(String, FieldSpec)> = Vec::new();
        for (key, field) in entries {
            let key = key.into();
            if key.is_empty() {
                return Err(Error::validation("dict keys cannot be empty"));
            }
            if collected.iter().any(|(existing, _)| *existing == key) {
                return Err(Error::validation(format!("duplicate dict key '{key}'")));
            }
            collected.push((key, field.into()));
        }
        Ok(Self { entries: collected })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl Field for DictField {
    fn kind(&self) -> &'static str {
        "dict"
    }

    fn generate(&self, ctx: &RowContext, rng: &mut dyn RngCore) -> Value {
        let mut nested = Row::with_capacity(self.entries.len());
        for (key, field) in &self.entries {
            let value = field.generate(ctx, rng);
            nested.insert(key.clone(), value);
        }
        Value::Map(nested)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::fields::{BoolField, CustomGenerator, IntField, StrField};

    #[test]
    fn preserves_declaration_order() {
        let field = DictField::new([
            ("z", FieldSpec::from(IntField::default())),
            ("a", FieldSpec::from(StrField::new(2))),
            ("m", FieldSpec::from(BoolField)),
        ])
        .expect("valid dict");
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let value = field.generate(&RowContext::new(), &mut rng);
        let keys: Vec<&str> = value.as_map().expect("map").keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = DictField::new([("a", BoolField), ("a", BoolField)]).expect_err("duplicate");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn children_see_outer_row_but_not_siblings() {
        let reader = |ctx: &RowContext| {
            Value::List(vec![ctx["outer"].clone(), ctx["first"].clone()])
        };
        let field = DictField::new([
            ("first", FieldSpec::from(StrField::new(1))),
            ("second", FieldSpec::custom(CustomGenerator::context(reader))),
        ])
        .expect("valid dict");
        let mut ctx = RowContext::new();
        ctx.insert("outer", Value::Int(1));
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let value = field.generate(&ctx, &mut rng);
        let nested = value.as_map().expect("map");
        assert_eq!(
            nested["second"],
            Value::List(vec![Value::Int(1), Value::Null])
        );
        assert_eq!(ctx.len(), 1, "outer context must not grow");
    }
}
