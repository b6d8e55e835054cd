use rand::{Rng, RngCore};

use datasim_core::{Error, Result, RowContext, Value};

use super::Field;

/// Uniform pick from a fixed, ordered candidate set.
#[derive(Debug, Clone)]
pub struct ChoiceField {
    values: Vec<Value>,
}

impl ChoiceField {
    pub fn new<I, V>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(Error::validation("choice values cannot be empty"));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl Field for ChoiceField {
    fn kind(&self) -> &'static str {
        "choice"
    }

    fn generate(&self, _ctx: &RowContext, rng: &mut dyn RngCore) -> Value {
        let idx = rng.random_range(0..self.values.len());
        self.values[idx].clone()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn picks_only_candidates() {
        let field = ChoiceField::new(["red", "green", "blue"]).expect("non-empty");
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        for _ in 0..500 {
            let value = field.generate(&RowContext::new(), &mut rng);
            assert!(field.values().contains(&value), "unexpected {value:?}");
        }
    }

    #[test]
    fn rejects_empty_candidates() {
        let err = ChoiceField::new(Vec::<Value>::new()).expect_err("empty set");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn keeps_declared_order() {
        let field = ChoiceField::new([3_i64, 1, 2]).expect("non-empty");
        assert_eq!(
            field.values(),
            &[Value::Int(3), Value::Int(1), Value::Int(2)]
        );
    }
}
