use rand::{Rng, RngCore};

use datasim_core::{Error, Result, RowContext, Value};

use super::{Field, FieldSpec};

pub const DEFAULT_NULL_PROBABILITY: f64 = 0.5;

/// Yields `Value::Null` with `probability`, otherwise delegates to the child.
#[derive(Debug, Clone)]
pub struct NullableField {
    child: FieldSpec,
    probability: f64,
}

impl NullableField {
    pub fn new(child: impl Into<FieldSpec>, probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(Error::validation(
                "nullable probability must be between 0 and 1",
            ));
        }
        Ok(Self {
            child: child.into(),
            probability,
        })
    }
}

impl Field for NullableField {
    fn kind(&self) -> &'static str {
        "nullable"
    }

    fn generate(&self, ctx: &RowContext, rng: &mut dyn RngCore) -> Value {
        if rng.random::<f64>() < self.probability {
            return Value::Null;
        }
        self.child.generate(ctx, rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::fields::IntField;

    #[test]
    fn probability_one_is_always_null() {
        let field = NullableField::new(IntField::default(), 1.0).expect("valid probability");
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        assert!((0..5000).all(|_| field.generate(&RowContext::new(), &mut rng).is_null()));
    }

    #[test]
    fn probability_zero_is_never_null() {
        let field = NullableField::new(IntField::default(), 0.0).expect("valid probability");
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        assert!((0..5000).all(|_| !field.generate(&RowContext::new(), &mut rng).is_null()));
    }

    #[test]
    fn rejects_out_of_range_probability() {
        for probability in [-0.1, 1.5, f64::NAN] {
            let err = NullableField::new(IntField::default(), probability)
                .expect_err("invalid probability");
            assert!(matches!(err, Error::Validation(_)));
        }
    }
}
