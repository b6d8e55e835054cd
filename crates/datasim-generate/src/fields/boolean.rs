use rand::{Rng, RngCore};

use datasim_core::{RowContext, Value};

use super::Field;

/// Fair coin flip.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolField;

impl BoolField {
    pub fn new() -> Self {
        Self
    }
}

impl Field for BoolField {
    fn kind(&self) -> &'static str {
        "bool"
    }

    fn generate(&self, _ctx: &RowContext, rng: &mut dyn RngCore) -> Value {
        Value::Bool(rng.random_bool(0.5))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn produces_both_outcomes() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let trues = (0..1000)
            .filter(|_| BoolField.generate(&RowContext::new(), &mut rng) == Value::Bool(true))
            .count();
        assert!((350..=650).contains(&trues), "unbalanced coin: {trues}");
    }
}
