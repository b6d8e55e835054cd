use std::sync::atomic::{AtomicI64, Ordering};

use rand::{Rng, RngCore};

use datasim_core::{Error, Result, RowContext, Value};

use super::Field;

pub const DEFAULT_INT_MIN: i64 = 0;
pub const DEFAULT_INT_MAX: i64 = 100;
pub const DEFAULT_FLOAT_MIN: f64 = 0.0;
pub const DEFAULT_FLOAT_MAX: f64 = 99.99;
pub const DEFAULT_PRECISION: u32 = 2;

// Beyond this many decimals rounding an f64 no longer changes it.
const MAX_EFFECTIVE_PRECISION: u32 = 15;

/// Uniform integer in `[min, max]`.
#[derive(Debug, Clone)]
pub struct IntField {
    min: i64,
    max: i64,
}

impl IntField {
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(Error::validation("int min must be <= max"));
        }
        Ok(Self { min, max })
    }
}

impl Default for IntField {
    fn default() -> Self {
        Self {
            min: DEFAULT_INT_MIN,
            max: DEFAULT_INT_MAX,
        }
    }
}

impl Field for IntField {
    fn kind(&self) -> &'static str {
        "int"
    }

    fn generate(&self, _ctx: &RowContext, rng: &mut dyn RngCore) -> Value {
        Value::Int(rng.random_range(self.min..=self.max))
    }
}

/// Uniform real in `[min, max]` rounded to `precision` decimals.
#[derive(Debug, Clone)]
pub struct FloatField {
    min: f64,
    max: f64,
    precision: u32,
}

impl FloatField {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        Self::with_precision(min, max, DEFAULT_PRECISION)
    }

    pub fn with_precision(min: f64, max: f64, precision: u32) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::validation("float min and max must be finite numbers"));
        }
        if min > max {
            return Err(Error::validation("float min must be <= max"));
        }
        if !(max - min).is_finite() {
            return Err(Error::validation("float range is too wide"));
        }
        Ok(Self {
            min,
            max,
            precision,
        })
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }
}

impl Default for FloatField {
    fn default() -> Self {
        Self {
            min: DEFAULT_FLOAT_MIN,
            max: DEFAULT_FLOAT_MAX,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Field for FloatField {
    fn kind(&self) -> &'static str {
        "float"
    }

    fn generate(&self, _ctx: &RowContext, rng: &mut dyn RngCore) -> Value {
        let value = rng.random_range(self.min..=self.max);
        Value::Float(round_within(value, self.precision, self.min, self.max))
    }
}

/// Round `value` to `precision` decimals, stepping back onto the decimal grid
/// inside `[min, max]` when plain rounding would cross a bound.
fn round_within(value: f64, precision: u32, min: f64, max: f64) -> f64 {
    if precision > MAX_EFFECTIVE_PRECISION {
        return value;
    }
    let factor = 10_f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded > max {
        let floor = (max * factor).floor() / factor;
        if floor >= min {
            return floor;
        }
    } else if rounded < min {
        let ceil = (min * factor).ceil() / factor;
        if ceil <= max {
            return ceil;
        }
    } else {
        return rounded;
    }
    // No grid point lies inside the range.
    value
}

/// Monotonic counter: returns the current value, then advances by `step`.
///
/// The counter lives in the field, so it keeps advancing across rows and
/// across dataset runs until [`SequenceField::reset`] is called.
#[derive(Debug)]
pub struct SequenceField {
    start: i64,
    step: i64,
    current: AtomicI64,
}

impl SequenceField {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            start,
            step,
            current: AtomicI64::new(start),
        }
    }

    /// Next value without advancing.
    pub fn peek(&self) -> i64 {
        self.current.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.current.store(self.start, Ordering::Relaxed);
    }
}

impl Default for SequenceField {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl Field for SequenceField {
    fn kind(&self) -> &'static str {
        "sequence"
    }

    /// Once the next step would overflow the counter stays at its last value.
    fn generate(&self, _ctx: &RowContext, _rng: &mut dyn RngCore) -> Value {
        let previous = self
            .current
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some(current.checked_add(self.step).unwrap_or(current))
            })
            .unwrap_or_else(|current| current);
        Value::Int(previous)
    }
}
