use std::fmt;

use serde::{Deserialize, Serialize};

/// A numeric value of any primitive width, signedness or floatness.
///
/// Integers are widened to 128 bits so every primitive integer compares
/// exactly. `Unsigned` only holds values above `i128::MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Number {
    Integer(i128),
    Unsigned(u128),
    Float(f64),
}

impl Number {
    /// Lenient value equality.
    ///
    /// - integers compare by value regardless of width or signedness
    /// - NaN equals NaN, infinities equal by sign
    /// - an integer equals a float iff the float is finite, integral and the
    ///   same value
    pub fn value_eq(&self, other: &Number) -> bool {
        match (*self, *other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Unsigned(a), Number::Unsigned(b)) => a == b,
            (Number::Integer(_), Number::Unsigned(_)) | (Number::Unsigned(_), Number::Integer(_)) => {
                false
            }
            (Number::Float(a), Number::Float(b)) => float_eq(a, b),
            (Number::Float(f), int) | (int, Number::Float(f)) => int_float_eq(int, f),
        }
    }

    /// Returns `true` for integer zero and for both signed float zeros.
    pub fn is_zero(&self) -> bool {
        match *self {
            Number::Integer(i) => i == 0,
            Number::Unsigned(u) => u == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }
}

fn float_eq(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    a == b
}

fn int_float_eq(int: Number, f: f64) -> bool {
    if !f.is_finite() || f.fract() != 0.0 {
        return false;
    }
    // 2^127 is exactly representable; anything at or beyond it overflows i128.
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    match int {
        Number::Integer(i) => (-LIMIT..LIMIT).contains(&f) && f as i128 == i,
        Number::Unsigned(u) => f >= LIMIT && f as u128 == u,
        Number::Float(_) => false,
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Unsigned(u) => write!(f, "{u}"),
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

// Every type listed here fits losslessly in an i128.
macro_rules! from_integer {
    ($($t:ty),*) => {$(
        impl From<$t> for Number {
            fn from(value: $t) -> Self {
                Number::Integer(value as i128)
            }
        }
    )*};
}

from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<u128> for Number {
    fn from(value: u128) -> Self {
        match i128::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::Unsigned(value),
        }
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(f64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}
