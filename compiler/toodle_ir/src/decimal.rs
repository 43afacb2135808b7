//! Arbitrary-precision decimal numbers.
//!
//! A thin wrapper over [`BigDecimal`] that keeps the scale written in the
//! source: `2.0` and `2.00` are different values, and printing a parsed
//! number reproduces its digits. Positive exponents are multiplied out at
//! parse time, so `1e3` becomes `1000`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};

/// Largest scale magnitude accepted in a number literal.
const MAX_SCALE: i64 = 4096;

/// Error produced when a number literal cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    #[error("'{text}' is not a decimal number: {reason}")]
    Malformed { text: String, reason: String },
    #[error("exponent of '{0}' is out of range")]
    ExponentOutOfRange(String),
}

/// Arbitrary-precision decimal number.
#[derive(Clone)]
pub struct Decimal(BigDecimal);

impl Decimal {
    /// Number of digits after the decimal point.
    pub fn scale(&self) -> i64 {
        self.0.as_bigint_and_exponent().1
    }

    /// True when the value has no fractional part (`3`, `3.00`).
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// The integral value, if there is no fractional part and it fits an `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.0.to_i64()
        } else {
            None
        }
    }

    /// Render without exponent, keeping the scale (`-0.050`, `1200`).
    pub fn to_plain_string(&self) -> String {
        self.0.to_plain_string()
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let value = BigDecimal::from_str(text).map_err(|err| DecimalError::Malformed {
            text: text.to_owned(),
            reason: err.to_string(),
        })?;
        let (_, scale) = value.as_bigint_and_exponent();
        if scale.abs() > MAX_SCALE {
            return Err(DecimalError::ExponentOutOfRange(text.to_owned()));
        }
        Ok(if scale < 0 {
            Decimal(value.with_scale(0))
        } else {
            Decimal(value)
        })
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(BigDecimal::from(value))
    }
}

// Scale-sensitive: `BigDecimal` alone compares `2.0` and `2.00` equal.
impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bigint_and_exponent() == other.0.as_bigint_and_exponent()
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.as_bigint_and_exponent().hash(state);
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self.to_plain_string())
    }
}

#[cfg(test)]
mod tests;
