//! Exact rational numbers used for spins, helicities and symbolic coefficients.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, PolError};

/// Reduced fraction `numerator / denominator` with a positive denominator.
///
/// Serialized as its string form (`"1/2"`, `"-3"`), which keeps YAML models
/// readable and bincode blobs stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

fn wide_gcd(mut a: i128, mut b: i128) -> i128 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Rational {
    /// Zero.
    pub const ZERO: Rational = Rational {
        numerator: 0,
        denominator: 1,
    };
    /// One.
    pub const ONE: Rational = Rational {
        numerator: 1,
        denominator: 1,
    };

    /// Creates a reduced fraction.
    ///
    /// # Panics
    ///
    /// Panics when `denominator` is zero or the reduced fraction is
    /// `i64::MIN / 1`; use [`Rational::checked_new`] for untrusted input.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        match Self::checked_new(numerator, denominator) {
            Some(value) => value,
            None => panic!("rational with zero denominator or out of range"),
        }
    }

    /// Creates a reduced fraction, returning `None` for a zero denominator or
    /// a fraction that does not fit.
    pub fn checked_new(numerator: i64, denominator: i64) -> Option<Self> {
        Self::from_wide(numerator as i128, denominator as i128)
    }

    /// Reduces a wide fraction, returning `None` when it does not fit.
    ///
    /// `i64::MIN` is rejected as a numerator so that negation and
    /// absolute value never overflow.
    fn from_wide(numerator: i128, denominator: i128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let sign = if denominator < 0 { -1 } else { 1 };
        let divisor = wide_gcd(numerator, denominator).max(1);
        let numerator = i64::try_from(sign * numerator / divisor).ok()?;
        let denominator = i64::try_from(sign * denominator / divisor).ok()?;
        if numerator == i64::MIN {
            return None;
        }
        Some(Self {
            numerator,
            denominator,
        })
    }

    /// Integer value `n / 1`.
    pub const fn integer(value: i64) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    /// The value 1/2.
    pub const fn half() -> Self {
        Self {
            numerator: 1,
            denominator: 2,
        }
    }

    /// Numerator of the reduced fraction (carries the sign).
    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Denominator of the reduced fraction (always positive).
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Whether the denominator is one.
    pub fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Whether the value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.saturating_abs(),
            denominator: self.denominator,
        }
    }

    /// Negation; `None` only for a value built from `i64::MIN` by [`Rational::integer`].
    pub fn checked_neg(self) -> Option<Self> {
        Some(Self {
            numerator: self.numerator.checked_neg()?,
            denominator: self.denominator,
        })
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn recip(&self) -> Option<Self> {
        Self::checked_new(self.denominator, self.numerator)
    }

    /// Sum, or `None` when the result does not fit in `i64`.
    pub fn checked_add(self, rhs: Rational) -> Option<Self> {
        let (a, b) = (self.numerator as i128, self.denominator as i128);
        let (c, d) = (rhs.numerator as i128, rhs.denominator as i128);
        Self::from_wide(a * d + c * b, b * d)
    }

    /// Product, or `None` when the result does not fit in `i64`.
    pub fn checked_mul(self, rhs: Rational) -> Option<Self> {
        Self::from_wide(
            self.numerator as i128 * rhs.numerator as i128,
            self.denominator as i128 * rhs.denominator as i128,
        )
    }

    /// Integer power; negative exponents invert the value.
    ///
    /// Returns `None` for `0` to a negative power and when the result
    /// overflows.
    pub fn powi(&self, exponent: i64) -> Option<Self> {
        let mut base = if exponent < 0 { self.recip()? } else { *self };
        let mut remaining = exponent.unsigned_abs();
        let mut result = Rational::ONE;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.checked_mul(base)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.checked_mul(base)?;
            }
        }
        Some(result)
    }

    /// Floating point approximation.
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Largest integer not greater than the value.
    pub fn floor(&self) -> i64 {
        self.numerator.div_euclid(self.denominator)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Rational::ZERO
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Rational::integer(value)
    }
}

/// # Panics
///
/// Panics when the sum overflows `i64`; use [`Rational::checked_add`] for
/// unbounded input.
impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        match self.checked_add(rhs) {
            Some(value) => value,
            None => panic!("rational addition overflowed"),
        }
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        self + (-rhs)
    }
}

/// # Panics
///
/// Panics when the product overflows `i64`; use [`Rational::checked_mul`]
/// for unbounded input.
impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        match self.checked_mul(rhs) {
            Some(value) => value,
            None => panic!("rational multiplication overflowed"),
        }
    }
}

impl Div for Rational {
    type Output = Option<Rational>;

    fn div(self, rhs: Rational) -> Option<Rational> {
        Some(self * rhs.recip()?)
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        match self.checked_neg() {
            Some(value) => value,
            None => panic!("rational negation overflowed"),
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for Rational {
    type Err = PolError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let parse_error = || {
            PolError::Serde(
                ErrorInfo::new("rational-parse", "expected an integer or a fraction n/d")
                    .with_context("input", text),
            )
        };
        let trimmed = text.trim();
        let (numerator, denominator) = match trimmed.split_once('/') {
            Some((num, den)) => (
                num.trim().parse::<i64>().map_err(|_| parse_error())?,
                den.trim().parse::<i64>().map_err(|_| parse_error())?,
            ),
            None => (trimmed.parse::<i64>().map_err(|_| parse_error())?, 1),
        };
        Rational::checked_new(numerator, denominator).ok_or_else(parse_error)
    }
}

impl From<Rational> for String {
    fn from(value: Rational) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Rational {
    type Error = PolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
