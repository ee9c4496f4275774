use pol_core::Rational;

use crate::expr::Expr;

/// Numeric coefficient collected while canonicalizing sums and products.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Numeric {
    Exact(Rational),
    Float(f64),
}

impl Numeric {
    pub(crate) const ZERO: Numeric = Numeric::Exact(Rational::ZERO);
    pub(crate) const ONE: Numeric = Numeric::Exact(Rational::ONE);

    pub(crate) fn from_expr(expr: &Expr) -> Option<Numeric> {
        match expr {
            Expr::Number(value) => Some(Numeric::Exact(*value)),
            Expr::Float(value) => Some(Numeric::Float(*value)),
            _ => None,
        }
    }

    pub(crate) fn into_expr(self) -> Expr {
        match self {
            Numeric::Exact(value) => Expr::Number(value),
            Numeric::Float(value) => Expr::Float(value),
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Numeric::Exact(value) => value.to_f64(),
            Numeric::Float(value) => value,
        }
    }

    /// `None` when exact arithmetic overflows; the caller keeps the terms apart.
    pub(crate) fn add(self, other: Numeric) -> Option<Numeric> {
        match (self, other) {
            (Numeric::Exact(a), Numeric::Exact(b)) => a.checked_add(b).map(Numeric::Exact),
            (a, b) => Some(Numeric::Float(a.to_f64() + b.to_f64())),
        }
    }

    pub(crate) fn mul(self, other: Numeric) -> Option<Numeric> {
        match (self, other) {
            (Numeric::Exact(a), Numeric::Exact(b)) => a.checked_mul(b).map(Numeric::Exact),
            (a, b) => Some(Numeric::Float(a.to_f64() * b.to_f64())),
        }
    }

    pub(crate) fn neg(self) -> Option<Numeric> {
        match self {
            Numeric::Exact(value) => value.checked_neg().map(Numeric::Exact),
            Numeric::Float(value) => Some(Numeric::Float(-value)),
        }
    }

    pub(crate) fn is_zero(self) -> bool {
        match self {
            Numeric::Exact(value) => value.is_zero(),
            Numeric::Float(value) => value == 0.0,
        }
    }

    pub(crate) fn is_one(self) -> bool {
        match self {
            Numeric::Exact(value) => value == Rational::ONE,
            Numeric::Float(value) => value == 1.0,
        }
    }
}
