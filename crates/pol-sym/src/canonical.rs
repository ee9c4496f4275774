//! Canonicalizing constructors.
//!
//! Every compound node is built through these functions. The ordering of
//! terms and factors is the lexicographic order of their string form, which
//! makes the output independent of construction order.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use pol_core::Rational;

use crate::expr::{Condition, Expr, MatrixElement};
use crate::matrix::Matrix;
use crate::numeric::Numeric;

impl Expr {
    /// Sum of `terms`: flattens, folds numbers and merges like terms.
    pub fn add<I: IntoIterator<Item = Expr>>(terms: I) -> Expr {
        let mut constant = Numeric::ZERO;
        let mut collected: BTreeMap<String, (Numeric, Expr)> = BTreeMap::new();
        // Terms whose exact coefficient would overflow stay separate.
        let mut unfolded: Vec<Expr> = Vec::new();
        for term in flatten_add(terms) {
            if let Some(value) = Numeric::from_expr(&term) {
                match constant.add(value) {
                    Some(sum) => constant = sum,
                    None => unfolded.push(term),
                }
                continue;
            }
            let (coefficient, rest) = term.split_coefficient();
            match collected.entry(rest.to_string()) {
                Entry::Occupied(mut entry) => match entry.get().0.add(coefficient) {
                    Some(merged) => entry.get_mut().0 = merged,
                    None => unfolded.push(term),
                },
                Entry::Vacant(entry) => {
                    entry.insert((coefficient, rest));
                }
            }
        }

        let mut result = Vec::with_capacity(collected.len() + 1);
        if !constant.is_zero() {
            result.push(constant.into_expr());
        }
        for (_, (coefficient, rest)) in collected {
            if coefficient.is_zero() {
                continue;
            }
            result.push(with_coefficient(coefficient, rest));
        }
        result.extend(unfolded);
        match result.len() {
            0 => Expr::zero(),
            1 => result.remove(0),
            _ => Expr::Add(result),
        }
    }

    /// Product of `factors`: flattens, folds numbers, merges powers of equal
    /// bases and reduces powers of `i`.
    pub fn mul<I: IntoIterator<Item = Expr>>(factors: I) -> Expr {
        let mut coefficient = Numeric::ONE;
        let mut imaginary = 0usize;
        let mut powers: BTreeMap<String, (Expr, Vec<Expr>)> = BTreeMap::new();
        // Numbers whose product with the coefficient would overflow.
        let mut unfolded: Vec<Expr> = Vec::new();
        for factor in flatten_mul(factors) {
            if let Some(value) = Numeric::from_expr(&factor) {
                match coefficient.mul(value) {
                    Some(product) => coefficient = product,
                    None => unfolded.push(factor),
                }
                continue;
            }
            if factor == Expr::ImaginaryUnit {
                imaginary += 1;
                continue;
            }
            let (base, exponent) = match factor {
                Expr::Pow(base, exponent) => (*base, *exponent),
                other => (other, Expr::one()),
            };
            match powers.entry(base.to_string()) {
                Entry::Occupied(mut entry) => entry.get_mut().1.push(exponent),
                Entry::Vacant(entry) => {
                    entry.insert((base, vec![exponent]));
                }
            }
        }
        if coefficient.is_zero() {
            return Expr::zero();
        }

        let mut rest = Vec::with_capacity(powers.len() + 1);
        for (_, (base, exponents)) in powers {
            let power = Expr::pow(base, Expr::add(exponents));
            let parts = match power {
                Expr::Mul(parts) => parts,
                other => vec![other],
            };
            for part in parts {
                if let Some(value) = Numeric::from_expr(&part) {
                    match coefficient.mul(value) {
                        Some(product) => coefficient = product,
                        None => unfolded.push(part),
                    }
                } else if part == Expr::ImaginaryUnit {
                    imaginary += 1;
                } else {
                    rest.push(part);
                }
            }
        }
        if coefficient.is_zero() {
            return Expr::zero();
        }
        if imaginary % 4 >= 2 {
            match coefficient.neg() {
                Some(negated) => coefficient = negated,
                None => unfolded.push(Expr::integer(-1)),
            }
        }
        if imaginary % 2 == 1 {
            rest.push(Expr::ImaginaryUnit);
        }
        rest.sort_by_cached_key(|factor| factor.to_string());

        if !coefficient.is_one() && rest.len() == 1 && unfolded.is_empty() {
            if let Expr::Add(terms) = &rest[0] {
                let factor = coefficient.into_expr();
                return Expr::add(
                    terms
                        .iter()
                        .map(|term| Expr::mul([factor.clone(), term.clone()])),
                );
            }
        }

        let mut product = Vec::with_capacity(rest.len() + unfolded.len() + 1);
        if !coefficient.is_one() {
            product.push(coefficient.into_expr());
        }
        product.extend(unfolded);
        product.extend(rest);
        match product.len() {
            0 => Expr::one(),
            1 => product.remove(0),
            _ => Expr::Mul(product),
        }
    }

    /// Power `base^exponent` with numeric folding.
    pub fn pow(base: Expr, exponent: Expr) -> Expr {
        if exponent.is_zero() || base.is_one() {
            return Expr::one();
        }
        if exponent.is_one() {
            return base;
        }
        if let (Some(b), Some(e)) = (base.as_rational(), exponent.as_rational()) {
            if e.is_integer() {
                if let Some(value) = b.powi(e.numerator()) {
                    return Expr::Number(value);
                }
            }
        }
        if matches!(base, Expr::Float(_)) || matches!(exponent, Expr::Float(_)) {
            if let (Some(b), Some(e)) = (base.as_f64(), exponent.as_f64()) {
                if b >= 0.0 || e.fract() == 0.0 {
                    return Expr::Float(b.powf(e));
                }
            }
        }
        if let Some(e) = exponent.as_rational().filter(Rational::is_integer) {
            if base == Expr::ImaginaryUnit {
                return match e.numerator().rem_euclid(4) {
                    0 => Expr::one(),
                    1 => Expr::ImaginaryUnit,
                    2 => Expr::integer(-1),
                    _ => Expr::Mul(vec![Expr::integer(-1), Expr::ImaginaryUnit]),
                };
            }
            if let Expr::Pow(inner_base, inner_exponent) = base {
                return Expr::pow(*inner_base, Expr::mul([*inner_exponent, exponent]));
            }
        }
        Expr::Pow(Box::new(base), Box::new(exponent))
    }

    /// Complex conjugate, pushed through sums, products and real atoms.
    pub fn conjugate(&self) -> Expr {
        match self {
            Expr::Number(_) | Expr::Float(_) => self.clone(),
            Expr::ImaginaryUnit => Expr::Mul(vec![Expr::integer(-1), Expr::ImaginaryUnit]),
            Expr::Symbol(symbol) if symbol.is_real() => self.clone(),
            Expr::Function(function) if function.real => self.clone(),
            Expr::Add(terms) => Expr::add(terms.iter().map(Expr::conjugate)),
            Expr::Mul(factors) => Expr::mul(factors.iter().map(Expr::conjugate)),
            Expr::Pow(base, exponent) => conjugate_power(self, base, exponent),
            Expr::Conjugate(inner) => (**inner).clone(),
            Expr::Piecewise(pieces) => Expr::piecewise(
                pieces
                    .iter()
                    .map(|(value, condition)| (value.conjugate(), condition.clone()))
                    .collect(),
            ),
            Expr::Sum(sum) => Expr::Sum(sum.map_expression(Expr::conjugate)),
            _ => Expr::Conjugate(Box::new(self.clone())),
        }
    }

    /// Piecewise expression; branches with decided conditions are resolved.
    pub fn piecewise(pieces: Vec<(Expr, Condition)>) -> Expr {
        let mut kept = Vec::with_capacity(pieces.len());
        for (value, condition) in pieces {
            match condition {
                Condition::False => continue,
                Condition::True => {
                    if kept.is_empty() {
                        return value;
                    }
                    kept.push((value, Condition::True));
                    break;
                }
                undecided => kept.push((value, undecided)),
            }
        }
        Expr::Piecewise(kept)
    }

    /// Element of `matrix`; resolved immediately for in-range integer indices.
    pub fn matrix_element(matrix: Matrix, row: Expr, col: Expr) -> Expr {
        let position = (row.as_rational(), col.as_rational());
        if let (Some(r), Some(c)) = position {
            if r.is_integer() && c.is_integer() && r >= Rational::ZERO && c >= Rational::ZERO {
                if let Some(entry) = matrix.entry(r.numerator() as usize, c.numerator() as usize) {
                    return entry.clone();
                }
            }
        }
        Expr::MatrixElement(MatrixElement {
            matrix,
            row: Box::new(row),
            col: Box::new(col),
        })
    }

    /// Splits a leading numeric coefficient off a product.
    pub(crate) fn split_coefficient(&self) -> (Numeric, Expr) {
        if let Expr::Mul(factors) = self {
            if let Some(coefficient) = factors.first().and_then(Numeric::from_expr) {
                let mut rest: Vec<Expr> = factors[1..].to_vec();
                let rest = if rest.len() == 1 {
                    rest.remove(0)
                } else {
                    Expr::Mul(rest)
                };
                return (coefficient, rest);
            }
        }
        (Numeric::ONE, self.clone())
    }
}

/// `conj(b^e)` on the principal branch.
///
/// Only an integer exponent commutes with conjugation for every base. A real
/// exponent of a non-negative number gives a real power, and a half-odd
/// exponent of a negative number is purely imaginary up to a real factor, so
/// its conjugate is the negated power. Anything else stays unevaluated.
fn conjugate_power(power: &Expr, base: &Expr, exponent: &Expr) -> Expr {
    if exponent.as_rational().is_some_and(|e| e.is_integer())
        || matches!(exponent, Expr::Float(value) if value.fract() == 0.0)
    {
        return Expr::pow(base.conjugate(), exponent.clone());
    }
    if let (Some(b), true) = (base.as_f64(), exponent.is_number()) {
        if b >= 0.0 {
            return power.clone();
        }
        if exponent.as_rational().is_some_and(|e| e.denominator() == 2) {
            return -power;
        }
    }
    Expr::Conjugate(Box::new(power.clone()))
}

fn with_coefficient(coefficient: Numeric, rest: Expr) -> Expr {
    if coefficient.is_one() {
        return rest;
    }
    let mut factors = vec![coefficient.into_expr()];
    match rest {
        Expr::Mul(inner) => factors.extend(inner),
        other => factors.push(other),
    }
    Expr::Mul(factors)
}

fn flatten_add<I: IntoIterator<Item = Expr>>(terms: I) -> Vec<Expr> {
    let mut flat = Vec::new();
    for term in terms {
        match term {
            Expr::Add(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }
    flat
}

fn flatten_mul<I: IntoIterator<Item = Expr>>(factors: I) -> Vec<Expr> {
    let mut flat = Vec::new();
    for factor in factors {
        match factor {
            Expr::Mul(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }
    flat
}
