//! String form of expressions.
//!
//! The output is deterministic for a given tree and is what cache keys are
//! hashed from, so changes here invalidate existing cache files.

use std::fmt::{self, Display, Write};

use crate::expr::{Condition, Expr};

const PREC_ADD: u8 = 10;
const PREC_MUL: u8 = 20;
const PREC_POW: u8 = 30;
const PREC_ATOM: u8 = 40;

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Add(_) => PREC_ADD,
        Expr::Mul(_) => PREC_MUL,
        Expr::Pow(..) => PREC_POW,
        Expr::Number(value) if value.is_negative() || !value.is_integer() => PREC_ADD,
        Expr::Float(value) if *value < 0.0 => PREC_ADD,
        _ => PREC_ATOM,
    }
}

fn write_child(f: &mut fmt::Formatter<'_>, child: &Expr, min_prec: u8) -> fmt::Result {
    if precedence(child) < min_prec {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::True => f.write_str("True"),
            Condition::False => f.write_str("False"),
            Condition::Less(lhs, rhs) => write!(f, "{lhs} < {rhs}"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{value}"),
            Expr::Float(value) => write!(f, "{value:?}"),
            Expr::ImaginaryUnit => f.write_str("I"),
            Expr::Symbol(symbol) => f.write_str(symbol.name()),
            Expr::Indexed(indexed) => {
                write!(f, "{}[", indexed.base.name())?;
                write_joined(f, &indexed.indices)?;
                f.write_char(']')
            }
            Expr::Function(function) => {
                write!(f, "{}(", function.name)?;
                write_joined(f, &function.args)?;
                f.write_char(')')
            }
            Expr::Add(terms) => {
                for (idx, term) in terms.iter().enumerate() {
                    if idx == 0 {
                        write!(f, "{term}")?;
                    } else if term.is_negative_term() {
                        f.write_str(" - ")?;
                        write_child(f, &-term, PREC_MUL)?;
                    } else {
                        f.write_str(" + ")?;
                        write!(f, "{term}")?;
                    }
                }
                Ok(())
            }
            Expr::Mul(factors) => {
                let mut rest = factors.as_slice();
                if let Some(first) = factors.first() {
                    if first.as_rational().is_some_and(|v| v.numerator() == -1 && v.is_integer()) {
                        f.write_char('-')?;
                        rest = &factors[1..];
                    } else if first.is_negative_term() && first.as_rational().is_some_and(|v| v.is_integer()) {
                        write!(f, "{first}*")?;
                        rest = &factors[1..];
                    }
                }
                for (idx, factor) in rest.iter().enumerate() {
                    if idx > 0 {
                        f.write_char('*')?;
                    }
                    write_child(f, factor, PREC_MUL + 1)?;
                }
                Ok(())
            }
            Expr::Pow(base, exponent) => {
                write_child(f, base, PREC_ATOM)?;
                f.write_str("**")?;
                write_child(f, exponent, PREC_ATOM)
            }
            Expr::Conjugate(inner) => write!(f, "conjugate({inner})"),
            Expr::Piecewise(pieces) => {
                f.write_str("Piecewise(")?;
                for (idx, (value, condition)) in pieces.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "({value}, {condition})")?;
                }
                f.write_char(')')
            }
            Expr::MatrixElement(element) => write!(
                f,
                "{}[{}, {}]",
                element.matrix.name(),
                element.row,
                element.col
            ),
            Expr::Sum(sum) => {
                write!(f, "PoolSum({}", sum.expression())?;
                for (symbol, values) in sum.indices() {
                    write!(f, ", ({}, (", symbol.name())?;
                    write_joined(f, values)?;
                    f.write_str("))")?;
                }
                f.write_char(')')
            }
        }
    }
}
