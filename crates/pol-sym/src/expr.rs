use pol_core::Rational;
use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;
use crate::sum::PoolSum;

/// Named symbol with an optional LaTeX override and a realness assumption.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol {
    name: String,
    latex: Option<String>,
    real: bool,
}

impl Symbol {
    /// Creates a complex-valued symbol.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latex: None,
            real: false,
        }
    }

    /// Creates a symbol assumed to be real (its conjugate is itself).
    pub fn real(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latex: None,
            real: true,
        }
    }

    /// Overrides the LaTeX rendering of the symbol.
    pub fn with_latex(mut self, latex: impl Into<String>) -> Self {
        self.latex = Some(latex.into());
        self
    }

    /// Plain name, used by the string printer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the symbol is assumed real.
    pub fn is_real(&self) -> bool {
        self.real
    }

    /// LaTeX rendering: the override if present, else derived from the name.
    pub fn latex(&self) -> String {
        match &self.latex {
            Some(latex) => latex.clone(),
            None => crate::latex::name_to_latex(&self.name),
        }
    }
}

/// Symbol subscripted by index expressions, e.g. a helicity coupling `H[1/2, 0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indexed {
    /// Base label.
    pub base: Symbol,
    /// Index expressions.
    pub indices: Vec<Expr>,
}

/// Opaque function application, e.g. a lineshape or a Wigner-d function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Function name used by the string printer.
    pub name: String,
    /// Optional LaTeX head replacing `\operatorname{name}`.
    pub latex: Option<String>,
    /// Whether the function is real-valued.
    pub real: bool,
    /// Arguments.
    pub args: Vec<Expr>,
}

impl Function {
    /// Creates a complex-valued function application.
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            latex: None,
            real: false,
            args,
        }
    }

    /// Sets the LaTeX head.
    pub fn with_latex(mut self, latex: impl Into<String>) -> Self {
        self.latex = Some(latex.into());
        self
    }

    /// Marks the function as real-valued.
    pub fn real(mut self) -> Self {
        self.real = true;
        self
    }
}

impl From<Function> for Expr {
    fn from(function: Function) -> Self {
        Expr::Function(function)
    }
}

/// Condition attached to a [`Expr::Piecewise`] branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Always holds.
    True,
    /// Never holds.
    False,
    /// `lhs < rhs`, kept symbolic until both sides are numbers.
    Less(Box<Expr>, Box<Expr>),
}

impl Condition {
    /// Builds `lhs < rhs`, deciding it right away when both sides are numeric.
    pub fn less(lhs: Expr, rhs: Expr) -> Self {
        match (lhs.as_rational(), rhs.as_rational()) {
            (Some(a), Some(b)) => {
                if a < b {
                    Condition::True
                } else {
                    Condition::False
                }
            }
            _ => match (lhs.as_f64(), rhs.as_f64()) {
                (Some(a), Some(b)) => {
                    if a < b {
                        Condition::True
                    } else {
                        Condition::False
                    }
                }
                _ => Condition::Less(Box::new(lhs), Box::new(rhs)),
            },
        }
    }
}

/// Element of a constant matrix selected by (possibly symbolic) row and column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixElement {
    /// The matrix being indexed.
    pub matrix: Matrix,
    /// Row index expression.
    pub row: Box<Expr>,
    /// Column index expression.
    pub col: Box<Expr>,
}

/// Immutable symbolic expression tree.
///
/// Values are built through the canonicalizing constructors in this crate
/// (`Expr::add`, `Expr::mul`, `Expr::pow`, operators, ...), so two
/// expressions built from the same parts compare equal structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Exact rational number.
    Number(Rational),
    /// Floating point number.
    Float(f64),
    /// The imaginary unit `i`.
    ImaginaryUnit,
    /// Free symbol.
    Symbol(Symbol),
    /// Indexed symbol.
    Indexed(Indexed),
    /// Function application.
    Function(Function),
    /// Sum of at least two terms.
    Add(Vec<Expr>),
    /// Product of at least two factors.
    Mul(Vec<Expr>),
    /// Power `base^exponent`.
    Pow(Box<Expr>, Box<Expr>),
    /// Complex conjugate of a non-real expression.
    Conjugate(Box<Expr>),
    /// Piecewise definition, first holding condition wins.
    Piecewise(Vec<(Expr, Condition)>),
    /// Matrix element with symbolic indices.
    MatrixElement(MatrixElement),
    /// Unevaluated sum over explicit index values.
    Sum(PoolSum),
}

impl Expr {
    /// Exact zero.
    pub fn zero() -> Expr {
        Expr::Number(Rational::ZERO)
    }

    /// Exact one.
    pub fn one() -> Expr {
        Expr::Number(Rational::ONE)
    }

    /// Exact integer.
    pub fn integer(value: i64) -> Expr {
        Expr::Number(Rational::integer(value))
    }

    /// Exact fraction.
    pub fn rational(numerator: i64, denominator: i64) -> Expr {
        Expr::Number(Rational::new(numerator, denominator))
    }

    /// Floating point number.
    pub fn float(value: f64) -> Expr {
        Expr::Float(value)
    }

    /// Imaginary unit.
    pub fn i() -> Expr {
        Expr::ImaginaryUnit
    }

    /// Indexed symbol `base[indices...]`.
    pub fn indexed(base: Symbol, indices: Vec<Expr>) -> Expr {
        Expr::Indexed(Indexed { base, indices })
    }

    /// Returns the exact value if the expression is a rational number.
    pub fn as_rational(&self) -> Option<Rational> {
        match self {
            Expr::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns a float approximation if the expression is a real number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Expr::Number(value) => Some(value.to_f64()),
            Expr::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the symbol if the expression is a bare symbol.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Expr::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Whether the expression is exactly zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Expr::Number(value) => value.is_zero(),
            Expr::Float(value) => *value == 0.0,
            _ => false,
        }
    }

    /// Whether the expression is exactly one.
    pub fn is_one(&self) -> bool {
        match self {
            Expr::Number(value) => *value == Rational::ONE,
            Expr::Float(value) => *value == 1.0,
            _ => false,
        }
    }

    /// Whether the expression is a number (exact or float).
    pub fn is_number(&self) -> bool {
        matches!(self, Expr::Number(_) | Expr::Float(_))
    }

    /// Whether the expression prints with a leading minus sign.
    pub fn is_negative_term(&self) -> bool {
        match self {
            Expr::Number(value) => value.is_negative(),
            Expr::Float(value) => *value < 0.0,
            Expr::Mul(factors) => factors.first().is_some_and(Expr::is_negative_term),
            _ => false,
        }
    }

    /// Terms of a sum, or the expression itself as the only term.
    pub fn terms(&self) -> Vec<Expr> {
        match self {
            Expr::Add(terms) => terms.clone(),
            other => vec![other.clone()],
        }
    }
}

impl From<Symbol> for Expr {
    fn from(symbol: Symbol) -> Self {
        Expr::Symbol(symbol)
    }
}

impl From<Rational> for Expr {
    fn from(value: Rational) -> Self {
        Expr::Number(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::integer(value)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Float(value)
    }
}
