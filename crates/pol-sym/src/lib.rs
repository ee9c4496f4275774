#![deny(missing_docs)]
#![doc = "Immutable symbolic expressions: canonical construction, substitution, unevaluated sums and LaTeX printing."]

mod canonical;
/// Expression tree types.
pub mod expr;
/// LaTeX printing helpers.
pub mod latex;
/// Constant matrices and the Pauli matrices.
pub mod matrix;
mod numeric;
mod ops;
mod printer;
mod subs;
/// Unevaluated sums.
pub mod sum;

pub use expr::{Condition, Expr, Function, Indexed, MatrixElement, Symbol};
pub use latex::multiline_latex;
pub use matrix::{msigma, Matrix};
pub use sum::PoolSum;
