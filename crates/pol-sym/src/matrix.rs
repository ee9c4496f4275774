use pol_core::{ErrorInfo, PolError};
use serde::{Deserialize, Serialize};

use crate::expr::Expr;

/// Small constant matrix of expressions, addressed by [`Expr::matrix_element`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    name: String,
    latex: String,
    rows: Vec<Vec<Expr>>,
}

impl Matrix {
    /// Creates a named matrix; all rows must have the same length.
    pub fn new(
        name: impl Into<String>,
        latex: impl Into<String>,
        rows: Vec<Vec<Expr>>,
    ) -> Result<Self, PolError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|row| row.len() != width) {
            return Err(PolError::Precondition(
                ErrorInfo::new("matrix-ragged", "all matrix rows must have equal length")
                    .with_context("rows", rows.len().to_string()),
            ));
        }
        Ok(Self {
            name: name.into(),
            latex: latex.into(),
            rows,
        })
    }

    /// Name used by the string printer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// LaTeX label.
    pub fn latex(&self) -> &str {
        &self.latex
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.rows.first().map(Vec::len).unwrap_or(0))
    }

    /// Entry at a concrete position.
    pub fn entry(&self, row: usize, col: usize) -> Option<&Expr> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Element at possibly symbolic indices.
    pub fn element(&self, row: Expr, col: Expr) -> Expr {
        Expr::matrix_element(self.clone(), row, col)
    }
}

/// Pauli matrix σ₁, σ₂ or σ₃.
pub fn msigma(index: u8) -> Result<Matrix, PolError> {
    let i = Expr::i;
    let rows = match index {
        1 => vec![
            vec![Expr::zero(), Expr::one()],
            vec![Expr::one(), Expr::zero()],
        ],
        2 => vec![
            vec![Expr::zero(), -i()],
            vec![i(), Expr::zero()],
        ],
        3 => vec![
            vec![Expr::one(), Expr::zero()],
            vec![Expr::zero(), Expr::integer(-1)],
        ],
        other => {
            return Err(PolError::Precondition(
                ErrorInfo::new("pauli-index", "Pauli matrices are indexed 1, 2 or 3")
                    .with_context("index", other.to_string()),
            ))
        }
    };
    Matrix::new(
        format!("sigma{index}"),
        format!(r"\sigma_{{{index}}}"),
        rows,
    )
}
