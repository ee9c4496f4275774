//! Output surfaces for rendered math.

use std::any::Any;
use std::io::Write;

use pol_core::{ErrorInfo, PolError};
use pol_sym::{multiline_latex, Expr};

use crate::latex::{rcl_array, LatexRegistry, ToLatex};

/// Destination for display-math LaTeX.
pub trait DisplaySurface {
    /// Shows one block of display math.
    fn show_math(&mut self, latex: &str) -> Result<(), PolError>;
}

/// Collects blocks in memory.
impl DisplaySurface for Vec<String> {
    fn show_math(&mut self, latex: &str) -> Result<(), PolError> {
        self.push(latex.to_string());
        Ok(())
    }
}

/// Writes each block as `$$ ... $$` to an [`std::io::Write`] sink.
#[derive(Debug)]
pub struct MathWriter<W: Write> {
    writer: W,
}

impl<W: Write> MathWriter<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySurface for MathWriter<W> {
    fn show_math(&mut self, latex: &str) -> Result<(), PolError> {
        writeln!(self.writer, "$$\n{latex}\n$$").map_err(|err| {
            PolError::Io(
                ErrorInfo::new("display-write", err.to_string()).with_context("target", "math writer"),
            )
        })
    }
}

/// Renders `value` through `registry` and shows it on `surface`.
pub fn display_latex<T, S>(registry: &LatexRegistry, value: &T, surface: &mut S) -> Result<(), PolError>
where
    T: ToLatex + Any,
    S: DisplaySurface + ?Sized,
{
    let latex = registry.render(value)?;
    surface.show_math(&latex)
}

/// Shows `expr = expr.doit(deep)`.
///
/// Without `terms_per_line` the equation is a one-row `rcl` array; with it the
/// right-hand side is broken over an `eqnarray`.
pub fn display_doit<S>(
    registry: &LatexRegistry,
    expr: &Expr,
    deep: bool,
    terms_per_line: Option<usize>,
    surface: &mut S,
) -> Result<(), PolError>
where
    S: DisplaySurface + ?Sized,
{
    let evaluated = expr.doit(deep);
    let latex = match terms_per_line {
        None => rcl_array(vec![(registry.render(expr)?, registry.render(&evaluated)?)])?,
        Some(terms_per_line) => multiline_latex(expr, &evaluated, terms_per_line, "eqnarray"),
    };
    surface.show_math(&latex)
}
