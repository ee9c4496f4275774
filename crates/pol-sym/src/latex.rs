//! LaTeX printer.

use pol_core::Rational;

use crate::expr::{Condition, Expr};

const GREEK: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi",
    "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Phi", "Psi", "Omega",
];

/// Converts a plain symbol name into LaTeX.
///
/// Greek names become commands, trailing digits and `_suffix` parts become
/// subscripts and trailing `'` become primes: `lambda1` → `\lambda_{1}`,
/// `m_K` → `m_{K}`, `lambda'` → `\lambda^{\prime}`.
pub fn name_to_latex(name: &str) -> String {
    if name.starts_with('\\') {
        return name.to_string();
    }
    let primes = name.len() - name.trim_end_matches('\'').len();
    let name = name.trim_end_matches('\'');
    let (head, subscript) = match name.split_once('_') {
        Some((head, sub)) => (head, Some(sub.to_string())),
        None => {
            let digits_at = name
                .char_indices()
                .rev()
                .take_while(|(_, c)| c.is_ascii_digit())
                .last()
                .map(|(idx, _)| idx);
            match digits_at {
                Some(idx) if idx > 0 => (&name[..idx], Some(name[idx..].to_string())),
                _ => (name, None),
            }
        }
    };
    let mut latex = if GREEK.contains(&head) {
        format!("\\{head}")
    } else {
        head.to_string()
    };
    if let Some(subscript) = subscript {
        latex.push_str(&format!("_{{{subscript}}}"));
    }
    if primes > 0 {
        latex.push_str(&format!("^{{{}}}", vec![r"\prime"; primes].join(" ")));
    }
    latex
}

fn rational_latex(value: Rational) -> String {
    if value.is_integer() {
        return value.numerator().to_string();
    }
    let sign = if value.is_negative() { "- " } else { "" };
    format!(
        "{sign}\\frac{{{}}}{{{}}}",
        value.numerator().abs(),
        value.denominator()
    )
}

fn needs_parens_in_product(expr: &Expr) -> bool {
    matches!(expr, Expr::Add(_)) || expr.is_negative_term()
}

fn needs_parens_as_base(expr: &Expr) -> bool {
    match expr {
        Expr::Add(_) | Expr::Mul(_) | Expr::Pow(..) | Expr::Sum(_) => true,
        Expr::Number(value) => value.is_negative() || !value.is_integer(),
        Expr::Float(value) => *value < 0.0,
        _ => false,
    }
}

fn paren(latex: String) -> String {
    format!(r"\left({latex}\right)")
}

fn joined(items: &[Expr]) -> String {
    items
        .iter()
        .map(Expr::latex)
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_unit_spaced(values: &[Expr]) -> bool {
    let numbers: Option<Vec<Rational>> = values.iter().map(Expr::as_rational).collect();
    match numbers {
        Some(numbers) if numbers.len() >= 2 => numbers
            .windows(2)
            .all(|pair| pair[1].checked_add(-pair[0]) == Some(Rational::ONE)),
        _ => false,
    }
}

impl Expr {
    /// LaTeX rendering of the expression.
    pub fn latex(&self) -> String {
        match self {
            Expr::Number(value) => rational_latex(*value),
            Expr::Float(value) => value.to_string(),
            Expr::ImaginaryUnit => "i".to_string(),
            Expr::Symbol(symbol) => symbol.latex(),
            Expr::Indexed(indexed) => {
                let base = indexed.base.latex();
                let base = if base.contains('^') || base.contains('_') {
                    format!("{{{base}}}")
                } else {
                    base
                };
                format!("{base}_{{{}}}", joined(&indexed.indices))
            }
            Expr::Function(function) => {
                let head = match &function.latex {
                    Some(latex) => latex.clone(),
                    None => format!(r"\operatorname{{{}}}", function.name),
                };
                format!("{head}{}", paren(joined(&function.args)))
            }
            Expr::Add(terms) => {
                let mut latex = String::new();
                for (idx, term) in terms.iter().enumerate() {
                    if idx == 0 {
                        latex.push_str(&term.latex());
                    } else if term.is_negative_term() {
                        latex.push_str(" - ");
                        latex.push_str(&(-term).latex());
                    } else {
                        latex.push_str(" + ");
                        latex.push_str(&term.latex());
                    }
                }
                latex
            }
            Expr::Mul(factors) => product_latex(factors),
            Expr::Pow(base, exponent) => {
                if exponent.is_negative_term() {
                    return product_latex(std::slice::from_ref(self));
                }
                if exponent.as_rational() == Some(Rational::half()) {
                    return format!(r"\sqrt{{{}}}", base.latex());
                }
                let base_latex = if needs_parens_as_base(base) {
                    paren(base.latex())
                } else {
                    base.latex()
                };
                format!("{base_latex}^{{{}}}", exponent.latex())
            }
            Expr::Conjugate(inner) => format!(r"\overline{{{}}}", inner.latex()),
            Expr::Piecewise(pieces) => {
                let rows: Vec<String> = pieces
                    .iter()
                    .map(|(value, condition)| match condition {
                        Condition::True => format!(r"{} & \text{{otherwise}}", value.latex()),
                        other => format!(r"{} & \text{{for}}\: {}", value.latex(), other.latex()),
                    })
                    .collect();
                format!(r"\begin{{cases}} {} \end{{cases}}", rows.join(r" \\ "))
            }
            Expr::MatrixElement(element) => format!(
                "{}_{{{}, {}}}",
                paren(element.matrix.latex().to_string()),
                element.row.latex(),
                element.col.latex()
            ),
            Expr::Sum(sum) => {
                let mut latex = String::new();
                for (symbol, values) in sum.indices() {
                    let index = symbol.latex();
                    if is_unit_spaced(values) {
                        let first = values.first().map(Expr::latex).unwrap_or_default();
                        let last = values.last().map(Expr::latex).unwrap_or_default();
                        latex.push_str(&format!(r"\sum_{{{index}={first}}}^{{{last}}} "));
                    } else {
                        latex.push_str(&format!(
                            r"\sum_{{{index}\in\left\{{{}\right\}}}} ",
                            joined(values)
                        ));
                    }
                }
                let body = sum.expression();
                if matches!(body, Expr::Add(_)) {
                    latex.push_str(&paren(body.latex()));
                } else {
                    latex.push_str(&body.latex());
                }
                latex
            }
        }
    }
}

impl Condition {
    /// LaTeX rendering of the condition.
    pub fn latex(&self) -> String {
        match self {
            Condition::True => r"\text{True}".to_string(),
            Condition::False => r"\text{False}".to_string(),
            Condition::Less(lhs, rhs) => format!("{} < {}", lhs.latex(), rhs.latex()),
        }
    }
}

fn product_latex(factors: &[Expr]) -> String {
    let mut sign = "";
    let mut numerator: Vec<String> = Vec::new();
    let mut denominator: Vec<String> = Vec::new();
    for factor in factors {
        match factor {
            Expr::Number(value) => {
                if value.is_negative() {
                    sign = "-";
                }
                let value = value.abs();
                if value.numerator() != 1 {
                    numerator.push(value.numerator().to_string());
                }
                if value.denominator() != 1 {
                    denominator.push(value.denominator().to_string());
                }
            }
            Expr::Float(value) => {
                if *value < 0.0 {
                    sign = "-";
                }
                numerator.push(value.abs().to_string());
            }
            Expr::Pow(base, exponent) if exponent.is_negative_term() => {
                let inverse = Expr::pow((**base).clone(), -&**exponent);
                denominator.push(inverse.latex());
            }
            other => {
                if needs_parens_in_product(other) {
                    numerator.push(paren(other.latex()));
                } else {
                    numerator.push(other.latex());
                }
            }
        }
    }
    let top = if numerator.is_empty() {
        "1".to_string()
    } else {
        numerator.join(" ")
    };
    if denominator.is_empty() {
        format!("{sign}{top}")
    } else {
        format!(r"{sign}\frac{{{top}}}{{{}}}", denominator.join(" "))
    }
}

/// Renders `lhs = rhs` over several lines with at most `terms_per_line`
/// terms of `rhs` per line.
pub fn multiline_latex(lhs: &Expr, rhs: &Expr, terms_per_line: usize, environment: &str) -> String {
    let per_line = terms_per_line.max(1);
    let mut latex = format!("\\begin{{{environment}}}\n{} & = &", lhs.latex());
    for (idx, term) in rhs.terms().iter().enumerate() {
        let negative = term.is_negative_term();
        let body = if negative { (-term).latex() } else { term.latex() };
        if idx > 0 && idx % per_line == 0 {
            latex.push_str(" \\nonumber\\\\\n& &");
        }
        match (idx, negative) {
            (0, false) => latex.push_str(&format!(" {body}")),
            (0, true) => latex.push_str(&format!(" - {body}")),
            (_, false) => latex.push_str(&format!(" + {body}")),
            (_, true) => latex.push_str(&format!(" - {body}")),
        }
    }
    latex.push_str(&format!("\n\\end{{{environment}}}"));
    latex
}
