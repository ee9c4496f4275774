use pol_sym::latex::name_to_latex;
use pol_sym::{multiline_latex, Expr, PoolSum, Symbol};

fn sym(name: &str) -> Expr {
    Symbol::new(name).into()
}

#[test]
fn symbol_names_convert_to_latex() {
    assert_eq!(name_to_latex("lambda"), r"\lambda");
    assert_eq!(name_to_latex("lambda1"), r"\lambda_{1}");
    assert_eq!(name_to_latex("lambda'"), r"\lambda^{\prime}");
    assert_eq!(name_to_latex("m_K"), "m_{K}");
    assert_eq!(name_to_latex(r"\Gamma"), r"\Gamma");
    assert_eq!(Symbol::new("x").with_latex(r"\xi").latex(), r"\xi");
}

#[test]
fn numbers_and_products() {
    assert_eq!(Expr::rational(1, 2).latex(), r"\frac{1}{2}");
    assert_eq!(Expr::rational(-1, 2).latex(), r"- \frac{1}{2}");
    assert_eq!((sym("x") / sym("y")).latex(), r"\frac{x}{y}");
    assert_eq!((-sym("x")).latex(), "-x");
    assert_eq!((sym("x") - sym("y")).latex(), "x - y");
    assert_eq!(sym("z").conjugate().latex(), r"\overline{z}");
    assert_eq!(Expr::pow(sym("x") + sym("y"), Expr::integer(2)).latex(), r"\left(x + y\right)^{2}");
}

#[test]
fn sums_render_with_ranges() {
    let a = Symbol::real("a");
    let sum = Expr::Sum(PoolSum::new(
        Expr::indexed(Symbol::new("H"), vec![a.clone().into()]),
        vec![(a, vec![Expr::rational(-1, 2), Expr::rational(1, 2)])],
    ));
    assert_eq!(sum.latex(), r"\sum_{a=- \frac{1}{2}}^{\frac{1}{2}} H_{a}");
}

#[test]
fn multiline_splits_terms() {
    let rhs = sym("a") + sym("b") + sym("c");
    let latex = multiline_latex(&sym("y"), &rhs, 2, "eqnarray");
    assert_eq!(
        latex,
        "\\begin{eqnarray}\ny & = & a + b \\nonumber\\\\\n& & + c\n\\end{eqnarray}"
    );
}
