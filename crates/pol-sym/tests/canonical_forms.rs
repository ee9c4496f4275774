use pol_sym::{Expr, Symbol};
use proptest::prelude::*;

fn sym(name: &str) -> Expr {
    Symbol::new(name).into()
}

#[test]
fn like_terms_are_merged() {
    let x = sym("x");
    assert_eq!(x.clone() + x.clone(), Expr::integer(2) * x.clone());
    assert_eq!(x.clone() - x.clone(), Expr::zero());
}

#[test]
fn powers_of_equal_bases_cancel() {
    let x = sym("x");
    assert_eq!(x.clone() / x.clone(), Expr::one());
    assert_eq!(x.clone() * x.clone(), Expr::pow(x.clone(), Expr::integer(2)));
}

#[test]
fn imaginary_unit_squares_to_minus_one() {
    assert_eq!(Expr::i() * Expr::i(), Expr::integer(-1));
    let i_cubed = Expr::mul([Expr::i(), Expr::i(), Expr::i()]);
    assert_eq!(i_cubed, -Expr::i());
    assert_eq!(Expr::pow(Expr::i(), Expr::integer(4)), Expr::one());
}

#[test]
fn conjugation_rules() {
    let z = sym("z");
    let x: Expr = Symbol::real("x").into();
    assert_eq!(z.conjugate().conjugate(), z);
    assert_eq!(x.conjugate(), x);
    assert_eq!(Expr::i().conjugate(), -Expr::i());
    let product = Expr::i() * z.clone();
    assert_eq!(product.conjugate(), -Expr::i() * z.conjugate());
}

#[test]
fn conjugating_fractional_powers_respects_the_branch() {
    let root = Expr::pow(Expr::integer(-1), Expr::rational(1, 2));
    assert_eq!(root.clone() * root.clone(), Expr::integer(-1));
    assert_eq!(root.conjugate(), -root.clone());

    let positive_root = Expr::pow(Expr::integer(2), Expr::rational(1, 2));
    assert_eq!(positive_root.conjugate(), positive_root);

    let x: Expr = Symbol::real("x").into();
    let unknown_sign = Expr::pow(x.clone(), Expr::rational(1, 2));
    assert_eq!(
        unknown_sign.conjugate(),
        Expr::Conjugate(Box::new(unknown_sign.clone()))
    );
    let cube_root = Expr::pow(Expr::integer(-8), Expr::rational(1, 3));
    assert_eq!(cube_root.conjugate(), Expr::Conjugate(Box::new(cube_root.clone())));

    let z = sym("z");
    let squared = Expr::pow(z.clone(), Expr::integer(2));
    assert_eq!(squared.conjugate(), Expr::pow(z.conjugate(), Expr::integer(2)));
}

#[test]
fn overflowing_numbers_stay_unevaluated() {
    let power = Expr::pow(Expr::integer(2), Expr::integer(64));
    assert!(matches!(power, Expr::Pow(..)));
    assert_eq!(power.to_string(), "2**64");
    assert_eq!(
        Expr::pow(Expr::integer(2), Expr::integer(62)),
        Expr::integer(1 << 62)
    );

    let sum = Expr::integer(i64::MAX) + Expr::integer(1);
    assert!(matches!(sum, Expr::Add(_)));
    assert_eq!(sum.to_string(), format!("{} + 1", i64::MAX));

    let product = Expr::integer(i64::MAX) * Expr::integer(2);
    assert!(matches!(product, Expr::Mul(_)));

    let x = sym("x");
    let merged = Expr::integer(i64::MAX) * x.clone() + x.clone();
    assert!(matches!(merged, Expr::Add(ref terms) if terms.len() == 2));
    assert_eq!(Expr::integer(i64::MAX) + Expr::integer(-1), Expr::integer(i64::MAX - 1));
}

#[test]
fn numeric_coefficient_distributes_over_sum() {
    let (a, b) = (sym("a"), sym("b"));
    let lhs = (a.clone() + b.clone()) * Expr::integer(2);
    let rhs = Expr::integer(2) * a.clone() + Expr::integer(2) * b.clone();
    assert_eq!(lhs, rhs);
    assert_eq!(-(a.clone() - b.clone()), b - a);
}

#[test]
fn string_form_is_deterministic() {
    let (x, y, z) = (sym("x"), sym("y"), sym("z"));
    assert_eq!((x.clone() + y.clone()).to_string(), "x + y");
    assert_eq!((y.clone() + x.clone()).to_string(), "x + y");
    assert_eq!((x.clone() - y.clone()).to_string(), "x - y");
    assert_eq!(((x.clone() + y.clone()) * z).to_string(), "(x + y)*z");
    assert_eq!((x.clone() / y.clone()).to_string(), "x*y**(-1)");
    assert_eq!((Expr::rational(1, 2) * x).to_string(), "(1/2)*x");
    assert_eq!(Expr::float(3.0).to_string(), "3.0");
}

#[test]
fn numbers_fold() {
    let sum = Expr::rational(1, 2) + Expr::rational(1, 2);
    assert_eq!(sum, Expr::one());
    assert_eq!(Expr::pow(Expr::rational(1, 2), Expr::integer(-2)), Expr::integer(4));
    assert_eq!(Expr::float(1.5) + Expr::integer(1), Expr::float(2.5));
}

#[test]
fn expressions_survive_bincode() {
    let expr = sym("x").conjugate() * Expr::rational(-3, 2) + Expr::i();
    let bytes = bincode::serialize(&expr).unwrap();
    let restored: Expr = bincode::deserialize(&bytes).unwrap();
    assert_eq!(restored, expr);
}

proptest! {
    #[test]
    fn addition_is_order_independent(coefficients in proptest::collection::vec(-5i64..5, 1..6)) {
        let names = ["a", "b", "c", "d", "e", "f"];
        let terms: Vec<Expr> = coefficients
            .iter()
            .zip(names)
            .map(|(&c, name)| Expr::integer(c) * sym(name))
            .collect();
        let forward = Expr::add(terms.clone());
        let backward = Expr::add(terms.into_iter().rev());
        prop_assert_eq!(forward.to_string(), backward.to_string());
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn multiplication_is_order_independent(exponents in proptest::collection::vec(-3i64..3, 1..5)) {
        let names = ["p", "q", "r", "s", "t"];
        let factors: Vec<Expr> = exponents
            .iter()
            .zip(names)
            .map(|(&e, name)| Expr::pow(sym(name), Expr::integer(e)))
            .collect();
        let forward = Expr::mul(factors.clone());
        let backward = Expr::mul(factors.into_iter().rev());
        prop_assert_eq!(forward, backward);
    }
}
