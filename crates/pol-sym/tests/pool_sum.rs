use pol_sym::{Condition, Expr, PoolSum, Symbol};

fn coupling(index: Expr) -> Expr {
    Expr::indexed(Symbol::new("H"), vec![index])
}

#[test]
fn doit_expands_all_combinations() {
    let a = Symbol::real("a");
    let b = Symbol::real("b");
    let summand = coupling(a.clone().into()) * Expr::Symbol(b.clone());
    let sum = PoolSum::new(
        summand,
        vec![
            (a.clone(), vec![Expr::integer(1), Expr::integer(2)]),
            (b.clone(), vec![Expr::integer(3), Expr::integer(5)]),
        ],
    );
    assert_eq!(sum.num_terms(), 4);
    let expected = Expr::integer(8) * coupling(Expr::integer(1))
        + Expr::integer(8) * coupling(Expr::integer(2));
    assert_eq!(sum.doit(true), expected);
}

#[test]
fn cleanup_substitutes_single_values_and_drops_unused_indices() {
    let a = Symbol::real("a");
    let b = Symbol::real("b");
    let c = Symbol::real("c");
    let summand = coupling(Expr::Symbol(a.clone())) * Expr::Symbol(c.clone());
    let sum = PoolSum::new(
        summand,
        vec![
            (a.clone(), vec![Expr::integer(1), Expr::integer(2)]),
            (b.clone(), vec![Expr::integer(0), Expr::integer(1), Expr::integer(2)]),
            (c.clone(), vec![Expr::integer(7)]),
        ],
    );
    let cleaned = sum.cleanup();
    let expected_inner = PoolSum::new(
        coupling(Expr::Symbol(a.clone())) * Expr::integer(7),
        vec![(a, vec![Expr::integer(1), Expr::integer(2)])],
    );
    assert_eq!(cleaned, Expr::integer(3) * Expr::Sum(expected_inner));
    assert_eq!(cleaned.doit(true), Expr::Sum(sum).doit(true));
}

#[test]
fn cleanup_without_remaining_indices_returns_summand() {
    let a = Symbol::real("a");
    let sum = PoolSum::new(coupling(a.clone().into()), vec![(a, vec![Expr::rational(1, 2)])]);
    assert_eq!(sum.cleanup(), coupling(Expr::rational(1, 2)));
}

#[test]
fn shallow_doit_only_expands_top_level() {
    let a = Symbol::real("a");
    let inner = Expr::Sum(PoolSum::new(
        coupling(a.clone().into()),
        vec![(a, vec![Expr::integer(1), Expr::integer(2)])],
    ));
    let wrapped = inner.clone() * Expr::Symbol(Symbol::new("k"));
    assert_eq!(wrapped.doit(false), wrapped);
    assert_ne!(wrapped.doit(true), wrapped);
    assert_ne!(inner.doit(false), inner);
}

#[test]
fn bound_indices_are_not_free_and_not_substituted() {
    let a = Symbol::real("a");
    let sum = Expr::Sum(PoolSum::new(
        coupling(a.clone().into()),
        vec![(a.clone(), vec![Expr::integer(1), Expr::integer(2)])],
    ));
    assert!(!sum.free_symbols().contains(&a));
    assert_eq!(sum.subs(&a, &Expr::integer(9)), sum);
}

#[test]
fn piecewise_resolves_after_substitution() {
    let h = Symbol::real("h");
    let index = Expr::piecewise(vec![
        (Expr::one(), Condition::less(h.clone().into(), Expr::zero())),
        (Expr::zero(), Condition::True),
    ]);
    assert!(matches!(index, Expr::Piecewise(_)));
    assert_eq!(index.subs(&h, &Expr::rational(-1, 2)), Expr::one());
    assert_eq!(index.subs(&h, &Expr::rational(1, 2)), Expr::zero());
}
