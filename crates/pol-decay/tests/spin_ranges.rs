use pol_core::Rational;
use pol_decay::{create_spin_range, generate_ls_couplings, minimal_ls, LSCoupling, Parity, Particle};

fn particle(name: &str, spin: Rational, parity: Parity) -> Particle {
    Particle::new(name, name, spin, parity, 1.0, 0.0)
}

#[test]
fn spin_range_covers_all_projections() {
    assert_eq!(
        create_spin_range(Rational::new(3, 2)),
        vec![
            Rational::new(-3, 2),
            Rational::new(-1, 2),
            Rational::new(1, 2),
            Rational::new(3, 2)
        ]
    );
    assert_eq!(create_spin_range(Rational::ZERO), vec![Rational::ZERO]);
    assert_eq!(create_spin_range(Rational::integer(1)).len(), 3);
}

#[test]
fn strong_decay_keeps_parity_allowed_couplings() {
    let delta = particle("D(1232)", Rational::new(3, 2), Parity::Positive);
    let proton = particle("p", Rational::half(), Parity::Positive);
    let pion = particle("pi", Rational::ZERO, Parity::Negative);
    let couplings = generate_ls_couplings(&delta, &proton, &pion, true);
    assert_eq!(couplings, vec![LSCoupling::new(1, Rational::half())]);
    let all = generate_ls_couplings(&delta, &proton, &pion, false);
    assert_eq!(
        all,
        vec![
            LSCoupling::new(1, Rational::half()),
            LSCoupling::new(2, Rational::half())
        ]
    );
}

#[test]
fn weak_production_picks_lowest_orbital_momentum() {
    let lc = particle("Lc", Rational::half(), Parity::Positive);
    let kstar = particle("K(892)", Rational::integer(1), Parity::Negative);
    let proton = particle("p", Rational::half(), Parity::Positive);
    let ls = minimal_ls(&lc, &kstar, &proton, false).expect("coupling exists");
    assert_eq!(ls, LSCoupling::new(0, Rational::half()));
    let couplings = generate_ls_couplings(&lc, &kstar, &proton, false);
    assert!(couplings.windows(2).all(|pair| (pair[0].l, pair[0].s) <= (pair[1].l, pair[1].s)));
    assert!(couplings.contains(&LSCoupling::new(2, Rational::new(3, 2))));
}

#[test]
fn forbidden_decay_reports_model_error() {
    let scalar = particle("f0", Rational::ZERO, Parity::Positive);
    let pion = particle("pi", Rational::ZERO, Parity::Negative);
    let vector = particle("rho", Rational::integer(1), Parity::Negative);
    let err = minimal_ls(&scalar, &pion, &vector, true).expect_err("0+ -> 0- 1- is forbidden");
    assert_eq!(err.info().code, "ls-coupling");
    assert!(minimal_ls(&scalar, &pion, &vector, false).is_ok());
}
