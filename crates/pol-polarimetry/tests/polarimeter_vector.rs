use std::cell::Cell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use pol_core::{PolError, Rational};
use pol_decay::{
    create_spin_range, load_decay, AlignedAmplitude, AmplitudeBuilder, AmplitudeModel,
    HelicityAmplitudeBuilder, Parity, Particle, Subsystem, ThreeBodyDecay,
};
use pol_polarimetry::{formulate_polarimetry, to_index};
use pol_sym::{Expr, PoolSum, Symbol};

/// Amplitude `H[λ0]` that ignores the final-state helicities.
struct ToyBuilder {
    decay: ThreeBodyDecay,
    /// Number of `formulate*` calls.
    calls: Cell<usize>,
}

impl ToyBuilder {
    fn new(initial_spin: Rational) -> Self {
        let scalar = |name: &str| Particle::new(name, name, Rational::ZERO, Parity::Negative, 0.1, 0.0);
        let initial = Particle::new("B", "B", initial_spin, Parity::Positive, 2.0, 0.0);
        let final_state = BTreeMap::from([(1, scalar("a")), (2, scalar("b")), (3, scalar("c"))]);
        let decay = ThreeBodyDecay::new(initial, final_state, Vec::new()).expect("valid decay");
        Self {
            decay,
            calls: Cell::new(0),
        }
    }
}

fn coupling(helicity: Expr) -> Expr {
    Expr::indexed(Symbol::new("H"), vec![helicity])
}

impl AmplitudeBuilder for ToyBuilder {
    fn decay(&self) -> &ThreeBodyDecay {
        &self.decay
    }

    fn formulate(&self, reference_subsystem: Subsystem) -> Result<AmplitudeModel, PolError> {
        self.calls.set(self.calls.get() + 1);
        let lambda0 = Symbol::real("lambda0");
        let amplitude = self
            .formulate_aligned_amplitude(&lambda0.clone().into(), &[], reference_subsystem)?
            .expression;
        let mut helicity_symbols = vec![(
            lambda0,
            create_spin_range(self.decay.initial_state.spin)
                .into_iter()
                .map(Expr::from)
                .collect(),
        )];
        for index in 1..=3 {
            helicity_symbols.push((Symbol::real(format!("lambda{index}")), vec![Expr::zero()]));
        }
        let intensity = PoolSum::new(
            amplitude.conjugate() * amplitude.clone(),
            helicity_symbols.clone(),
        )
        .into();
        Ok(AmplitudeModel {
            intensity,
            amplitude,
            helicity_symbols,
        })
    }

    fn formulate_aligned_amplitude(
        &self,
        lambda0: &Expr,
        _final_state_helicities: &[Expr],
        _reference_subsystem: Subsystem,
    ) -> Result<AlignedAmplitude, PolError> {
        self.calls.set(self.calls.get() + 1);
        Ok(AlignedAmplitude {
            expression: coupling(lambda0.clone()),
            definitions: Vec::new(),
        })
    }
}

fn h_plus() -> Expr {
    coupling(Expr::rational(1, 2))
}

fn h_minus() -> Expr {
    coupling(Expr::rational(-1, 2))
}

#[test]
fn toy_components_match_hand_derived_sums() {
    let builder = ToyBuilder::new(Rational::half());
    let (x, y, z) = formulate_polarimetry(&builder, Subsystem::One).expect("spin 1/2");
    let intensity = builder
        .formulate(Subsystem::One)
        .expect("intensity")
        .intensity
        .doit(true);
    assert_eq!(
        intensity,
        h_minus().conjugate() * h_minus() + h_plus().conjugate() * h_plus()
    );

    let x_num = h_minus().conjugate() * h_plus() + h_plus().conjugate() * h_minus();
    let y_num = Expr::i() * h_minus().conjugate() * h_plus()
        - Expr::i() * h_plus().conjugate() * h_minus();
    let z_num = h_plus().conjugate() * h_plus() - h_minus().conjugate() * h_minus();
    assert_eq!(x.doit(true), x_num / intensity.clone());
    assert_eq!(y.doit(true), y_num / intensity.clone());
    assert_eq!(z.doit(true), z_num / intensity);
}

#[test]
fn components_stay_unevaluated() {
    let builder = ToyBuilder::new(Rational::half());
    let (x, _, _) = formulate_polarimetry(&builder, Subsystem::One).expect("spin 1/2");
    let Expr::Mul(factors) = &x else {
        panic!("expected numerator times inverse intensity, got {x}");
    };
    assert!(factors.iter().any(|factor| matches!(factor, Expr::Sum(_))));
    assert!(x.free_symbols().iter().all(|symbol| !symbol.name().starts_with("lambda")));
    assert!(x.to_string().contains("lambda'"));
}

#[test]
fn non_half_spin_is_rejected() {
    for spin in [Rational::ZERO, Rational::integer(1), Rational::new(3, 2)] {
        let builder = ToyBuilder::new(spin);
        let err = formulate_polarimetry(&builder, Subsystem::One).expect_err("wrong spin");
        assert!(matches!(err, PolError::Precondition(_)));
        assert_eq!(
            err.info().message,
            format!("Can only formulate polarimetry for an initial state with spin 1/2, but got {spin}")
        );
        assert_eq!(builder.calls.get(), 0, "no amplitude built for spin {spin}");
    }

    let builder = ToyBuilder::new(Rational::half());
    formulate_polarimetry(&builder, Subsystem::One).expect("spin 1/2");
    assert!(builder.calls.get() > 0);
}

#[test]
fn helicity_index_mapping() {
    assert_eq!(to_index(&Expr::rational(-1, 2)), Expr::one());
    assert_eq!(to_index(&Expr::rational(1, 2)), Expr::zero());
    assert_eq!(to_index(&Expr::integer(-1)), Expr::one());
    assert_eq!(to_index(&Expr::zero()), Expr::zero());
    let symbolic = to_index(&Symbol::real("lambda").into());
    assert!(matches!(symbolic, Expr::Piecewise(_)));
    assert_eq!(symbolic.subs(&Symbol::real("lambda"), &Expr::rational(-3, 2)), Expr::one());
}

#[test]
fn bundled_model_formulation_is_deterministic() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configs/lc2pkpi.yaml");
    let builder = HelicityAmplitudeBuilder::new(load_decay(&path).expect("model"));
    let first = formulate_polarimetry(&builder, Subsystem::One).expect("formulates");
    let second = formulate_polarimetry(&builder, Subsystem::One).expect("formulates");
    assert_eq!(first, second);
    assert_eq!(first.0.to_string(), second.0.to_string());
    let other_reference = formulate_polarimetry(&builder, Subsystem::Two).expect("formulates");
    assert_ne!(first.2, other_reference.2);
    let free: Vec<String> = first
        .2
        .free_symbols()
        .iter()
        .map(|symbol| symbol.name().to_string())
        .collect();
    assert!(free.iter().any(|name| name == "zeta0_21"));
    assert!(!free.iter().any(|name| name.starts_with("lambda")));
}
