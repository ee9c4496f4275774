use std::fs;
use std::path::PathBuf;

use pol_core::{PolError, Rational};
use pol_decay::{load_decay, DecayConfig, LSCoupling, Subsystem};
use tempfile::tempdir;

fn model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configs/lc2pkpi.yaml")
}

#[test]
fn bundled_model_builds_all_chains() {
    let decay = load_decay(&model_path()).expect("bundled model loads");
    assert_eq!(decay.initial_state.name, "Lc");
    assert_eq!(decay.initial_state.spin, Rational::half());
    assert_eq!(decay.chains.len(), 12);
    let kstar = decay.find_chain("K(892)").expect("K(892) chain");
    assert_eq!(decay.chain_subsystem(kstar).expect("subsystem"), Subsystem::One);
    assert_eq!(kstar.outgoing_ls(), LSCoupling::new(1, Rational::ZERO));
    assert_eq!(kstar.incoming_ls(), LSCoupling::new(0, Rational::half()));
    let l1520 = decay.find_chain("L(1520)").expect("L(1520) chain");
    assert_eq!(l1520.outgoing_ls().l, 2);
    assert_eq!(l1520.resonance().lineshape.as_deref(), Some("BreitWignerMinL"));
}

#[test]
fn minimal_yaml_with_fraction_spins() {
    let yaml = r#"
particles:
  - {name: Lc, latex: '\Lambda_c^+', spin: 1/2, parity: 1, mass: 2.28646}
  - {name: p, latex: p, spin: "1/2", parity: 1, mass: 0.938}
  - {name: pi, latex: '\pi^+', spin: 0, parity: -1, mass: 0.1396}
  - {name: K, latex: K^-, spin: 0, parity: -1, mass: 0.4937}
  - {name: D(1232), latex: '\Delta(1232)', spin: 3/2, parity: 1, mass: 1.232, width: 0.117}
initial_state: Lc
final_state: {1: p, 2: pi, 3: K}
chains:
  - {resonance: D(1232), subsystem: 3}
"#;
    let config = DecayConfig::from_yaml_str(yaml).expect("parses");
    let decay = config.build().expect("builds");
    let chain = &decay.chains[0];
    assert_eq!(chain.spectator().name, "K");
    assert_eq!(chain.outgoing_ls(), LSCoupling::new(1, Rational::half()));
    assert_eq!(chain.resonance().lineshape, None);
}

#[test]
fn unknown_particle_and_bad_values_are_reported() {
    let yaml = r#"
particles:
  - {name: Lc, latex: Lc, spin: 1/2, parity: 1, mass: 2.3}
initial_state: Lc
final_state: {1: p, 2: pi, 3: K}
chains: []
"#;
    let err = DecayConfig::from_yaml_str(yaml)
        .expect("parses")
        .build()
        .expect_err("final state is undefined");
    assert_eq!(err.info().code, "particle-unknown");
    assert!(err.info().hint.is_some());

    let bad_parity = yaml.replace("parity: 1", "parity: 2");
    let err = DecayConfig::from_yaml_str(&bad_parity)
        .expect("parses")
        .build()
        .expect_err("parity 2");
    assert_eq!(err.info().code, "parity-value");

    let bad_subsystem = yaml.replace("chains: []", "chains: [{resonance: Lc, subsystem: 5}]");
    assert!(matches!(
        DecayConfig::from_yaml_str(&bad_subsystem),
        Err(PolError::Serde(_))
    ));
}

#[test]
fn load_reports_missing_and_malformed_files() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("absent.yaml");
    let err = load_decay(&missing).expect_err("missing file");
    assert!(matches!(err, PolError::Io(_)));
    assert_eq!(err.info().context.get("path"), Some(&missing.display().to_string()));

    let malformed = dir.path().join("broken.yaml");
    fs::write(&malformed, "particles: [").expect("write");
    let err = load_decay(&malformed).expect_err("malformed yaml");
    assert!(matches!(err, PolError::Serde(_)));
}
