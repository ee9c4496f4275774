use pol_core::{PolError, Rational};
use pol_decay::{IsobarNode, LSCoupling, Parity, Particle, ThreeBodyDecayChain};
use pol_io::table::format_mev;
use pol_io::{as_markdown_table, DecayItem};

fn resonance(lineshape: Option<&str>) -> Particle {
    let particle = Particle::new(
        "L(1520)",
        r"\Lambda(1520)",
        Rational::new(3, 2),
        Parity::Negative,
        2.28646,
        0.0156,
    );
    match lineshape {
        Some(name) => particle.with_lineshape(name),
        None => particle,
    }
}

fn stable(name: &str, latex: &str, spin: Rational, parity: Parity) -> Particle {
    Particle::new(name, latex, spin, parity, 0.5, 0.0)
}

fn chain() -> ThreeBodyDecayChain {
    let parent = stable("Lc", r"\Lambda_c^+", Rational::half(), Parity::Positive);
    ThreeBodyDecayChain::new(
        parent,
        resonance(Some("BreitWignerMinL")),
        (
            stable("K", "K^-", Rational::ZERO, Parity::Negative),
            stable("p", "p", Rational::half(), Parity::Positive),
        ),
        stable("pi", r"\pi^+", Rational::ZERO, Parity::Negative),
        LSCoupling::new(1, Rational::new(3, 2)),
        LSCoupling::new(2, Rational::half()),
    )
}

#[test]
fn resonance_table_adds_lineshape_column_when_present() {
    let with = resonance(Some("BreitWignerMinL"));
    let without = resonance(None);
    let table = as_markdown_table(&[DecayItem::from(&with), DecayItem::from(&without)])
        .expect("table");
    let expected = concat!(
        "| name | LaTeX | $J^P$ | mass (MeV) | width (MeV) | lineshape |\n",
        "| --- | --- | --- | --- | --- | --- |\n",
        "| L(1520) | $\\Lambda(1520)$ | $\\frac{3}{2}^-$ | 2,286 | 16 | BreitWignerMinL |\n",
        "| L(1520) | $\\Lambda(1520)$ | $\\frac{3}{2}^-$ | 2,286 | 16 |  |\n",
    );
    assert_eq!(table, expected);

    let table = as_markdown_table(&[DecayItem::from(&without)]).expect("table");
    assert!(table.starts_with("| name | LaTeX | $J^P$ | mass (MeV) | width (MeV) |\n"));
    assert!(!table.contains("lineshape"));
}

#[test]
fn chain_table_lists_minimal_ls() {
    let chain = chain();
    let table = as_markdown_table(&[DecayItem::from(&chain)]).expect("table");
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        r"| resonance | $J^P$ | mass (MeV) | width (MeV) | $L_\mathrm{dec}^\mathrm{min}$ | $L_\mathrm{prod}^\mathrm{min}$ | lineshape |"
    );
    assert_eq!(
        lines[2],
        r"| $\Lambda(1520) \to K^- p$ | $\frac{3}{2}^-$ | 2,286 | 16 | 2 | 1 | BreitWignerMinL |"
    );
}

#[test]
fn mixed_empty_and_unsupported_items_fail() {
    let particle = resonance(None);
    let chain = chain();
    let err = as_markdown_table(&[DecayItem::from(&particle), DecayItem::from(&chain)])
        .expect_err("mixed items");
    assert!(matches!(err, PolError::Heterogeneous(_)));
    assert_eq!(err.info().message, "Not all items are of type Particle");

    let err = as_markdown_table(&[]).expect_err("empty");
    assert!(matches!(err, PolError::EmptyInput(_)));

    let node: IsobarNode = chain.decay();
    let err = as_markdown_table(&[DecayItem::from(&node)]).expect_err("nodes have no table");
    assert!(matches!(err, PolError::Unsupported(_)));
    assert!(err.info().message.contains("IsobarNode"));
}

#[test]
fn mev_values_are_rounded_and_grouped() {
    assert_eq!(format_mev(0.13957018), "140");
    assert_eq!(format_mev(0.0), "0");
    assert_eq!(format_mev(1.2), "1,200");
    assert_eq!(format_mev(1234.5678), "1,234,568");
    assert_eq!(format_mev(-0.0021), "-2");
}
