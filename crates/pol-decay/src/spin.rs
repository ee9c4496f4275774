//! Spin projections and LS coupling enumeration.

use pol_core::{ErrorInfo, PolError, Rational};

use crate::node::LSCoupling;
use crate::particle::Particle;

/// Allowed projections `-s, -s + 1, ..., s` of a spin `s`.
///
/// Negative input yields an empty range.
pub fn create_spin_range(spin: Rational) -> Vec<Rational> {
    let mut values = Vec::new();
    let mut value = -spin;
    while value <= spin {
        values.push(value);
        value = value + Rational::ONE;
    }
    values
}

fn coupled_spins(j1: Rational, j2: Rational) -> Vec<Rational> {
    let mut values = Vec::new();
    let mut value = (j1 - j2).abs();
    while value <= j1 + j2 {
        values.push(value);
        value = value + Rational::ONE;
    }
    values
}

/// All `(L, S)` combinations for `parent → child1 child2`, ordered by `L` then `S`.
///
/// `S` couples the child spins, `L` couples with `S` to the parent spin. When
/// `conserve_parity` is set only combinations with
/// `P_parent = P_1 · P_2 · (-1)^L` are kept.
pub fn generate_ls_couplings(
    parent: &Particle,
    child1: &Particle,
    child2: &Particle,
    conserve_parity: bool,
) -> Vec<LSCoupling> {
    let mut couplings = Vec::new();
    for s in coupled_spins(child1.spin, child2.spin) {
        for l in coupled_spins(parent.spin, s) {
            if !l.is_integer() || l.is_negative() {
                continue;
            }
            let l = l.numerator() as u32;
            if conserve_parity {
                let orbital = if l % 2 == 0 { 1 } else { -1 };
                let product = (child1.parity * child2.parity).sign() * orbital;
                if product != parent.parity.sign() {
                    continue;
                }
            }
            couplings.push(LSCoupling::new(l, s));
        }
    }
    couplings.sort_by(|a, b| a.l.cmp(&b.l).then(a.s.cmp(&b.s)));
    couplings
}

/// Lowest `(L, S)` coupling for `parent → child1 child2`.
pub fn minimal_ls(
    parent: &Particle,
    child1: &Particle,
    child2: &Particle,
    conserve_parity: bool,
) -> Result<LSCoupling, PolError> {
    generate_ls_couplings(parent, child1, child2, conserve_parity)
        .into_iter()
        .next()
        .ok_or_else(|| {
            PolError::Model(
                ErrorInfo::new("ls-coupling", "no LS coupling satisfies the selection rules")
                    .with_context("parent", parent.name.clone())
                    .with_context("children", format!("{} {}", child1.name, child2.name))
                    .with_context("conserve_parity", conserve_parity.to_string()),
            )
        })
}
