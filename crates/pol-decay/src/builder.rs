//! Amplitude builders turning a [`ThreeBodyDecay`] into symbolic expressions.

use pol_core::{ErrorInfo, PolError};
use pol_sym::{Expr, Function, PoolSum, Symbol};

use crate::chain::{Subsystem, ThreeBodyDecay, ThreeBodyDecayChain};
use crate::spin::create_spin_range;

/// Intensity model produced by [`AmplitudeBuilder::formulate`].
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeModel {
    /// `Σ |A|²` over all helicities, as an unevaluated sum.
    pub intensity: Expr,
    /// Aligned amplitude in terms of the free helicity symbols.
    pub amplitude: Expr,
    /// Helicity symbols of the initial and final states with their allowed values.
    pub helicity_symbols: Vec<(Symbol, Vec<Expr>)>,
}

/// Amplitude aligned to a reference subsystem, plus the definitions of the
/// alignment angles it introduces.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedAmplitude {
    /// The amplitude expression.
    pub expression: Expr,
    /// Alignment angle symbols and their kinematic definition.
    pub definitions: Vec<(Symbol, Expr)>,
}

/// Formulates amplitude models for a three-body decay.
pub trait AmplitudeBuilder {
    /// Decay the builder formulates.
    fn decay(&self) -> &ThreeBodyDecay;

    /// Full intensity model aligned to `reference_subsystem`.
    fn formulate(&self, reference_subsystem: Subsystem) -> Result<AmplitudeModel, PolError>;

    /// Amplitude for given initial and final-state helicities.
    fn formulate_aligned_amplitude(
        &self,
        lambda0: &Expr,
        final_state_helicities: &[Expr],
        reference_subsystem: Subsystem,
    ) -> Result<AlignedAmplitude, PolError>;
}

/// Reference builder: an isobar sum of helicity couplings times lineshapes,
/// rotated into the reference frame with Wigner-d functions.
#[derive(Debug, Clone)]
pub struct HelicityAmplitudeBuilder {
    decay: ThreeBodyDecay,
}

impl HelicityAmplitudeBuilder {
    /// Creates a builder for `decay`.
    pub fn new(decay: ThreeBodyDecay) -> Self {
        Self { decay }
    }

    /// Helicity symbol of final-state particle `index`.
    pub fn final_state_helicity(index: u8) -> Symbol {
        Symbol::real(format!("lambda{index}"))
    }

    /// Helicity symbol of the initial state.
    pub fn initial_state_helicity() -> Symbol {
        Symbol::real("lambda0")
    }

    /// Squared invariant mass of subsystem `k`.
    pub fn invariant_mass(subsystem: Subsystem) -> Symbol {
        Symbol::real(format!("sigma{}", subsystem.index()))
    }

    fn coupling_symbol(chain: &ThreeBodyDecayChain) -> Symbol {
        let resonance = chain.resonance();
        Symbol::new(format!("H_{}", resonance.name))
            .with_latex(format!(r"\mathcal{{H}}^{{{}}}", resonance.latex))
    }

    fn lineshape(chain: &ThreeBodyDecayChain, subsystem: Subsystem) -> Expr {
        let resonance = chain.resonance();
        let mass = Symbol::real(format!("m_{}", resonance.name))
            .with_latex(format!("m_{{{}}}", resonance.latex));
        let width = Symbol::real(format!("Gamma_{}", resonance.name))
            .with_latex(format!(r"\Gamma_{{{}}}", resonance.latex));
        let name = resonance
            .lineshape
            .clone()
            .unwrap_or_else(|| "BreitWigner".to_string());
        Function::new(
            name,
            vec![
                Self::invariant_mass(subsystem).into(),
                mass.into(),
                width.into(),
            ],
        )
        .with_latex(format!(r"\mathcal{{R}}_{{{}}}", resonance.latex))
        .into()
    }

    fn alignment_angle(subsystem: Subsystem, reference: Subsystem) -> (Symbol, Expr) {
        let (k, r) = (subsystem.index(), reference.index());
        let symbol = Symbol::real(format!("zeta0_{k}{r}"))
            .with_latex(format!(r"\zeta^{{0}}_{{{k}({r})}}"));
        let definition = Function::new(
            format!("zeta0_{k}{r}"),
            Subsystem::ALL
                .iter()
                .map(|s| Self::invariant_mass(*s).into())
                .collect(),
        )
        .real()
        .into();
        (symbol, definition)
    }

    fn chain_amplitude(
        &self,
        chain: &ThreeBodyDecayChain,
        lambda0: &Expr,
        final_state_helicities: &[Expr],
        reference: Subsystem,
        definitions: &mut Vec<(Symbol, Expr)>,
    ) -> Result<Expr, PolError> {
        let subsystem = self.decay.chain_subsystem(chain)?;
        let coupling = Self::coupling_symbol(chain);
        let lineshape = Self::lineshape(chain, subsystem);
        let coupling_at = |nu: Expr| {
            let mut indices = vec![nu];
            indices.extend(final_state_helicities.iter().cloned());
            Expr::indexed(coupling.clone(), indices)
        };
        if subsystem == reference {
            return Ok(coupling_at(lambda0.clone()) * lineshape);
        }
        let (zeta, definition) = Self::alignment_angle(subsystem, reference);
        if !definitions.iter().any(|(symbol, _)| symbol == &zeta) {
            definitions.push((zeta.clone(), definition));
        }
        let j0 = self.decay.initial_state.spin;
        let terms = create_spin_range(j0).into_iter().map(|nu| {
            let wigner: Expr = Function::new(
                "WignerD",
                vec![j0.into(), lambda0.clone(), nu.into(), zeta.clone().into()],
            )
            .with_latex("d")
            .real()
            .into();
            wigner * coupling_at(nu.into())
        });
        Ok(Expr::add(terms) * lineshape)
    }
}

impl AmplitudeBuilder for HelicityAmplitudeBuilder {
    fn decay(&self) -> &ThreeBodyDecay {
        &self.decay
    }

    fn formulate(&self, reference_subsystem: Subsystem) -> Result<AmplitudeModel, PolError> {
        let lambda0 = Self::initial_state_helicity();
        let mut helicity_symbols = vec![(
            lambda0.clone(),
            to_exprs(self.decay.initial_state.spin),
        )];
        for (index, particle) in &self.decay.final_state {
            helicity_symbols.push((
                Self::final_state_helicity(*index),
                to_exprs(particle.spin),
            ));
        }
        let final_state: Vec<Expr> = helicity_symbols[1..]
            .iter()
            .map(|(symbol, _)| symbol.clone().into())
            .collect();
        let amplitude = self
            .formulate_aligned_amplitude(&lambda0.into(), &final_state, reference_subsystem)?
            .expression;
        let intensity = PoolSum::new(
            amplitude.conjugate() * amplitude.clone(),
            helicity_symbols.clone(),
        )
        .into();
        log::debug!(
            "formulated intensity with {} chains in subsystem {}",
            self.decay.chains.len(),
            reference_subsystem
        );
        Ok(AmplitudeModel {
            intensity,
            amplitude,
            helicity_symbols,
        })
    }

    fn formulate_aligned_amplitude(
        &self,
        lambda0: &Expr,
        final_state_helicities: &[Expr],
        reference_subsystem: Subsystem,
    ) -> Result<AlignedAmplitude, PolError> {
        if final_state_helicities.len() != self.decay.final_state.len() {
            return Err(PolError::Precondition(
                ErrorInfo::new(
                    "helicity-arity",
                    "one helicity per final-state particle is required",
                )
                .with_context("expected", self.decay.final_state.len().to_string())
                .with_context("got", final_state_helicities.len().to_string()),
            ));
        }
        let mut definitions = Vec::new();
        let mut terms = Vec::with_capacity(self.decay.chains.len());
        for chain in &self.decay.chains {
            terms.push(self.chain_amplitude(
                chain,
                lambda0,
                final_state_helicities,
                reference_subsystem,
                &mut definitions,
            )?);
        }
        Ok(AlignedAmplitude {
            expression: Expr::add(terms),
            definitions,
        })
    }
}

fn to_exprs(spin: pol_core::Rational) -> Vec<Expr> {
    create_spin_range(spin).into_iter().map(Expr::from).collect()
}
