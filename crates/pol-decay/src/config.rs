//! YAML decay model configuration.
//!
//! ```yaml
//! particles:
//!   - {name: Lc, latex: '\Lambda_c^+', spin: 1/2, parity: 1, mass: 2.28646}
//!   - ...
//! initial_state: Lc
//! final_state: {1: p, 2: pi, 3: K}
//! chains:
//!   - {resonance: L(1405), subsystem: 2}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use pol_core::{ErrorInfo, PolError, Rational};
use serde::{Deserialize, Serialize};

use crate::chain::{Subsystem, ThreeBodyDecay, ThreeBodyDecayChain};
use crate::particle::{Parity, Particle};
use crate::spin::minimal_ls;

/// Spin written either as an integer or as a fraction string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpinValue {
    /// Integer spin, e.g. `1`.
    Integer(i64),
    /// Fraction, e.g. `"3/2"`.
    Text(String),
}

impl SpinValue {
    /// Exact value of the spin.
    pub fn to_rational(&self) -> Result<Rational, PolError> {
        let spin = match self {
            SpinValue::Integer(value) => Rational::integer(*value),
            SpinValue::Text(text) => text.parse()?,
        };
        if spin.is_negative() || !(spin * Rational::integer(2)).is_integer() {
            return Err(PolError::Model(
                ErrorInfo::new("spin-value", "spin must be a non-negative multiple of 1/2")
                    .with_context("spin", spin.to_string()),
            ));
        }
        Ok(spin)
    }
}

/// One particle entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Identifier referenced by the other sections.
    pub name: String,
    /// LaTeX label.
    pub latex: String,
    /// Spin.
    pub spin: SpinValue,
    /// Parity, `1` or `-1`.
    pub parity: i8,
    /// Mass in GeV.
    pub mass: f64,
    /// Width in GeV.
    #[serde(default)]
    pub width: f64,
    /// Lineshape identifier.
    #[serde(default)]
    pub lineshape: Option<String>,
}

impl ParticleConfig {
    fn build(&self) -> Result<Particle, PolError> {
        let particle = Particle {
            name: self.name.clone(),
            latex: self.latex.clone(),
            spin: self.spin.to_rational()?,
            parity: Parity::try_from(self.parity)?,
            mass: self.mass,
            width: self.width,
            lineshape: self.lineshape.clone(),
        };
        Ok(particle)
    }
}

/// Chain entry: a resonance and the subsystem it lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Name of the resonance particle.
    pub resonance: String,
    /// Spectator index of the chain.
    #[serde(default)]
    pub subsystem: Subsystem,
}

/// Complete decay model description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Particle definitions.
    pub particles: Vec<ParticleConfig>,
    /// Name of the decaying particle.
    pub initial_state: String,
    /// Final-state particle names keyed by index `1..=3`.
    pub final_state: BTreeMap<u8, String>,
    /// Decay chains.
    pub chains: Vec<ChainConfig>,
}

impl DecayConfig {
    /// Parses a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, PolError> {
        serde_yaml::from_str(contents)
            .map_err(|err| PolError::Serde(ErrorInfo::new("decay-config-yaml", err.to_string())))
    }

    /// Reads and parses a YAML file.
    pub fn load(path: &Path) -> Result<Self, PolError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|err| PolError::io("decay-config-read", &err, path))?;
        Self::from_yaml_str(&contents).map_err(|err| match err {
            PolError::Serde(info) => {
                PolError::Serde(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Resolves names and derives minimal LS couplings for every chain.
    pub fn build(&self) -> Result<ThreeBodyDecay, PolError> {
        let mut particles: BTreeMap<&str, Particle> = BTreeMap::new();
        for entry in &self.particles {
            if particles.insert(entry.name.as_str(), entry.build()?).is_some() {
                return Err(PolError::Model(
                    ErrorInfo::new("particle-duplicate", "particle defined more than once")
                        .with_context("particle", entry.name.clone()),
                ));
            }
        }
        let lookup = |name: &str| {
            particles.get(name).cloned().ok_or_else(|| {
                PolError::Model(
                    ErrorInfo::new("particle-unknown", "particle is not defined")
                        .with_context("particle", name.to_string())
                        .with_hint("add it to the `particles` section"),
                )
            })
        };
        let initial_state = lookup(self.initial_state.as_str())?;
        let mut final_state = BTreeMap::new();
        for (index, name) in &self.final_state {
            final_state.insert(*index, lookup(name.as_str())?);
        }
        let mut chains = Vec::with_capacity(self.chains.len());
        for entry in &self.chains {
            let resonance = lookup(entry.resonance.as_str())?;
            let (i, j) = entry.subsystem.complement();
            let missing = |index: u8| {
                PolError::Model(
                    ErrorInfo::new("final-state-indices", "final state must be indexed 1, 2 and 3")
                        .with_context("missing", index.to_string()),
                )
            };
            let spectator = final_state
                .get(&entry.subsystem.index())
                .cloned()
                .ok_or_else(|| missing(entry.subsystem.index()))?;
            let first = final_state.get(&i).cloned().ok_or_else(|| missing(i))?;
            let second = final_state.get(&j).cloned().ok_or_else(|| missing(j))?;
            let outgoing_ls = minimal_ls(&resonance, &first, &second, true)?;
            let incoming_ls = minimal_ls(&initial_state, &resonance, &spectator, false)?;
            log::debug!(
                "chain {} in subsystem {}: L_dec={} L_prod={}",
                resonance.name,
                entry.subsystem,
                outgoing_ls.l,
                incoming_ls.l
            );
            chains.push(ThreeBodyDecayChain::new(
                initial_state.clone(),
                resonance,
                (first, second),
                spectator,
                incoming_ls,
                outgoing_ls,
            ));
        }
        ThreeBodyDecay::new(initial_state, final_state, chains)
    }
}

/// Loads a YAML model file and builds the decay.
pub fn load_decay(path: &Path) -> Result<ThreeBodyDecay, PolError> {
    let decay = DecayConfig::load(path)?.build()?;
    log::info!(
        "loaded decay {} with {} chains from {}",
        decay.initial_state.name,
        decay.chains.len(),
        path.display()
    );
    Ok(decay)
}
