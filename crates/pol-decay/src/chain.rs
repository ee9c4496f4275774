//! Three-body decay chains and their topology.

use std::collections::BTreeMap;
use std::fmt;

use pol_core::{ErrorInfo, PolError};
use serde::{Deserialize, Serialize};

use crate::node::{DecayChild, IsobarNode, LSCoupling};
use crate::particle::Particle;

/// Two-body subsystem of a three-body decay, labelled by its spectator index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Subsystem {
    /// Spectator 1, resonance in (2, 3).
    #[default]
    One,
    /// Spectator 2, resonance in (3, 1).
    Two,
    /// Spectator 3, resonance in (1, 2).
    Three,
}

impl Subsystem {
    /// All subsystems in index order.
    pub const ALL: [Subsystem; 3] = [Subsystem::One, Subsystem::Two, Subsystem::Three];

    /// Spectator index `1..=3`.
    pub fn index(self) -> u8 {
        match self {
            Subsystem::One => 1,
            Subsystem::Two => 2,
            Subsystem::Three => 3,
        }
    }

    /// Indices of the two resonance daughters, in cyclic order.
    pub fn complement(self) -> (u8, u8) {
        match self {
            Subsystem::One => (2, 3),
            Subsystem::Two => (3, 1),
            Subsystem::Three => (1, 2),
        }
    }
}

impl TryFrom<u8> for Subsystem {
    type Error = PolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Subsystem::One),
            2 => Ok(Subsystem::Two),
            3 => Ok(Subsystem::Three),
            other => Err(PolError::Precondition(
                ErrorInfo::new("subsystem-index", "subsystem must be 1, 2 or 3")
                    .with_context("subsystem", other.to_string()),
            )),
        }
    }
}

impl From<Subsystem> for u8 {
    fn from(subsystem: Subsystem) -> Self {
        subsystem.index()
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

fn chain_error(code: &str, message: &str, parent: &Particle) -> PolError {
    PolError::Model(ErrorInfo::new(code, message).with_context("parent", parent.name.clone()))
}

/// One decay chain `parent → (resonance → c1 c2) spectator`.
///
/// The pieces are stored flat so that accessors never have to re-check the
/// tree shape; [`ThreeBodyDecayChain::decay`] rebuilds the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeBodyDecayChain {
    parent: Particle,
    resonance: Particle,
    decay_products: (Particle, Particle),
    spectator: Particle,
    incoming_ls: LSCoupling,
    outgoing_ls: LSCoupling,
}

impl ThreeBodyDecayChain {
    /// Creates a chain from its parts.
    pub fn new(
        parent: Particle,
        resonance: Particle,
        decay_products: (Particle, Particle),
        spectator: Particle,
        incoming_ls: LSCoupling,
        outgoing_ls: LSCoupling,
    ) -> Self {
        Self {
            parent,
            resonance,
            decay_products,
            spectator,
            incoming_ls,
            outgoing_ls,
        }
    }

    /// Validates a node of shape `parent → (resonance → p p) p` with both couplings set.
    pub fn from_node(node: IsobarNode) -> Result<Self, PolError> {
        let IsobarNode {
            parent,
            child1,
            child2,
            interaction,
        } = node;
        let incoming_ls = interaction.ok_or_else(|| {
            chain_error("chain-incoming-ls", "production node has no LS coupling", &parent)
        })?;
        let resonance_node = match child1 {
            DecayChild::Node(node) => *node,
            DecayChild::Particle(_) => {
                return Err(chain_error(
                    "chain-shape",
                    "first child of a three-body chain must be the resonance node",
                    &parent,
                ));
            }
        };
        let spectator = match child2 {
            DecayChild::Particle(particle) => particle,
            DecayChild::Node(_) => {
                return Err(chain_error(
                    "chain-shape",
                    "second child of a three-body chain must be a final-state particle",
                    &parent,
                ));
            }
        };
        let IsobarNode {
            parent: resonance,
            child1,
            child2,
            interaction,
        } = resonance_node;
        let outgoing_ls = interaction.ok_or_else(|| {
            chain_error("chain-outgoing-ls", "resonance node has no LS coupling", &resonance)
        })?;
        let decay_products = match (child1, child2) {
            (DecayChild::Particle(first), DecayChild::Particle(second)) => (first, second),
            _ => {
                return Err(chain_error(
                    "chain-shape",
                    "resonance must decay into two final-state particles",
                    &resonance,
                ));
            }
        };
        Ok(Self::new(
            parent,
            resonance,
            decay_products,
            spectator,
            incoming_ls,
            outgoing_ls,
        ))
    }

    /// Tree form of the chain.
    pub fn decay(&self) -> IsobarNode {
        let resonance_node = IsobarNode::new(
            self.resonance.clone(),
            self.decay_products.0.clone(),
            self.decay_products.1.clone(),
            Some(self.outgoing_ls),
        );
        IsobarNode::new(
            self.parent.clone(),
            resonance_node,
            self.spectator.clone(),
            Some(self.incoming_ls),
        )
    }

    /// Decaying initial state.
    pub fn parent(&self) -> &Particle {
        &self.parent
    }

    /// Intermediate resonance.
    pub fn resonance(&self) -> &Particle {
        &self.resonance
    }

    /// Daughters of the resonance.
    pub fn decay_products(&self) -> (&Particle, &Particle) {
        (&self.decay_products.0, &self.decay_products.1)
    }

    /// Final-state particle recoiling against the resonance.
    pub fn spectator(&self) -> &Particle {
        &self.spectator
    }

    /// Coupling of the production vertex.
    pub fn incoming_ls(&self) -> LSCoupling {
        self.incoming_ls
    }

    /// Coupling of the resonance decay vertex.
    pub fn outgoing_ls(&self) -> LSCoupling {
        self.outgoing_ls
    }
}

/// A three-body decay: initial state, numbered final state and its chains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeBodyDecay {
    /// Decaying particle.
    pub initial_state: Particle,
    /// Final-state particles keyed by index `1..=3`.
    pub final_state: BTreeMap<u8, Particle>,
    /// Decay chains in model order.
    pub chains: Vec<ThreeBodyDecayChain>,
}

impl ThreeBodyDecay {
    /// Creates a decay, checking that every chain fits the initial and final state.
    pub fn new(
        initial_state: Particle,
        final_state: BTreeMap<u8, Particle>,
        chains: Vec<ThreeBodyDecayChain>,
    ) -> Result<Self, PolError> {
        if final_state.keys().copied().ne([1u8, 2, 3]) {
            return Err(PolError::Model(
                ErrorInfo::new("final-state-indices", "final state must be indexed 1, 2 and 3")
                    .with_context(
                        "indices",
                        final_state
                            .keys()
                            .map(u8::to_string)
                            .collect::<Vec<_>>()
                            .join(","),
                    ),
            ));
        }
        let decay = Self {
            initial_state,
            final_state,
            chains,
        };
        for chain in &decay.chains {
            if chain.parent().name != decay.initial_state.name {
                return Err(PolError::Model(
                    ErrorInfo::new("chain-parent", "chain does not start from the initial state")
                        .with_context("resonance", chain.resonance().name.clone())
                        .with_context("parent", chain.parent().name.clone()),
                ));
            }
            let subsystem = decay.chain_subsystem(chain)?;
            let (i, j) = subsystem.complement();
            let (first, second) = chain.decay_products();
            let expected = (&decay.final_state[&i].name, &decay.final_state[&j].name);
            let swapped = (expected.1, expected.0);
            let products = (&first.name, &second.name);
            if products != expected && products != swapped {
                return Err(PolError::Model(
                    ErrorInfo::new(
                        "chain-products",
                        "resonance daughters do not match the final state",
                    )
                    .with_context("resonance", chain.resonance().name.clone())
                    .with_context("subsystem", subsystem.to_string()),
                ));
            }
        }
        Ok(decay)
    }

    /// Subsystem of a chain, i.e. the final-state index of its spectator.
    pub fn chain_subsystem(&self, chain: &ThreeBodyDecayChain) -> Result<Subsystem, PolError> {
        let index = self
            .final_state
            .iter()
            .find(|(_, particle)| particle.name == chain.spectator().name)
            .map(|(index, _)| *index)
            .ok_or_else(|| {
                PolError::Model(
                    ErrorInfo::new("chain-spectator", "spectator is not part of the final state")
                        .with_context("spectator", chain.spectator().name.clone()),
                )
            })?;
        Subsystem::try_from(index)
    }

    /// First chain with the given resonance name.
    pub fn find_chain(&self, resonance_name: &str) -> Option<&ThreeBodyDecayChain> {
        self.chains
            .iter()
            .find(|chain| chain.resonance().name == resonance_name)
    }

    /// Distinct resonances in chain order.
    pub fn resonances(&self) -> Vec<&Particle> {
        let mut resonances: Vec<&Particle> = Vec::new();
        for chain in &self.chains {
            if !resonances.iter().any(|p| p.name == chain.resonance().name) {
                resonances.push(chain.resonance());
            }
        }
        resonances
    }
}
