use pol_core::Rational;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;

/// `(L, S)` quantum numbers of a two-body vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LSCoupling {
    /// Orbital angular momentum.
    #[serde(rename = "L")]
    pub l: u32,
    /// Coupled spin of the two children.
    #[serde(rename = "S")]
    pub s: Rational,
}

impl LSCoupling {
    /// Creates a coupling.
    pub fn new(l: u32, s: Rational) -> Self {
        Self { l, s }
    }
}

/// Child of an [`IsobarNode`]: a final particle or another two-body decay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecayChild {
    /// Stable particle.
    Particle(Particle),
    /// Nested decay.
    Node(Box<IsobarNode>),
}

impl DecayChild {
    /// The particle itself, or the parent of a nested node.
    pub fn particle(&self) -> &Particle {
        match self {
            DecayChild::Particle(particle) => particle,
            DecayChild::Node(node) => &node.parent,
        }
    }
}

impl From<Particle> for DecayChild {
    fn from(particle: Particle) -> Self {
        DecayChild::Particle(particle)
    }
}

impl From<IsobarNode> for DecayChild {
    fn from(node: IsobarNode) -> Self {
        DecayChild::Node(Box::new(node))
    }
}

/// Two-body decay `parent → child1 child2`, optionally with its LS coupling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsobarNode {
    /// Decaying particle.
    pub parent: Particle,
    /// First child.
    pub child1: DecayChild,
    /// Second child.
    pub child2: DecayChild,
    /// Vertex coupling, if specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<LSCoupling>,
}

impl IsobarNode {
    /// Creates a node.
    pub fn new(
        parent: Particle,
        child1: impl Into<DecayChild>,
        child2: impl Into<DecayChild>,
        interaction: Option<LSCoupling>,
    ) -> Self {
        Self {
            parent,
            child1: child1.into(),
            child2: child2.into(),
            interaction,
        }
    }

    /// Both children in order.
    pub fn children(&self) -> [&DecayChild; 2] {
        [&self.child1, &self.child2]
    }
}
