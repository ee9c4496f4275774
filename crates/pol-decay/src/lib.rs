#![deny(missing_docs)]
#![doc = "Three-body decay model: particles, isobar chains, LS couplings and the helicity amplitude builder."]

/// Amplitude builder trait and the helicity reference implementation.
pub mod builder;
pub mod chain;
/// YAML model configuration.
pub mod config;
/// Isobar tree nodes.
pub mod node;
/// Particle data.
pub mod particle;
pub mod spin;

pub use builder::{AlignedAmplitude, AmplitudeBuilder, AmplitudeModel, HelicityAmplitudeBuilder};
pub use chain::{Subsystem, ThreeBodyDecay, ThreeBodyDecayChain};
pub use config::{load_decay, DecayConfig};
pub use node::{DecayChild, IsobarNode, LSCoupling};
pub use particle::{Parity, Particle};
pub use spin::{create_spin_range, generate_ls_couplings, minimal_ls};
