pub mod formulate;
pub mod hash;
pub mod latex;
pub mod table;

use std::path::PathBuf;

use clap::Args;
use pol_core::PolError;
use pol_decay::{load_decay, HelicityAmplitudeBuilder, Subsystem};
use pol_sym::Expr;

/// Arguments shared by every command that reads a model.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// YAML decay model.
    #[arg(long)]
    pub model: PathBuf,
}

/// Arguments of commands that formulate the polarimeter vector.
#[derive(Args, Debug, Clone)]
pub struct ReferenceArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    /// Reference subsystem (1, 2 or 3).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub reference: u8,
}

impl ReferenceArgs {
    pub fn subsystem(&self) -> Result<Subsystem, PolError> {
        Subsystem::try_from(self.reference)
    }

    /// Formulated `(x, y, z)` paired with their component names.
    pub fn polarimetry(&self) -> Result<Vec<(&'static str, Expr)>, PolError> {
        let builder = HelicityAmplitudeBuilder::new(load_decay(&self.model.model)?);
        let (x, y, z) = pol_polarimetry::formulate_polarimetry(&builder, self.subsystem()?)?;
        Ok(vec![("x", x), ("y", y), ("z", z)])
    }
}
