use std::error::Error;
use std::io;

use clap::Args;
use pol_decay::load_decay;
use pol_io::{display_latex, LatexOptions, LatexRegistry, MathWriter, ToLatex};

use super::ModelArgs;

#[derive(Args, Debug)]
pub struct LatexArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    /// Append the spin-parity to every particle label.
    #[arg(long)]
    pub with_jp: bool,
}

pub fn run(args: &LatexArgs) -> Result<(), Box<dyn Error>> {
    let decay = load_decay(&args.model.model)?;
    let mut registry = LatexRegistry::new();
    if args.with_jp {
        registry.register::<pol_decay::Particle, _>(|particle, registry, _| {
            particle.to_latex(registry, &LatexOptions::with_jp())
        });
    }
    let mut surface = MathWriter::new(io::stdout().lock());
    display_latex(&registry, &decay, &mut surface)?;
    Ok(())
}
