use std::error::Error;

use clap::Args;
use pol_decay::load_decay;
use pol_io::{as_markdown_table, DecayItem};

use super::ModelArgs;

#[derive(Args, Debug)]
pub struct TableArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    /// List the distinct resonances instead of the decay chains.
    #[arg(long)]
    pub resonances: bool,
}

pub fn run(args: &TableArgs) -> Result<(), Box<dyn Error>> {
    let decay = load_decay(&args.model.model)?;
    let items: Vec<DecayItem<'_>> = if args.resonances {
        decay.resonances().into_iter().map(DecayItem::from).collect()
    } else {
        vec![DecayItem::from(&decay)]
    };
    print!("{}", as_markdown_table(&items)?);
    Ok(())
}
