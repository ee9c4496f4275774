use std::error::Error;

use clap::Args;
use pol_io::get_readable_hash;

use super::ReferenceArgs;

#[derive(Args, Debug)]
pub struct HashArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,
}

pub fn run(args: &HashArgs) -> Result<(), Box<dyn Error>> {
    for (name, expr) in args.reference.polarimetry()? {
        println!("{name} {}", get_readable_hash(&expr)?);
    }
    Ok(())
}
