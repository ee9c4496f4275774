use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    formulate::{self, FormulateArgs},
    hash::{self, HashArgs},
    latex::{self, LatexArgs},
    table::{self, TableArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "polarimetry", about = "Polarimeter vector toolkit for three-body decays")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a Markdown table of the decay chains or resonances of a model.
    Table(TableArgs),
    /// Print the decay chains of a model as LaTeX.
    Latex(LatexArgs),
    /// Formulate the polarimeter vector of a model.
    Formulate(FormulateArgs),
    /// Print readable hashes of the polarimeter components.
    Hash(HashArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Table(args) => table::run(&args),
        Command::Latex(args) => latex::run(&args),
        Command::Formulate(args) => formulate::run(&args),
        Command::Hash(args) => hash::run(&args),
    }
}
