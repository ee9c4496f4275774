use std::collections::BTreeMap;
use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::Args;
use indexmap::IndexMap;
use pol_io::{get_readable_hash, perform_cached_doit, DisplaySurface, LatexRegistry, MathWriter};
use pol_sym::{multiline_latex, Expr, Symbol};
use serde::Serialize;

use super::ReferenceArgs;

#[derive(Args, Debug)]
pub struct FormulateArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,
    /// Expand the helicity sums.
    #[arg(long)]
    pub doit: bool,
    /// Directory for cached expansions; implies `--doit`.
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
    /// Break each component over lines with this many terms.
    #[arg(long)]
    pub terms_per_line: Option<usize>,
    /// Emit a JSON report instead of LaTeX.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ComponentReport {
    hash: String,
    expression: String,
}

#[derive(Debug, Serialize)]
struct FormulationReport {
    model: PathBuf,
    reference: u8,
    evaluated: bool,
    components: BTreeMap<String, ComponentReport>,
}

fn component_symbol(name: &str) -> Symbol {
    Symbol::real(format!("alpha_{name}"))
}

pub fn run(args: &FormulateArgs) -> Result<(), Box<dyn Error>> {
    let evaluate = args.doit || args.cache_dir.is_some();
    let mut components = args.reference.polarimetry()?;
    if evaluate {
        for (name, expr) in components.iter_mut() {
            *expr = match &args.cache_dir {
                Some(dir) => perform_cached_doit(expr, dir)?,
                None => expr.doit(true),
            };
            log::info!("expanded component {name}");
        }
    }

    if args.json {
        let mut report = FormulationReport {
            model: args.reference.model.model.clone(),
            reference: args.reference.reference,
            evaluated: evaluate,
            components: BTreeMap::new(),
        };
        for (name, expr) in &components {
            report.components.insert(
                (*name).to_string(),
                ComponentReport {
                    hash: get_readable_hash(expr)?,
                    expression: expr.to_string(),
                },
            );
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut surface = MathWriter::new(io::stdout().lock());
    match args.terms_per_line {
        Some(terms_per_line) => {
            for (name, expr) in &components {
                let lhs = Expr::Symbol(component_symbol(name));
                surface.show_math(&multiline_latex(&lhs, expr, terms_per_line, "eqnarray"))?;
            }
        }
        None => {
            let mapping: IndexMap<Symbol, Expr> = components
                .into_iter()
                .map(|(name, expr)| (component_symbol(name), expr))
                .collect();
            surface.show_math(&LatexRegistry::new().render(&mapping)?)?;
        }
    }
    Ok(())
}
