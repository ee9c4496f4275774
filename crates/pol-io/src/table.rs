//! Markdown tables of resonances and decay chains.

use pol_core::{ErrorInfo, PolError};
use pol_decay::{IsobarNode, Particle, ThreeBodyDecay, ThreeBodyDecayChain};

use crate::latex::{LatexOptions, LatexRegistry};

/// Borrowed item of a table; all items of one table must be of the same kind.
#[derive(Debug, Clone, Copy)]
pub enum DecayItem<'a> {
    /// A resonance or other particle.
    Particle(&'a Particle),
    /// A bare two-body node; has no table form.
    Node(&'a IsobarNode),
    /// A full decay, tabulated by its chains.
    Decay(&'a ThreeBodyDecay),
    /// A single decay chain.
    Chain(&'a ThreeBodyDecayChain),
}

impl DecayItem<'_> {
    /// Name of the item type used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            DecayItem::Particle(_) => "Particle",
            DecayItem::Node(_) => "IsobarNode",
            DecayItem::Decay(_) => "ThreeBodyDecay",
            DecayItem::Chain(_) => "ThreeBodyDecayChain",
        }
    }
}

impl<'a> From<&'a Particle> for DecayItem<'a> {
    fn from(particle: &'a Particle) -> Self {
        DecayItem::Particle(particle)
    }
}

impl<'a> From<&'a IsobarNode> for DecayItem<'a> {
    fn from(node: &'a IsobarNode) -> Self {
        DecayItem::Node(node)
    }
}

impl<'a> From<&'a ThreeBodyDecay> for DecayItem<'a> {
    fn from(decay: &'a ThreeBodyDecay) -> Self {
        DecayItem::Decay(decay)
    }
}

impl<'a> From<&'a ThreeBodyDecayChain> for DecayItem<'a> {
    fn from(chain: &'a ThreeBodyDecayChain) -> Self {
        DecayItem::Chain(chain)
    }
}

/// Renders a homogeneous, non-empty list of items as a Markdown table.
pub fn as_markdown_table(items: &[DecayItem<'_>]) -> Result<String, PolError> {
    as_markdown_table_with(&LatexRegistry::new(), items)
}

/// Like [`as_markdown_table`], rendering LaTeX cells through `registry`.
pub fn as_markdown_table_with(
    registry: &LatexRegistry,
    items: &[DecayItem<'_>],
) -> Result<String, PolError> {
    let first = items.first().ok_or_else(|| {
        PolError::EmptyInput(ErrorInfo::new(
            "table-empty",
            "Need at least one entry to render a table",
        ))
    })?;
    let item_type = first.type_name();
    if let Some(other) = items.iter().find(|item| item.type_name() != item_type) {
        return Err(PolError::Heterogeneous(
            ErrorInfo::new(
                "table-heterogeneous",
                format!("Not all items are of type {item_type}"),
            )
            .with_context("found", other.type_name()),
        ));
    }
    match first {
        DecayItem::Particle(_) => {
            let particles: Vec<&Particle> = items
                .iter()
                .filter_map(|item| match item {
                    DecayItem::Particle(particle) => Some(*particle),
                    _ => None,
                })
                .collect();
            resonance_table(registry, &particles)
        }
        DecayItem::Chain(_) | DecayItem::Decay(_) => {
            let mut chains: Vec<&ThreeBodyDecayChain> = Vec::new();
            for item in items {
                match item {
                    DecayItem::Chain(chain) => chains.push(*chain),
                    DecayItem::Decay(decay) => chains.extend(decay.chains.iter()),
                    _ => {}
                }
            }
            chain_table(registry, &chains)
        }
        DecayItem::Node(_) => Err(PolError::Unsupported(
            ErrorInfo::new(
                "table-unsupported",
                format!("Cannot render a sequence with {item_type} items as a Markdown table"),
            )
            .with_context("type", item_type),
        )),
    }
}

fn resonance_table(registry: &LatexRegistry, particles: &[&Particle]) -> Result<String, PolError> {
    let have_lineshapes = particles.iter().any(|p| p.lineshape.is_some());
    let mut columns = vec!["name", "LaTeX", "$J^P$", "mass (MeV)", "width (MeV)"];
    if have_lineshapes {
        columns.push("lineshape");
    }
    let mut src = header(&columns);
    for particle in particles {
        let mut row = vec![
            particle.name.clone(),
            format!("${}$", particle.latex),
            format!("${}$", registry.render_with(*particle, &LatexOptions::only_jp())?),
            format_mev(particle.mass),
            format_mev(particle.width),
        ];
        if have_lineshapes {
            row.push(particle.lineshape.clone().unwrap_or_default());
        }
        src.push_str(&table_row(row.as_slice()));
    }
    Ok(src)
}

fn chain_table(
    registry: &LatexRegistry,
    chains: &[&ThreeBodyDecayChain],
) -> Result<String, PolError> {
    let mut src = header(&[
        "resonance",
        "$J^P$",
        "mass (MeV)",
        "width (MeV)",
        r"$L_\mathrm{dec}^\mathrm{min}$",
        r"$L_\mathrm{prod}^\mathrm{min}$",
        "lineshape",
    ]);
    for chain in chains {
        let resonance = chain.resonance();
        let (child1, child2) = chain.decay_products();
        let row = vec![
            format!(
                r"${} \to {} {}$",
                resonance.latex,
                registry.render(child1)?,
                registry.render(child2)?
            ),
            format!("${}$", registry.render_with(resonance, &LatexOptions::only_jp())?),
            format_mev(resonance.mass),
            format_mev(resonance.width),
            chain.outgoing_ls().l.to_string(),
            chain.incoming_ls().l.to_string(),
            resonance.lineshape.clone().unwrap_or_default(),
        ];
        src.push_str(&table_row(row.as_slice()));
    }
    Ok(src)
}

fn header(columns: &[&str]) -> String {
    let mut src = table_row(columns);
    let separator = vec!["---"; columns.len()];
    src.push_str(&table_row(separator.as_slice()));
    src
}

fn table_row<S: AsRef<str>>(items: &[S]) -> String {
    let cells: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    format!("| {} |\n", cells.join(" | "))
}

/// GeV value shown in MeV, rounded and thousands-separated: `2.28646` → `2,286`.
pub fn format_mev(gev: f64) -> String {
    let mev = (gev * 1e3).round() as i64;
    let digits = mev.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if mev < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
