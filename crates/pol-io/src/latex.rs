//! LaTeX rendering with per-type overrides.
//!
//! Every renderable type implements [`ToLatex`]. A [`LatexRegistry`] maps
//! concrete types to override handlers that are consulted before the
//! built-in rendering, so callers can customise how, say, integers or
//! particles are printed without touching this crate. Composite values
//! (mappings, sequences, decay trees) render their parts through the same
//! registry, so an override applies at any depth.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;

use indexmap::IndexMap;
use pol_core::{ErrorInfo, PolError, Rational};
use pol_decay::{DecayChild, IsobarNode, Particle, ThreeBodyDecay, ThreeBodyDecayChain};
use pol_sym::{Expr, Symbol};

/// Keyword options understood by the built-in renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatexOptions {
    /// Render a [`Particle`] as its `J^P` value only.
    pub only_jp: bool,
    /// Render a [`Particle`] label followed by its `J^P` value.
    pub with_jp: bool,
}

impl LatexOptions {
    /// Options with `only_jp` set.
    pub fn only_jp() -> Self {
        Self {
            only_jp: true,
            with_jp: false,
        }
    }

    /// Options with `with_jp` set.
    pub fn with_jp() -> Self {
        Self {
            only_jp: false,
            with_jp: true,
        }
    }
}

/// Built-in LaTeX rendering of a type.
pub trait ToLatex {
    /// Renders `self`; nested values should go through `registry`.
    fn to_latex(&self, registry: &LatexRegistry, options: &LatexOptions) -> Result<String, PolError>;
}

type Handler =
    Box<dyn Fn(&dyn Any, &LatexRegistry, &LatexOptions) -> Result<String, PolError> + Send + Sync>;

/// Registry of per-type rendering overrides.
#[derive(Default)]
pub struct LatexRegistry {
    handlers: IndexMap<TypeId, (&'static str, Handler)>,
}

impl std::fmt::Debug for LatexRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatexRegistry")
            .field(
                "overrides",
                &self.handlers.values().map(|(name, _)| *name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl LatexRegistry {
    /// Registry without overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an override for `T`, replacing any earlier one.
    pub fn register<T, F>(&mut self, handler: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T, &LatexRegistry, &LatexOptions) -> Result<String, PolError>
            + Send
            + Sync
            + 'static,
    {
        let type_name = std::any::type_name::<T>();
        let erased: Handler = Box::new(
            move |value: &dyn Any, registry: &LatexRegistry, options: &LatexOptions| {
                match value.downcast_ref::<T>() {
                    Some(value) => handler(value, registry, options),
                    None => Err(PolError::Unsupported(
                        ErrorInfo::new("latex-handler-type", "override called with a foreign type")
                            .with_context("type", type_name),
                    )),
                }
            },
        );
        self.handlers.insert(TypeId::of::<T>(), (type_name, erased));
        self
    }

    /// Whether an override is registered for `T`.
    pub fn has_override<T: Any>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<T>())
    }

    /// Renders with default options.
    pub fn render<T: ToLatex + Any>(&self, value: &T) -> Result<String, PolError> {
        self.render_with(value, &LatexOptions::default())
    }

    /// Renders with the given options; an override for `T` wins over [`ToLatex`].
    pub fn render_with<T: ToLatex + Any>(
        &self,
        value: &T,
        options: &LatexOptions,
    ) -> Result<String, PolError> {
        match self.handlers.get(&TypeId::of::<T>()) {
            Some((_, handler)) => handler(value as &dyn Any, self, options),
            None => value.to_latex(self, options),
        }
    }
}

/// Renders `value` with an empty registry and default options.
pub fn as_latex<T: ToLatex + Any>(value: &T) -> Result<String, PolError> {
    LatexRegistry::new().render(value)
}

macro_rules! display_latex {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToLatex for $ty {
                fn to_latex(&self, _: &LatexRegistry, _: &LatexOptions) -> Result<String, PolError> {
                    Ok(self.to_string())
                }
            }
        )*
    };
}

display_latex!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, bool, String, &'static str);

/// Complex number `re + im·i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// Creates `re + im·i`.
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

/// Whole values print as integers; non-finite values use the lowercase
/// `nan`, `inf` and `-inf` spellings.
fn downcast(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

impl ToLatex for Complex {
    fn to_latex(&self, _: &LatexRegistry, _: &LatexOptions) -> Result<String, PolError> {
        let plus = if self.im >= 0.0 { "+" } else { "" };
        Ok(format!("{}{plus}{}i", downcast(self.re), downcast(self.im)))
    }
}

impl ToLatex for Rational {
    fn to_latex(&self, _: &LatexRegistry, _: &LatexOptions) -> Result<String, PolError> {
        Ok(Expr::Number(*self).latex())
    }
}

impl ToLatex for Expr {
    fn to_latex(&self, _: &LatexRegistry, _: &LatexOptions) -> Result<String, PolError> {
        Ok(self.latex())
    }
}

impl ToLatex for Symbol {
    fn to_latex(&self, _: &LatexRegistry, _: &LatexOptions) -> Result<String, PolError> {
        Ok(self.latex())
    }
}

/// `\begin{array}{rcl}` block with one `lhs &=& rhs` row per pair.
pub fn rcl_array(rows: Vec<(String, String)>) -> Result<String, PolError> {
    if rows.is_empty() {
        return Err(PolError::EmptyInput(ErrorInfo::new(
            "latex-empty-mapping",
            "Need at least one dictionary item",
        )));
    }
    let mut latex = String::from("\\begin{array}{rcl}\n");
    for (lhs, rhs) in rows {
        latex.push_str(&format!("  {lhs} &=& {rhs} \\\\\n"));
    }
    latex.push_str("\\end{array}");
    Ok(latex)
}

fn mapping_latex<'a, K, V, I>(
    entries: I,
    registry: &LatexRegistry,
    options: &LatexOptions,
) -> Result<String, PolError>
where
    K: ToLatex + Any,
    V: ToLatex + Any,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    let rows = entries
        .map(|(lhs, rhs)| -> Result<(String, String), PolError> {
            Ok((
                registry.render_with(lhs, options)?,
                registry.render_with(rhs, options)?,
            ))
        })
        .collect::<Result<Vec<_>, PolError>>()?;
    rcl_array(rows)
}

impl<K: ToLatex + Any, V: ToLatex + Any> ToLatex for IndexMap<K, V> {
    fn to_latex(&self, registry: &LatexRegistry, options: &LatexOptions) -> Result<String, PolError> {
        mapping_latex(self.iter(), registry, options)
    }
}

impl<K: ToLatex + Any, V: ToLatex + Any> ToLatex for BTreeMap<K, V> {
    fn to_latex(&self, registry: &LatexRegistry, options: &LatexOptions) -> Result<String, PolError> {
        mapping_latex(self.iter(), registry, options)
    }
}

impl<T: ToLatex + Any> ToLatex for Vec<T> {
    fn to_latex(&self, registry: &LatexRegistry, options: &LatexOptions) -> Result<String, PolError> {
        if self.is_empty() {
            return Err(PolError::EmptyInput(ErrorInfo::new(
                "latex-empty-sequence",
                "Need at least one item to render as LaTeX",
            )));
        }
        let mut latex = String::from("\\begin{array}{c}\n");
        for item in self {
            latex.push_str(&format!("  {} \\\\\n", registry.render_with(item, options)?));
        }
        latex.push_str("\\end{array}");
        Ok(latex)
    }
}

impl ToLatex for IsobarNode {
    fn to_latex(&self, registry: &LatexRegistry, options: &LatexOptions) -> Result<String, PolError> {
        let arrow = match &self.interaction {
            None => r"\to".to_string(),
            Some(ls) => format!(r"\xrightarrow[S={}]{{L={}}}", ls.s, ls.l),
        };
        Ok(format!(
            "{} {arrow} {} {}",
            registry.render_with(&self.parent, options)?,
            registry.render_with(&self.child1, options)?,
            registry.render_with(&self.child2, options)?,
        ))
    }
}

impl ToLatex for DecayChild {
    fn to_latex(&self, registry: &LatexRegistry, options: &LatexOptions) -> Result<String, PolError> {
        match self {
            DecayChild::Particle(particle) => registry.render_with(particle, options),
            DecayChild::Node(node) => registry.render_with(node.as_ref(), options),
        }
    }
}

impl ToLatex for ThreeBodyDecayChain {
    fn to_latex(&self, registry: &LatexRegistry, options: &LatexOptions) -> Result<String, PolError> {
        registry.render_with(&self.decay(), options)
    }
}

impl ToLatex for ThreeBodyDecay {
    fn to_latex(&self, registry: &LatexRegistry, options: &LatexOptions) -> Result<String, PolError> {
        registry.render_with(&self.chains, options)
    }
}

/// `J^P` label of a particle, e.g. `\frac{3}{2}^-`.
pub fn render_jp(particle: &Particle) -> String {
    let spin = if particle.spin.is_integer() {
        particle.spin.numerator().to_string()
    } else {
        format!(
            r"\frac{{{}}}{{{}}}",
            particle.spin.numerator(),
            particle.spin.denominator()
        )
    };
    format!("{spin}^{}", particle.parity.symbol())
}

impl ToLatex for Particle {
    fn to_latex(&self, _: &LatexRegistry, options: &LatexOptions) -> Result<String, PolError> {
        if options.only_jp {
            return Ok(render_jp(self));
        }
        if options.with_jp {
            return Ok(format!(r"{}\left[{}\right]", self.latex, render_jp(self)));
        }
        Ok(self.latex.clone())
    }
}
