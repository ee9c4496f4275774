use pol_core::{ErrorInfo, PolError, Rational};
use serde::{Deserialize, Serialize};

/// Intrinsic parity, serialized as `+1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Parity {
    /// `+1`
    Positive,
    /// `-1`
    Negative,
}

impl Parity {
    /// Numeric sign of the parity.
    pub fn sign(self) -> i8 {
        match self {
            Parity::Positive => 1,
            Parity::Negative => -1,
        }
    }

    /// Superscript used in `J^P` labels.
    pub fn symbol(self) -> char {
        match self {
            Parity::Positive => '+',
            Parity::Negative => '-',
        }
    }
}

impl std::ops::Mul for Parity {
    type Output = Parity;

    fn mul(self, rhs: Parity) -> Parity {
        if self == rhs {
            Parity::Positive
        } else {
            Parity::Negative
        }
    }
}

impl TryFrom<i8> for Parity {
    type Error = PolError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Parity::Positive),
            -1 => Ok(Parity::Negative),
            other => Err(PolError::Model(
                ErrorInfo::new("parity-value", "parity must be +1 or -1")
                    .with_context("parity", other.to_string()),
            )),
        }
    }
}

impl From<Parity> for i8 {
    fn from(parity: Parity) -> Self {
        parity.sign()
    }
}

/// Particle or resonance with its quantum numbers; masses and widths in GeV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Identifier, e.g. `L(1405)`.
    pub name: String,
    /// LaTeX label, e.g. `\Lambda(1405)`.
    pub latex: String,
    /// Spin quantum number.
    pub spin: Rational,
    /// Intrinsic parity.
    pub parity: Parity,
    /// Mass in GeV.
    pub mass: f64,
    /// Width in GeV.
    #[serde(default)]
    pub width: f64,
    /// Lineshape identifier for resonances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineshape: Option<String>,
}

impl Particle {
    /// Creates a particle without lineshape.
    pub fn new(
        name: impl Into<String>,
        latex: impl Into<String>,
        spin: Rational,
        parity: Parity,
        mass: f64,
        width: f64,
    ) -> Self {
        Self {
            name: name.into(),
            latex: latex.into(),
            spin,
            parity,
            mass,
            width,
            lineshape: None,
        }
    }

    /// Attaches a lineshape identifier.
    pub fn with_lineshape(mut self, lineshape: impl Into<String>) -> Self {
        self.lineshape = Some(lineshape.into());
        self
    }
}
