#![deny(missing_docs)]
#![doc = "Shared error and number types for the polarimetry toolkit."]

pub mod errors;
pub mod rational;

pub use errors::{ErrorInfo, PolError};
pub use rational::Rational;
