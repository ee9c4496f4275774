//! Readable content hashes.

use pol_core::{ErrorInfo, PolError};
use pol_sym::Expr;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Bytes a value is hashed from.
pub trait HashBytes {
    /// Deterministic byte representation.
    fn hash_bytes(&self) -> Result<Vec<u8>, PolError>;
}

/// Expressions hash their string form, which is stable for a given tree.
impl HashBytes for Expr {
    fn hash_bytes(&self) -> Result<Vec<u8>, PolError> {
        Ok(self.to_string().into_bytes())
    }
}

/// Hashes any serializable value through its bincode encoding.
#[derive(Debug, Clone, Copy)]
pub struct Serialized<'a, T: Serialize + ?Sized>(pub &'a T);

impl<T: Serialize + ?Sized> HashBytes for Serialized<'_, T> {
    fn hash_bytes(&self) -> Result<Vec<u8>, PolError> {
        bincode::serialize(self.0)
            .map_err(|err| PolError::Serde(ErrorInfo::new("bincode-serialize", err.to_string())))
    }
}

/// SHA-256 hex digest of the value's hash bytes.
pub fn get_readable_hash<T: HashBytes + ?Sized>(value: &T) -> Result<String, PolError> {
    let mut hasher = Sha256::new();
    hasher.update(value.hash_bytes()?);
    Ok(hex::encode(hasher.finalize()))
}
