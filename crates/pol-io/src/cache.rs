//! Content-addressed cache for expensive `doit` evaluations.
//!
//! Entries are keyed by the first [`HASH_PREFIX_LEN`] hex characters of the
//! expression's readable hash. Each entry stores the full hash next to the
//! evaluated expression so a prefix collision is detected and recomputed
//! instead of returning an unrelated result. There is no locking.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pol_core::{ErrorInfo, PolError};
use pol_sym::Expr;
use serde::{Deserialize, Serialize};

use crate::hash::get_readable_hash;

/// Number of hash characters used as the cache key.
pub const HASH_PREFIX_LEN: usize = 7;

/// Byte store addressed by string keys.
pub trait KeyValueStore {
    /// Stored bytes for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PolError>;
    /// Stores `bytes` under `key`, replacing earlier contents.
    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), PolError>;
    /// Human readable location of `key`, used in log messages.
    fn locate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// One file `sympy-expr-<key>.pkl` per key inside a directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Store rooted at `root`; the directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the cache files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("sympy-expr-{key}.pkl"))
    }
}

impl KeyValueStore for DirectoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PolError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read(&path)
            .map(Some)
            .map_err(|err| PolError::io("cache-read", &err, &path))
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), PolError> {
        fs::create_dir_all(&self.root)
            .map_err(|err| PolError::io("cache-mkdir", &err, &self.root))?;
        let path = self.path_for(key);
        fs::write(&path, bytes).map_err(|err| PolError::io("cache-write", &err, &path))
    }

    fn locate(&self, key: &str) -> String {
        self.path_for(key).display().to_string()
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PolError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), PolError> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Blob stored per cache key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Full readable hash of the unevaluated expression.
    pub full_hash: String,
    /// Evaluated expression.
    pub expression: Expr,
}

impl CacheEntry {
    /// Encodes the entry with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PolError> {
        bincode::serialize(self)
            .map_err(|err| PolError::Serde(ErrorInfo::new("cache-encode", err.to_string())))
    }

    /// Decodes an entry written by [`CacheEntry::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PolError> {
        bincode::deserialize(bytes)
            .map_err(|err| PolError::Serde(ErrorInfo::new("cache-decode", err.to_string())))
    }
}

/// Evaluates `expr.doit(true)` once per distinct expression, caching the
/// result as a file in `directory`.
pub fn perform_cached_doit(expr: &Expr, directory: &Path) -> Result<Expr, PolError> {
    let mut store = DirectoryStore::new(directory);
    perform_cached_with(expr, &mut store, |expr| expr.doit(true))
}

/// Cached evaluation with an explicit store and evaluation step.
pub fn perform_cached_with<S, F>(expr: &Expr, store: &mut S, evaluate: F) -> Result<Expr, PolError>
where
    S: KeyValueStore + ?Sized,
    F: FnOnce(&Expr) -> Expr,
{
    let full_hash = get_readable_hash(expr)?;
    let key = full_hash[..HASH_PREFIX_LEN].to_string();
    match store.get(&key)? {
        Some(bytes) => match CacheEntry::from_bytes(&bytes) {
            Ok(entry) if entry.full_hash == full_hash => return Ok(entry.expression),
            Ok(entry) => log::warn!(
                "Cached expression file {} belongs to hash {}, recomputing for {}",
                store.locate(&key),
                entry.full_hash,
                full_hash
            ),
            Err(err) => log::warn!(
                "Cached expression file {} is unreadable ({}), recomputing",
                store.locate(&key),
                err
            ),
        },
        None => log::info!(
            "Cached expression file {} not found, performing doit()...",
            store.locate(&key)
        ),
    }
    let expression = evaluate(expr);
    let entry = CacheEntry {
        full_hash,
        expression,
    };
    store.put(&key, &entry.to_bytes()?)?;
    Ok(entry.expression)
}
