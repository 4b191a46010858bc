//! Key-value configuration source.
//!
//! Production code reads the process environment through [`ProcessEnv`];
//! tests inject a [`MapEnv`]. Values are looked up on every call, so a
//! change to the source is visible to the next reader.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::CoreError;

pub trait EnvSource: Send + Sync {
    /// Raw value of `key`, if set.
    fn var(&self, key: &str) -> Option<String>;

    /// Value of `key`, or `default` when the key is unset or empty.
    fn var_or(&self, key: &str, default: &str) -> String {
        self.var(key)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    }
}

/// Parse `key` into `T`, falling back to `default` when unset or empty.
pub fn parse_or<T: FromStr>(
    env: &dyn EnvSource,
    key: &'static str,
    default: T,
) -> Result<T, CoreError> {
    let Some(value) = env.var(key).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };
    match value.trim().parse() {
        Ok(parsed) => Ok(parsed),
        Err(_) => Err(CoreError::InvalidConfig { key, value }),
    }
}

/// Reads from the process environment (after `.env` has been loaded).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory source. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: Arc<RwLock<HashMap<String, String>>>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: &str, value: &str) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}
