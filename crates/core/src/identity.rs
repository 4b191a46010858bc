//! Per-process identity used to tag outbound reports.
//!
//! A [`ProcessIdentity`] is minted once in `main` and handed to whoever
//! needs it. It is never persisted, so every restart of the same host
//! reports under a fresh identity.

use std::fmt;
use std::sync::Arc;

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::error::CoreError;

/// Identity used when the OS random source is unavailable.
pub const PLACEHOLDER_IDENTITY: &str = "unknown-server";

/// Immutable, cheaply cloneable process identity (a hyphenated UUID v4).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessIdentity(Arc<str>);

impl ProcessIdentity {
    /// Generate a new random identity from the OS random source.
    ///
    /// Never fails: if the random source errors, the placeholder identity
    /// is used and a warning is logged.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        let random = OsRng
            .try_fill_bytes(&mut bytes)
            .map(|()| bytes)
            .map_err(|e| CoreError::Identity(e.to_string()));
        Self::from_random_bytes(random)
    }

    /// Build an identity from the outcome of a random-bytes draw.
    pub fn from_random_bytes(random: Result<[u8; 16], CoreError>) -> Self {
        match random {
            Ok(bytes) => {
                let id = uuid::Builder::from_random_bytes(bytes).into_uuid();
                Self(id.to_string().into())
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    identity = PLACEHOLDER_IDENTITY,
                    "Falling back to placeholder process identity",
                );
                Self::placeholder()
            }
        }
    }

    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_IDENTITY.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
