//! Error types for the fallible edges of the engine.
//!
//! Game-rule violations (equipping a potion, advancing too early, attacking a
//! corpse) are not errors; they are reported as no-op return values. Only
//! collaborator I/O, snapshot decoding and config parsing can fail.

use thiserror::Error;
use uuid::Uuid;

/// Failure reported by a [`crate::persistence::Persistence`] backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("character {0} not found")]
    CharacterNotFound(Uuid),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected: {0}")]
    Rejected(String),
}

/// Failure decoding or encoding a [`crate::snapshot::SessionSnapshot`].
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot too short ({0} bytes)")]
    Truncated(usize),
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("snapshot checksum mismatch")]
    ChecksumMismatch,
    #[error("snapshot serialization failed: {0}")]
    Codec(#[from] bincode::Error),
}

/// Failure loading an [`crate::config::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
