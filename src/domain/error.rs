//! Error types for the trainer domain.

use std::path::PathBuf;

use shakmaty::Square;
use thiserror::Error;

/// Errors raised while loading or validating an opening catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two distinct display names fold to the same family key.
    #[error("family names '{first}' and '{second}' both normalize to '{key}'")]
    KeyCollision {
        key: String,
        first: String,
        second: String,
    },

    #[error("invalid catalog entry '{family}': {reason}")]
    InvalidCatalog { family: String, reason: String },
}

/// Rejection from the legality oracle. The position is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("no legal move from {from} to {to}")]
    NoSuchMove { from: Square, to: Square },

    #[error("cannot parse move notation '{0}'")]
    Unparseable(String),

    #[error("move '{0}' is not legal in this position")]
    NotLegal(String),
}

/// Failures recovered at the session boundary and surfaced as events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Opening family not found: {key}")]
    FamilyNotFound { key: String },

    #[error("{reason}")]
    CatalogUnavailable { reason: String },

    #[error("Opening data error in {variation}: scripted move {san} at ply {ply} is not legal")]
    DataIntegrity {
        variation: String,
        ply: usize,
        san: String,
    },
}
