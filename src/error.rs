//! Error types for schema condensation

use std::path::PathBuf;
use thiserror::Error;

/// Result type for condense operations
pub type Result<T> = std::result::Result<T, CondenseError>;

/// Schema condensation errors
#[derive(Error, Debug)]
pub enum CondenseError {
    #[error("Reference cycle at {pointer} (chain: {})", .chain.join(" -> "))]
    RefCycle { pointer: String, chain: Vec<String> },

    #[error("Schema nesting exceeds maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },

    #[error("Invalid schema document {path:?}: {reason}")]
    InvalidDocument { path: PathBuf, reason: String },

    #[error("Document {path:?} would be overwritten by the batch {output} file")]
    OutputCollision { path: PathBuf, output: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),
}
