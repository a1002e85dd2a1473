//! Fingerprints for condensed output
//!
//! `from_json` and `from_condensed` fingerprint content (compact rendering),
//! independent of how it is later formatted. Use `from_bytes` on the written
//! bytes when the checksum must match a file on disk.

use sha2::{Digest, Sha256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::condense::CondensedNode;

/// SHA256 checksum of a compact JSON rendering
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    /// Compute checksum from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute checksum from a JSON value (compact, key order as stored)
    pub fn from_json(value: &serde_json::Value) -> Self {
        Self::from_bytes(value.to_string().as_bytes())
    }

    /// Compute checksum of a condensed node's JSON rendering
    pub fn from_condensed(node: &CondensedNode) -> Self {
        Self::from_json(&node.to_value())
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify that a JSON value matches this checksum
    pub fn verify_json(&self, value: &serde_json::Value) -> bool {
        Self::from_json(value) == *self
    }

    /// One line of a `checksums.sha256` file
    pub fn manifest_line(&self, path: &Path) -> String {
        format!("{}  {}", self.0, path.to_string_lossy().replace('\\', "/"))
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Checksum {
    fn from(s: String) -> Self {
        Self(s)
    }
}
