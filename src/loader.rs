//! Schema Document Loading
//!
//! Reads schema documents from a file, a reader, or a whole directory tree.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{CondenseError, Result};

/// Filters applied while walking a schema directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Skip documents whose relative path starts with any of these
    #[serde(default = "default_skip_prefixes")]
    pub skip_prefixes: Vec<String>,
    /// When non-empty, only load documents whose relative path starts with one of these
    #[serde(default)]
    pub include_prefixes: Vec<String>,
}

fn default_skip_prefixes() -> Vec<String> {
    vec![
        "target/".to_string(),
        ".git/".to_string(),
        "node_modules/".to_string(),
    ]
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            skip_prefixes: default_skip_prefixes(),
            include_prefixes: Vec::new(),
        }
    }
}

impl LoadConfig {
    /// Whether a relative path passes the include/skip filters
    pub fn accepts(&self, relative: &str) -> bool {
        if !self.include_prefixes.is_empty()
            && !self.include_prefixes.iter().any(|p| relative.starts_with(p))
        {
            return false;
        }
        !self.skip_prefixes.iter().any(|p| relative.starts_with(p))
    }
}

/// A parsed schema document
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Path relative to the directory it was loaded from (or as given)
    pub path: PathBuf,
    pub content: Value,
}

/// Load a single JSON document from disk
pub fn load_document(path: &Path) -> Result<SchemaDocument> {
    let text = fs::read_to_string(path)?;
    let content = parse(&text, path)?;
    Ok(SchemaDocument {
        path: path.to_path_buf(),
        content,
    })
}

/// Load a single JSON document from a reader (e.g. stdin)
pub fn load_reader<R: Read>(mut reader: R, label: &Path) -> Result<SchemaDocument> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let content = parse(&text, label)?;
    Ok(SchemaDocument {
        path: label.to_path_buf(),
        content,
    })
}

/// Load every `*.json` document under a directory, sorted by relative path
pub fn load_directory(dir: &Path, config: &LoadConfig) -> Result<Vec<SchemaDocument>> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if path.extension().map(|e| e != "json").unwrap_or(true) {
            continue;
        }

        let relative = path.strip_prefix(dir).unwrap_or(path).to_path_buf();
        let relative_str = relative.to_string_lossy().replace('\\', "/");
        if !config.accepts(&relative_str) {
            debug!(path = %relative_str, "skipping filtered document");
            continue;
        }

        let text = fs::read_to_string(path)?;
        let content = parse(&text, &relative)?;
        documents.push(SchemaDocument {
            path: relative,
            content,
        });
    }

    documents.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(documents)
}

fn parse(text: &str, path: &Path) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| CondenseError::InvalidDocument {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
