//! Batch condensation
//!
//! Condenses every schema document under a directory into a mirrored output
//! tree, with an optional `checksums.sha256` and `manifest.json` alongside.
//! Each checksum covers the exact bytes written, so `sha256sum -c` verifies
//! the output tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::checksum::Checksum;
use crate::condense::Condenser;
use crate::config::CondenseConfig;
use crate::error::{CondenseError, Result};
use crate::loader::{load_directory, SchemaDocument};

/// One condensed document in a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Path relative to both the input and output roots
    pub path: PathBuf,
    pub checksum: Checksum,
}

/// Summary written to `manifest.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchManifest {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub entries: Vec<BatchEntry>,
}

impl BatchManifest {
    pub fn new(entries: Vec<BatchEntry>) -> Self {
        Self {
            generated_at: Utc::now(),
            total: entries.len(),
            entries,
        }
    }

    /// Contents of a `checksums.sha256` file
    pub fn checksums_file(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.checksum.manifest_line(&e.path))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub const CHECKSUMS_FILE: &str = "checksums.sha256";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Fail if a document would land on an enabled batch summary file
fn check_collisions(documents: &[SchemaDocument], config: &CondenseConfig) -> Result<()> {
    let reserved = [
        (config.output.write_checksums, CHECKSUMS_FILE),
        (config.output.write_manifest, MANIFEST_FILE),
    ];

    for document in documents {
        for (enabled, output) in reserved {
            if enabled && document.path == Path::new(output) {
                return Err(CondenseError::OutputCollision {
                    path: document.path.clone(),
                    output,
                });
            }
        }
    }
    Ok(())
}

/// Condense a set of documents and write them under `output`
pub fn condense_documents(
    documents: &[SchemaDocument],
    output: &Path,
    config: &CondenseConfig,
) -> Result<BatchManifest> {
    check_collisions(documents, config)?;

    let condenser = Condenser::new(config.condense);
    fs::create_dir_all(output)?;

    let mut entries = Vec::with_capacity(documents.len());
    for document in documents {
        let condensed = condenser.condense(&document.content)?;
        let target = output.join(&document.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let rendered = config.output.format.render(&condensed)?;
        fs::write(&target, &rendered)?;

        entries.push(BatchEntry {
            path: document.path.clone(),
            checksum: Checksum::from_bytes(rendered.as_bytes()),
        });
    }

    let manifest = BatchManifest::new(entries);

    if config.output.write_checksums {
        fs::write(output.join(CHECKSUMS_FILE), manifest.checksums_file())?;
    }
    if config.output.write_manifest {
        fs::write(output.join(MANIFEST_FILE), serde_json::to_string_pretty(&manifest)?)?;
    }

    info!(count = manifest.total, output = %output.display(), "condensed schema batch");
    Ok(manifest)
}

/// Load everything under `input` and condense it into `output`
pub fn condense_directory(input: &Path, output: &Path, config: &CondenseConfig) -> Result<BatchManifest> {
    let documents = load_directory(input, &config.loader)?;
    info!(count = documents.len(), input = %input.display(), "loaded schema documents");
    condense_documents(&documents, output, config)
}
