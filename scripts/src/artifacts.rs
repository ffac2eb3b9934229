//! Lookup of the compiler build artifacts.
//!
//! Artifacts follow the Hardhat layout:
//! `<root>/contracts/<source file>/<contract name>.json`. The document is
//! handled as opaque json, only the `bytecode` entry is ever read from it.

use std::{fs, path::PathBuf};

use alloy::{hex, primitives::Bytes};
use json::JsonValue;
use tracing::debug;

use crate::errors::ScriptError;

/// Sub directory of the build output holding the contract artifacts
const CONTRACTS_SUBDIR: &str = "contracts";

/// Read-only access to the build artifacts, keyed by contract name
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// Root of the build output
    root: PathBuf,
}

/// A build artifact read from the store
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Name of the contract
    pub name: String,
    /// File the artifact was read from
    pub path: PathBuf,
    /// The full artifact document, key order preserved
    pub document: JsonValue,
}

impl ArtifactStore {
    /// Create a store over the given build output root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read and parse the artifact of the given contract
    pub fn read_artifact(&self, name: &str) -> Result<Artifact, ScriptError> {
        let path = self.find_artifact(name)?;
        debug!("Reading artifact of {} from {}", name, path.display());

        let contents = fs::read_to_string(&path)
            .map_err(|e| ScriptError::ArtifactNotFound(format!("{}: {}", path.display(), e)))?;
        let document = json::parse(&contents).map_err(|e| {
            ScriptError::ContractCompilation(format!("{}: {}", path.display(), e))
        })?;

        Ok(Artifact {
            name: name.to_string(),
            path,
            document,
        })
    }

    /// Find the single artifact file named after the contract
    fn find_artifact(&self, name: &str) -> Result<PathBuf, ScriptError> {
        let file_name = format!("{}.json", name);
        let contracts_dir = self.root.join(CONTRACTS_SUBDIR);

        let mut matches = Vec::new();
        let mut pending = vec![contracts_dir.clone()];
        while let Some(dir) = pending.pop() {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                // A missing build output just means nothing was compiled
                Err(_) if dir == contracts_dir => break,
                Err(e) => {
                    return Err(ScriptError::ArtifactNotFound(format!(
                        "{}: {}",
                        dir.display(),
                        e
                    )))
                }
            };

            for entry in entries {
                let path = entry
                    .map_err(|e| ScriptError::ArtifactNotFound(e.to_string()))?
                    .path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.file_name().is_some_and(|f| f == file_name.as_str()) {
                    matches.push(path);
                }
            }
        }

        match matches.len() {
            0 => Err(ScriptError::ArtifactNotFound(format!(
                "no artifact for {} under {}",
                name,
                contracts_dir.display()
            ))),
            1 => Ok(matches.remove(0)),
            _ => {
                matches.sort();
                let paths = matches
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(ScriptError::ArtifactAmbiguous(format!("{}: {}", name, paths)))
            }
        }
    }
}

impl Artifact {
    /// The creation bytecode of the contract
    pub fn bytecode(&self) -> Result<Bytes, ScriptError> {
        let raw = self.document["bytecode"].as_str().ok_or_else(|| {
            ScriptError::ContractCompilation(format!("{} has no bytecode entry", self.name))
        })?;
        let raw = raw.strip_prefix("0x").unwrap_or(raw);

        if raw.is_empty() {
            return Err(ScriptError::ContractCompilation(format!(
                "{} has empty bytecode, is it abstract or an interface?",
                self.name
            )));
        }
        // Hardhat leaves `__$<hash>$__` placeholders for unlinked libraries
        if raw.contains("__") {
            return Err(ScriptError::ContractCompilation(format!(
                "{} bytecode has unlinked libraries",
                self.name
            )));
        }

        hex::decode(raw)
            .map(Bytes::from)
            .map_err(|e| ScriptError::ContractCompilation(format!("{}: {}", self.name, e)))
    }
}
