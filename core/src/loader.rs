#![deny(missing_docs)]

//! # Corpus Loader
//!
//! Reads the two primary documents (contract and registry) into memory.
//! No parsing happens here.

use crate::error::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// The raw texts of the two primary documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    /// The API contract (e.g. an OpenAPI YAML document).
    pub contract: String,
    /// The operation registry source.
    pub registry: String,
}

impl Corpus {
    /// Builds a corpus from texts already in memory.
    pub fn new(contract: impl Into<String>, registry: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            registry: registry.into(),
        }
    }

    /// Reads both documents from disk, once each.
    ///
    /// An unreadable document is a precondition violation, not drift, so this
    /// fails with [`AppError::MissingInput`] naming the offending path.
    pub fn load(contract_path: &Path, registry_path: &Path) -> AppResult<Self> {
        let contract = read_input(contract_path)?;
        let registry = read_input(registry_path)?;
        tracing::debug!(
            contract = %contract_path.display(),
            registry = %registry_path.display(),
            "loaded corpus"
        );
        Ok(Self { contract, registry })
    }
}

fn read_input(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|e| AppError::MissingInput {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
