#![deny(missing_docs)]

//! # Configuration
//!
//! Optional YAML configuration file. Command-line flags and environment
//! variables take precedence over it; built-in defaults fill the rest.
//!
//! ```yaml
//! contract: api/openapi.yaml
//! registry: src/generated/operation-registry.ts
//! services_dir: src/services
//! extension: ts
//! access_prefix: "operations."
//! sample_limit: 50
//! pipeline:
//!   - name: types
//!     program: npx
//!     args: [openapi-typescript, api/openapi.yaml, -o, src/generated/types.ts]
//! ```

use opcov_core::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "opcov.yaml";

/// Default contract document location.
pub const DEFAULT_CONTRACT: &str = "openapi.yaml";
/// Default registry document location.
pub const DEFAULT_REGISTRY: &str = "src/generated/operation-registry.ts";
/// Default directory of service implementation files.
pub const DEFAULT_SERVICES_DIR: &str = "src/services";
/// Default implementation file extension.
pub const DEFAULT_EXTENSION: &str = "ts";
/// Default text preceding an operation key at its use site.
pub const DEFAULT_ACCESS_PREFIX: &str = "operations.";

/// Contents of the configuration file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Contract document path.
    pub contract: Option<PathBuf>,
    /// Registry document path.
    pub registry: Option<PathBuf>,
    /// Services directory.
    pub services_dir: Option<PathBuf>,
    /// Implementation file extension.
    pub extension: Option<String>,
    /// Access prefix for the reference check.
    pub access_prefix: Option<String>,
    /// Maximum missing identifiers listed in the report.
    pub sample_limit: Option<usize>,
    /// Generation stages, run in order by `opcov pipeline`.
    pub pipeline: Vec<PipelineStep>,
}

/// One external generation stage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineStep {
    /// Label used in progress output and errors.
    pub name: String,
    /// Executable to run.
    pub program: String,
    /// Arguments passed verbatim.
    #[serde(default)]
    pub args: Vec<String>,
}

impl FileConfig {
    /// Parses configuration from YAML text.
    pub fn from_yaml(text: &str) -> AppResult<Self> {
        // an empty document deserializes to unit, not to a mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used when present in `base_dir`, otherwise all defaults apply.
    pub fn load(explicit: Option<&Path>, base_dir: &Path) -> AppResult<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = base_dir.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let text = fs::read_to_string(&path).map_err(|e| {
            AppError::Config(format!("Failed to read config {:?}: {}", path, e))
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&text)
            .map_err(|e| AppError::Config(format!("Invalid config {:?}: {}", path, e)))
    }
}
