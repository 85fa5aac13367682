#![deny(missing_docs)]

//! # Check Command
//!
//! Cross-references the API contract, the operation registry and the service
//! implementation files, and prints the drift report.
//!
//! 1. **Load**: reads the contract and registry documents (fatal if unreadable).
//! 2. **Analyse**: identifier extraction, registry parsing, reconciliation, audit.
//! 3. **Report**: writes the text report. Drift never changes the exit status.

use crate::config::{
    FileConfig, DEFAULT_ACCESS_PREFIX, DEFAULT_CONTRACT, DEFAULT_EXTENSION, DEFAULT_REGISTRY,
    DEFAULT_SERVICES_DIR,
};
use opcov_core::{
    run_check, AppResult, AuditOptions, CoverageReport, Corpus, DirectorySources,
    DEFAULT_SAMPLE_LIMIT,
};
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the check command. Unset values fall back to the config file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Path to the API contract [default: openapi.yaml].
    #[clap(long, env = "OPCOV_CONTRACT")]
    pub contract: Option<PathBuf>,

    /// Path to the operation registry [default: src/generated/operation-registry.ts].
    #[clap(long, env = "OPCOV_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Directory holding the service implementation files [default: src/services].
    #[clap(long, env = "OPCOV_SERVICES_DIR")]
    pub services_dir: Option<PathBuf>,

    /// Extension of the implementation files [default: ts].
    #[clap(long, env = "OPCOV_EXTENSION")]
    pub extension: Option<String>,

    /// Text preceding an operation key where a service uses it [default: "operations."].
    #[clap(long, env = "OPCOV_ACCESS_PREFIX")]
    pub access_prefix: Option<String>,

    /// Maximum number of missing identifiers listed [default: 50].
    #[clap(long)]
    pub sample_limit: Option<usize>,
}

/// Fully resolved check settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSettings {
    /// Contract document path.
    pub contract: PathBuf,
    /// Registry document path.
    pub registry: PathBuf,
    /// Services directory.
    pub services_dir: PathBuf,
    /// Implementation file extension.
    pub extension: String,
    /// Access prefix for the reference check.
    pub access_prefix: String,
    /// Maximum missing identifiers listed.
    pub sample_limit: usize,
}

impl CheckSettings {
    /// Layers flags (and their environment variables) over the config file
    /// over the built-in defaults.
    pub fn resolve(args: &CheckArgs, config: &FileConfig) -> Self {
        Self {
            contract: args
                .contract
                .clone()
                .or_else(|| config.contract.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTRACT)),
            registry: args
                .registry
                .clone()
                .or_else(|| config.registry.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY)),
            services_dir: args
                .services_dir
                .clone()
                .or_else(|| config.services_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVICES_DIR)),
            extension: args
                .extension
                .clone()
                .or_else(|| config.extension.clone())
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            access_prefix: args
                .access_prefix
                .clone()
                .or_else(|| config.access_prefix.clone())
                .unwrap_or_else(|| DEFAULT_ACCESS_PREFIX.to_string()),
            sample_limit: args
                .sample_limit
                .or(config.sample_limit)
                .unwrap_or(DEFAULT_SAMPLE_LIMIT),
        }
    }
}

/// Executes the check and writes the report to `out`.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `config` - Parsed configuration file (or defaults).
/// * `out` - Destination of the report (stdout in production).
pub fn execute(
    args: &CheckArgs,
    config: &FileConfig,
    out: &mut impl Write,
) -> AppResult<CoverageReport> {
    let settings = CheckSettings::resolve(args, config);
    tracing::debug!(?settings, "resolved check settings");

    let corpus = Corpus::load(&settings.contract, &settings.registry)?;
    let sources = DirectorySources::new(&settings.services_dir, &settings.extension);
    let options = AuditOptions {
        access_prefix: settings.access_prefix.clone(),
    };

    let report = run_check(&corpus, &sources, &options);
    out.write_all(report.render(settings.sample_limit).as_bytes())?;

    if report.has_drift() {
        tracing::info!("drift detected (advisory, exit status unaffected)");
    }

    Ok(report)
}
