#![deny(missing_docs)]

//! # opcov core
//!
//! Operation coverage reconciliation for a generated API client.
//!
//! Three sources of truth are cross-referenced:
//!
//! 1. the API contract (`operationId: <token>` declarations),
//! 2. the operation registry (`export const <Name>ServiceConfig = { ... }`),
//! 3. the per-service implementation files.
//!
//! Drift between them is collected into a [`CoverageReport`]; it never makes
//! a run fail.

/// Shared error types.
pub mod error;

/// Reading the primary documents.
pub mod loader;

/// Operation identifier extraction.
pub mod extract;

/// Registry structural parsing.
pub mod registry;

/// Contract/registry set reconciliation.
pub mod reconcile;

/// Implementation file audit.
pub mod audit;

/// Text report rendering.
pub mod report;

/// End-to-end check.
pub mod engine;

pub use audit::{
    audit_implementations, service_name_to_file_name, AuditOptions, AuditProblem,
    DirectorySources, MemorySources, ServiceAuditFinding, ServiceSources,
};
pub use engine::run_check;
pub use error::{AppError, AppResult};
pub use extract::{contract_operation_ids, registry_operation_ids};
pub use loader::Corpus;
pub use reconcile::{operation_prefix, reconcile, PrefixGroup, Reconciliation};
pub use registry::{parse_services, HttpMethod, OperationEntry, ServiceDescriptor};
pub use report::{CoverageReport, DEFAULT_SAMPLE_LIMIT};
