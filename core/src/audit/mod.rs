#![deny(missing_docs)]

//! # Implementation Auditor
//!
//! Checks that every read operation registered for a service is referenced by
//! that service's implementation file.
//!
//! The check is textual containment of `<access prefix><key>` (e.g.
//! `operations.list`). It misses references made through aliases, spreads or
//! computed keys, and it accepts matches inside comments or strings.

pub mod naming;
pub mod sources;

pub use naming::service_name_to_file_name;
pub use sources::{DirectorySources, MemorySources, ServiceSources};

use crate::registry::ServiceDescriptor;
use std::fmt::Display;

/// Reason reported for a service without an implementation file.
pub const MISSING_FILE_REASON: &str = "service file missing";

/// Knobs for the reference check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditOptions {
    /// Text that precedes an operation key at its use site.
    pub access_prefix: String,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            access_prefix: "operations.".to_string(),
        }
    }
}

/// What is wrong with one service's implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditProblem {
    /// No usable implementation file.
    MissingFile {
        /// Human-readable cause.
        reason: String,
    },
    /// Registered GET operations the file never references, in registry order.
    MissingOperations(Vec<String>),
}

/// A problem found for one service. At most one per service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAuditFinding {
    /// Service name as recovered from the registry.
    pub service: String,
    /// The problem.
    pub problem: AuditProblem,
}

impl ServiceAuditFinding {
    /// Keys of unreferenced operations (empty for a missing file).
    pub fn missing_operations(&self) -> &[String] {
        match &self.problem {
            AuditProblem::MissingFile { .. } => &[],
            AuditProblem::MissingOperations(keys) => keys,
        }
    }

    /// Reason for a missing file, if that is the problem.
    pub fn missing_file_reason(&self) -> Option<&str> {
        match &self.problem {
            AuditProblem::MissingFile { reason } => Some(reason),
            AuditProblem::MissingOperations(_) => None,
        }
    }
}

impl Display for ServiceAuditFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.problem {
            AuditProblem::MissingFile { reason } => write!(f, "{}: {}", self.service, reason),
            AuditProblem::MissingOperations(keys) => {
                write!(f, "{}: missing {}", self.service, keys.join(", "))
            }
        }
    }
}

/// Audits each service against its implementation file, in service order.
///
/// # Arguments
///
/// * `services` - Descriptors recovered from the registry.
/// * `sources` - Access to implementation files.
/// * `file_name_for` - Maps a service name to a file stem
///   (normally [`service_name_to_file_name`]).
/// * `options` - Reference check settings.
pub fn audit_implementations<S, F>(
    services: &[ServiceDescriptor],
    sources: &S,
    file_name_for: F,
    options: &AuditOptions,
) -> Vec<ServiceAuditFinding>
where
    S: ServiceSources + ?Sized,
    F: Fn(&str) -> String,
{
    services
        .iter()
        .filter_map(|service| audit_service(service, sources, &file_name_for, options))
        .collect()
}

fn audit_service<S, F>(
    service: &ServiceDescriptor,
    sources: &S,
    file_name_for: &F,
    options: &AuditOptions,
) -> Option<ServiceAuditFinding>
where
    S: ServiceSources + ?Sized,
    F: Fn(&str) -> String,
{
    let stem = file_name_for(&service.name);

    if !sources.exists(&stem) {
        return Some(ServiceAuditFinding {
            service: service.name.clone(),
            problem: AuditProblem::MissingFile {
                reason: MISSING_FILE_REASON.to_string(),
            },
        });
    }

    let text = match sources.read(&stem) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(service = %service.name, file = %stem, error = %e, "unreadable implementation file");
            return Some(ServiceAuditFinding {
                service: service.name.clone(),
                problem: AuditProblem::MissingFile {
                    reason: format!("service file unreadable: {}", e),
                },
            });
        }
    };

    let missing: Vec<String> = service
        .read_operations()
        .filter(|op| !text.contains(&format!("{}{}", options.access_prefix, op.key)))
        .map(|op| op.key.clone())
        .collect();

    if missing.is_empty() {
        None
    } else {
        Some(ServiceAuditFinding {
            service: service.name.clone(),
            problem: AuditProblem::MissingOperations(missing),
        })
    }
}
