#![deny(missing_docs)]

//! # Coverage Check
//!
//! Wires extraction, structural parsing, reconciliation and auditing into one
//! pure pipeline over the loaded corpus.

use crate::audit::{audit_implementations, service_name_to_file_name, AuditOptions, ServiceSources};
use crate::extract::{contract_operation_ids, registry_operation_ids};
use crate::loader::Corpus;
use crate::reconcile::reconcile;
use crate::registry::parse_services;
use crate::report::CoverageReport;

/// Runs the full check.
///
/// Never fails: every inconsistency is data in the returned report.
///
/// # Examples
/// ```
/// use opcov_core::audit::{AuditOptions, MemorySources};
/// use opcov_core::{run_check, Corpus};
///
/// let corpus = Corpus::new(
///     "operationId: roles_list\n",
///     "export const RolesServiceConfig = { basePath: '/roles', operations: {\n\
///        list: { method: 'GET', operationId: 'roles_list' } } };",
/// );
/// let sources: MemorySources = [("roles", "this.operations.list")].into_iter().collect();
///
/// let report = run_check(&corpus, &sources, &AuditOptions::default());
/// assert!(!report.has_drift());
/// ```
pub fn run_check<S>(corpus: &Corpus, sources: &S, options: &AuditOptions) -> CoverageReport
where
    S: ServiceSources + ?Sized,
{
    let contract_ids = contract_operation_ids(&corpus.contract);
    let registry_ids = registry_operation_ids(&corpus.registry);
    let services = parse_services(&corpus.registry);

    let reconciliation = reconcile(&contract_ids, &registry_ids);
    let findings = audit_implementations(&services, sources, service_name_to_file_name, options);

    tracing::info!(
        services = services.len(),
        contract = contract_ids.len(),
        registry = registry_ids.len(),
        missing = reconciliation.missing_in_registry.len(),
        extra = reconciliation.extra_in_registry.len(),
        findings = findings.len(),
        "coverage check complete"
    );

    CoverageReport {
        services,
        contract_ids,
        registry_ids,
        reconciliation,
        findings,
    }
}
