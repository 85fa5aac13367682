#![deny(missing_docs)]

//! # Report Emitter
//!
//! Renders a [`CoverageReport`] as plain text, always in the same order:
//! services, identifier counts, missing-in-registry, extra-in-registry,
//! implementation audit.

use crate::audit::ServiceAuditFinding;
use crate::reconcile::Reconciliation;
use crate::registry::ServiceDescriptor;
use std::collections::BTreeSet;
use std::fmt::{Display, Write};

/// Default number of missing identifiers listed before truncating.
pub const DEFAULT_SAMPLE_LIMIT: usize = 50;

/// Everything one run found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    /// Services recovered from the registry, in document order.
    pub services: Vec<ServiceDescriptor>,
    /// Identifiers declared by the contract.
    pub contract_ids: BTreeSet<String>,
    /// Identifiers declared by the registry.
    pub registry_ids: BTreeSet<String>,
    /// Contract/registry differences.
    pub reconciliation: Reconciliation,
    /// Implementation audit findings, in service order.
    pub findings: Vec<ServiceAuditFinding>,
}

impl CoverageReport {
    /// Whether any drift was found.
    pub fn has_drift(&self) -> bool {
        !self.reconciliation.is_clean() || !self.findings.is_empty()
    }

    /// Renders the report, listing at most `sample_limit` missing identifiers.
    pub fn render(&self, sample_limit: usize) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_to(&mut out, sample_limit);
        out
    }

    fn write_to(&self, out: &mut impl Write, sample_limit: usize) -> std::fmt::Result {
        writeln!(out, "Services: {}", self.services.len())?;
        for service in &self.services {
            writeln!(out, "  - {} ({})", service.name, service.base_path)?;
        }

        writeln!(out, "Contract operations: {}", self.contract_ids.len())?;
        writeln!(out, "Registry operations: {}", self.registry_ids.len())?;

        let missing = &self.reconciliation.missing_in_registry;
        writeln!(out, "Missing in registry: {}", missing.len())?;
        if missing.is_empty() {
            writeln!(out, "  None")?;
        } else {
            writeln!(out, "  By prefix:")?;
            for group in self.reconciliation.missing_by_prefix() {
                writeln!(out, "    {}: {}", group.prefix, group.count)?;
            }
            for id in missing.iter().take(sample_limit) {
                writeln!(out, "  - {}", id)?;
            }
            if missing.len() > sample_limit {
                writeln!(out, "  ...and {} more", missing.len() - sample_limit)?;
            }
        }

        let extra = &self.reconciliation.extra_in_registry;
        writeln!(out, "Extra in registry: {}", extra.len())?;
        if extra.is_empty() {
            writeln!(out, "  None")?;
        } else {
            for id in extra {
                writeln!(out, "  - {}", id)?;
            }
        }

        writeln!(out, "Implementation audit:")?;
        if self.findings.is_empty() {
            writeln!(out, "  None")?;
        } else {
            for finding in &self.findings {
                writeln!(out, "  - {}", finding)?;
            }
        }

        Ok(())
    }
}

impl Display for CoverageReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_to(f, DEFAULT_SAMPLE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditProblem;
    use crate::reconcile::reconcile;
    use crate::registry::{HttpMethod, OperationEntry};
    use pretty_assertions::assert_eq;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn report(
        contract: &[&str],
        registry: &[&str],
        findings: Vec<ServiceAuditFinding>,
    ) -> CoverageReport {
        let contract_ids = set(contract);
        let registry_ids = set(registry);
        CoverageReport {
            services: vec![ServiceDescriptor {
                name: "Roles".into(),
                base_path: "/roles".into(),
                operations: vec![OperationEntry::new("list", HttpMethod::Get)],
            }],
            reconciliation: reconcile(&contract_ids, &registry_ids),
            contract_ids,
            registry_ids,
            findings,
        }
    }

    #[test]
    fn test_clean_report() {
        let r = report(&["roles_list"], &["roles_list"], vec![]);
        assert!(!r.has_drift());
        assert_eq!(
            r.to_string(),
            "Services: 1\n\
             \x20 - Roles (/roles)\n\
             Contract operations: 1\n\
             Registry operations: 1\n\
             Missing in registry: 0\n\
             \x20 None\n\
             Extra in registry: 0\n\
             \x20 None\n\
             Implementation audit:\n\
             \x20 None\n"
        );
    }

    #[test]
    fn test_drift_report() {
        let findings = vec![
            ServiceAuditFinding {
                service: "Roles".into(),
                problem: AuditProblem::MissingOperations(vec!["get".into(), "search".into()]),
            },
            ServiceAuditFinding {
                service: "Ghost".into(),
                problem: AuditProblem::MissingFile {
                    reason: "service file missing".into(),
                },
            },
        ];
        let r = report(
            &["roles_list", "persons_get", "persons_list", "awards_list"],
            &["roles_list", "legacy_ping"],
            findings,
        );
        assert!(r.has_drift());
        assert_eq!(
            r.render(50),
            "Services: 1\n\
             \x20 - Roles (/roles)\n\
             Contract operations: 4\n\
             Registry operations: 2\n\
             Missing in registry: 3\n\
             \x20 By prefix:\n\
             \x20   persons: 2\n\
             \x20   awards: 1\n\
             \x20 - awards_list\n\
             \x20 - persons_get\n\
             \x20 - persons_list\n\
             Extra in registry: 1\n\
             \x20 - legacy_ping\n\
             Implementation audit:\n\
             \x20 - Roles: missing get, search\n\
             \x20 - Ghost: service file missing\n"
        );
    }

    #[test]
    fn test_missing_sample_is_truncated() {
        let ids: Vec<String> = (0..5).map(|i| format!("x_{}", i)).collect();
        let refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
        let r = report(&refs, &[], vec![]);

        let text = r.render(2);
        assert!(text.contains("  - x_0\n  - x_1\n  ...and 3 more\n"));
        assert!(!text.contains("x_2"));
        assert!(text.contains("    x: 5\n"));
    }
}
