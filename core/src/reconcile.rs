#![deny(missing_docs)]

//! # Reconciliation
//!
//! Set differences between the contract's identifiers and the registry's
//! identifiers, plus a prefix-grouped view of what the registry lacks.

use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Outcome of comparing contract and registry identifier sets.
///
/// Both sets iterate in lexicographic order and are disjoint by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Declared in the contract, absent from the registry.
    pub missing_in_registry: BTreeSet<String>,
    /// Declared in the registry, absent from the contract.
    pub extra_in_registry: BTreeSet<String>,
}

/// Number of missing identifiers sharing one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixGroup {
    /// Text before the first `_`.
    pub prefix: String,
    /// Occurrences.
    pub count: usize,
}

/// Compares the two identifier sets (case-sensitive).
pub fn reconcile(contract_ids: &BTreeSet<String>, registry_ids: &BTreeSet<String>) -> Reconciliation {
    Reconciliation {
        missing_in_registry: contract_ids.difference(registry_ids).cloned().collect(),
        extra_in_registry: registry_ids.difference(contract_ids).cloned().collect(),
    }
}

/// The grouping prefix of an identifier: everything before the first `_`.
///
/// ```
/// use opcov_core::reconcile::operation_prefix;
///
/// assert_eq!(operation_prefix("persons_list_all"), "persons");
/// assert_eq!(operation_prefix("ping"), "ping");
/// ```
pub fn operation_prefix(id: &str) -> &str {
    id.split_once('_').map_or(id, |(prefix, _)| prefix)
}

impl Reconciliation {
    /// Whether the two documents agree.
    pub fn is_clean(&self) -> bool {
        self.missing_in_registry.is_empty() && self.extra_in_registry.is_empty()
    }

    /// Missing identifiers counted per prefix, largest groups first.
    ///
    /// Ties keep the order in which prefixes are first met while walking the
    /// sorted missing set.
    pub fn missing_by_prefix(&self) -> Vec<PrefixGroup> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for id in &self.missing_in_registry {
            *counts.entry(operation_prefix(id)).or_insert(0) += 1;
        }

        let mut groups: Vec<PrefixGroup> = counts
            .into_iter()
            .map(|(prefix, count)| PrefixGroup {
                prefix: prefix.to_string(),
                count,
            })
            .collect();
        // stable: equal counts keep first-seen order
        groups.sort_by(|a, b| b.count.cmp(&a.count));
        groups
    }
}
