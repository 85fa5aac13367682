#![deny(missing_docs)]

//! # Identifier Extraction
//!
//! Pulls operation identifiers out of the two document dialects:
//!
//! - the contract, where identifiers appear as bare YAML scalars
//!   (`operationId: roles_list`),
//! - the registry, where they appear as single-quoted literals
//!   (`operationId: 'roles_list'`).
//!
//! Neither extractor can fail. Text without matches yields an empty set.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Extracts the operation identifiers declared by the contract document.
///
/// The identifier is the whitespace-delimited token following `operationId:`.
/// A single pair of surrounding quotes is tolerated and dropped.
///
/// # Examples
/// ```
/// use opcov_core::extract::contract_operation_ids;
///
/// let ids = contract_operation_ids("get:\n  operationId: roles_list\n");
/// assert!(ids.contains("roles_list"));
/// ```
pub fn contract_operation_ids(text: &str) -> BTreeSet<String> {
    static CONTRACT_RE: OnceLock<Regex> = OnceLock::new();
    let re = CONTRACT_RE.get_or_init(|| {
        Regex::new(r#"operationId:[ \t]+["']?([^\s"']+)"#).expect("Invalid regex")
    });
    collect_captures(re, text)
}

/// Extracts the operation identifiers declared by the registry document.
///
/// The identifier is the content of the single-quoted literal following
/// `operationId:`.
pub fn registry_operation_ids(text: &str) -> BTreeSet<String> {
    static REGISTRY_RE: OnceLock<Regex> = OnceLock::new();
    let re = REGISTRY_RE
        .get_or_init(|| Regex::new(r"operationId:\s*'([^'\n]+)'").expect("Invalid regex"));
    collect_captures(re, text)
}

fn collect_captures(re: &Regex, text: &str) -> BTreeSet<String> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
