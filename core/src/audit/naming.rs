#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Maps service names onto implementation file names.

use regex::Regex;
use std::sync::OnceLock;

/// Converts a CamelCase service name to its kebab-case file stem.
///
/// A `-` is inserted between a lowercase letter or digit and a following
/// uppercase letter, then the whole name is lowercased. Runs of capitals are
/// not split (`HTTPRoutes` -> `httproutes`).
pub fn service_name_to_file_name(name: &str) -> String {
    static HUMP_RE: OnceLock<Regex> = OnceLock::new();
    let re = HUMP_RE.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("Invalid regex"));
    re.replace_all(name, "$1-$2").to_lowercase()
}
