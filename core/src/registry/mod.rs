#![deny(missing_docs)]

//! # Registry Structural Parser
//!
//! Recovers service descriptors from the operation registry source:
//!
//! ```text
//! export const RolesServiceConfig: ServiceConfig = {
//!   basePath: '/roles',
//!   operations: {
//!     list: { method: 'GET', path: '', operationId: 'roles_list' },
//!     get: { method: 'GET', path: '/{id}', parameters: { id: { in: 'path' } } },
//!   },
//! };
//! ```
//!
//! The parser is targeted pattern extraction, not a grammar. Malformed
//! services degrade to an empty operation list instead of failing the run.

pub mod models;
pub mod scanner;

pub use models::{HttpMethod, OperationEntry, ServiceDescriptor};

use regex::Regex;
use scanner::{matching_brace, next_open_brace, value_end};
use std::sync::OnceLock;

/// Parses every `<Name>ServiceConfig` binding, in document order.
pub fn parse_services(registry: &str) -> Vec<ServiceDescriptor> {
    static SERVICE_RE: OnceLock<Regex> = OnceLock::new();
    let re = SERVICE_RE.get_or_init(|| {
        Regex::new(
            r"export\s+const\s+(\w+)ServiceConfig\s*(?::\s*\w+\s*)?=\s*\{\s*basePath\s*:\s*'([^']*)'",
        )
        .expect("Invalid regex")
    });

    let headers: Vec<(usize, String, String)> = re
        .captures_iter(registry)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str().to_string();
            let base_path = caps.get(2)?.as_str().to_string();
            Some((whole.start(), name, base_path))
        })
        .collect();

    let mut services = Vec::with_capacity(headers.len());
    for (idx, (start, name, base_path)) in headers.iter().enumerate() {
        let end = headers
            .get(idx + 1)
            .map_or(registry.len(), |(next_start, _, _)| *next_start);
        let operations = parse_operations(&registry[*start..end], name);

        tracing::debug!(
            service = %name,
            base_path = %base_path,
            operations = operations.len(),
            "parsed service"
        );

        services.push(ServiceDescriptor {
            name: name.clone(),
            base_path: base_path.clone(),
            operations,
        });
    }

    services
}

/// Isolates the `operations: { ... }` block of one service and reads its
/// top-level entries.
fn parse_operations(block: &str, service: &str) -> Vec<OperationEntry> {
    static OPERATIONS_RE: OnceLock<Regex> = OnceLock::new();
    let re =
        OPERATIONS_RE.get_or_init(|| Regex::new(r"\boperations\s*:").expect("Invalid regex"));

    let Some(keyword) = re.find(block) else {
        tracing::debug!(service, "no operations block");
        return Vec::new();
    };
    let Some(open) = next_open_brace(block, keyword.end()) else {
        tracing::debug!(service, "operations block has no opening brace");
        return Vec::new();
    };
    let Some(close) = matching_brace(block, open) else {
        tracing::debug!(service, "operations block is not balanced");
        return Vec::new();
    };

    parse_entries(&block[open + 1..close], service)
}

/// A top-level property of an object literal body.
struct Property<'a> {
    key: String,
    value: &'a str,
}

/// Splits an object literal body into its top-level properties.
///
/// Object values are bounded with [`matching_brace`], so nested literals stay
/// inside their owning property. Spreads and other key-less items are stepped
/// over. Walking stops at the first unbalanced object value.
fn properties(body: &str) -> Vec<Property<'_>> {
    let bytes = body.as_bytes();
    let mut props = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        i = skip_trivia(body, i);
        if i >= bytes.len() {
            break;
        }

        let Some((key, after_key)) = read_key(body, i) else {
            i = value_end(body, i) + 1;
            continue;
        };

        let colon = skip_whitespace(body, after_key);
        if bytes.get(colon) != Some(&b':') {
            i = value_end(body, i) + 1;
            continue;
        }

        let start = skip_whitespace(body, colon + 1);
        if bytes.get(start) == Some(&b'{') {
            let Some(close) = matching_brace(body, start) else {
                break;
            };
            props.push(Property {
                key,
                value: &body[start..=close],
            });
            i = close + 1;
        } else {
            let end = value_end(body, start);
            props.push(Property {
                key,
                value: body[start.min(end)..end].trim_end(),
            });
            i = end + 1;
        }
    }

    props
}

/// Reads the operation entries of an operations block body.
///
/// Only `<key>: { ... }` entries carrying a recognised `method` literal become
/// operations. A key seen twice keeps its first occurrence.
fn parse_entries(body: &str, service: &str) -> Vec<OperationEntry> {
    let mut entries: Vec<OperationEntry> = Vec::new();

    for Property { key, value } in properties(body) {
        if !value.starts_with('{') {
            continue;
        }
        match entry_method(value) {
            Some(method) if entries.iter().any(|e| e.key == key) => {
                tracing::debug!(service, key = %key, %method, "duplicate operation key ignored");
            }
            Some(method) => entries.push(OperationEntry { key, method }),
            None => tracing::debug!(service, key = %key, "entry without HTTP method skipped"),
        }
    }

    entries
}

/// The verb of the entry's own `method` property.
///
/// Nested objects are never consulted, so a `method` field inside e.g. a
/// `parameters` literal cannot shadow the entry's verb.
fn entry_method(entry: &str) -> Option<HttpMethod> {
    let inner = entry.strip_prefix('{')?.strip_suffix('}')?;
    properties(inner)
        .into_iter()
        .find(|p| p.key == "method")
        .and_then(|p| string_literal(p.value))
        .and_then(|verb| verb.parse().ok())
}

/// Content of a leading `'...'` or `"..."` literal.
fn string_literal(value: &str) -> Option<&str> {
    let quote = value.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let rest = &value[1..];
    rest.find(quote).map(|end| &rest[..end])
}

/// Reads an object key: a bare identifier or a quoted literal.
fn read_key(text: &str, start: usize) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    match *bytes.get(start)? {
        b'\'' | b'"' => {
            let key = string_literal(&text[start..])?;
            (!key.is_empty()).then(|| (key.to_string(), start + key.len() + 2))
        }
        b if is_ident_start(b) => {
            let len = bytes[start..]
                .iter()
                .take_while(|b| is_ident_continue(**b))
                .count();
            Some((text[start..start + len].to_string(), start + len))
        }
        _ => None,
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Skips whitespace, separators and comments between entries.
fn skip_trivia(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = from;
    loop {
        i = skip_whitespace(text, i);
        match (bytes.get(i), bytes.get(i + 1)) {
            (Some(b','), _) => i += 1,
            (Some(b'/'), Some(b'/')) => {
                i = text[i..].find('\n').map_or(bytes.len(), |n| i + n + 1);
            }
            (Some(b'/'), Some(b'*')) => {
                i = text[i + 2..].find("*/").map_or(bytes.len(), |n| i + 2 + n + 2);
            }
            _ => return i,
        }
    }
}
