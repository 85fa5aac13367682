#![deny(missing_docs)]

//! # Registry Models
//!
//! Value types recovered from the operation registry.

use std::fmt::Display;
use std::str::FromStr;

/// HTTP verb of a registered operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
}

impl HttpMethod {
    /// Whether the operation is a read.
    pub fn is_read(self) -> bool {
        self == HttpMethod::Get
    }

    /// Canonical upper-case spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    /// Case-insensitive parse (`'get'`, `'Get'` and `'GET'` are all accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            other => Err(format!("Unsupported HTTP method '{}'", other)),
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation registered inside a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationEntry {
    /// The local method name inside the service (e.g. `list`).
    pub key: String,
    /// The HTTP verb.
    pub method: HttpMethod,
}

impl OperationEntry {
    /// Convenience constructor.
    pub fn new(key: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            key: key.into(),
            method,
        }
    }
}

/// A service configuration recovered from one `<Name>ServiceConfig` binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Service name, without the `ServiceConfig` suffix.
    pub name: String,
    /// URL path prefix shared by the service's operations.
    pub base_path: String,
    /// Registered operations, in document order.
    pub operations: Vec<OperationEntry>,
}

impl ServiceDescriptor {
    /// Operations whose verb is `GET`.
    pub fn read_operations(&self) -> impl Iterator<Item = &OperationEntry> {
        self.operations.iter().filter(|op| op.method.is_read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!("Delete".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
        assert_eq!("PATCH".parse::<HttpMethod>(), Ok(HttpMethod::Patch));
        assert!("OPTIONS".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_method_display_is_upper_case() {
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_read_operations_filters_get() {
        let svc = ServiceDescriptor {
            name: "Roles".into(),
            base_path: "/roles".into(),
            operations: vec![
                OperationEntry::new("list", HttpMethod::Get),
                OperationEntry::new("create", HttpMethod::Post),
                OperationEntry::new("get", HttpMethod::Get),
            ],
        };
        let keys: Vec<&str> = svc.read_operations().map(|op| op.key.as_str()).collect();
        assert_eq!(keys, vec!["list", "get"]);
    }
}
