//! OpenAPI operation structures
//!
//! An [`Operation`] is one addressable `method + path` pair of an OpenAPI
//! document that carries a non-empty `operationId`.

use serde::{Deserialize, Serialize};

/// Syntax the schema text was successfully parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

impl std::fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaFormat::Yaml => write!(f, "yaml"),
            SchemaFormat::Json => write!(f, "json"),
        }
    }
}

/// A selectable operation extracted from an OpenAPI document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// The `operationId` (never empty)
    pub id: String,
    /// Upper-cased HTTP verb (the key under the path item)
    pub method: String,
    /// Path template, e.g. `/products/{id}`
    pub path: String,
    /// Operation summary, empty when the document has none
    #[serde(default)]
    pub summary: String,
}

impl Operation {
    /// Create a new operation, upper-casing the method
    pub fn new(
        id: impl Into<String>,
        method: &str,
        path: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Operation {
            id: id.into(),
            method: method.to_uppercase(),
            path: path.into(),
            summary: summary.into(),
        }
    }

    /// Label used by selection lists: `GET /products - List products`
    pub fn label(&self) -> String {
        if self.summary.is_empty() {
            format!("{} {}", self.method, self.path)
        } else {
            format!("{} {} - {}", self.method, self.path, self.summary)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uppercases_method() {
        let op = Operation::new("listP", "get", "/p", "");
        assert_eq!(op.method, "GET");
        assert_eq!(op.label(), "GET /p");
    }

    #[test]
    fn test_label_with_summary() {
        let op = Operation::new("createProduct", "post", "/products", "Create a product");
        assert_eq!(op.label(), "POST /products - Create a product");
    }

    #[test]
    fn test_schema_format_serializes_lowercase() {
        let json = serde_json::to_string(&SchemaFormat::Yaml).unwrap();
        assert_eq!(json, "\"yaml\"");
        assert_eq!(SchemaFormat::Json.to_string(), "json");
    }
}
