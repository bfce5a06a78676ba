//! Schema text parsing and operation extraction

use serde_json::{Map, Number, Value as JsonValue};
use serde_yaml::Value as YamlValue;
use tracing::debug;

use crate::models::{Operation, SchemaFormat};

/// A successfully parsed schema document
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSchema {
    /// Which syntax the text was accepted as
    pub format: SchemaFormat,
    /// The document, with mapping order preserved
    pub document: JsonValue,
}

/// Parse schema text as JSON or YAML.
///
/// The text is trimmed first. Text that starts with `{` is tried as strict
/// JSON before falling back to YAML, so that JSON-intended documents never
/// go through YAML scalar coercion. Everything else is parsed as YAML. Empty
/// or `null` documents count as unparseable.
///
/// # Examples
///
/// ```
/// use marshal_sdk::schema::parse_schema;
///
/// assert!(parse_schema(r#"{"openapi": "3.1.0"}"#).is_some());
/// assert!(parse_schema("openapi: 3.1.0").is_some());
/// assert!(parse_schema("not json or yaml: [").is_none());
/// ```
pub fn parse_schema(text: &str) -> Option<JsonValue> {
    parse_schema_with_format(text).map(|parsed| parsed.document)
}

/// Like [`parse_schema`], but also reports the syntax that succeeded.
pub fn parse_schema_with_format(text: &str) -> Option<ParsedSchema> {
    let trimmed = text.trim();

    if trimmed.starts_with('{') {
        match serde_json::from_str::<JsonValue>(trimmed) {
            Ok(document) => {
                return Some(ParsedSchema {
                    format: SchemaFormat::Json,
                    document,
                });
            }
            Err(e) => debug!(error = %e, "Schema text is not valid JSON, trying YAML"),
        }
    }

    match serde_yaml::from_str::<YamlValue>(trimmed) {
        Ok(value) => match yaml_to_json(value) {
            JsonValue::Null => None,
            document => Some(ParsedSchema {
                format: SchemaFormat::Yaml,
                document,
            }),
        },
        Err(e) => {
            debug!(error = %e, "Schema text is neither JSON nor YAML");
            None
        }
    }
}

/// Extract the operations declared in schema text.
///
/// Returns an empty list when the text does not parse or has no `paths`
/// mapping. Path items and method entries that are not mappings are skipped
/// and extraction continues with the rest of the document.
///
/// # Examples
///
/// ```
/// use marshal_sdk::schema::extract_operations;
///
/// let ops = extract_operations(r#"{"paths":{"/p":{"get":{"operationId":"listP"}}}}"#);
/// assert_eq!(ops.len(), 1);
/// assert_eq!(ops[0].id, "listP");
/// assert_eq!(ops[0].method, "GET");
/// ```
pub fn extract_operations(text: &str) -> Vec<Operation> {
    match parse_schema(text) {
        Some(document) => operations_from_document(&document),
        None => Vec::new(),
    }
}

/// Extract operations from an already parsed document.
///
/// Order is path order, then method order, as written in the document.
/// Duplicate ids are kept.
pub fn operations_from_document(document: &JsonValue) -> Vec<Operation> {
    let Some(paths) = document.get("paths").and_then(JsonValue::as_object) else {
        return Vec::new();
    };

    let mut operations = Vec::new();
    for (path, item) in paths {
        let Some(methods) = item.as_object() else {
            debug!(path = %path, "Skipping path item that is not a mapping");
            continue;
        };

        for (method, operation) in methods {
            // Path-level keys such as `parameters` or `summary` fall out here
            let Some(operation) = operation.as_object() else {
                continue;
            };
            let Some(id) = operation_id(operation.get("operationId")) else {
                continue;
            };
            let summary = operation
                .get("summary")
                .and_then(JsonValue::as_str)
                .unwrap_or_default();

            operations.push(Operation::new(id, method, path.clone(), summary));
        }
    }

    debug!(count = operations.len(), "Extracted operations from schema");
    operations
}

fn operation_id(value: Option<&JsonValue>) -> Option<String> {
    match value? {
        JsonValue::String(id) if !id.is_empty() => Some(id.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Convert a YAML value into a JSON value.
///
/// OpenAPI YAML routinely uses unquoted numeric keys (`200:` under
/// `responses`), which JSON objects cannot hold, so scalar keys are
/// stringified instead of rejected.
fn yaml_to_json(value: YamlValue) -> JsonValue {
    match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                JsonValue::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                JsonValue::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(JsonValue::Number)
                    .unwrap_or(JsonValue::Null)
            }
        }
        YamlValue::String(s) => JsonValue::String(s),
        YamlValue::Sequence(items) => {
            JsonValue::Array(items.into_iter().map(yaml_to_json).collect())
        }
        YamlValue::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(yaml_key_to_string(key), yaml_to_json(value));
            }
            JsonValue::Object(object)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key_to_string(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}
