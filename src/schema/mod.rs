//! OpenAPI schema ingestion
//!
//! Turns user-supplied OpenAPI text (JSON or YAML, possibly malformed) into
//! an ordered list of selectable [`Operation`](crate::models::Operation)s.
//! Nothing in this module returns an error: text that cannot be parsed
//! degrades to an empty operation list.

pub mod parser;
pub mod resolver;

pub use parser::{
    ParsedSchema, extract_operations, operations_from_document, parse_schema,
    parse_schema_with_format,
};
pub use resolver::{NO_OPERATIONS_HINT, SchemaResolver, repair_selection};
