//! Stateful operation list with selection repair

use tracing::debug;

use super::parser::extract_operations;
use crate::models::{Operation, ValidationRequest};

/// Advisory shown when schema text is present but declares no operations
pub const NO_OPERATIONS_HINT: &str = "Your OpenAPI spec needs paths with operationId fields. \
     Enter the operation ID manually or update your schema.";

/// Keeps the operation list in sync with the current schema text.
///
/// Every call to [`set_schema_text`](SchemaResolver::set_schema_text)
/// recomputes the list synchronously and repairs the selection so that it
/// always names an operation from the current list, or nothing when the
/// list is empty.
#[derive(Debug, Clone, Default)]
pub struct SchemaResolver {
    text: String,
    operations: Vec<Operation>,
    selected: Option<String>,
}

impl SchemaResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver already loaded with schema text
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut resolver = Self::new();
        resolver.set_schema_text(text);
        resolver
    }

    /// Replace the schema text and recompute the operation list.
    pub fn set_schema_text(&mut self, text: impl Into<String>) -> &[Operation] {
        self.text = text.into();
        self.operations = extract_operations(&self.text);
        self.selected = repair_selection(self.selected.as_deref(), &self.operations);
        debug!(
            operations = self.operations.len(),
            selected = ?self.selected,
            "Schema text changed"
        );
        &self.operations
    }

    /// Current schema text, unparsed
    pub fn schema_text(&self) -> &str {
        &self.text
    }

    /// Operations from the current text, in document order
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Id of the selected operation
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected operation (first match when ids are duplicated)
    pub fn selected_operation(&self) -> Option<&Operation> {
        let id = self.selected.as_deref()?;
        self.operations.iter().find(|op| op.id == id)
    }

    /// Select an operation by id. Returns `false` and keeps the current
    /// selection when the id is not in the list.
    pub fn select(&mut self, id: &str) -> bool {
        if self.operations.iter().any(|op| op.id == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Advisory text for non-blank schemas that yield no operations
    pub fn hint(&self) -> Option<&'static str> {
        if !self.text.trim().is_empty() && self.operations.is_empty() {
            Some(NO_OPERATIONS_HINT)
        } else {
            None
        }
    }

    /// Build a submission from the current schema text and selection.
    ///
    /// With no selection the operation id is empty, which local validation
    /// rejects before anything is sent.
    pub fn request_for(&self, json: impl Into<String>) -> ValidationRequest {
        ValidationRequest::new(
            json,
            self.text.clone(),
            self.selected.clone().unwrap_or_default(),
        )
    }
}

/// Decide the selection after the operation list changed.
///
/// A selection that is still present is kept. Otherwise the first operation
/// is selected, or nothing when the list is empty.
pub fn repair_selection(current: Option<&str>, operations: &[Operation]) -> Option<String> {
    if let Some(id) = current
        && operations.iter().any(|op| op.id == id)
    {
        return Some(id.to_string());
    }
    operations.first().map(|op| op.id.clone())
}
