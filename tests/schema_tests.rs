//! Tests for OpenAPI operation discovery

use marshal_sdk::models::{Operation, SchemaFormat};
use marshal_sdk::schema::{
    NO_OPERATIONS_HINT, SchemaResolver, extract_operations, parse_schema_with_format,
};

const PETSTORE_YAML: &str = r#"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: listPets
      summary: List all pets
      responses:
        200:
          description: A paged array of pets
    post:
      operationId: createPet
      summary: Create a pet
      responses:
        201:
          description: Created
  /pets/{petId}:
    parameters:
      - name: petId
        in: path
        required: true
    get:
      operationId: showPetById
      summary: Info for a specific pet
      responses:
        default:
          description: unexpected error
    delete:
      summary: No operation id here
"#;

const PETSTORE_JSON: &str = r#"{
  "openapi": "3.1.0",
  "info": {"title": "Petstore", "version": "1.0.0"},
  "paths": {
    "/pets/{petId}": {
      "get": {"operationId": "showPetById"}
    },
    "/pets": {
      "post": {"operationId": "createPet", "summary": "Create a pet"},
      "get": {"operationId": "listPets", "summary": "List all pets"}
    }
  }
}"#;

#[test]
fn test_yaml_petstore_operations() {
    let ops = extract_operations(PETSTORE_YAML);
    let ids: Vec<&str> = ops.iter().map(|op| op.id.as_str()).collect();
    assert_eq!(ids, vec!["listPets", "createPet", "showPetById"]);

    assert_eq!(
        ops[0],
        Operation::new("listPets", "get", "/pets", "List all pets")
    );
    assert_eq!(ops[2].path, "/pets/{petId}");
    assert!(ops.iter().all(|op| !op.id.is_empty()));
}

#[test]
fn test_json_petstore_keeps_document_order() {
    let ops = extract_operations(PETSTORE_JSON);
    let labels: Vec<String> = ops.iter().map(Operation::label).collect();
    assert_eq!(
        labels,
        vec![
            "GET /pets/{petId}".to_string(),
            "POST /pets - Create a pet".to_string(),
            "GET /pets - List all pets".to_string(),
        ]
    );
}

#[test]
fn test_format_detection() {
    let parsed = parse_schema_with_format(PETSTORE_JSON).unwrap();
    assert_eq!(parsed.format, SchemaFormat::Json);

    let parsed = parse_schema_with_format(PETSTORE_YAML).unwrap();
    assert_eq!(parsed.format, SchemaFormat::Yaml);
    assert_eq!(parsed.document["info"]["title"], "Petstore");
}

#[test]
fn test_garbage_never_panics() {
    for text in [
        "",
        "   ",
        "not json or yaml: [",
        "{",
        "{\"paths\": 12}",
        "paths:\n  - a\n  - b",
        "paths:\n  /x: 3\n",
        "\u{0}\u{1}\u{2}",
        "[1, 2, 3]",
    ] {
        assert!(extract_operations(text).is_empty(), "text: {:?}", text);
    }
}

#[test]
fn test_resolver_editing_session() {
    let mut resolver = SchemaResolver::new();
    assert_eq!(resolver.selected(), None);
    assert_eq!(resolver.hint(), None);

    resolver.set_schema_text(PETSTORE_YAML);
    assert_eq!(resolver.selected(), Some("listPets"));

    assert!(resolver.select("showPetById"));
    // re-parsing the same document keeps the user's choice
    resolver.set_schema_text(PETSTORE_JSON);
    assert_eq!(resolver.selected(), Some("showPetById"));

    // half-typed text drops every operation
    resolver.set_schema_text("openapi: 3.1.0\npaths:\n  /pets:\n    get: [");
    assert!(resolver.operations().is_empty());
    assert_eq!(resolver.selected(), None);
    assert_eq!(resolver.hint(), Some(NO_OPERATIONS_HINT));

    resolver.set_schema_text(PETSTORE_YAML);
    assert_eq!(resolver.selected(), Some("listPets"));
    assert_eq!(
        resolver.selected_operation().map(|op| op.method.as_str()),
        Some("GET")
    );
}

#[test]
fn test_request_built_from_resolver() {
    let resolver = SchemaResolver::with_text(PETSTORE_YAML);
    let request = resolver.request_for(r#"{"name":"Rex"}"#);
    assert_eq!(request.operation_id, "listPets");
    assert_eq!(request.open_api_spec_text, PETSTORE_YAML);
    assert!(marshal_sdk::validation::validate_request(&request).is_ok());
}
