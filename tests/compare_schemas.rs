use apicontract::{compare_schemas, Context, ContractError, DocumentPair, FindingKind};
use serde_json::{json, Value};

fn context() -> Context {
    Context::new("GET /pets 200 [application/json]")
}

fn messages(base: &Value, current: &Value, base_doc: &Value, current_doc: &Value) -> Vec<String> {
    compare_schemas(
        base,
        current,
        DocumentPair::new(base_doc, current_doc),
        &context(),
    )
    .expect("compare")
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn compare_plain(base: Value, current: Value) -> Vec<String> {
    let empty = json!({});
    messages(&base, &current, &empty, &empty)
}

#[test]
fn type_change_reports_once_without_descending() {
    let base = json!({
        "type": "object",
        "required": ["id"],
        "properties": {"id": {"type": "string"}}
    });
    let current = json!({"type": "array", "items": {"type": "string"}});

    assert_eq!(
        compare_plain(base, current),
        vec!["GET /pets 200 [application/json]: schema type changed from object to array"]
    );
}

#[test]
fn identical_schema_has_no_findings() {
    let document = json!({
        "components": {"schemas": {
            "Pet": {
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": {"type": "integer"},
                    "status": {"type": "string", "enum": ["available", "sold"]},
                    "tags": {"type": "array", "items": {"$ref": "#/components/schemas/Tag"}}
                }
            },
            "Tag": {"type": "object", "properties": {"name": {"type": "string"}}}
        }}
    });
    let schema = json!({"$ref": "#/components/schemas/Pet"});

    assert!(messages(&schema, &schema, &document, &document).is_empty());
}

#[test]
fn enum_narrowing_lists_removed_values() {
    let base = json!({"type": "string", "enum": ["a", "b", "c"]});
    let current = json!({"type": "string", "enum": ["a", "c"]});

    assert_eq!(
        compare_plain(base, current),
        vec!["GET /pets 200 [application/json]: enum values removed: ['b']"]
    );
}

#[test]
fn enum_widening_is_silent() {
    let base = json!({"enum": [1, 2]});
    let current = json!({"enum": [1, 2, 3]});

    assert!(compare_plain(base, current).is_empty());
}

#[test]
fn added_properties_are_silent() {
    let base = json!({
        "type": "object",
        "required": ["id"],
        "properties": {"id": {"type": "string"}}
    });
    let current = json!({
        "type": "object",
        "required": ["id"],
        "properties": {"id": {"type": "string"}, "nickname": {"type": "string"}}
    });

    assert!(compare_plain(base, current).is_empty());
}

#[test]
fn removed_property_reports_required_and_properties() {
    let base = json!({
        "type": "object",
        "required": ["x"],
        "properties": {"x": {"type": "string"}}
    });
    let current = json!({"type": "object", "properties": {}});

    assert_eq!(
        compare_plain(base, current),
        vec![
            "GET /pets 200 [application/json]: required fields removed: ['x']",
            "GET /pets 200 [application/json]: response properties removed: ['x']",
        ]
    );
}

#[test]
fn properties_without_type_are_treated_as_object() {
    let base = json!({"properties": {"a": {}, "b": {}, "c": {}}});
    let current = json!({"properties": {"b": {}}});

    assert_eq!(
        compare_plain(base, current),
        vec!["GET /pets 200 [application/json]: response properties removed: ['a', 'c']"]
    );
}

#[test]
fn nested_findings_carry_property_and_item_context() {
    let base = json!({
        "type": "object",
        "properties": {
            "owner": {"type": "object", "properties": {"age": {"type": "integer"}}},
            "tags": {"type": "array", "items": {"type": "string", "enum": ["x", "y"]}}
        }
    });
    let current = json!({
        "type": "object",
        "properties": {
            "owner": {"type": "object", "properties": {"age": {"type": "string"}}},
            "tags": {"type": "array", "items": {"type": "string", "enum": ["x"]}}
        }
    });

    assert_eq!(
        compare_plain(base, current),
        vec![
            "GET /pets 200 [application/json].owner.age: schema type changed from integer to string",
            "GET /pets 200 [application/json].tags[]: enum values removed: ['y']",
        ]
    );
}

#[test]
fn findings_follow_type_enum_required_properties_order() {
    let base = json!({
        "type": "object",
        "enum": ["a"],
        "required": ["a"],
        "properties": {"a": {"type": "string"}, "b": {"type": "integer"}}
    });
    let current = json!({
        "type": "object",
        "enum": [],
        "properties": {"b": {"type": "string"}}
    });

    let findings = compare_schemas(
        &base,
        &current,
        DocumentPair::new(&json!({}), &json!({})),
        &context(),
    )
    .expect("compare");
    let kinds = findings.iter().map(|finding| finding.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            FindingKind::EnumValuesRemoved,
            FindingKind::RequiredFieldsRemoved,
            FindingKind::PropertiesRemoved,
            FindingKind::SchemaTypeChanged,
        ]
    );
    assert_eq!(findings[3].context, "GET /pets 200 [application/json].b");
}

#[test]
fn references_resolve_against_their_own_document() {
    let base_doc = json!({"components": {"schemas": {"Id": {"type": "integer"}}}});
    let current_doc = json!({"components": {"schemas": {"Id": {"type": "string"}}}});
    let schema = json!({"$ref": "#/components/schemas/Id"});

    assert_eq!(
        messages(&schema, &schema, &base_doc, &current_doc),
        vec!["GET /pets 200 [application/json]: schema type changed from integer to string"]
    );
}

#[test]
fn unresolvable_reference_is_opaque() {
    let document = json!({"components": {}});
    let base = json!({"$ref": "#/components/schemas/Missing"});
    let current = json!({"type": "string"});

    assert!(messages(&base, &current, &document, &document).is_empty());
}

#[test]
fn non_object_schemas_are_not_comparable() {
    assert!(compare_plain(json!(true), json!({"type": "string"})).is_empty());
    assert!(compare_plain(json!({"type": "string"}), Value::Null).is_empty());
}

#[test]
fn cyclic_schema_terminates() {
    let base_doc = json!({"components": {"schemas": {"Node": {
        "type": "object",
        "required": ["name"],
        "properties": {
            "name": {"type": "string"},
            "next": {"$ref": "#/components/schemas/Node"}
        }
    }}}});
    let current_doc = json!({"components": {"schemas": {"Node": {
        "type": "object",
        "properties": {
            "next": {"$ref": "#/components/schemas/Node"}
        }
    }}}});
    let schema = json!({"$ref": "#/components/schemas/Node"});

    assert_eq!(
        messages(&schema, &schema, &base_doc, &current_doc),
        vec![
            "GET /pets 200 [application/json]: required fields removed: ['name']",
            "GET /pets 200 [application/json]: response properties removed: ['name']",
        ]
    );
    assert!(messages(&schema, &schema, &base_doc, &base_doc).is_empty());
}

#[test]
fn mutually_recursive_schemas_terminate() {
    let document = json!({"components": {"schemas": {
        "Person": {"type": "object", "properties": {"pet": {"$ref": "#/components/schemas/Pet"}}},
        "Pet": {"type": "object", "properties": {"owner": {"$ref": "#/components/schemas/Person"}}}
    }}});
    let schema = json!({"$ref": "#/components/schemas/Person"});

    assert!(messages(&schema, &schema, &document, &document).is_empty());
}

#[test]
fn structured_enum_member_is_an_error() {
    let base = json!({"enum": [{"a": 1}]});
    let current = json!({"enum": ["a"]});
    let empty = json!({});

    let error = compare_schemas(&base, &current, DocumentPair::new(&empty, &empty), &context())
        .expect_err("structured enum member");
    assert!(matches!(error, ContractError::NonScalarEnumMember { .. }));
}

#[test]
fn missing_items_compare_against_empty_schema() {
    let base = json!({
        "type": "array",
        "items": {"type": "object", "required": ["a"], "properties": {"a": {"type": "string"}}}
    });
    let current = json!({"type": "array"});

    assert_eq!(
        compare_plain(base, current),
        vec![
            "GET /pets 200 [application/json][]: required fields removed: ['a']",
            "GET /pets 200 [application/json][]: response properties removed: ['a']",
        ]
    );
}

#[test]
fn large_integer_enum_members_are_compared_exactly() {
    let base = json!({"type": "integer", "enum": [9007199254740993_u64, 1]});
    let current = json!({"type": "integer", "enum": [9007199254740992_u64, 1]});

    assert_eq!(
        compare_plain(base, current),
        vec!["GET /pets 200 [application/json]: enum values removed: [9007199254740993]"]
    );
}

#[test]
fn enum_strings_with_control_characters_are_escaped() {
    let base = json!({"enum": ["line\nbreak", "tab\there"]});
    let current = json!({"enum": ["tab\there"]});

    assert_eq!(
        compare_plain(base, current),
        vec!["GET /pets 200 [application/json]: enum values removed: ['line\\nbreak']"]
    );
}
