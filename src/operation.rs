use crate::pointer::{resolve, Visited};
use crate::{compare_schemas, Context, ContractResult, DocumentPair, Finding, FindingKind};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParameterKey {
    pub location: String,
    pub name: String,
}

impl ParameterKey {
    pub fn new(location: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.location, self.name)
    }
}

pub fn required_params(operation: &Value, document: &Value) -> BTreeSet<ParameterKey> {
    let Some(Value::Array(parameters)) = operation.get("parameters") else {
        return BTreeSet::new();
    };
    parameters
        .iter()
        .map(|parameter| resolve(parameter, document, Visited::new()))
        .filter(|parameter| is_true(parameter.get("required")))
        .map(|parameter| {
            ParameterKey::new(
                parameter.get("in").and_then(Value::as_str).unwrap_or_default(),
                parameter
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default(),
            )
        })
        .collect()
}

pub fn compare_operations(
    base_op: &Value,
    current_op: &Value,
    method: &str,
    path: &str,
    documents: DocumentPair<'_>,
) -> ContractResult<Vec<Finding>> {
    let method_upper = method.to_uppercase();
    let operation_context = Context::operation(method, path);
    let mut findings = Vec::new();

    let base_params = required_params(base_op, documents.base);
    let current_params = required_params(current_op, documents.current);
    for added in current_params.difference(&base_params) {
        findings.push(Finding::new(
            FindingKind::RequiredParameterAdded,
            &operation_context,
            format!("Added required parameter on {method_upper} {path}: {added}"),
        ));
    }

    if !request_body_required(base_op, documents.base)
        && request_body_required(current_op, documents.current)
    {
        findings.push(Finding::new(
            FindingKind::RequestBodyRequired,
            &operation_context,
            format!("Request body became required: {method_upper} {path}"),
        ));
    }

    let empty = Map::new();
    let base_responses = responses(base_op).unwrap_or(&empty);
    let current_responses = responses(current_op).unwrap_or(&empty);
    let base_success = success_codes(base_responses);
    let current_success = success_codes(current_responses);

    for code in base_success.difference(&current_success) {
        findings.push(Finding::new(
            FindingKind::SuccessResponseRemoved,
            &operation_context,
            format!("Removed success response {code} on {method_upper} {path}"),
        ));
    }

    for code in base_success.intersection(&current_success) {
        let base_response = resolve(&base_responses[*code], documents.base, Visited::new());
        let current_response = resolve(
            &current_responses[*code],
            documents.current,
            Visited::new(),
        );
        let base_content = content(base_response).unwrap_or(&empty);
        let current_content = content(current_response).unwrap_or(&empty);
        let response_context = Context::response(method, path, code);

        let mut removed_media = base_content
            .keys()
            .filter(|media_type| !current_content.contains_key(*media_type))
            .collect::<Vec<_>>();
        removed_media.sort_unstable();
        for media_type in removed_media {
            findings.push(Finding::new(
                FindingKind::MediaTypeRemoved,
                &response_context,
                format!("Removed response media type {media_type} for {method_upper} {path} {code}"),
            ));
        }

        let empty_schema = Value::Object(Map::new());
        let shared_media = base_content
            .keys()
            .filter(|media_type| current_content.contains_key(*media_type))
            .collect::<BTreeSet<_>>();
        for media_type in shared_media {
            let schema_context = Context::media_type(method, path, code, media_type);
            findings.extend(compare_schemas(
                media_schema(&base_content[media_type]).unwrap_or(&empty_schema),
                media_schema(&current_content[media_type]).unwrap_or(&empty_schema),
                documents,
                &schema_context,
            )?);
        }
    }

    Ok(findings)
}

fn is_true(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

fn request_body_required(operation: &Value, document: &Value) -> bool {
    operation
        .get("requestBody")
        .map(|body| resolve(body, document, Visited::new()))
        .is_some_and(|body| is_true(body.get("required")))
}

fn responses(operation: &Value) -> Option<&Map<String, Value>> {
    operation.get("responses").and_then(Value::as_object)
}

fn success_codes(responses: &Map<String, Value>) -> BTreeSet<&str> {
    responses
        .keys()
        .map(String::as_str)
        .filter(|code| code.starts_with('2'))
        .collect()
}

fn content(response: &Value) -> Option<&Map<String, Value>> {
    response.get("content").and_then(Value::as_object)
}

fn media_schema(media: &Value) -> Option<&Value> {
    media.get("schema").filter(|schema| !schema.is_null())
}
