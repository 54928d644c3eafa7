use crate::{compare_operations, Context, ContractResult, Finding, FindingKind};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
pub struct DocumentPair<'a> {
    pub base: &'a Value,
    pub current: &'a Value,
}

impl<'a> DocumentPair<'a> {
    pub fn new(base: &'a Value, current: &'a Value) -> Self {
        Self { base, current }
    }
}

pub const HTTP_METHODS: [&str; 8] = [
    "get", "post", "put", "patch", "delete", "options", "head", "trace",
];

pub fn is_http_method(key: &str) -> bool {
    HTTP_METHODS
        .iter()
        .any(|method| method.eq_ignore_ascii_case(key))
}

pub fn compare_documents(base_doc: &Value, current_doc: &Value) -> ContractResult<Vec<Finding>> {
    let documents = DocumentPair::new(base_doc, current_doc);
    let empty = Map::new();
    let base_paths = paths(base_doc).unwrap_or(&empty);
    let current_paths = paths(current_doc).unwrap_or(&empty);
    let mut findings = Vec::new();

    let mut removed_paths = base_paths
        .keys()
        .filter(|path| !current_paths.contains_key(*path))
        .collect::<Vec<_>>();
    removed_paths.sort_unstable();
    for path in removed_paths {
        findings.push(Finding::new(
            FindingKind::PathRemoved,
            &Context::new(path.as_str()),
            format!("Removed path: {path}"),
        ));
    }

    let mut shared_paths = base_paths
        .keys()
        .filter(|path| current_paths.contains_key(*path))
        .collect::<Vec<_>>();
    shared_paths.sort_unstable();
    for path in shared_paths {
        let base_ops = operations(&base_paths[path], path);
        let current_ops = operations(&current_paths[path], path);

        for method in base_ops.keys().filter(|method| !current_ops.contains_key(*method)) {
            findings.push(Finding::new(
                FindingKind::OperationRemoved,
                &Context::operation(method, path),
                format!("Removed operation: {} {path}", method.to_uppercase()),
            ));
        }

        for (method, base_op) in &base_ops {
            let Some(current_op) = current_ops.get(method) else {
                continue;
            };
            tracing::debug!(method = %method, path = %path, "comparing operation");
            findings.extend(compare_operations(
                base_op, current_op, method, path, documents,
            )?);
        }
    }

    Ok(findings)
}

fn paths(document: &Value) -> Option<&Map<String, Value>> {
    document.get("paths").and_then(Value::as_object)
}

fn operations<'a>(path_item: &'a Value, path: &str) -> BTreeMap<&'a str, &'a Value> {
    let Value::Object(item) = path_item else {
        tracing::debug!(path = %path, "path item is not an object");
        return BTreeMap::new();
    };
    item.iter()
        .filter(|(key, _)| is_http_method(key))
        .map(|(key, operation)| (key.as_str(), operation))
        .collect()
}
