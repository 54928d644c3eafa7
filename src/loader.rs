use crate::{ContractError, ContractResult};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::path::{Path, PathBuf};

const DOCUMENT_SHAPE: &str = r#"{
  "type": "object",
  "properties": {
    "paths": {
      "type": "object",
      "additionalProperties": { "type": "object" }
    }
  }
}"#;

#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub document: Value,
}

pub fn load_document(path: &Path) -> ContractResult<LoadedDocument> {
    let content = std::fs::read_to_string(path)?;
    let document = if is_yaml(path) {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(&content)?;
        serde_json::to_value(yaml_value)?
    } else {
        serde_json::from_str(&content)?
    };
    validate_shape(path, &document)?;
    tracing::debug!(path = %path.display(), "loaded contract document");
    Ok(LoadedDocument {
        path: path.to_path_buf(),
        document,
    })
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| {
            extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml")
        })
        .unwrap_or(false)
}

fn validate_shape(path: &Path, document: &Value) -> ContractResult<()> {
    let schema_value: Value = serde_json::from_str(DOCUMENT_SHAPE)?;
    let compiled = JSONSchema::compile(&schema_value)
        .map_err(|error| ContractError::InvalidConfig(error.to_string()))?;
    let issues = match compiled.validate(document) {
        Ok(()) => return Ok(()),
        Err(errors) => errors
            .map(|error| format!("{} (at {})", error, error.instance_path))
            .collect::<Vec<_>>(),
    };
    Err(ContractError::InvalidDocument {
        path: path.display().to_string(),
        issues,
    })
}
