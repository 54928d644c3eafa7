mod config;
mod context;
mod document;
mod finding;
mod loader;
mod operation;
mod pointer;
mod report;
mod schema;

pub use crate::config::{load_config_file, resolve_cli_config, CliConfig, ConfigFile};
pub use crate::context::Context;
pub use crate::document::{compare_documents, is_http_method, DocumentPair, HTTP_METHODS};
pub use crate::finding::{render_names, Finding, FindingKind, Scope};
pub use crate::loader::{load_document, LoadedDocument};
pub use crate::operation::{compare_operations, required_params, ParameterKey};
pub use crate::pointer::{resolve, resolve_tracked, Visited};
pub use crate::report::{build_report, compare_files, BreakingReport, Summary};
pub use crate::schema::compare_schemas;

pub type ContractResult<T> = Result<T, ContractError>;

#[derive(thiserror::Error, Debug)]
pub enum ContractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid contract document {path}: {}", .issues.join("; "))]
    InvalidDocument { path: String, issues: Vec<String> },
    #[error("{context}: enum member is not a scalar: {value}")]
    NonScalarEnumMember { context: String, value: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
