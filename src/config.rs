use crate::ContractResult;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub default: DefaultConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DefaultConfig {
    pub format: Option<String>,
    pub quiet: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogConfig {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub format: Option<String>,
    pub quiet: Option<bool>,
    pub log_level: Option<String>,
}

pub fn load_config_file(path: &Path) -> ContractResult<Option<ConfigFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(Some(config))
}

pub fn resolve_cli_config(config_file: Option<ConfigFile>) -> CliConfig {
    let mut resolved = CliConfig::default();
    if let Some(config_file) = config_file {
        resolved.format = config_file.default.format;
        resolved.quiet = config_file.default.quiet;
        resolved.log_level = config_file.log.level;
    }
    resolved
}
