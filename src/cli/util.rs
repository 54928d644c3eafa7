use super::args::OutputFormat;
use apicontract::{CliConfig, ContractError};
use tracing_subscriber::EnvFilter;

pub(super) fn resolve_format(flag: Option<OutputFormat>, cli_config: &CliConfig) -> OutputFormat {
    flag.or_else(|| cli_config.format.as_deref().and_then(parse_format))
        .unwrap_or(OutputFormat::Human)
}

pub(super) fn resolve_quiet(flag: bool, config_quiet: Option<bool>) -> bool {
    flag || env_true("API_CONTRACT_QUIET") || config_quiet.unwrap_or(false)
}

pub(super) fn init_logging(verbose: u8, cli_config: &CliConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = verbosity_level(verbose)
                .or(cli_config.log_level.as_deref())
                .unwrap_or("warn");
            EnvFilter::try_new(format!("apicontract={level},api_contract={level}")).map_err(
                |error| ContractError::InvalidConfig(format!("log level {level}: {error}")),
            )?
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}

fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn parse_format(value: &str) -> Option<OutputFormat> {
    match value {
        "human" => Some(OutputFormat::Human),
        "json" => Some(OutputFormat::Json),
        "yaml" => Some(OutputFormat::Yaml),
        _ => None,
    }
}

fn env_true(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}
