use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "api-contract",
    version,
    about = "Detect breaking changes between two OpenAPI documents"
)]
pub(crate) struct Cli {
    #[arg(value_name = "BASE")]
    pub(crate) base: PathBuf,
    #[arg(value_name = "CURRENT")]
    pub(crate) current: PathBuf,
    #[arg(short = 'f', long = "format")]
    pub(crate) format: Option<OutputFormat>,
    #[arg(short = 'q', long = "quiet", default_value_t = false)]
    pub(crate) quiet: bool,
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub(crate) verbose: u8,
}

#[derive(Clone, Debug, ValueEnum)]
pub(crate) enum OutputFormat {
    Human,
    Json,
    Yaml,
}
