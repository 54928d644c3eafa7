use super::args::{Cli, OutputFormat};
use super::output::{print_human, print_json, print_yaml};
use super::util::{init_logging, resolve_format, resolve_quiet};
use anyhow::Context;
use apicontract::{compare_files, load_config_file, resolve_cli_config};
use std::path::Path;

pub(super) fn run(cli: Cli) -> anyhow::Result<i32> {
    let config_file = load_config_file(Path::new(".api-contract.toml"))
        .context(".api-contract.toml の読み込みに失敗しました")?;
    let cli_config = resolve_cli_config(config_file);
    init_logging(cli.verbose, &cli_config)?;

    for path in [&cli.base, &cli.current] {
        if !path.exists() {
            eprintln!("ドキュメントが見つかりません: {}", path.display());
            return Ok(2);
        }
    }
    let format = resolve_format(cli.format, &cli_config);
    let quiet = resolve_quiet(cli.quiet, cli_config.quiet);

    let report = compare_files(&cli.base, &cli.current).with_context(|| {
        format!(
            "{:?} と {:?} の比較に失敗しました",
            cli.base, cli.current
        )
    })?;
    tracing::info!(
        findings = report.summary.total,
        document = report.summary.document,
        operation = report.summary.operation,
        schema = report.summary.schema,
        "comparison finished"
    );

    if quiet && report.compatible {
        return Ok(0);
    }

    match format {
        OutputFormat::Human => print_human(&report),
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Yaml => print_yaml(&report)?,
    }

    Ok(if report.compatible { 0 } else { 1 })
}
