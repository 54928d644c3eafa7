use apicontract::BreakingReport;

pub(super) fn print_human(report: &BreakingReport) {
    if report.compatible {
        println!("No breaking OpenAPI changes detected.");
        return;
    }
    println!("Breaking OpenAPI changes detected:");
    for finding in &report.findings {
        println!(" - {finding}");
    }
}

pub(super) fn print_json(report: &BreakingReport) -> anyhow::Result<()> {
    let findings = report
        .findings
        .iter()
        .map(|finding| {
            serde_json::json!({
                "kind": finding.kind,
                "scope": finding.scope(),
                "context": finding.context,
                "description": finding.description,
                "message": finding.message(),
            })
        })
        .collect::<Vec<_>>();
    let output = serde_json::json!({
        "compatible": report.compatible,
        "findings": findings,
        "summary": report.summary,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub(super) fn print_yaml(report: &BreakingReport) -> anyhow::Result<()> {
    let output = serde_yaml::to_string(&report.findings)?;
    println!("{output}");
    Ok(())
}
