use crate::{compare_documents, load_document, ContractResult, Finding, Scope};
use std::path::Path;

#[derive(Debug, Clone, serde::Serialize, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub document: usize,
    pub operation: usize,
    pub schema: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct BreakingReport {
    pub compatible: bool,
    pub findings: Vec<Finding>,
    pub summary: Summary,
}

pub fn build_report(findings: Vec<Finding>) -> BreakingReport {
    let mut summary = Summary::default();
    for finding in &findings {
        summary.total += 1;
        match finding.scope() {
            Scope::Document => summary.document += 1,
            Scope::Operation => summary.operation += 1,
            Scope::Schema => summary.schema += 1,
        }
    }
    BreakingReport {
        compatible: findings.is_empty(),
        findings,
        summary,
    }
}

pub fn compare_files(base_path: &Path, current_path: &Path) -> ContractResult<BreakingReport> {
    let base = load_document(base_path)?;
    let current = load_document(current_path)?;
    let findings = compare_documents(&base.document, &current.document)?;
    tracing::info!(
        base = %base.path.display(),
        current = %current.path.display(),
        findings = findings.len(),
        "compared contract documents"
    );
    Ok(build_report(findings))
}
