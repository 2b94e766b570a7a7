use crate::report::ReportDocument;
use anyhow::{Context, Result};
use std::path::Path;

/// Serialize the report document as pretty JSON
pub fn to_json(document: &ReportDocument) -> Result<String> {
    serde_json::to_string_pretty(document).context("Failed to serialize report to JSON")
}

/// Write report to JSON file
pub fn write_report(document: &ReportDocument, path: &Path) -> Result<()> {
    let json = to_json(document)?;

    std::fs::write(path, &json)
        .with_context(|| format!("Failed to write report to {:?}", path))?;

    Ok(())
}
