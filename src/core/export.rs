//! Results export

use crate::core::batch::WorkResult;
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// One output row
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    identifier: &'a str,
    prompt: &'a str,
    response: &'a str,
    error: String,
    timestamp: String,
    variant: &'a str,
    attempts: u32,
}

impl<'a> From<&'a WorkResult> for ResultRow<'a> {
    fn from(result: &'a WorkResult) -> Self {
        Self {
            identifier: result.id(),
            prompt: result.prompt(),
            response: result.response().unwrap_or_default(),
            error: result.error().map(ToString::to_string).unwrap_or_default(),
            timestamp: result.completed_at().to_rfc3339(),
            variant: result.variant_label().unwrap_or_default(),
            attempts: result.attempts(),
        }
    }
}

/// Write results as CSV in submission order
pub fn write_results_csv<W: Write>(writer: W, results: &[WorkResult]) -> Result<()> {
    let mut ordered: Vec<&WorkResult> = results.iter().collect();
    ordered.sort_by_key(|r| r.sequence());

    let mut wtr = csv::Writer::from_writer(writer);
    if ordered.is_empty() {
        wtr.write_record([
            "identifier",
            "prompt",
            "response",
            "error",
            "timestamp",
            "variant",
            "attempts",
        ])?;
    }
    for result in ordered {
        wtr.serialize(ResultRow::from(result))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write results to a CSV file, creating parent directories
pub async fn write_results_file<P: AsRef<Path>>(path: P, results: &[WorkResult]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut buffer = Vec::new();
    write_results_csv(&mut buffer, results)?;
    tokio::fs::write(path, buffer).await?;

    info!("Wrote {} results to {}", results.len(), path.display());
    Ok(())
}

/// Success and failure counts for one demographic variant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariantSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl VariantSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Count outcomes per variant label; unlabelled results count under `baseline`
pub fn summarize_by_variant(results: &[WorkResult]) -> BTreeMap<String, VariantSummary> {
    let mut summary: BTreeMap<String, VariantSummary> = BTreeMap::new();
    for result in results {
        let label = result.variant_label().unwrap_or("baseline");
        let entry = summary.entry(label.to_string()).or_default();
        if result.is_success() {
            entry.succeeded += 1;
        } else {
            entry.failed += 1;
        }
    }
    summary
}
