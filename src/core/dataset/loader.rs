//! CSV loading

use super::types::{Question, QuestionBank, VignetteType};
use crate::config::DatasetConfig;
use crate::utils::error::{LabError, Result};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Load a question bank from a CSV file
pub fn load_questions(
    path: impl AsRef<Path>,
    vignette: VignetteType,
    config: &DatasetConfig,
) -> Result<QuestionBank> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        LabError::dataset(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let bank = read_questions(file, vignette, config)?;
    info!(
        "Loaded {} {} question(s) from {}",
        bank.len(),
        vignette,
        path.display()
    );
    Ok(bank)
}

/// Read a question bank from any CSV source
///
/// Rows with an empty prompt cell are skipped; empty or duplicate ids fail.
pub fn read_questions<R: Read>(
    reader: R,
    vignette: VignetteType,
    config: &DatasetConfig,
) -> Result<QuestionBank> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let prompt_column = vignette.column(config);

    let find = |name: &str| -> Result<usize> {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            LabError::dataset(format!(
                "Column '{}' not found (available: {})",
                name,
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })
    };
    let id_idx = find(&config.id_column)?;
    let prompt_idx = find(prompt_column)?;

    let mut questions = Vec::new();
    let mut seen = HashSet::new();
    let mut total_rows = 0;

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = index + 1;
        total_rows = row;

        let id = record.get(id_idx).unwrap_or_default().trim();
        if id.is_empty() {
            return Err(LabError::dataset(format!(
                "Row {} has an empty '{}' value",
                row, config.id_column
            )));
        }
        if !seen.insert(id.to_string()) {
            return Err(LabError::dataset(format!(
                "Duplicate question id '{}' at row {}",
                id, row
            )));
        }

        let prompt = record.get(prompt_idx).unwrap_or_default().trim();
        if prompt.is_empty() {
            warn!(
                "Skipping question {} (row {}): empty '{}' cell",
                id, row, prompt_column
            );
            continue;
        }

        questions.push(Question {
            id: id.to_string(),
            prompt: prompt.to_string(),
            row,
        });
    }

    Ok(QuestionBank {
        vignette,
        questions,
        total_rows,
    })
}
