//! Choosing which questions to run

use super::types::{Question, QuestionBank};
use crate::utils::error::{LabError, Result};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A labelled, 1-based inclusive range of questions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionRange {
    pub start: usize,
    pub end: usize,
}

impl QuestionRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of questions the range spans
    pub fn span(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn label(&self) -> String {
        if self.start == 1 {
            format!("Questions 1 to {} (n={})", self.end, self.span())
        } else {
            format!("Questions {}-{} (n={})", self.start, self.end, self.span())
        }
    }
}

impl fmt::Display for QuestionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for QuestionRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| format!("range '{}' must look like START-END", s))?;
        let start: usize = start
            .trim()
            .parse()
            .map_err(|e| format!("invalid range start '{}': {}", start, e))?;
        let end: usize = end
            .trim()
            .parse()
            .map_err(|e| format!("invalid range end '{}': {}", end, e))?;
        if start == 0 || start > end {
            return Err(format!(
                "range {}-{} must satisfy 1 <= start <= end",
                start, end
            ));
        }
        Ok(Self { start, end })
    }
}

/// Preset batches, shrinking toward the end of a bank
pub const PRESET_RANGES: [QuestionRange; 9] = [
    QuestionRange { start: 1, end: 50 },
    QuestionRange { start: 51, end: 100 },
    QuestionRange { start: 101, end: 150 },
    QuestionRange { start: 151, end: 200 },
    QuestionRange { start: 201, end: 240 },
    QuestionRange { start: 241, end: 270 },
    QuestionRange { start: 271, end: 290 },
    QuestionRange { start: 291, end: 305 },
    QuestionRange { start: 306, end: 315 },
];

/// Preset ranges that start within a bank of `len` data rows
pub fn question_ranges(len: usize) -> Vec<QuestionRange> {
    PRESET_RANGES
        .iter()
        .copied()
        .filter(|range| range.start <= len)
        .collect()
}

/// Subset of a bank to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    /// Contiguous file rows; the end is clamped and rows without a prompt are dropped
    Range(QuestionRange),
    /// Explicit ids, kept in the given order
    Ids(Vec<String>),
}

impl QuestionBank {
    /// Resolve a selection against this bank
    pub fn select(&self, selection: &Selection) -> Result<Vec<Question>> {
        let selected = match selection {
            Selection::All => self.questions.clone(),
            Selection::Range(range) => {
                if range.start == 0 || range.start > range.end {
                    return Err(LabError::dataset(format!("Invalid range {}", range)));
                }
                if range.start > self.total_rows {
                    return Err(LabError::dataset(format!(
                        "Range {} starts beyond the {} row(s) in the bank",
                        range, self.total_rows
                    )));
                }
                // positions refer to file rows so both vignette types agree
                self.questions
                    .iter()
                    .filter(|q| (range.start..=range.end).contains(&q.row))
                    .cloned()
                    .collect()
            }
            Selection::Ids(ids) => {
                let mut seen = HashSet::new();
                let mut picked = Vec::with_capacity(ids.len());
                for id in ids {
                    let id = id.trim();
                    if !seen.insert(id) {
                        continue;
                    }
                    let question = self
                        .get(id)
                        .ok_or_else(|| LabError::dataset(format!("Unknown question id '{}'", id)))?;
                    picked.push(question.clone());
                }
                picked
            }
        };

        if selected.is_empty() {
            return Err(LabError::dataset("Selection matched no questions"));
        }
        Ok(selected)
    }
}
