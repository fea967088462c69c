//! Question bank types

use crate::config::DatasetConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which rendering of the vignette to send
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VignetteType {
    /// No demographic details
    #[default]
    Baseline,
    /// Demographic placeholders to be filled per variant
    Customized,
}

impl VignetteType {
    /// CSV column holding this rendering
    pub fn column<'a>(&self, config: &'a DatasetConfig) -> &'a str {
        match self {
            Self::Baseline => &config.baseline_column,
            Self::Customized => &config.customized_column,
        }
    }
}

impl fmt::Display for VignetteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => write!(f, "baseline"),
            Self::Customized => write!(f, "customized"),
        }
    }
}

impl FromStr for VignetteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baseline" => Ok(Self::Baseline),
            "customized" | "customised" => Ok(Self::Customized),
            other => Err(format!(
                "unknown vignette type '{}' (expected baseline or customized)",
                other
            )),
        }
    }
}

/// One question as loaded for a vignette type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    /// 1-based data row in the source file
    pub row: usize,
}

/// Questions loaded from one bank, in file order
#[derive(Debug, Clone)]
pub struct QuestionBank {
    pub(super) vignette: VignetteType,
    pub(super) questions: Vec<Question>,
    /// Data rows in the source file, including skipped ones
    pub(super) total_rows: usize,
}

impl QuestionBank {
    pub fn vignette(&self) -> VignetteType {
        self.vignette
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Data rows in the source file; ranges are positions over these
    pub fn row_count(&self) -> usize {
        self.total_rows
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}
