//! Clinical question banks
//!
//! Question banks are CSV files with one multiple choice question per row.
//! Each row carries an identifier plus the same vignette rendered two ways:
//! without demographic details (baseline) and with `{placeholder}` slots
//! (customized). This module loads a bank for one vignette type and selects
//! the subset to run.

mod loader;
mod selection;
mod types;


pub use loader::{load_questions, read_questions};
pub use selection::{PRESET_RANGES, QuestionRange, Selection, question_ranges};
pub use types::{Question, QuestionBank, VignetteType};
