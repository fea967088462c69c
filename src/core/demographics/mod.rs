//! Demographic variation of clinical vignettes
//!
//! Customized vignettes carry `{placeholder}` slots (`{race}`, `{gender}`,
//! `{age}`...). A [`DemographicVariant`] names one assignment of values to
//! those slots; expanding a question set against several variants yields one
//! work item per question and variant so their answers can be compared.

mod injection;


pub use injection::{expand_work_items, inject, is_valid_placeholder_name, placeholders};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One assignment of demographic values to placeholder names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicVariant {
    /// Short label, unique within a run
    pub label: String,
    /// Placeholder name to substituted text
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl DemographicVariant {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, placeholder: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(placeholder.into(), value.into());
        self
    }
}
