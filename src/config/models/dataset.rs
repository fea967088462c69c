//! Question bank configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Column names and the catalog of known question banks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Column holding the unique question identifier
    #[serde(default = "default_id_column")]
    pub id_column: String,
    /// Column holding vignettes without demographic details
    #[serde(default = "default_baseline_column")]
    pub baseline_column: String,
    /// Column holding vignettes with `{placeholder}` slots
    #[serde(default = "default_customized_column")]
    pub customized_column: String,
    /// Category label to CSV path
    #[serde(default = "default_catalog")]
    pub catalog: BTreeMap<String, PathBuf>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            id_column: default_id_column(),
            baseline_column: default_baseline_column(),
            customized_column: default_customized_column(),
            catalog: default_catalog(),
        }
    }
}

impl DatasetConfig {
    /// Resolve a catalog category to its CSV path
    pub fn resolve_category(&self, category: &str) -> Option<&PathBuf> {
        self.catalog.get(category)
    }
}

fn default_id_column() -> String {
    "qid".to_string()
}

fn default_baseline_column() -> String {
    "full_qa_no_demo".to_string()
}

fn default_customized_column() -> String {
    "full_qa_w_placeholders".to_string()
}

fn default_catalog() -> BTreeMap<String, PathBuf> {
    [
        ("emergency-medicine", "data/emerg-medicine.csv"),
        ("family-medicine", "data/fam-medicine.csv"),
        ("internal-medicine", "data/internal-medicine.csv"),
        ("neurology", "data/neurology.csv"),
        ("obgyn", "data/obgyn.csv"),
        ("pediatrics", "data/pediatrics.csv"),
        ("psychiatry", "data/psychiatry.csv"),
        ("surgery", "data/surgery.csv"),
    ]
    .into_iter()
    .map(|(label, path)| (label.to_string(), PathBuf::from(path)))
    .collect()
}
