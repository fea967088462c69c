//! Demographic variant configuration

use crate::core::demographics::DemographicVariant;
use serde::{Deserialize, Serialize};

/// Variants injected into customized vignettes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemographicsConfig {
    #[serde(default)]
    pub variants: Vec<DemographicVariant>,
}

impl DemographicsConfig {
    /// Pick variants by label; an empty request selects all of them
    pub fn select(&self, labels: &[String]) -> Result<Vec<DemographicVariant>, String> {
        if labels.is_empty() {
            return Ok(self.variants.clone());
        }

        labels
            .iter()
            .map(|label| {
                self.variants
                    .iter()
                    .find(|v| &v.label == label)
                    .cloned()
                    .ok_or_else(|| format!("Unknown demographic variant: {}", label))
            })
            .collect()
    }
}
