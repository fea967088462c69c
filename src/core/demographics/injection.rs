//! Placeholder substitution and work item expansion

use super::DemographicVariant;
use crate::core::batch::WorkItem;
use crate::core::dataset::{Question, VignetteType};
use crate::utils::error::{LabError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeSet;
use tracing::{debug, warn};

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z][A-Za-z0-9_-]*)\}").expect("placeholder pattern is valid")
});

static PLACEHOLDER_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("placeholder name pattern is valid")
});

/// Whether `name` can appear as `{name}` in a vignette
pub fn is_valid_placeholder_name(name: &str) -> bool {
    PLACEHOLDER_NAME_RE.is_match(name)
}

/// Distinct placeholder names appearing in `text`
pub fn placeholders(text: &str) -> BTreeSet<String> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Fill every placeholder in `text` from `variant`
///
/// Fails when the text uses a placeholder the variant has no value for.
pub fn inject(text: &str, variant: &DemographicVariant) -> Result<String> {
    let missing: Vec<String> = placeholders(text)
        .into_iter()
        .filter(|name| !variant.values.contains_key(name))
        .collect();

    if !missing.is_empty() {
        return Err(LabError::template(format!(
            "variant '{}' has no value for placeholder(s): {}",
            variant.label,
            missing.join(", ")
        )));
    }

    let rendered = PLACEHOLDER_RE.replace_all(text, |caps: &Captures| {
        variant
            .values
            .get(&caps[1])
            .cloned()
            .unwrap_or_else(|| caps[0].to_string())
    });

    Ok(rendered.into_owned())
}

/// Turn selected questions into work items
///
/// Baseline vignettes produce one item per question. Customized vignettes
/// produce one item per question and variant, in question-major order.
pub fn expand_work_items(
    questions: &[Question],
    vignette: VignetteType,
    variants: &[DemographicVariant],
) -> Result<Vec<WorkItem>> {
    match vignette {
        VignetteType::Baseline => {
            if !variants.is_empty() {
                warn!(
                    "Ignoring {} demographic variant(s) for baseline vignettes",
                    variants.len()
                );
            }
            Ok(questions
                .iter()
                .map(|q| WorkItem::new(q.id.clone(), q.prompt.clone()))
                .collect())
        }
        VignetteType::Customized => {
            if variants.is_empty() {
                return Err(LabError::template(
                    "customized vignettes need at least one demographic variant",
                ));
            }

            let mut items = Vec::with_capacity(questions.len() * variants.len());
            for question in questions {
                for variant in variants {
                    let prompt = inject(&question.prompt, variant).map_err(|e| {
                        LabError::template(format!("question {}: {}", question.id, e))
                    })?;
                    items.push(
                        WorkItem::new(question.id.clone(), prompt).with_variant(variant.clone()),
                    );
                }
            }

            debug!(
                "Expanded {} question(s) x {} variant(s) into {} work items",
                questions.len(),
                variants.len(),
                items.len()
            );
            Ok(items)
        }
    }
}
