//! Prompt templates shared by every item of a batch

use serde::{Deserialize, Serialize};

/// Placeholder in the user template that receives the rendered vignette
pub const QUESTION_PLACEHOLDER: &str = "{question}";

pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are an experienced attending physician \
answering board-style multiple choice questions. Read the clinical vignette carefully, \
reason through the differential step by step, and commit to the single best answer.";

pub const DEFAULT_USER_TEMPLATE: &str = "Answer the following multiple choice question.\n\
Explain your reasoning in a few sentences, then finish with a final line of the form \
'Answer: <letter>'.\n\n{question}";

/// System message plus user message template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    #[serde(default = "default_system_message")]
    pub system_message: String,
    #[serde(default = "default_user_template")]
    pub user_template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            system_message: default_system_message(),
            user_template: default_user_template(),
        }
    }
}

impl PromptTemplate {
    pub fn new(system_message: impl Into<String>, user_template: impl Into<String>) -> Self {
        Self {
            system_message: system_message.into(),
            user_template: user_template.into(),
        }
    }

    /// Template that sends the question text unchanged
    pub fn passthrough(system_message: impl Into<String>) -> Self {
        Self::new(system_message, QUESTION_PLACEHOLDER)
    }

    /// Render the user message for one question
    pub fn render_user(&self, question: &str) -> String {
        if self.user_template.contains(QUESTION_PLACEHOLDER) {
            self.user_template.replace(QUESTION_PLACEHOLDER, question)
        } else {
            format!("{}\n\n{}", self.user_template, question)
        }
    }
}

fn default_system_message() -> String {
    DEFAULT_SYSTEM_MESSAGE.to_string()
}

fn default_user_template() -> String {
    DEFAULT_USER_TEMPLATE.to_string()
}
