//! Prompt record module
//!
//! The single piece of persisted state: the last submitted prompt and template
//! type, rendered as a two-line text file and overwritten on every submit.

mod error;
mod store;

pub use error::StoreError;
pub use store::RecordStore;

use std::collections::HashMap;

/// Last submitted form values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptRecord {
    pub prompt: String,
    pub template_type: String,
}

impl PromptRecord {
    pub fn new(prompt: impl Into<String>, template_type: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            template_type: template_type.into(),
        }
    }

    /// Build a record from decoded form fields; absent fields become empty
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let field = |name: &str| fields.get(name).cloned().unwrap_or_default();
        Self::new(field("prompt"), field("template_type"))
    }

    /// Text stored on disk, no trailing newline
    pub fn render(&self) -> String {
        format!("Prompt: {}\nType: {}", self.prompt, self.template_type)
    }
}
