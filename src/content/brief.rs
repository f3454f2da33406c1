// Content brief: what a single request asks the writer to cover

use serde::{Deserialize, Serialize};

fn default_category() -> String {
    "General".to_string()
}

/// Immutable input for one generation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Brief {
    /// Topic title
    pub title: String,

    /// Topic category (e.g. "Leadership", "Product")
    #[serde(default = "default_category")]
    pub category: String,

    /// Core fact or content the post is built around
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact: Option<String>,

    /// Angle or perspective to take
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<String>,

    /// Hook idea, used as inspiration only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_idea: Option<String>,

    /// Supporting facts the writer should weave in
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_facts: Vec<String>,

    /// Why the topic matters to the audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<String>,

    /// Why this subject in particular should write about it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl Brief {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: default_category(),
            ..Default::default()
        }
    }

    /// Text used for keyword matching against reference examples
    pub fn matching_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.title.as_str(), self.category.as_str()];
        if let Some(fact) = &self.fact {
            parts.push(fact);
        }
        if let Some(angle) = &self.angle {
            parts.push(angle);
        }
        parts.extend(self.key_facts.iter().map(String::as_str));
        parts.join(" ")
    }
}
