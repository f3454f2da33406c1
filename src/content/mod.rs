// Request inputs: brief, style profile, reference examples

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod brief;
pub mod profile;

pub use brief::Brief;
pub use profile::StyleProfile;

/// A prior sample text by the subject, used only as style inspiration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceExample {
    pub text: String,
}

impl ReferenceExample {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<String> for ReferenceExample {
    fn from(text: String) -> Self {
        Self { text }
    }
}

/// Load a TOML or JSON document, picking the format from the file extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON in {}", path.display())),
        _ => toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML in {}", path.display())),
    }
}
