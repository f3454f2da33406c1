// Draft palette: the (temperature, approach) pairs used for parallel drafts

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// One rhetorical approach for a parallel draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftApproach {
    /// Short label, e.g. "hook-first"
    pub label: String,
    pub temperature: f32,
    /// Instruction appended to the draft prompt
    pub emphasis: String,
}

impl DraftApproach {
    pub fn new(label: impl Into<String>, temperature: f32, emphasis: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            temperature,
            emphasis: emphasis.into(),
        }
    }
}

/// Ordered, non-empty list of approaches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DraftApproach>", into = "Vec<DraftApproach>")]
pub struct DraftPalette {
    approaches: Vec<DraftApproach>,
}

impl DraftPalette {
    pub fn new(approaches: Vec<DraftApproach>) -> Result<Self, EngineError> {
        if approaches.is_empty() {
            return Err(EngineError::InvalidConfig(
                "draft palette needs at least one approach".to_string(),
            ));
        }
        Ok(Self { approaches })
    }

    /// First `n` approaches, cycling when `n` exceeds the palette
    pub fn pick(&self, n: usize) -> Vec<DraftApproach> {
        self.approaches.iter().cycle().take(n).cloned().collect()
    }

    pub fn approaches(&self) -> &[DraftApproach] {
        &self.approaches
    }
}

impl TryFrom<Vec<DraftApproach>> for DraftPalette {
    type Error = EngineError;

    fn try_from(approaches: Vec<DraftApproach>) -> Result<Self, Self::Error> {
        Self::new(approaches)
    }
}

impl From<DraftPalette> for Vec<DraftApproach> {
    fn from(palette: DraftPalette) -> Self {
        palette.approaches
    }
}

impl Default for DraftPalette {
    fn default() -> Self {
        Self {
            approaches: vec![
                DraftApproach::new(
                    "hook-first",
                    0.5,
                    "Focus on a STRONG, surprising hook. The first sentence has to grab the reader!",
                ),
                DraftApproach::new(
                    "story-first",
                    0.7,
                    "Focus on STORYTELLING. Build in a small story or anecdote.",
                ),
                DraftApproach::new(
                    "value-first",
                    0.6,
                    "Focus on CONCRETE VALUE. What exactly does the reader learn?",
                ),
                DraftApproach::new(
                    "emotion-first",
                    0.8,
                    "Focus on EMOTION. Speak to feelings and personal experience.",
                ),
                DraftApproach::new(
                    "provocation-first",
                    0.55,
                    "Focus on PROVOCATION. Put forward a thesis that makes people think.",
                ),
            ],
        }
    }
}
