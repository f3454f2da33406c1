// Style profile: how the subject writes
//
// Produced upstream by profile analysis; the engine only reads it. Every
// section and field has a default so partially filled profiles still load.

use serde::{Deserialize, Serialize};

/// Read-only description of a subject's writing style
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleProfile {
    pub writing_style: WritingStyle,
    pub linguistic: LinguisticFingerprint,
    pub tone: ToneAnalysis,
    pub visual: VisualPatterns,
    pub content_strategy: ContentStrategy,
    pub audience: AudienceInsights,
    pub phrase_library: PhraseLibrary,
    pub structure_templates: StructureTemplates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WritingStyle {
    /// e.g. "First person"
    pub perspective: String,
    /// How readers are addressed (informal "you", formal, plural)
    pub form_of_address: String,
    pub sentence_dynamics: String,
    pub average_word_count: u32,
}

impl Default for WritingStyle {
    fn default() -> Self {
        Self {
            perspective: "First person".to_string(),
            form_of_address: "Informal you".to_string(),
            sentence_dynamics: "Mix of short and longer sentences".to_string(),
            average_word_count: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinguisticFingerprint {
    /// 1 (calm, factual) to 10 (highly emotional)
    pub energy_level: u8,
    /// How CAPITALISED words are used for emphasis
    pub shouting_usage: String,
    pub punctuation_patterns: String,
    pub signature_phrases: Vec<String>,
    /// Narrative devices such as PS lines, dialogues or flashbacks
    pub narrative_anchors: Vec<String>,
}

impl Default for LinguisticFingerprint {
    fn default() -> Self {
        Self {
            energy_level: 7,
            shouting_usage: "Subtle".to_string(),
            punctuation_patterns: "Standard".to_string(),
            signature_phrases: Vec::new(),
            narrative_anchors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneAnalysis {
    pub primary_tone: String,
}

impl Default for ToneAnalysis {
    fn default() -> Self {
        Self {
            primary_tone: "Professional and authentic".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualPatterns {
    pub unicode_formatting: String,
    pub emoji_usage: EmojiUsage,
    pub structure_preferences: String,
}

impl Default for VisualPatterns {
    fn default() -> Self {
        Self {
            unicode_formatting: "Bold for hooks".to_string(),
            emoji_usage: EmojiUsage::default(),
            structure_preferences: "Short paragraphs, mobile friendly".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmojiUsage {
    pub emojis: Vec<String>,
    pub placement: String,
    pub frequency: String,
}

impl Default for EmojiUsage {
    fn default() -> Self {
        Self {
            emojis: vec!["🚀".to_string()],
            placement: "End".to_string(),
            frequency: "Medium".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentStrategy {
    pub cta_style: String,
}

impl Default for ContentStrategy {
    fn default() -> Self {
        Self {
            cta_style: "Interactive question to the community".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudienceInsights {
    pub industry_context: String,
    pub target_audience: String,
    pub pain_points_addressed: Vec<String>,
}

impl Default for AudienceInsights {
    fn default() -> Self {
        Self {
            industry_context: "Business".to_string(),
            target_audience: "Professionals".to_string(),
            pain_points_addressed: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseLibrary {
    pub hook_phrases: Vec<String>,
    pub transition_phrases: Vec<String>,
    pub emotional_expressions: Vec<String>,
    pub cta_phrases: Vec<String>,
    pub filler_expressions: Vec<String>,
}

impl PhraseLibrary {
    pub fn is_empty(&self) -> bool {
        self.hook_phrases.is_empty()
            && self.emotional_expressions.is_empty()
            && self.cta_phrases.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureTemplates {
    pub primary_structure: String,
    pub typical_sentence_starters: Vec<String>,
    pub paragraph_transitions: Vec<String>,
}

impl Default for StructureTemplates {
    fn default() -> Self {
        Self {
            primary_structure: "Hook → Body → CTA".to_string(),
            typical_sentence_starters: Vec::new(),
            paragraph_transitions: Vec::new(),
        }
    }
}
