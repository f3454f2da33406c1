// Helpers for structured (JSON object) completions
//
// Services asked for JSON sometimes wrap it in markdown fences or add a
// sentence before it. These helpers recover the object text; validation of
// the fields is left to the typed parsers in critic/ and writer/selector.

/// Strip leading/trailing markdown code fences (```json ... ``` or ``` ... ```)
pub fn strip_markdown_fences(s: &str) -> &str {
    let s = s.trim();
    let s = if let Some(rest) = s.strip_prefix("```json") {
        rest
    } else if let Some(rest) = s.strip_prefix("```") {
        rest
    } else {
        s
    };
    if let Some(rest) = s.strip_suffix("```") {
        rest.trim()
    } else {
        s.trim()
    }
}

/// Return the outermost `{ ... }` slice of a structured completion, if any.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let stripped = strip_markdown_fences(text);
    let start = stripped.find('{')?;
    let end = stripped.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&stripped[start..=end])
}

/// Parse a structured completion into `T`.
pub fn parse_json_object<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, String> {
    let slice = extract_json_object(text).ok_or_else(|| "no JSON object in response".to_string())?;
    serde_json::from_str(slice).map_err(|e| e.to_string())
}
