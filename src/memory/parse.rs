//! Model response → [`UserMemory`] parsing.
//!
//! [`parse_memory_response`] never fails. Output that is not the expected JSON
//! shape comes back as [`ParsedMemory::Degraded`] carrying the
//! [`UserMemory::unavailable`] sentinel and the reason it was rejected.

use serde_json::Value;

use super::types::UserMemory;

/// Top-level keys that must hold JSON objects when present.
const SECTION_KEYS: [&str; 3] = ["preferences", "emotional_patterns", "facts"];

/// Outcome of parsing a model response.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedMemory {
    /// The response was valid and mapped field-by-field.
    Complete(UserMemory),
    /// The response was unusable; `memory` is the empty sentinel profile.
    Degraded { memory: UserMemory, reason: String },
}

impl ParsedMemory {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn memory(&self) -> &UserMemory {
        match self {
            Self::Complete(memory) | Self::Degraded { memory, .. } => memory,
        }
    }

    pub fn into_memory(self) -> UserMemory {
        match self {
            Self::Complete(memory) | Self::Degraded { memory, .. } => memory,
        }
    }
}

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        // Drop the language tag, if any.
        body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Parse raw model text into a profile, degrading instead of failing.
pub fn parse_memory_response(raw: &str) -> ParsedMemory {
    match try_parse(raw) {
        Ok(memory) => ParsedMemory::Complete(memory),
        Err(reason) => {
            tracing::warn!(
                operation = "extract_memory",
                reason = %reason,
                response_len = raw.len(),
                "could not parse memory response, returning empty profile"
            );
            ParsedMemory::Degraded {
                memory: UserMemory::unavailable(),
                reason,
            }
        }
    }
}

fn try_parse(raw: &str) -> Result<UserMemory, String> {
    let body = strip_code_fence(raw);
    let value: Value = serde_json::from_str(body).map_err(|e| format!("invalid JSON: {e}"))?;

    let Value::Object(ref map) = value else {
        return Err("expected a JSON object at the top level".into());
    };
    for key in SECTION_KEYS {
        if let Some(section) = map.get(key) {
            if !section.is_object() {
                return Err(format!("`{key}` must be an object"));
            }
        }
    }

    serde_json::from_value(value).map_err(|e| format!("unexpected shape: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "preferences": {"likes": ["hiking"], "dislikes": ["crowded places"]},
        "emotional_patterns": {"dominant_emotions": ["calm"]},
        "facts": {"goals": ["climb Rainier"]},
        "summary": "An outdoorsy person."
    }"#;

    #[test]
    fn plain_json_is_parsed() {
        let parsed = parse_memory_response(SAMPLE);
        assert!(!parsed.is_degraded());
        let memory = parsed.memory();
        assert_eq!(memory.preferences.likes, vec!["hiking"]);
        assert_eq!(memory.preferences.dislikes, vec!["crowded places"]);
        assert!(memory.preferences.habits.is_empty());
        assert_eq!(memory.emotional_patterns.communication_style, "neutral");
        assert_eq!(memory.facts.goals, vec!["climb Rainier"]);
        assert_eq!(memory.summary, "An outdoorsy person.");
    }

    #[test]
    fn fenced_json_matches_unfenced() {
        let plain = parse_memory_response(SAMPLE);
        let tagged = parse_memory_response(&format!("```json\n{SAMPLE}\n```"));
        let untagged = parse_memory_response(&format!("  ```\n{SAMPLE}\n```  \n"));
        assert_eq!(tagged, plain);
        assert_eq!(untagged, plain);
    }

    #[test]
    fn invalid_json_degrades_to_sentinel() {
        let parsed = parse_memory_response("{ this is not json");
        assert!(parsed.is_degraded());
        assert!(parsed.into_memory().is_unavailable());
    }

    #[test]
    fn empty_text_degrades() {
        assert!(parse_memory_response("").is_degraded());
        assert!(parse_memory_response("```json\n```").is_degraded());
    }

    #[test]
    fn wrong_shapes_degrade() {
        assert!(parse_memory_response("[]").is_degraded());
        assert!(parse_memory_response(r#"{"preferences": ["a"]}"#).is_degraded());
        assert!(parse_memory_response(r#"{"preferences": {"likes": "hiking"}}"#).is_degraded());
        assert!(parse_memory_response(r#"{"summary": null}"#).is_degraded());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let parsed = parse_memory_response(
            r#"{"preferences": {"likes": ["tea"], "colour": "blue"}, "mood": "ok"}"#,
        );
        assert!(!parsed.is_degraded());
        assert_eq!(parsed.memory().preferences.likes, vec!["tea"]);
        assert_eq!(parsed.memory().summary, "");
    }

    #[test]
    fn strip_code_fence_handles_variants() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```{}```"), "{}");
        assert_eq!(strip_code_fence("{}"), "{}");
        assert_eq!(strip_code_fence("{}\n```"), "{}");
    }
}
