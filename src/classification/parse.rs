//! Layered recovery of classification fields from model output
//!
//! Backends wrap JSON in prose, code fences, or half-valid syntax often
//! enough that a strict parse alone loses usable classifications. Recovery
//! runs an ordered chain of strategies, each with a defined success
//! predicate: strict JSON parse, then extraction of the first `{...}` block,
//! then per-field regex extraction.

use regex::Regex;
use serde::Deserialize;

/// Fields recovered from a model response, possibly partial
#[derive(Debug, Default, Deserialize)]
pub struct RecoveredFields {
    #[serde(default)]
    pub topic_tags: Vec<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl RecoveredFields {
    /// True when no field was recovered
    fn is_empty(&self) -> bool {
        self.topic_tags.is_empty()
            && self.sentiment.is_none()
            && self.priority.is_none()
            && self.reasoning.is_none()
    }
}

/// Run the recovery chain; `None` means even best-effort extraction found
/// nothing usable
pub fn recover_classification(text: &str) -> Option<RecoveredFields> {
    parse_strict(text)
        .or_else(|| parse_embedded_object(text))
        .or_else(|| parse_fields(text))
        .filter(|fields| !fields.is_empty())
}

/// Strategy 1: the whole response is valid JSON
fn parse_strict(text: &str) -> Option<RecoveredFields> {
    serde_json::from_str(text.trim()).ok()
}

/// Strategy 2: the response contains a JSON object amid stray prose
fn parse_embedded_object(text: &str) -> Option<RecoveredFields> {
    let pattern = Regex::new(r"(?s)\{.*\}").expect("valid object pattern");
    let object = pattern.find(text)?;
    serde_json::from_str(object.as_str()).ok()
}

/// Strategy 3: best-effort field-by-field extraction
fn parse_fields(text: &str) -> Option<RecoveredFields> {
    let mut fields = RecoveredFields::default();

    let tags_pattern =
        Regex::new(r#"(?s)"topic_tags"\s*:\s*\[(.*?)\]"#).expect("valid tags pattern");
    if let Some(cap) = tags_pattern.captures(text) {
        let item_pattern = Regex::new(r#""([^"]*)""#).expect("valid item pattern");
        fields.topic_tags = item_pattern
            .captures_iter(&cap[1])
            .map(|c| c[1].to_string())
            .collect();
    }

    fields.sentiment = extract_string_field(text, "sentiment");
    fields.priority = extract_string_field(text, "priority");
    fields.reasoning = extract_string_field(text, "reasoning");

    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}

fn extract_string_field(text: &str, field: &str) -> Option<String> {
    let pattern =
        Regex::new(&format!(r#""{field}"\s*:\s*"([^"]*)""#)).expect("valid field pattern");
    pattern.captures(text).map(|cap| cap[1].to_string())
}
