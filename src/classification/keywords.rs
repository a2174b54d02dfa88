//! Keyword-based classification baseline
//!
//! Deterministic last resort when no backend is configured or no fields
//! could be recovered from its output. Also serves as the baseline that
//! partially recovered fields are merged over.

use crate::types::{Classification, Priority, Sentiment, Ticket};

/// Reasoning string attached to keyword-only classifications
pub const KEYWORD_REASONING: &str = "Fallback classification using keyword matching";

const TOPIC_RULES: &[(&str, &[&str])] = &[
    (
        "Connector",
        &["snowflake", "connection", "connector", "database", "source", "redshift", "bigquery"],
    ),
    ("Lineage", &["lineage", "upstream", "downstream", "flow", "dependency", "dag"]),
    ("API/SDK", &["api", "sdk", "programmatic", "endpoint", "curl", "python", "rest"]),
    ("SSO", &["sso", "saml", "okta", "authentication", "login", "auth"]),
    ("Glossary", &["glossary", "term", "business", "metadata", "definition"]),
    ("How-to", &["how to", "tutorial", "guide", "help", "instructions"]),
    (
        "Sensitive data",
        &["pii", "sensitive", "privacy", "security", "compliance", "audit"],
    ),
    ("Best practices", &["best practice", "recommendation", "advice", "guidance"]),
];

const FRUSTRATED_CUES: &[&str] = &["urgent", "critical", "blocked", "asap", "emergency"];
const ANGRY_CUES: &[&str] = &["angry", "infuriating", "upset", "terrible"];
const CURIOUS_CUES: &[&str] = &["new", "trying", "understand", "learn", "explore"];

const P0_CUES: &[&str] = &["urgent", "critical", "asap", "emergency", "blocked"];
const P1_CUES: &[&str] = &["important", "needed", "soon", "deadline"];

/// Classify a ticket from keyword cues alone
pub fn classify(ticket: &Ticket) -> Classification {
    let text = format!("{} {}", ticket.subject, ticket.body).to_lowercase();

    let mut topic_tags: Vec<String> = TOPIC_RULES
        .iter()
        .filter(|(_, cues)| contains_any(&text, cues))
        .map(|(topic, _)| topic.to_string())
        .collect();
    if topic_tags.is_empty() {
        topic_tags.push("Product".to_string());
    }

    let sentiment = if contains_any(&text, FRUSTRATED_CUES) {
        Sentiment::Frustrated
    } else if contains_any(&text, ANGRY_CUES) {
        Sentiment::Angry
    } else if contains_any(&text, CURIOUS_CUES) {
        Sentiment::Curious
    } else {
        Sentiment::Neutral
    };

    let priority = if contains_any(&text, P0_CUES) {
        Priority::P0
    } else if contains_any(&text, P1_CUES) {
        Priority::P1
    } else {
        Priority::P2
    };

    Classification {
        topic_tags,
        sentiment,
        priority,
        reasoning: KEYWORD_REASONING.to_string(),
    }
}

fn contains_any(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text.contains(cue))
}
