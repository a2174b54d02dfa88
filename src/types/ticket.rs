//! Ticket and classification types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A customer support ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// External ticket identifier, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Ticket subject line
    pub subject: String,
    /// Ticket body text
    pub body: String,
}

impl Ticket {
    /// Create a ticket without an external id
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Ticket sentiment labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    /// User is blocked or facing repeated issues
    Frustrated,
    /// User is exploring or learning
    Curious,
    /// User is upset about service or product
    Angry,
    /// Matter-of-fact inquiry
    Neutral,
}

impl Sentiment {
    /// All sentiment labels, in catalog order
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Frustrated,
        Sentiment::Curious,
        Sentiment::Angry,
        Sentiment::Neutral,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Frustrated => "Frustrated",
            Self::Curious => "Curious",
            Self::Angry => "Angry",
            Self::Neutral => "Neutral",
        }
    }

    /// Parse a label, tolerating case differences
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.label().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ticket priority labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Urgent, business-critical, blocking workflows
    #[serde(rename = "P0 (High)")]
    P0,
    /// Important but not immediately blocking
    #[serde(rename = "P1 (Medium)")]
    P1,
    /// Nice to have, general inquiries
    #[serde(rename = "P2 (Low)")]
    P2,
}

impl Priority {
    /// All priority labels, in catalog order
    pub const ALL: [Priority; 3] = [Priority::P0, Priority::P1, Priority::P2];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::P0 => "P0 (High)",
            Self::P1 => "P1 (Medium)",
            Self::P2 => "P2 (Low)",
        }
    }

    /// Parse a label, tolerating the bare tag ("P0") or the urgency word ("high")
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        if s.starts_with("p0") || s == "high" {
            Some(Self::P0)
        } else if s.starts_with("p1") || s == "medium" {
            Some(Self::P1)
        } else if s.starts_with("p2") || s == "low" {
            Some(Self::P2)
        } else {
            None
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification result for a single ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// One or more topic tags from the configured catalog
    pub topic_tags: Vec<String>,
    /// Detected sentiment
    pub sentiment: Sentiment,
    /// Assigned priority
    pub priority: Priority,
    /// Brief explanation of the classification
    pub reasoning: String,
}

/// A ticket together with its classification (bulk API result)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedTicket {
    #[serde(flatten)]
    pub ticket: Ticket,
    #[serde(flatten)]
    pub classification: Classification,
}
