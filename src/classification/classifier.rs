//! Generative ticket classifier with a deterministic keyword baseline

use std::sync::Arc;

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::providers::GenerativeBackend;
use crate::throttle::RateLimiter;
use crate::types::{Classification, ClassifiedTicket, Priority, Sentiment, Ticket};

use super::keywords;
use super::parse::{recover_classification, RecoveredFields};

/// Classifies support tickets by topic, sentiment, and priority
///
/// Classification always produces a usable result. The generative backend is
/// consulted when configured; whatever fields it fails to deliver are filled
/// from the keyword baseline. Backend errors degrade to the baseline with a
/// warning, never to the caller.
pub struct TicketClassifier {
    backend: Option<Arc<dyn GenerativeBackend>>,
    limiter: Arc<RateLimiter>,
    config: ClassifierConfig,
}

impl TicketClassifier {
    /// Create a new classifier
    pub fn new(
        backend: Option<Arc<dyn GenerativeBackend>>,
        limiter: Arc<RateLimiter>,
        config: ClassifierConfig,
    ) -> Self {
        Self {
            backend,
            limiter,
            config,
        }
    }

    /// Classify a single ticket
    pub async fn classify(&self, ticket: &Ticket) -> Classification {
        let baseline = keywords::classify(ticket);

        let backend = match &self.backend {
            Some(backend) => backend,
            None => return baseline,
        };

        match self.generate(backend.as_ref(), ticket).await {
            Ok(text) => match recover_classification(&text) {
                Some(fields) => merge(fields, baseline),
                None => {
                    tracing::warn!("no classification fields recovered, using keyword baseline");
                    baseline
                }
            },
            Err(e) => {
                tracing::warn!("classification backend failed, using keyword baseline: {e}");
                baseline
            }
        }
    }

    /// Classify a batch of tickets sequentially
    ///
    /// Each result carries its ticket so callers can correlate without
    /// positional bookkeeping. Per-ticket backend failures fall back
    /// individually; the batch never aborts.
    pub async fn classify_bulk(&self, tickets: &[Ticket]) -> Vec<ClassifiedTicket> {
        let mut classified = Vec::with_capacity(tickets.len());
        for (i, ticket) in tickets.iter().enumerate() {
            tracing::debug!("classifying ticket {}/{}", i + 1, tickets.len());
            classified.push(ClassifiedTicket {
                ticket: ticket.clone(),
                classification: self.classify(ticket).await,
            });
        }
        classified
    }

    async fn generate(&self, backend: &dyn GenerativeBackend, ticket: &Ticket) -> Result<String> {
        let prompt = PromptBuilder::build_classification_prompt(
            &ticket.subject,
            &ticket.body,
            &self.config.topic_tags,
        );

        self.limiter.throttle().await;
        backend.complete(&prompt, self.config.max_tokens, 0.1).await
    }
}

/// Overlay recovered fields on the keyword baseline
///
/// A recovered field wins only when it is present and parseable; everything
/// else keeps its baseline value.
fn merge(fields: RecoveredFields, baseline: Classification) -> Classification {
    let topic_tags = if fields.topic_tags.is_empty() {
        baseline.topic_tags
    } else {
        fields.topic_tags
    };

    let sentiment = fields
        .sentiment
        .as_deref()
        .and_then(Sentiment::parse)
        .unwrap_or(baseline.sentiment);

    let priority = fields
        .priority
        .as_deref()
        .and_then(Priority::parse)
        .unwrap_or(baseline.priority);

    let reasoning = fields
        .reasoning
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(baseline.reasoning);

    Classification {
        topic_tags,
        sentiment,
        priority,
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::time::Duration;

    use crate::error::Error;
    use crate::classification::keywords::KEYWORD_REASONING;

    struct CannedBackend(String);

    #[async_trait]
    impl GenerativeBackend for CannedBackend {
        async fn complete(
            &self,
            _prompt: &str,
            _max_tokens: u32,
            _temperature: f32,
        ) -> Result<String> {
            Ok(self.0.clone())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "canned"
        }

        fn model(&self) -> &str {
            "canned-1"
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl GenerativeBackend for FailingBackend {
        async fn complete(
            &self,
            _prompt: &str,
            _max_tokens: u32,
            _temperature: f32,
        ) -> Result<String> {
            Err(Error::backend("connection refused"))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(false)
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn model(&self) -> &str {
            "failing-1"
        }
    }

    fn classifier(backend: Option<Arc<dyn GenerativeBackend>>) -> TicketClassifier {
        TicketClassifier::new(
            backend,
            Arc::new(RateLimiter::new(Duration::ZERO)),
            ClassifierConfig::default(),
        )
    }

    #[tokio::test]
    async fn clean_backend_output_wins_over_baseline() {
        let response = r#"{"topic_tags": ["Lineage"], "sentiment": "Curious", "priority": "P1 (Medium)", "reasoning": "Learning about lineage"}"#;
        let classifier = classifier(Some(Arc::new(CannedBackend(response.to_string()))));

        let ticket = Ticket::new("Question", "General question about the product.");
        let classification = classifier.classify(&ticket).await;

        assert_eq!(classification.topic_tags, vec!["Lineage"]);
        assert_eq!(classification.sentiment, Sentiment::Curious);
        assert_eq!(classification.priority, Priority::P1);
        assert_eq!(classification.reasoning, "Learning about lineage");
    }

    #[tokio::test]
    async fn partial_recovery_keeps_baseline_for_missing_fields() {
        // Only sentiment survives extraction; topics and priority come from
        // the keyword baseline.
        let response = r#"The sentiment here is clear. "sentiment": "Angry""#;
        let classifier = classifier(Some(Arc::new(CannedBackend(response.to_string()))));

        let ticket = Ticket::new("Snowflake connector down", "This is urgent, we are blocked.");
        let classification = classifier.classify(&ticket).await;

        assert_eq!(classification.sentiment, Sentiment::Angry);
        assert!(classification.topic_tags.contains(&"Connector".to_string()));
        assert_eq!(classification.priority, Priority::P0);
        assert_eq!(classification.reasoning, KEYWORD_REASONING);
    }

    #[tokio::test]
    async fn unparseable_labels_keep_baseline_values() {
        let response = r#"{"topic_tags": ["Connector"], "sentiment": "ecstatic", "priority": "someday"}"#;
        let classifier = classifier(Some(Arc::new(CannedBackend(response.to_string()))));

        let ticket = Ticket::new("Connector question", "How does the connector work?");
        let classification = classifier.classify(&ticket).await;

        assert_eq!(classification.topic_tags, vec!["Connector"]);
        assert_eq!(classification.sentiment, Sentiment::Neutral);
        assert_eq!(classification.priority, Priority::P2);
    }

    #[tokio::test]
    async fn backend_failure_degrades_to_keyword_baseline() {
        let classifier = classifier(Some(Arc::new(FailingBackend)));

        let ticket = Ticket::new("SSO broken", "SAML login fails, urgent.");
        let classification = classifier.classify(&ticket).await;

        assert!(classification.topic_tags.contains(&"SSO".to_string()));
        assert_eq!(classification.priority, Priority::P0);
        assert_eq!(classification.reasoning, KEYWORD_REASONING);
    }

    #[tokio::test]
    async fn no_backend_means_pure_keyword_classification() {
        let classifier = classifier(None);

        let ticket = Ticket::new("Pricing", "What does a seat cost?");
        let classification = classifier.classify(&ticket).await;

        assert_eq!(classification.topic_tags, vec!["Product"]);
        assert_eq!(classification.reasoning, KEYWORD_REASONING);
    }

    #[tokio::test]
    async fn bulk_carries_each_ticket_with_its_classification() {
        let classifier = classifier(None);

        let tickets = vec![
            Ticket::new("Snowflake down", "urgent, blocked"),
            Ticket::new("Learning lineage", "trying to understand the flow"),
        ];
        let classified = classifier.classify_bulk(&tickets).await;

        assert_eq!(classified.len(), 2);
        assert_eq!(classified[0].ticket.subject, "Snowflake down");
        assert_eq!(classified[0].classification.priority, Priority::P0);
        assert_eq!(classified[1].classification.sentiment, Sentiment::Curious);
    }
}
