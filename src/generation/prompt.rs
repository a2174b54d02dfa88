//! Prompt templates for answer generation and ticket classification

use crate::types::{Priority, RetrievedDoc, Sentiment};

/// Prompt builder for backend calls
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build grounding context from retrieved chunks
    ///
    /// Each chunk contributes its title, url, and content so the model can
    /// cite its sources.
    pub fn build_context(docs: &[RetrievedDoc]) -> String {
        docs.iter()
            .map(|doc| {
                format!(
                    "Source: {} ({})\n{}",
                    doc.metadata.title, doc.metadata.url, doc.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Build the grounded answer prompt
    pub fn build_answer_prompt(question: &str, docs: &[RetrievedDoc]) -> String {
        format!(
            r#"Based on the following product documentation, provide a helpful and accurate answer to the user's question.

Context:
{context}

Question: {question}

Instructions:
- Provide a clear, actionable answer based on the documentation
- Include specific steps or examples when relevant
- If the documentation doesn't contain enough information, say so
- Always cite the sources used in your answer

Answer:
"#,
            context = Self::build_context(docs),
            question = question
        )
    }

    /// Build the structured-output classification prompt
    pub fn build_classification_prompt(subject: &str, body: &str, topic_tags: &[String]) -> String {
        format!(
            r#"Analyze the following customer support ticket and classify it according to these categories:

**TOPIC TAGS** (select one or more from): {topics}
- How-to: Questions about using features or functionality
- Product: General product questions, feature requests
- Connector: Issues with data source connections (Snowflake, dbt, etc.)
- Lineage: Data lineage tracking, mapping, visualization
- API/SDK: Programming interfaces, automation, integrations
- SSO: Single Sign-On, authentication issues
- Glossary: Business terms, metadata management
- Best practices: Guidance on optimal usage patterns
- Sensitive data: PII, data privacy, security concerns

**SENTIMENT** (select one): {sentiments}
- Frustrated: User is blocked or facing repeated issues
- Curious: User is exploring or learning
- Angry: User is upset about service/product
- Neutral: Matter-of-fact inquiry

**PRIORITY** (select one): {priorities}
- P0 (High): Urgent, business-critical, blocking workflows
- P1 (Medium): Important but not immediately blocking
- P2 (Low): Nice to have, general inquiries

**Ticket:**
Subject: {subject}
Body: {body}

Respond in JSON format:
{{
  "topic_tags": ["tag1", "tag2"],
  "sentiment": "sentiment_label",
  "priority": "priority_label",
  "reasoning": "Brief explanation of your classification"
}}
"#,
            topics = topic_tags.join(", "),
            sentiments = Sentiment::ALL
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(", "),
            priorities = Priority::ALL
                .iter()
                .map(|p| p.label())
                .collect::<Vec<_>>()
                .join(", "),
            subject = subject,
            body = body
        )
    }
}
