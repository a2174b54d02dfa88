//! Sentence-aligned text chunking

use regex::Regex;

use crate::types::{Chunk, Document};

/// Text chunker with a configurable character budget
///
/// Splits a document on sentence-terminating punctuation and packs whole
/// sentences into chunks of at most `chunk_size` characters. A sentence is
/// atomic: one longer than the budget becomes its own oversized chunk rather
/// than being split mid-sentence.
pub struct SentenceChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Configured overlap, currently inert (chunks do not overlap)
    #[allow(dead_code)]
    chunk_overlap: usize,
    /// Sentence boundary pattern: one or more terminating punctuation marks
    boundary: Regex,
}

impl SentenceChunker {
    /// Create a new chunker
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            boundary: Regex::new(r"[.!?]+").expect("valid sentence boundary pattern"),
        }
    }

    /// Split a document into ordered chunks
    ///
    /// Pure function of the document and the configured chunk size: calling it
    /// again yields the same sequence. Each chunk inherits the document's
    /// `url`, `title`, and `source` verbatim.
    pub fn chunk(&self, doc: &Document) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_chars = 0;

        for sentence in self.split_sentences(&doc.content) {
            // The budget is measured in characters, not bytes.
            let sentence_chars = sentence.chars().count();
            let joined_chars = if current.is_empty() {
                sentence_chars
            } else {
                current_chars + 1 + sentence_chars
            };

            if joined_chars > self.chunk_size && !current.is_empty() {
                chunks.push(self.make_chunk(doc, std::mem::take(&mut current)));
                current_chars = 0;
            }

            if current.is_empty() {
                current.push_str(sentence);
                current_chars = sentence_chars;
            } else {
                current.push(' ');
                current.push_str(sentence);
                current_chars += 1 + sentence_chars;
            }
        }

        if !current.is_empty() {
            chunks.push(self.make_chunk(doc, current));
        }

        chunks
    }

    /// Split text into trimmed sentences, keeping terminating punctuation
    /// attached and discarding empty or punctuation-only fragments
    fn split_sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut sentences = Vec::new();
        let mut last = 0;

        for m in self.boundary.find_iter(text) {
            let sentence = text[last..m.end()].trim();
            if !Self::is_blank(sentence) {
                sentences.push(sentence);
            }
            last = m.end();
        }

        let tail = text[last..].trim();
        if !Self::is_blank(tail) {
            sentences.push(tail);
        }

        sentences
    }

    /// A fragment with no content beyond terminating punctuation
    fn is_blank(fragment: &str) -> bool {
        fragment.chars().all(|c| matches!(c, '.' | '!' | '?'))
    }

    fn make_chunk(&self, doc: &Document, content: String) -> Chunk {
        Chunk {
            url: doc.url.clone(),
            title: doc.title.clone(),
            content,
            source: doc.source.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> Document {
        Document::new("https://docs.example.com", "Test Doc", content, "docs")
    }

    #[test]
    fn short_document_yields_single_chunk_verbatim() {
        let chunker = SentenceChunker::new(1000, 200);
        let text = "Snowflake connectors require USAGE grants. SELECT grants are also required.";
        let chunks = chunker.chunk(&doc(text));

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, text);
        assert_eq!(chunks[0].url, "https://docs.example.com");
        assert_eq!(chunks[0].title, "Test Doc");
        assert_eq!(chunks[0].source, "docs");
    }

    #[test]
    fn chunks_respect_size_bound() {
        let chunker = SentenceChunker::new(40, 0);
        let text = "First sentence here. Second sentence here. Third sentence here. Fourth one.";
        let chunks = chunker.chunk(&doc(text));

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(
                chunk.content.len() <= 40,
                "chunk exceeds bound: {:?}",
                chunk.content
            );
        }
    }

    #[test]
    fn oversized_sentence_becomes_its_own_chunk() {
        let chunker = SentenceChunker::new(20, 0);
        let long = "This single sentence is much longer than the configured budget.";
        let text = format!("Short one. {} Tail.", long);
        let chunks = chunker.chunk(&doc(&text));

        assert!(chunks.iter().any(|c| c.content == long));
    }

    #[test]
    fn chunks_cover_all_sentences_in_order() {
        let chunker = SentenceChunker::new(30, 0);
        let text = "Alpha is first. Beta follows! Gamma next? Delta ends.";
        let chunks = chunker.chunk(&doc(text));

        let reassembled = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(reassembled, text);
    }

    #[test]
    fn budget_counts_characters_not_bytes() {
        // 23 characters joined, 27 bytes: a byte-measured budget would split.
        let chunker = SentenceChunker::new(25, 0);
        let chunks = chunker.chunk(&doc("Çédille tests héré. Ok."));

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Çédille tests héré. Ok.");
    }

    #[test]
    fn empty_and_whitespace_fragments_are_discarded() {
        let chunker = SentenceChunker::new(1000, 0);
        let chunks = chunker.chunk(&doc("One... Two!!  ?  Three."));

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "One... Two!! Three.");
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        let chunker = SentenceChunker::new(1000, 0);
        assert!(chunker.chunk(&doc("")).is_empty());
        assert!(chunker.chunk(&doc("   ")).is_empty());
    }
}
