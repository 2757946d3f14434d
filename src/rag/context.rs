//! Context assembly from retrieved chunks

use crate::models::ScoredChunk;
use crate::models::Source;

/// Characters of a selected passage echoed back as its source preview
pub const SELECTED_TEXT_PREVIEW_CHARS: usize = 200;

/// Assembler for creating context from search results
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    separator: String,
}

impl ContextAssembler {
    #[must_use]
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Join the content of every hit, in rank order
    #[must_use]
    pub fn assemble(&self, results: &[ScoredChunk]) -> String {
        results
            .iter()
            .map(|hit| hit.payload.content.as_str())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }

    /// Pseudo-source standing in for a reader-selected passage
    #[must_use]
    pub fn selected_text_source(&self, passage: &str) -> Source {
        Source {
            document_id: None,
            title: "User Selected Text".to_string(),
            module: "N/A".to_string(),
            chapter: "N/A".to_string(),
            content: truncate_chars(passage, SELECTED_TEXT_PREVIEW_CHARS),
            chunk_id: None,
            chunk_index: None,
            similarity_score: 1.0,
        }
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new("\n")
    }
}

/// First `max_chars` characters plus `...` when the text is longer
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
