//! Chat endpoint request and response types

use serde::{Deserialize, Serialize};

use crate::domain::Passage;

/// Characters of passage content included in a citation snippet
const SNIPPET_CHARS: usize = 200;

/// Request body for POST /chat
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// A source reference backing an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    pub page_content: String,
}

impl Citation {
    /// Build a citation from a retrieved passage
    ///
    /// The snippet is always suffixed with an ellipsis marker, matching
    /// slice-style truncation.
    pub fn from_passage(passage: &Passage) -> Self {
        let source = if passage.metadata.source.is_empty() {
            "Unknown Source".to_string()
        } else {
            passage.metadata.source.clone()
        };

        let source = match passage.metadata.page {
            Some(page) => format!("{} (Page {})", source, page),
            None => source,
        };

        let snippet: String = passage.content.chars().take(SNIPPET_CHARS).collect();

        Self {
            source,
            page_content: format!("{}...", snippet),
        }
    }
}

/// Response body for POST /chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub citations: Vec<Citation>,
}
