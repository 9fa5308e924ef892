use serde::{Deserialize, Serialize};

/// Provenance of a retrieved passage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassageMetadata {
    /// Source identifier, usually a file name or URL
    pub source: String,
    /// Document title when the parser found one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page marker for paged sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// A passage of corpus text with its provenance
///
/// Content is carried in full; display truncation is an API concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub content: String,
    pub metadata: PassageMetadata,
}

impl Passage {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: PassageMetadata {
                source: source.into(),
                title: None,
                page: None,
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.metadata.page = Some(page);
        self
    }

    /// Title when present, source otherwise
    pub fn display_name(&self) -> &str {
        self.metadata
            .title
            .as_deref()
            .unwrap_or(&self.metadata.source)
    }
}
