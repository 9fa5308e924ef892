//! Document parser trait and types

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Result of parsing a document
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Extracted text content
    pub content: String,
    /// Document title when the format carries one
    pub title: Option<String>,
}

impl ParsedDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Trait for document parsers
#[async_trait]
pub trait DocumentParser: Send + Sync + Debug {
    /// Get supported file extensions (e.g., ["txt", "text"])
    fn supported_extensions(&self) -> &[&str];

    /// Parse raw document text into plain content and a title
    async fn parse(&self, content: &str) -> Result<ParsedDocument, DomainError>;

    /// Check if this parser supports a given filename
    fn supports_file(&self, filename: &str) -> bool {
        let ext = filename
            .rsplit('.')
            .next()
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(&ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct StubParser;

    #[async_trait]
    impl DocumentParser for StubParser {
        fn supported_extensions(&self) -> &[&str] {
            &["md", "markdown"]
        }

        async fn parse(&self, content: &str) -> Result<ParsedDocument, DomainError> {
            Ok(ParsedDocument::new(content))
        }
    }

    #[test]
    fn test_supports_file_by_extension() {
        let parser = StubParser;
        assert!(parser.supports_file("prospectus.md"));
        assert!(parser.supports_file("NOTES.MARKDOWN"));
        assert!(!parser.supports_file("prospectus.pdf"));
    }
}
