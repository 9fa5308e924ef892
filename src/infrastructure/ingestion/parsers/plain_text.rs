//! Plain text document parser

use async_trait::async_trait;

use crate::domain::ingestion::{DocumentParser, ParsedDocument};
use crate::domain::DomainError;

/// Parser for plain text files
#[derive(Debug, Clone, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentParser for PlainTextParser {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    async fn parse(&self, content: &str) -> Result<ParsedDocument, DomainError> {
        Ok(ParsedDocument::new(content.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_passes_text_through() {
        let parser = PlainTextParser::new();

        let result = parser.parse("Admissions open in August.\n").await.unwrap();

        assert_eq!(result.content, "Admissions open in August.");
        assert!(result.title.is_none());
    }

    #[test]
    fn test_supports_file() {
        let parser = PlainTextParser::new();
        assert!(parser.supports_file("prospectus.txt"));
        assert!(parser.supports_file("NOTES.TXT"));
        assert!(!parser.supports_file("prospectus.md"));
    }
}
