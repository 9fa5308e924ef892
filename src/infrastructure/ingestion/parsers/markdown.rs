//! Markdown document parser

use async_trait::async_trait;
use pulldown_cmark::{Event, Parser, Tag};

use crate::domain::ingestion::{DocumentParser, ParsedDocument};
use crate::domain::DomainError;

/// Parser for Markdown files
///
/// Strips formatting down to plain text; the first level-1 heading becomes
/// the document title.
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser;

impl MarkdownParser {
    pub fn new() -> Self {
        Self
    }

    fn extract(markdown: &str) -> (String, Option<String>) {
        let mut output = TextCollector::default();
        let mut title: Option<String> = None;
        let mut heading: Option<String> = None;
        let mut heading_level = 0;

        for event in Parser::new(markdown) {
            match event {
                Event::Start(Tag::Heading(level, ..)) => {
                    heading = Some(String::new());
                    heading_level = level as u32;
                }
                Event::End(Tag::Heading(..)) => {
                    if let Some(text) = heading.take() {
                        let text = text.trim().to_string();

                        if heading_level == 1 && title.is_none() && !text.is_empty() {
                            title = Some(text.clone());
                        }

                        output.push_line(&text);
                    }
                }
                Event::Text(text) | Event::Code(text) => match heading {
                    Some(ref mut buffer) => buffer.push_str(&text),
                    None => output.push_text(&text),
                },
                Event::SoftBreak | Event::HardBreak => match heading {
                    Some(ref mut buffer) => buffer.push(' '),
                    None => output.push_text(" "),
                },
                Event::Start(Tag::Item) => {
                    output.break_line();
                    output.push_text("- ");
                }
                Event::End(Tag::Paragraph | Tag::Item | Tag::CodeBlock(_)) => output.break_line(),
                _ => {}
            }
        }

        (output.finish(), title)
    }
}

/// Accumulates plain-text lines out of markdown events
#[derive(Debug, Default)]
struct TextCollector {
    text: String,
}

impl TextCollector {
    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn push_line(&mut self, line: &str) {
        self.break_line();
        self.text.push_str(line);
        self.text.push('\n');
    }

    fn break_line(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
    }

    fn finish(self) -> String {
        self.text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl DocumentParser for MarkdownParser {
    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    async fn parse(&self, content: &str) -> Result<ParsedDocument, DomainError> {
        let (text, title) = Self::extract(content);
        let mut document = ParsedDocument::new(text);

        if let Some(title) = title {
            document = document.with_title(title);
        }

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_h1_becomes_title() {
        let parser = MarkdownParser::new();
        let markdown = "# Department Prospectus\n\nWelcome to the department.\n\n# Second Heading\n";

        let result = parser.parse(markdown).await.unwrap();

        assert_eq!(result.title.as_deref(), Some("Department Prospectus"));
        assert!(result.content.contains("Welcome to the department."));
        assert!(result.content.contains("Second Heading"));
    }

    #[tokio::test]
    async fn test_formatting_is_stripped() {
        let parser = MarkdownParser::new();
        let markdown = "## Admissions\n\nThe **fee** is *listed* in `tables`.\n";

        let result = parser.parse(markdown).await.unwrap();

        assert!(result.content.contains("The fee is listed in tables."));
        assert!(!result.content.contains('*'));
        assert!(result.title.is_none());
    }

    #[tokio::test]
    async fn test_list_items_become_lines() {
        let parser = MarkdownParser::new();
        let markdown = "# Courses\n\n- Data Structures\n- Operating Systems\n";

        let result = parser.parse(markdown).await.unwrap();

        assert!(result.content.contains("- Data Structures"));
        assert!(result.content.contains("- Operating Systems"));
    }

    #[tokio::test]
    async fn test_empty_document() {
        let parser = MarkdownParser::new();

        let result = parser.parse("").await.unwrap();

        assert!(result.content.is_empty());
        assert!(result.title.is_none());
    }

    #[test]
    fn test_supports_file() {
        let parser = MarkdownParser::new();
        assert!(parser.supports_file("prospectus.md"));
        assert!(parser.supports_file("README.markdown"));
        assert!(!parser.supports_file("prospectus.txt"));
    }
}
