//! HTML document parser

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::domain::ingestion::{DocumentParser, ParsedDocument};
use crate::domain::DomainError;

/// Parser for HTML pages
///
/// Extracts visible text from the body and takes the document title from the
/// title element, falling back to the first h1.
#[derive(Debug, Clone, Default)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }

    fn extract_title(document: &Html) -> Option<String> {
        for selector in ["title", "h1"] {
            let Ok(selector) = Selector::parse(selector) else {
                continue;
            };

            let title = document
                .select(&selector)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|title| !title.is_empty());

            if title.is_some() {
                return title;
            }
        }

        None
    }

    fn extract_text(document: &Html) -> String {
        let body = Selector::parse("body")
            .ok()
            .and_then(|selector| document.select(&selector).next());

        let text = match body {
            Some(body) => Self::collect_text(&body),
            None => document.root_element().text().collect::<String>(),
        };

        text.lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn collect_text(element: &ElementRef) -> String {
        let mut text = String::new();

        for node in element.children() {
            if let Some(child) = ElementRef::wrap(node) {
                let tag = child.value().name();

                if matches!(tag, "script" | "style" | "noscript" | "head") {
                    continue;
                }

                if is_block_tag(tag) && !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }

                text.push_str(&Self::collect_text(&child));

                if is_block_tag(tag) && !text.ends_with('\n') {
                    text.push('\n');
                }
            } else if let Some(fragment) = node.value().as_text() {
                text.push_str(fragment);
            }
        }

        text
    }
}

fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "section"
            | "article"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "br"
            | "ul"
            | "ol"
            | "li"
            | "table"
            | "tr"
            | "td"
            | "th"
    )
}

#[async_trait]
impl DocumentParser for HtmlParser {
    fn supported_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    async fn parse(&self, content: &str) -> Result<ParsedDocument, DomainError> {
        let document = Html::parse_document(content);
        let mut parsed = ParsedDocument::new(Self::extract_text(&document));

        if let Some(title) = Self::extract_title(&document) {
            parsed = parsed.with_title(title);
        }

        Ok(parsed)
    }
}
