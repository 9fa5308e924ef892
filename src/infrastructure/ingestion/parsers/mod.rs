//! Parsers for the corpus formats: plain text, Markdown, and HTML

mod html;
mod markdown;
mod plain_text;

pub use html::HtmlParser;
pub use markdown::MarkdownParser;
pub use plain_text::PlainTextParser;
