//! Document ingestion infrastructure
//!
//! Parsing, chunking, and loading of the corpus into passages.

pub mod chunkers;
mod loader;
pub mod parsers;

pub use chunkers::FixedSizeChunker;
pub use loader::DocumentLoader;
pub use parsers::{HtmlParser, MarkdownParser, PlainTextParser};
