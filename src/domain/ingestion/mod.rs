//! Document ingestion domain types and traits
//!
//! This module provides:
//! - `DocumentParser` trait for parsing document formats
//! - `ChunkingStrategy` trait for splitting documents into chunks

pub mod chunker;
pub mod parser;

pub use chunker::{Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy};
pub use parser::{DocumentParser, ParsedDocument};
