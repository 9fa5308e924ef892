//! Chunk types and the splitting-strategy seam

use std::fmt::Debug;

use crate::domain::DomainError;

/// Default window size in bytes, matching the shipped retrieval config.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
/// Default overlap carried between consecutive windows.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

const DEFAULT_MIN_SIZE: usize = 50;

/// Window geometry for a chunking pass, in bytes of UTF-8 text.
#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    /// Target window size
    pub size: usize,
    /// Bytes shared between consecutive windows
    pub overlap: usize,
    /// Windows that trim below this are dropped
    pub min_size: usize,
}

impl ChunkingConfig {
    pub fn new(size: usize, overlap: usize) -> Self {
        Self {
            size,
            overlap,
            min_size: DEFAULT_MIN_SIZE,
        }
    }

    pub fn with_min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    /// A window must be non-empty, outgrow its overlap, and fit its minimum.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.size == 0 {
            return Err(DomainError::validation("chunk size must be non-zero"));
        }

        if self.overlap >= self.size {
            return Err(DomainError::validation(
                "chunk overlap must be smaller than the chunk size",
            ));
        }

        if self.min_size > self.size {
            return Err(DomainError::validation(
                "minimum chunk size cannot exceed the chunk size",
            ));
        }

        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

/// Where a chunk sits within its source document.
#[derive(Debug, Clone, Copy)]
pub struct ChunkMetadata {
    /// 0-based position in the emitted sequence
    pub index: usize,
    /// Number of chunks emitted for the document
    pub total: usize,
    /// Byte offset of the window start in the source text
    pub start: usize,
    /// Byte offset one past the window end
    pub end: usize,
}

impl ChunkMetadata {
    pub fn new(index: usize, total: usize, start: usize, end: usize) -> Self {
        Self {
            index,
            total,
            start,
            end,
        }
    }
}

/// A retrievable slice of a parsed document.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub content: String,
    pub metadata: ChunkMetadata,
}

impl Chunk {
    pub fn new(content: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}

/// Splits parsed document text into retrievable chunks.
pub trait ChunkingStrategy: Send + Sync + Debug {
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError>;

    fn name(&self) -> &'static str;
}
