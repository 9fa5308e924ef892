//! Overlapping-window chunker

use crate::domain::DomainError;
use crate::domain::ingestion::{Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy};

/// Splits text into overlapping byte windows, closed on whitespace so words
/// stay whole.
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    snap_to_words: bool,
}

impl FixedSizeChunker {
    pub fn new() -> Self {
        Self {
            snap_to_words: true,
        }
    }

    pub fn with_word_boundaries(mut self, snap: bool) -> Self {
        self.snap_to_words = snap;
        self
    }

    /// End of the window opening at `start`, preferring to close on whitespace.
    fn window_end(&self, text: &str, start: usize, size: usize) -> usize {
        let limit = (start + size).min(text.len());

        if !self.snap_to_words || limit == text.len() {
            return prev_char_boundary(text, limit);
        }

        let end = match last_space_before(text, limit) {
            // No whitespace in sight; cut at the raw limit.
            None => limit,
            // The window holds a single long word; run to where it ends.
            Some(space) if space <= start => next_space_after(text, limit),
            Some(space) => space,
        };

        prev_char_boundary(text, end)
    }
}

impl Default for FixedSizeChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkingStrategy for FixedSizeChunker {
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError> {
        config.validate()?;

        let text = content.trim();

        if text.is_empty() {
            return Ok(Vec::new());
        }

        if text.len() <= config.size {
            return Ok(vec![Chunk::new(
                text,
                ChunkMetadata::new(0, 1, 0, text.len()),
            )]);
        }

        let stride = config.size - config.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let mut end = self.window_end(text, start, config.size);

            if end <= start {
                // A char wider than the window; take it whole to make progress.
                end = next_char_boundary(text, start + 1);
            }

            let window = text[start..end].trim();

            if !window.is_empty() && window.len() >= config.min_size {
                let index = chunks.len();
                chunks.push(Chunk::new(window, ChunkMetadata::new(index, 0, start, end)));
            }

            if end == text.len() {
                break;
            }

            // Step forward by the stride, but never past the window just
            // emitted, so no text falls between windows.
            let stepped = prev_char_boundary(text, start + stride);
            start = if stepped > start { stepped.min(end) } else { end };
        }

        let total = chunks.len();
        for chunk in &mut chunks {
            chunk.metadata.total = total;
        }

        if chunks.is_empty() {
            // Every window trimmed below the minimum; keep the text whole.
            chunks.push(Chunk::new(text, ChunkMetadata::new(0, 1, 0, text.len())));
        }

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "fixed_size"
    }
}

/// Byte offset just past the last ASCII whitespace in `text[..limit]`.
fn last_space_before(text: &str, limit: usize) -> Option<usize> {
    text.as_bytes()[..limit]
        .iter()
        .rposition(u8::is_ascii_whitespace)
        .map(|pos| pos + 1)
}

/// Byte offset of the first ASCII whitespace at or after `from`, or the text
/// length when the tail holds none.
fn next_space_after(text: &str, from: usize) -> usize {
    text.as_bytes()[from..]
        .iter()
        .position(u8::is_ascii_whitespace)
        .map_or(text.len(), |ahead| from + ahead)
}

/// Largest char boundary at or below `pos`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());

    while !text.is_char_boundary(pos) {
        pos -= 1;
    }

    pos
}

/// Smallest char boundary at or above `pos`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());

    while !text.is_char_boundary(pos) {
        pos += 1;
    }

    pos
}
