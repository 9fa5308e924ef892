//! Loads the corpus from disk or, failing that, from fallback URLs

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ingestion::{ChunkingConfig, ChunkingStrategy, DocumentParser, ParsedDocument};
use crate::domain::{DomainError, Passage};
use crate::infrastructure::llm::HttpClientTrait;

use super::chunkers::FixedSizeChunker;
use super::parsers::{HtmlParser, MarkdownParser, PlainTextParser};

/// Loads documents and chunks them into retrievable passages
///
/// A data directory with supported files wins; otherwise the fallback URLs
/// are fetched and parsed as HTML. Sources that fail to load are skipped.
#[derive(Debug)]
pub struct DocumentLoader<C: HttpClientTrait> {
    client: C,
    parsers: Vec<Arc<dyn DocumentParser>>,
    chunker: Arc<dyn ChunkingStrategy>,
    chunking: ChunkingConfig,
}

impl<C: HttpClientTrait> DocumentLoader<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            parsers: vec![
                Arc::new(PlainTextParser::new()),
                Arc::new(MarkdownParser::new()),
                Arc::new(HtmlParser::new()),
            ],
            chunker: Arc::new(FixedSizeChunker::new()),
            chunking: ChunkingConfig::default(),
        }
    }

    pub fn with_chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.chunking = chunking;
        self
    }

    /// Load passages from the data directory, or the fallback URLs when the
    /// directory is missing or holds nothing parseable
    pub async fn load(
        &self,
        data_dir: &Path,
        fallback_urls: &[String],
    ) -> Result<Vec<Passage>, DomainError> {
        let mut passages = self.load_directory(data_dir).await?;

        if passages.is_empty() {
            info!(
                data_dir = %data_dir.display(),
                "No local documents found, fetching fallback URLs"
            );
            passages = self.load_urls(fallback_urls).await;
        }

        if passages.is_empty() {
            return Err(DomainError::ingestion(
                "No documents could be loaded from the data directory or fallback URLs",
            ));
        }

        info!(passages = passages.len(), "Corpus loaded");

        Ok(passages)
    }

    async fn load_directory(&self, dir: &Path) -> Result<Vec<Passage>, DomainError> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut reader = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| DomainError::ingestion(format!("Failed to read {}: {}", dir.display(), e)))?;

        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| DomainError::ingestion(format!("Failed to read {}: {}", dir.display(), e)))?
        {
            entries.push(entry.path());
        }

        // Deterministic ingestion order regardless of directory listing order.
        entries.sort();

        let mut passages = Vec::new();

        for path in entries {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };

            let Some(parser) = self.parser_for(&name) else {
                debug!(file = %name, "Skipping unsupported file");
                continue;
            };

            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(file = %name, error = %e, "Failed to read file, skipping");
                    continue;
                }
            };

            let parsed = parser.parse(&content).await?;
            self.push_passages(&mut passages, parsed, &name)?;
        }

        Ok(passages)
    }

    async fn load_urls(&self, urls: &[String]) -> Vec<Passage> {
        let parser = HtmlParser::new();
        let mut passages = Vec::new();

        for url in urls {
            let body = match self.client.get_text(url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(url = %url, error = %e, "Failed to fetch URL, skipping");
                    continue;
                }
            };

            match parser.parse(&body).await {
                Ok(parsed) => {
                    if let Err(e) = self.push_passages(&mut passages, parsed, url) {
                        warn!(url = %url, error = %e, "Failed to chunk page, skipping");
                    }
                }
                Err(e) => warn!(url = %url, error = %e, "Failed to parse page, skipping"),
            }
        }

        passages
    }

    fn parser_for(&self, filename: &str) -> Option<&Arc<dyn DocumentParser>> {
        self.parsers
            .iter()
            .find(|parser| parser.supports_file(filename))
    }

    fn push_passages(
        &self,
        passages: &mut Vec<Passage>,
        parsed: ParsedDocument,
        source: &str,
    ) -> Result<(), DomainError> {
        let chunks = self.chunker.chunk(&parsed.content, &self.chunking)?;

        debug!(
            source = %source,
            chunker = self.chunker.name(),
            chunks = chunks.len(),
            "Document chunked"
        );

        for chunk in chunks {
            let mut passage = Passage::new(chunk.content, source);

            if let Some(ref title) = parsed.title {
                passage = passage.with_title(title.clone());
            }

            passages.push(passage);
        }

        Ok(())
    }
}
