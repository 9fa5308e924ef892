use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::tool::{AgentTool, parse_query_argument, query_parameters_schema};
use crate::domain::DomainError;
use crate::domain::encyclopedia::Encyclopedia;
use crate::domain::retrieval::DocumentStore;

/// Most passages the retriever tool will format into one observation
const MAX_FORMATTED_PASSAGES: usize = 8;

/// Articles requested per general-knowledge lookup
const ARTICLE_LIMIT: usize = 3;

/// Corpus search tool backed by the document store
#[derive(Debug)]
pub struct RetrieverTool {
    store: Arc<dyn DocumentStore>,
}

impl RetrieverTool {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AgentTool for RetrieverTool {
    fn name(&self) -> &'static str {
        "retriever"
    }

    fn description(&self) -> &'static str {
        "Fetch passages from indexed corpus."
    }

    fn parameters(&self) -> Value {
        query_parameters_schema()
    }

    async fn call(&self, arguments: &str) -> Result<String, DomainError> {
        let query = parse_query_argument(arguments)?;
        let passages = self.store.retrieve(&query).await?;

        if passages.is_empty() {
            return Ok("No documents found.".to_string());
        }

        let blocks: Vec<String> = passages
            .iter()
            .take(MAX_FORMATTED_PASSAGES)
            .enumerate()
            .map(|(idx, passage)| {
                let number = idx + 1;
                let heading = match passage.metadata.title.as_deref() {
                    Some(title) if !title.is_empty() => title.to_string(),
                    _ if !passage.metadata.source.is_empty() => {
                        passage.metadata.source.clone()
                    }
                    _ => format!("doc_{number}"),
                };
                format!("[{number}] {heading}\n{}", passage.content)
            })
            .collect();

        Ok(blocks.join("\n\n"))
    }
}

/// General-knowledge lookup tool backed by the encyclopedia
#[derive(Debug)]
pub struct GeneralKnowledgeTool {
    encyclopedia: Arc<dyn Encyclopedia>,
}

impl GeneralKnowledgeTool {
    pub fn new(encyclopedia: Arc<dyn Encyclopedia>) -> Self {
        Self { encyclopedia }
    }
}

#[async_trait]
impl AgentTool for GeneralKnowledgeTool {
    fn name(&self) -> &'static str {
        "general-knowledge"
    }

    fn description(&self) -> &'static str {
        "Search an encyclopedia for general knowledge."
    }

    fn parameters(&self) -> Value {
        query_parameters_schema()
    }

    async fn call(&self, arguments: &str) -> Result<String, DomainError> {
        let query = parse_query_argument(arguments)?;
        let articles = self.encyclopedia.search(&query, ARTICLE_LIMIT).await?;

        if articles.is_empty() {
            return Ok("No good search result was found.".to_string());
        }

        let blocks: Vec<String> = articles
            .iter()
            .map(|article| format!("Page: {}\nSummary: {}", article.title, article.extract))
            .collect();

        Ok(blocks.join("\n\n"))
    }
}
