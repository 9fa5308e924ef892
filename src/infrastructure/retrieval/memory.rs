//! In-memory passage index for retrieval without an external vector store

use std::collections::HashMap;

use async_trait::async_trait;
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::{DocumentStore, DomainError, Passage};

const DEFAULT_TOP_K: usize = 3;

/// Document store that ranks passages by term-frequency cosine similarity
///
/// The index is built once from the ingested passages and is immutable
/// afterwards, so lookups need no locking.
#[derive(Debug)]
pub struct InMemoryIndexStore {
    entries: Vec<IndexEntry>,
    top_k: usize,
}

#[derive(Debug)]
struct IndexEntry {
    passage: Passage,
    term_counts: HashMap<String, f32>,
    norm: f32,
}

impl InMemoryIndexStore {
    /// Build an index over the given passages
    pub fn from_passages(passages: Vec<Passage>) -> Self {
        let entries = passages
            .into_iter()
            .map(|passage| {
                let term_counts = count_terms(&passage.content);
                let norm = vector_norm(&term_counts);

                IndexEntry {
                    passage,
                    term_counts,
                    norm,
                }
            })
            .collect();

        Self {
            entries,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Number of indexed passages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn rank(&self, query: &str) -> Vec<Passage> {
        let query_counts = count_terms(query);
        let query_norm = vector_norm(&query_counts);

        if query_norm == 0.0 {
            return Vec::new();
        }

        let mut scored: Vec<(f32, &Passage)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = cosine_similarity(&query_counts, query_norm, entry);

                (score > 0.0).then_some((score, &entry.passage))
            })
            .collect();

        // Stable sort keeps insertion order for equal scores.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        scored
            .into_iter()
            .take(self.top_k)
            .map(|(_, passage)| passage.clone())
            .collect()
    }
}

#[async_trait]
impl DocumentStore for InMemoryIndexStore {
    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>, DomainError> {
        Ok(self.rank(query))
    }

    fn store_type(&self) -> &'static str {
        "in_memory"
    }
}

fn count_terms(text: &str) -> HashMap<String, f32> {
    let mut counts = HashMap::new();

    for word in text.unicode_words() {
        *counts.entry(word.to_lowercase()).or_insert(0.0) += 1.0;
    }

    counts
}

fn vector_norm(counts: &HashMap<String, f32>) -> f32 {
    counts.values().map(|count| count * count).sum::<f32>().sqrt()
}

fn cosine_similarity(
    query_counts: &HashMap<String, f32>,
    query_norm: f32,
    entry: &IndexEntry,
) -> f32 {
    if entry.norm == 0.0 {
        return 0.0;
    }

    let dot: f32 = query_counts
        .iter()
        .filter_map(|(term, count)| entry.term_counts.get(term).map(|other| count * other))
        .sum();

    dot / (query_norm * entry.norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_passages() -> Vec<Passage> {
        vec![
            Passage::new(
                "The fee structure for the BS program is listed per semester.",
                "prospectus.txt",
            ),
            Passage::new(
                "Admission requires a completed application before orientation week.",
                "prospectus.txt",
            ),
            Passage::new(
                "Faculty members hold office hours on weekday afternoons.",
                "faculty.txt",
            ),
        ]
    }

    #[tokio::test]
    async fn test_ranks_by_term_overlap() {
        let store = InMemoryIndexStore::from_passages(sample_passages());

        let results = store.retrieve("fee structure").await.unwrap();

        assert!(!results.is_empty());
        assert!(results[0].content.contains("fee structure"));
    }

    #[tokio::test]
    async fn test_drops_passages_without_overlap() {
        let store = InMemoryIndexStore::from_passages(sample_passages());

        let results = store.retrieve("fee structure").await.unwrap();

        assert!(
            results
                .iter()
                .all(|passage| !passage.content.contains("office hours"))
        );
    }

    #[tokio::test]
    async fn test_respects_top_k() {
        let store = InMemoryIndexStore::from_passages(sample_passages()).with_top_k(1);

        let results = store.retrieve("the program application").await.unwrap();

        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_matching_is_case_insensitive() {
        let store = InMemoryIndexStore::from_passages(sample_passages());

        let results = store.retrieve("FEE Structure").await.unwrap();

        assert!(!results.is_empty());
        assert!(results[0].content.contains("fee structure"));
    }

    #[tokio::test]
    async fn test_empty_store_returns_no_results() {
        let store = InMemoryIndexStore::from_passages(Vec::new());

        assert!(store.is_empty());
        assert!(store.retrieve("anything").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_returns_no_results() {
        let store = InMemoryIndexStore::from_passages(sample_passages());

        assert!(store.retrieve("   ").await.unwrap().is_empty());
    }

    #[test]
    fn test_len_counts_passages() {
        let store = InMemoryIndexStore::from_passages(sample_passages());

        assert_eq!(store.len(), 3);
    }
}
