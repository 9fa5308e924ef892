//! General-knowledge lookup trait

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A short article match from an encyclopedia search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub title: String,
    /// Plain-text lead extract of the article
    pub extract: String,
}

impl ArticleSummary {
    pub fn new(title: impl Into<String>, extract: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            extract: extract.into(),
        }
    }
}

/// Provider trait for general-knowledge lookups outside the corpus
#[async_trait]
pub trait Encyclopedia: Send + Sync + Debug {
    /// Search for articles matching the query, best match first
    async fn search(&self, query: &str, limit: usize)
    -> Result<Vec<ArticleSummary>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock encyclopedia for testing
    #[derive(Debug, Default)]
    pub struct MockEncyclopedia {
        results: Vec<ArticleSummary>,
        search_count: AtomicUsize,
        should_fail: bool,
    }

    impl MockEncyclopedia {
        pub fn new() -> Self {
            Self::default()
        }

        /// Set fixed results (returned regardless of query)
        pub fn with_results(mut self, results: Vec<ArticleSummary>) -> Self {
            self.results = results;
            self
        }

        pub fn with_failure(mut self) -> Self {
            self.should_fail = true;
            self
        }

        /// Get the number of search calls
        pub fn search_count(&self) -> usize {
            self.search_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Encyclopedia for MockEncyclopedia {
        async fn search(
            &self,
            _query: &str,
            limit: usize,
        ) -> Result<Vec<ArticleSummary>, DomainError> {
            self.search_count.fetch_add(1, Ordering::SeqCst);

            if self.should_fail {
                return Err(DomainError::provider(
                    "mock",
                    "Mock encyclopedia configured to fail",
                ));
            }

            Ok(self.results.iter().take(limit).cloned().collect())
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_respects_limit() {
            let encyclopedia = MockEncyclopedia::new().with_results(vec![
                ArticleSummary::new("Python (programming language)", "Python is..."),
                ArticleSummary::new("Python (genus)", "Pythons are..."),
                ArticleSummary::new("Monty Python", "Monty Python were..."),
            ]);

            let results = encyclopedia.search("python", 2).await.unwrap();

            assert_eq!(results.len(), 2);
            assert_eq!(encyclopedia.search_count(), 1);
        }
    }
}
