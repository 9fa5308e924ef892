//! Document store trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::passage::Passage;
use crate::domain::error::DomainError;

/// Provider trait for corpus retrieval
///
/// Implementations rank passages by relevance to the query and return a
/// finite, ordered list. Ranking and result count are store policy.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    /// Retrieve passages relevant to the query, most relevant first
    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>, DomainError>;

    /// Get the store type name
    fn store_type(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock document store for testing
    #[derive(Debug, Default)]
    pub struct MockDocumentStore {
        results: Vec<Passage>,
        queries: Mutex<Vec<String>>,
        retrieve_count: AtomicUsize,
        should_fail: bool,
    }

    impl MockDocumentStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Set fixed results (returned regardless of query)
        pub fn with_results(mut self, results: Vec<Passage>) -> Self {
            self.results = results;
            self
        }

        pub fn with_failure(mut self) -> Self {
            self.should_fail = true;
            self
        }

        /// Get the number of retrieve calls
        pub fn retrieve_count(&self) -> usize {
            self.retrieve_count.load(Ordering::SeqCst)
        }

        /// Queries seen so far, in call order
        pub fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentStore for MockDocumentStore {
        async fn retrieve(&self, query: &str) -> Result<Vec<Passage>, DomainError> {
            self.retrieve_count.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.to_string());

            if self.should_fail {
                return Err(DomainError::retrieval("Mock store configured to fail"));
            }

            Ok(self.results.clone())
        }

        fn store_type(&self) -> &'static str {
            "mock"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_store_records_queries() {
            let store = MockDocumentStore::new()
                .with_results(vec![Passage::new("CS offers a BSc.", "prospectus.md")]);

            let results = store.retrieve("degrees").await.unwrap();

            assert_eq!(results.len(), 1);
            assert_eq!(store.retrieve_count(), 1);
            assert_eq!(store.queries(), vec!["degrees".to_string()]);
        }

        #[tokio::test]
        async fn test_mock_store_failure() {
            let store = MockDocumentStore::new().with_failure();
            assert!(store.retrieve("anything").await.is_err());
        }
    }
}
