//! Corpus retrieval domain models and traits

mod passage;
mod store;

pub use passage::{Passage, PassageMetadata};
pub use store::DocumentStore;

#[cfg(test)]
pub use store::mock::MockDocumentStore;
