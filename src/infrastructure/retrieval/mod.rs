//! Retrieval implementations

mod memory;

pub use memory::InMemoryIndexStore;
