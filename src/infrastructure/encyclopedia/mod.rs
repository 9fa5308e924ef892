//! Encyclopedia implementations

mod wikipedia;

pub use wikipedia::WikipediaClient;
