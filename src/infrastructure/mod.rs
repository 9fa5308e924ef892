//! Infrastructure layer - External service implementations

pub mod encyclopedia;
pub mod ingestion;
pub mod llm;
pub mod logging;
pub mod retrieval;
