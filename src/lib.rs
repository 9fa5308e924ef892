//! Prospectus QA
//!
//! Retrieval-augmented question answering scoped to a university department
//! corpus, with:
//! - A guardrail that refuses out-of-domain questions
//! - A tool-calling agent over an in-memory passage index
//! - An HTTP API returning answers with citations

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
