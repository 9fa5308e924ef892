//! CLI module
//!
//! Subcommands:
//! - `serve`: ingest the corpus and run the HTTP API

pub mod serve;

use clap::{Parser, Subcommand};

/// Prospectus QA - retrieval-augmented question answering for a university department
#[derive(Parser)]
#[command(name = "prospectus-qa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ingest the corpus and run the HTTP API server
    Serve,
}
