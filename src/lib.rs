//! meetnotes - Meeting transcript summaries with templated prompts, an editable
//! history, and share-by-email
//!
//! The crate is split into a summarization service (`summary`), the
//! generation backends it talks to (`llm`), the editing/sharing state kept per
//! user (`editor`, `workspace`), and the outer HTTP and CLI surfaces.

pub mod cli;
pub mod config;
pub mod editor;
pub mod llm;
pub mod server;
pub mod summary;
pub mod transcript;
pub mod workspace;

use thiserror::Error;

/// Main error type for meetnotes
#[derive(Error, Debug)]
pub enum MeetnotesError {
    /// A required field was missing or blank. User-correctable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The generation backend failed or returned unusable output.
    #[error("Summarization error: {0}")]
    Summarization(String),

    /// Sending a summary to its recipients failed.
    #[error("Share error: {0}")]
    Share(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MeetnotesError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "meetnotes";

/// Count whitespace-delimited, non-empty words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
