//! Summarization service
//!
//! Resolves a fixed template or custom instructions into the prompt sent to
//! the generation backend, and shapes the reply into a `SummarizeResult`.

mod models;
mod service;
mod templates;

pub use models::{ResolvedPrompt, SummarizeRequest, SummarizeResult};
pub use service::{validate_transcript, Summarizer};
pub use templates::{
    InstructionPreset, SummaryTemplate, TemplateChoice, CUSTOM_TEMPLATE_KEY,
    CUSTOM_TEMPLATE_NAME, DEFAULT_INSTRUCTIONS,
};
