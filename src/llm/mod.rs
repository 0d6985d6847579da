//! LLM module for meetnotes
//!
//! Text-generation backends (Groq, Gemini) behind the `LlmProvider` seam, and
//! the fixed prompts sent with every request.

mod client;
mod gemini;
mod groq;
pub mod prompts;

pub use client::{build_provider, GenerationRequest, LlmProvider};
pub use gemini::GeminiClient;
pub use groq::GroqClient;
