use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::llm::groq::GroqClient;

/// Generation request payload.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Fixed system instruction (summarization guidelines)
    pub system: &'a str,
    /// Resolved prompt followed by the transcript
    pub prompt: &'a str,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short provider name, used in logs and the health endpoint.
    fn name(&self) -> &str;

    /// Model identifier sent to the backend.
    fn model(&self) -> &str;

    /// Run one generation. Returns the generated text, never empty.
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "groq" => Ok(Box::new(GroqClient::from_settings(settings)?)),
        "gemini" => Ok(Box::new(GeminiClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: groq, gemini",
            other
        ),
    }
}

/// Pick the configured value, or the provider default when blank.
pub(crate) fn setting_or(value: &str, default: &str) -> String {
    let value = value.trim().trim_end_matches('/');
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
