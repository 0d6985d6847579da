//! Request and result types for the summarization service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::summary::templates::TemplateChoice;

/// A transcript plus the instructions to summarize it with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    /// Raw transcript text; must be non-blank
    pub transcript: String,

    /// Free-text instructions, used when no fixed template applies
    pub custom_prompt: Option<String>,

    /// Template key (`standard`, `executive`, `technical`, `custom`)
    pub template_key: Option<String>,
}

impl SummarizeRequest {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            ..Self::default()
        }
    }

    pub fn with_template(mut self, key: impl Into<String>) -> Self {
        self.template_key = Some(key.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.custom_prompt = Some(prompt.into());
        self
    }

    /// Work out which instruction body and template name apply.
    pub fn resolve_prompt(&self) -> ResolvedPrompt {
        let choice = TemplateChoice::from_key(self.template_key.as_deref());
        let body = match choice {
            TemplateChoice::Template(template) => template.prompt_body().to_string(),
            TemplateChoice::Custom => self.custom_prompt.clone().unwrap_or_default(),
        };

        ResolvedPrompt {
            body,
            template_name: choice.display_name(),
        }
    }
}

/// Outcome of template-or-custom resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrompt {
    /// Instruction text placed ahead of the transcript (may be empty)
    pub body: String,

    /// Display name of the template, or "Custom"
    pub template_name: &'static str,
}

/// Generated summary annotated with derived metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeResult {
    pub summary_text: String,
    pub word_count: usize,
    pub resolved_template_name: String,
    pub generated_at: DateTime<Utc>,
}
