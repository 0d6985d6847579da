//! Summarization service: prompt resolution, one backend call, result shaping

use chrono::Utc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::Settings;
use crate::llm::prompts::{build_summary_prompt, SYSTEM_PROMPT};
use crate::llm::{build_provider, GenerationRequest, LlmProvider};
use crate::summary::models::{SummarizeRequest, SummarizeResult};
use crate::{word_count, MeetnotesError, Result};

const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_MAX_TRANSCRIPT_BYTES: usize = 1024 * 1024;

/// Turns transcripts into summaries through a single generation backend.
///
/// Each call makes exactly one backend attempt. Retrying is left to the
/// caller, which typically offers a "regenerate" action.
pub struct Summarizer {
    provider: Box<dyn LlmProvider>,
    max_output_tokens: u32,
    temperature: f32,
    timeout: Duration,
    max_transcript_bytes: usize,
}

impl Summarizer {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self {
            provider,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
            max_transcript_bytes: DEFAULT_MAX_TRANSCRIPT_BYTES,
        }
    }

    /// Build the configured provider and apply generation limits from settings.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let provider = build_provider(settings)?;
        Ok(Self::with_settings(provider, settings))
    }

    pub fn with_settings(provider: Box<dyn LlmProvider>, settings: &Settings) -> Self {
        Self {
            provider,
            max_output_tokens: settings.llm.max_output_tokens,
            temperature: settings.llm.temperature,
            timeout: settings.request_timeout(),
            max_transcript_bytes: settings.server.max_transcript_bytes,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_transcript_bytes(mut self, max: usize) -> Self {
        self.max_transcript_bytes = max;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub fn max_transcript_bytes(&self) -> usize {
        self.max_transcript_bytes
    }

    pub async fn summarize(&self, request: &SummarizeRequest) -> Result<SummarizeResult> {
        validate_transcript(&request.transcript, self.max_transcript_bytes)?;

        let resolved = request.resolve_prompt();
        let prompt = build_summary_prompt(&resolved.body, &request.transcript);

        info!(
            "Generating summary ({}, {} transcript bytes) with {}/{}",
            resolved.template_name,
            request.transcript.len(),
            self.provider.name(),
            self.provider.model()
        );

        let generation = self.provider.generate(GenerationRequest {
            system: SYSTEM_PROMPT,
            prompt: &prompt,
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
        });

        let summary_text = match tokio::time::timeout(self.timeout, generation).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                error!("Summarization backend failed: {:#}", e);
                return Err(MeetnotesError::Summarization(format!("{:#}", e)));
            }
            Err(_) => {
                error!(
                    "Summarization backend did not respond within {:?}",
                    self.timeout
                );
                return Err(MeetnotesError::Summarization(format!(
                    "backend did not respond within {:?}",
                    self.timeout
                )));
            }
        };

        if summary_text.trim().is_empty() {
            error!("Summarization backend returned an empty summary");
            return Err(MeetnotesError::Summarization(
                "backend returned an empty summary".to_string(),
            ));
        }

        let word_count = word_count(&summary_text);
        debug!("Summary generated: {} words", word_count);

        Ok(SummarizeResult {
            summary_text,
            word_count,
            resolved_template_name: resolved.template_name.to_string(),
            generated_at: Utc::now(),
        })
    }
}

/// Reject blank or oversized transcripts.
pub fn validate_transcript(transcript: &str, max_bytes: usize) -> Result<()> {
    if transcript.trim().is_empty() {
        return Err(MeetnotesError::Validation(
            "Transcript is required".to_string(),
        ));
    }
    if transcript.len() > max_bytes {
        return Err(MeetnotesError::Validation(format!(
            "Transcript is too large ({} bytes, limit {} bytes)",
            transcript.len(),
            max_bytes
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Backend double that records prompts and replays a fixed outcome.
    struct ScriptedProvider {
        reply: std::result::Result<String, String>,
        delay: Option<Duration>,
        seen: Arc<Mutex<Vec<(String, String, u32, f32)>>>,
    }

    impl ScriptedProvider {
        fn replying(text: &str) -> (Self, Arc<Mutex<Vec<(String, String, u32, f32)>>>) {
            let seen = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    reply: Ok(text.to_string()),
                    delay: None,
                    seen: seen.clone(),
                },
                seen,
            )
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                delay: None,
                seen: Arc::default(),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-1"
        }

        async fn generate(&self, request: GenerationRequest<'_>) -> anyhow::Result<String> {
            self.seen.lock().unwrap().push((
                request.system.to_string(),
                request.prompt.to_string(),
                request.max_output_tokens,
                request.temperature,
            ));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reply.clone().map_err(|e| anyhow::anyhow!(e))
        }
    }

    #[tokio::test]
    async fn blank_transcripts_are_rejected_before_the_backend() {
        let (provider, seen) = ScriptedProvider::replying("unused");
        let summarizer = Summarizer::new(Box::new(provider));

        for transcript in ["", "   ", "\n\t"] {
            let err = summarizer
                .summarize(&SummarizeRequest::new(transcript))
                .await
                .unwrap_err();
            assert!(matches!(err, MeetnotesError::Validation(_)));
        }
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn word_count_matches_whitespace_tokens_of_reply() {
        let (provider, seen) = ScriptedProvider::replying("  - Ship on Friday\n\n- Bob   writes tests ");
        let summarizer = Summarizer::new(Box::new(provider));

        let result = summarizer
            .summarize(&SummarizeRequest::new("Alice: ship it"))
            .await
            .expect("summary");

        assert_eq!(result.word_count, 8);
        assert_eq!(result.resolved_template_name, "Custom");

        let seen = seen.lock().unwrap();
        let (system, prompt, max_tokens, temperature) = &seen[0];
        assert_eq!(system, SYSTEM_PROMPT);
        assert_eq!(prompt, "\n\nMeeting Transcript:\nAlice: ship it");
        assert_eq!(*max_tokens, 1000);
        assert!((temperature - 0.3).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn template_body_is_sent_ahead_of_transcript() {
        let (provider, seen) = ScriptedProvider::replying("ok");
        let summarizer = Summarizer::new(Box::new(provider));

        let result = summarizer
            .summarize(
                &SummarizeRequest::new("Bob: blocked on CI")
                    .with_template("technical")
                    .with_prompt("ignored"),
            )
            .await
            .expect("summary");

        assert_eq!(result.resolved_template_name, "Technical Meeting");
        let prompt = seen.lock().unwrap()[0].1.clone();
        assert!(prompt.starts_with("Summarize this technical meeting"));
        assert!(prompt.ends_with("Meeting Transcript:\nBob: blocked on CI"));
        assert!(!prompt.contains("ignored"));
    }

    #[tokio::test]
    async fn backend_failure_becomes_summarization_error() {
        let summarizer = Summarizer::new(Box::new(ScriptedProvider::failing("quota exceeded")));

        let err = summarizer
            .summarize(&SummarizeRequest::new("Alice: hi"))
            .await
            .unwrap_err();

        match err {
            MeetnotesError::Summarization(message) => assert!(message.contains("quota exceeded")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn whitespace_only_reply_is_unusable() {
        let (provider, _) = ScriptedProvider::replying("  \n ");
        let summarizer = Summarizer::new(Box::new(provider));

        let err = summarizer
            .summarize(&SummarizeRequest::new("Alice: hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, MeetnotesError::Summarization(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_backend_times_out() {
        let (mut provider, _) = ScriptedProvider::replying("late");
        provider.delay = Some(Duration::from_secs(600));
        let summarizer =
            Summarizer::new(Box::new(provider)).with_timeout(Duration::from_secs(5));

        let err = summarizer
            .summarize(&SummarizeRequest::new("Alice: hi"))
            .await
            .unwrap_err();

        match err {
            MeetnotesError::Summarization(message) => assert!(message.contains("5s")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn sub_second_timeout_is_reported_precisely() {
        let (mut provider, _) = ScriptedProvider::replying("late");
        provider.delay = Some(Duration::from_secs(1));
        let summarizer =
            Summarizer::new(Box::new(provider)).with_timeout(Duration::from_millis(250));

        let err = summarizer
            .summarize(&SummarizeRequest::new("Alice: hi"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("within 250ms"), "got: {err}");
    }

    #[test]
    fn oversized_transcript_is_rejected() {
        let err = validate_transcript("abcdef", 5).unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(validate_transcript("abcde", 5).is_ok());
    }
}
