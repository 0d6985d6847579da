mod common;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::ScriptedProvider;
use meetnotes::editor::{Delivery, EmailShareRequest, Mailer, StubMailer};
use meetnotes::server::{router, AppState};
use meetnotes::summary::Summarizer;
use meetnotes::MeetnotesError;
use tower::util::ServiceExt;

const MEETING: &str = "Alice: Let's ship Friday. Bob: I'll write tests.";

fn app_with(provider: ScriptedProvider, mailer: Arc<dyn Mailer>) -> Router {
    router(AppState {
        summarizer: Arc::new(Summarizer::new(Box::new(provider))),
        mailer,
    })
}

fn app(provider: ScriptedProvider) -> Router {
    app_with(provider, Arc::new(StubMailer::instant()))
}

async fn post_json(app: Router, path: &str, body: String) -> Result<(StatusCode, serde_json::Value)> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body))?;
    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn standard_template_end_to_end() -> Result<()> {
    let provider = ScriptedProvider::replying("- Ship on Friday (Alice)\n- Bob writes tests");
    let seen = provider.seen.clone();

    let (status, body) = post_json(
        app(provider),
        "/summarize",
        serde_json::json!({ "transcript": MEETING, "summaryType": "standard" }).to_string(),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["summary"].as_str().unwrap_or_default().is_empty());
    assert_eq!(body["wordCount"], 9);
    assert_eq!(body["summaryType"], "Standard Meeting");
    assert!(body["timestamp"].is_string());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].prompt.starts_with("Analyze this meeting transcript"));
    assert!(seen[0].prompt.ends_with(MEETING));
    assert!(seen[0].system.contains("expert meeting summarizer"));
    Ok(())
}

#[tokio::test]
async fn unknown_summary_type_falls_back_to_custom_prompt() -> Result<()> {
    let provider = ScriptedProvider::replying("- decisions only");
    let seen = provider.seen.clone();

    let (status, body) = post_json(
        app(provider),
        "/summarize",
        serde_json::json!({
            "transcript": MEETING,
            "prompt": "List decisions only.",
            "summaryType": "unknown-key"
        })
        .to_string(),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summaryType"], "Custom");
    assert!(seen.lock().unwrap()[0]
        .prompt
        .starts_with("List decisions only.\n\nMeeting Transcript:\n"));
    Ok(())
}

#[tokio::test]
async fn blank_or_missing_transcript_is_bad_request() -> Result<()> {
    for body in [
        serde_json::json!({ "transcript": "   " }),
        serde_json::json!({ "transcript": "" }),
        serde_json::json!({ "prompt": "anything" }),
    ] {
        let provider = ScriptedProvider::replying("unused");
        let seen = provider.seen.clone();
        let (status, response) = post_json(app(provider), "/summarize", body.to_string()).await?;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "Transcript is required");
        assert!(seen.lock().unwrap().is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn backend_failure_is_internal_error_with_generic_message() -> Result<()> {
    let (status, body) = post_json(
        app(ScriptedProvider::failing("401 Unauthorized: invalid api key")),
        "/summarize",
        serde_json::json!({ "transcript": MEETING }).to_string(),
    )
    .await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate summary. Please try again.");
    Ok(())
}

#[tokio::test]
async fn oversized_transcript_is_rejected() -> Result<()> {
    let app = router(AppState {
        summarizer: Arc::new(
            Summarizer::new(Box::new(ScriptedProvider::replying("unused")))
                .with_max_transcript_bytes(16),
        ),
        mailer: Arc::new(StubMailer::instant()),
    });

    let (status, body) = post_json(
        app,
        "/summarize",
        serde_json::json!({ "transcript": MEETING }).to_string(),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("too large"));
    Ok(())
}

#[tokio::test]
async fn malformed_json_returns_error_body() -> Result<()> {
    let (status, body) = post_json(
        app(ScriptedProvider::replying("unused")),
        "/summarize",
        "{not json".to_string(),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn send_email_counts_non_blank_recipients() -> Result<()> {
    let (status, body) = post_json(
        app(ScriptedProvider::replying("unused")),
        "/send-email",
        serde_json::json!({
            "subject": "Meeting Summary",
            "recipients": ["", "a@b.com", "  "],
            "message": "See below",
            "summary": "- Ship Friday"
        })
        .to_string(),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Email sent successfully!");
    assert_eq!(body["recipients"], 1);
    Ok(())
}

#[tokio::test]
async fn send_email_without_recipients_or_summary_is_bad_request() -> Result<()> {
    for body in [
        serde_json::json!({ "recipients": [], "summary": "- Ship Friday" }),
        serde_json::json!({ "recipients": ["", " "], "summary": "- Ship Friday" }),
        serde_json::json!({ "recipients": ["a@b.com"] }),
    ] {
        let (status, response) = post_json(
            app(ScriptedProvider::replying("unused")),
            "/send-email",
            body.to_string(),
        )
        .await?;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "Recipients and summary are required");
    }
    Ok(())
}

struct BrokenMailer;

#[async_trait]
impl Mailer for BrokenMailer {
    async fn send_email(&self, _request: &EmailShareRequest) -> meetnotes::Result<Delivery> {
        Err(MeetnotesError::Share("smtp connection refused".to_string()))
    }
}

#[tokio::test]
async fn send_email_failure_is_not_reported_as_success() -> Result<()> {
    let (status, body) = post_json(
        app_with(ScriptedProvider::replying("unused"), Arc::new(BrokenMailer)),
        "/send-email",
        serde_json::json!({ "recipients": ["a@b.com"], "summary": "- Ship Friday" }).to_string(),
    )
    .await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("success").is_none());
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn health_reports_provider() -> Result<()> {
    let request = Request::builder().uri("/health").body(Body::empty())?;
    let response = app(ScriptedProvider::replying("unused"))
        .oneshot(request)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["provider"], "scripted");
    Ok(())
}
