//! Route handlers: POST /summarize, POST /send-email, GET /health

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::editor::share::{active_recipients, SEND_SUCCESS_MESSAGE};
use crate::editor::{EmailShareRequest, Mailer};
use crate::summary::{SummarizeRequest, SummarizeResult, Summarizer};
use crate::MeetnotesError;

const SUMMARIZE_FAILED_MESSAGE: &str = "Failed to generate summary. Please try again.";
const SEND_FAILED_MESSAGE: &str = "Failed to send email. Please try again.";

/// Room for JSON framing and the other fields on top of the transcript.
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Request body for POST /summarize.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeBody {
    #[serde(default)]
    pub transcript: Option<String>,
    /// Custom instructions, used when no fixed template applies.
    #[serde(default, alias = "instructions")]
    pub prompt: Option<String>,
    /// `standard`, `executive`, `technical` or `custom`; unknown values act as `custom`.
    #[serde(default)]
    pub summary_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResponse {
    pub summary: String,
    pub word_count: usize,
    /// Resolved template display name
    pub summary_type: String,
    pub timestamp: DateTime<Utc>,
}

impl From<SummarizeResult> for SummarizeResponse {
    fn from(result: SummarizeResult) -> Self {
        Self {
            summary: result.summary_text,
            word_count: result.word_count,
            summary_type: result.resolved_template_name,
            timestamp: result.generated_at,
        }
    }
}

/// Request body for POST /send-email.
#[derive(Debug, Default, Deserialize)]
pub struct SendEmailBody {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default, alias = "customMessage")]
    pub message: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
    /// Number of non-blank recipients
    pub recipients: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: String,
    pub model: String,
}

/// JSON error response: `{ "error": ... }` with a status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

impl From<MeetnotesError> for ApiError {
    fn from(err: MeetnotesError) -> Self {
        match err {
            MeetnotesError::Validation(message) => Self::bad_request(message),
            MeetnotesError::Summarization(_) => Self::internal(SUMMARIZE_FAILED_MESSAGE),
            MeetnotesError::Share(_) => Self::internal(SEND_FAILED_MESSAGE),
            MeetnotesError::Config(_) | MeetnotesError::Io(_) => {
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            StatusCode::PAYLOAD_TOO_LARGE
        } else {
            StatusCode::BAD_REQUEST
        };
        Self {
            status,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<Summarizer>,
    pub mailer: Arc<dyn Mailer>,
}

/// Validate a send-email body into the request handed to the mailer.
pub fn validate_send_email(body: &SendEmailBody) -> Result<EmailShareRequest, ApiError> {
    let recipients = active_recipients(&body.recipients);
    let summary = body.summary.as_deref().unwrap_or_default();
    if recipients.is_empty() || summary.trim().is_empty() {
        return Err(ApiError::bad_request("Recipients and summary are required"));
    }

    Ok(EmailShareRequest {
        subject: body
            .subject
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "Meeting Summary".to_string()),
        recipients,
        custom_message: body.message.clone(),
        summary_text: summary.to_string(),
    })
}

async fn handle_summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeBody>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let Json(body) = payload?;
    let request = SummarizeRequest {
        transcript: body.transcript.unwrap_or_default(),
        custom_prompt: body.prompt,
        template_key: body.summary_type,
    };

    let result = state.summarizer.summarize(&request).await.map_err(|e| {
        if !matches!(e, MeetnotesError::Validation(_)) {
            error!("POST /summarize failed: {}", e);
        }
        ApiError::from(e)
    })?;

    info!(
        "POST /summarize -> {} ({} words)",
        result.resolved_template_name, result.word_count
    );
    Ok(Json(result.into()))
}

async fn handle_send_email(
    State(state): State<AppState>,
    payload: Result<Json<SendEmailBody>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, ApiError> {
    let Json(body) = payload?;
    let request = validate_send_email(&body)?;

    let delivery = state.mailer.send_email(&request).await.map_err(|e| {
        error!("POST /send-email failed: {}", e);
        ApiError::from(e)
    })?;

    if !delivery.delivered {
        warn!("POST /send-email: transport reported no delivery");
        return Err(ApiError::internal(SEND_FAILED_MESSAGE));
    }

    info!("POST /send-email -> {} recipient(s)", delivery.recipient_count);
    Ok(Json(SendEmailResponse {
        success: true,
        message: SEND_SUCCESS_MESSAGE.to_string(),
        recipients: delivery.recipient_count,
    }))
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        provider: state.summarizer.provider_name().to_string(),
        model: state.summarizer.model().to_string(),
    })
}

/// Build the HTTP router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.summarizer.max_transcript_bytes() + BODY_OVERHEAD_BYTES;
    Router::new()
        .route("/health", get(handle_health))
        .route("/summarize", post(handle_summarize))
        .route("/send-email", post(handle_send_email))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
