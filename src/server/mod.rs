//! HTTP surface: POST /summarize and POST /send-email
//!
//! Validation failures map to 400, backend and transport failures to 500 with
//! a JSON `{ "error": ... }` body. Handlers hold no per-user state.

mod routes;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Settings;
use crate::editor::StubMailer;
use crate::summary::Summarizer;

pub use routes::{
    router, validate_send_email, ApiError, AppState, ErrorBody, HealthResponse, SendEmailBody,
    SendEmailResponse, SummarizeBody, SummarizeResponse,
};

/// Build server state from settings: the configured provider and the stub mailer.
pub fn state_from_settings(settings: &Settings) -> Result<AppState> {
    let summarizer = Summarizer::from_settings(settings)?;
    Ok(AppState {
        summarizer: Arc::new(summarizer),
        mailer: Arc::new(StubMailer::new(settings.send_delay())),
    })
}

/// Run the HTTP server on `bind_addr` until Ctrl+C or SIGTERM.
/// In-flight requests complete before exit.
pub async fn run_http(settings: &Settings, bind_addr: &str) -> Result<()> {
    let state = state_from_settings(settings)?;
    let provider = state.summarizer.provider_name().to_string();
    let app = router(state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!(
        "meetnotes listening on {} (provider={}, timeout={}s, Ctrl+C/SIGTERM to stop)",
        bind_addr, provider, settings.server.request_timeout_secs
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("meetnotes stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
