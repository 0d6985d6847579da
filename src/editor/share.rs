//! Share-by-email: recipient form, mail transport seam, and the stub transport

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::ShareSettings;
use crate::editor::gate::InFlight;
use crate::{MeetnotesError, Result};

pub const SEND_SUCCESS_MESSAGE: &str = "Email sent successfully!";

/// Email compose form. The recipient list always keeps at least one row,
/// which may be blank; blanks are filtered out when sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareDraft {
    pub subject: String,
    pub message: Option<String>,
    recipients: Vec<String>,
}

impl ShareDraft {
    pub fn new(subject: impl Into<String>, message: Option<String>) -> Self {
        Self {
            subject: subject.into(),
            message,
            recipients: vec![String::new()],
        }
    }

    pub fn from_settings(settings: &ShareSettings) -> Self {
        let message = Some(settings.message.clone()).filter(|m| !m.trim().is_empty());
        Self::new(settings.subject.clone(), message)
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Append an empty row and return its index.
    pub fn add_recipient(&mut self) -> usize {
        self.recipients.push(String::new());
        self.recipients.len() - 1
    }

    /// Remove a row. The last remaining row is never removed.
    pub fn remove_recipient(&mut self, index: usize) -> bool {
        if self.recipients.len() <= 1 || index >= self.recipients.len() {
            return false;
        }
        self.recipients.remove(index);
        true
    }

    /// Replace a row verbatim.
    pub fn update_recipient(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.recipients.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Trimmed, non-blank recipients in form order.
    pub fn active_recipients(&self) -> Vec<String> {
        active_recipients(&self.recipients)
    }

    pub fn has_recipients(&self) -> bool {
        self.recipients.iter().any(|r| !r.trim().is_empty())
    }

    pub fn to_request(&self, summary_text: &str) -> EmailShareRequest {
        EmailShareRequest {
            subject: self.subject.clone(),
            recipients: self.active_recipients(),
            custom_message: self.message.clone(),
            summary_text: summary_text.to_string(),
        }
    }
}

impl Default for ShareDraft {
    fn default() -> Self {
        Self::from_settings(&ShareSettings::default())
    }
}

/// Payload handed to the mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailShareRequest {
    pub subject: String,
    pub recipients: Vec<String>,
    pub custom_message: Option<String>,
    pub summary_text: String,
}

impl EmailShareRequest {
    pub fn recipient_count(&self) -> usize {
        self.recipients.iter().filter(|r| !r.trim().is_empty()).count()
    }

    /// Plain-text body: custom message (if any) followed by the summary.
    pub fn body(&self) -> String {
        match self.custom_message.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => {
                format!("{}\n\n{}", message, self.summary_text)
            }
            _ => self.summary_text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub delivered: bool,
    pub recipient_count: usize,
}

/// Mail transport seam. A real SMTP or API-backed mailer plugs in here.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, request: &EmailShareRequest) -> Result<Delivery>;
}

/// Reports success after a fixed delay without delivering anything.
#[derive(Debug, Clone)]
pub struct StubMailer {
    delay: Duration,
}

impl StubMailer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl Mailer for StubMailer {
    async fn send_email(&self, request: &EmailShareRequest) -> Result<Delivery> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let recipient_count = request.recipient_count();
        info!(
            "Simulated delivery of '{}' to {} recipient(s) ({} body chars)",
            request.subject,
            recipient_count,
            request.body().chars().count()
        );

        Ok(Delivery {
            delivered: true,
            recipient_count,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOutcome {
    pub message: String,
    pub recipient_count: usize,
}

/// A share draft plus the transport it is sent through.
pub struct ShareComposer {
    draft: ShareDraft,
    mailer: Arc<dyn Mailer>,
    sending: InFlight,
}

impl ShareComposer {
    pub fn new(draft: ShareDraft, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            draft,
            mailer,
            sending: InFlight::new(),
        }
    }

    pub fn draft(&self) -> &ShareDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ShareDraft {
        &mut self.draft
    }

    pub fn is_sending(&self) -> bool {
        self.sending.is_active()
    }

    pub fn can_send(&self) -> bool {
        self.draft.has_recipients() && !self.is_sending()
    }

    /// Send the current draft. Gated only on recipients and the in-flight
    /// flag, the same conditions as [`ShareComposer::can_send`].
    pub async fn send(&self, summary_text: &str) -> Result<ShareOutcome> {
        if !self.draft.has_recipients() {
            return Err(MeetnotesError::Validation(
                "At least one recipient is required".to_string(),
            ));
        }
        let _guard = self.sending.try_begin().ok_or_else(|| {
            MeetnotesError::Share("A send is already in progress".to_string())
        })?;

        let request = self.draft.to_request(summary_text);
        let delivery = self.mailer.send_email(&request).await?;
        if !delivery.delivered {
            return Err(MeetnotesError::Share(
                "Mail transport did not deliver the summary".to_string(),
            ));
        }

        Ok(ShareOutcome {
            message: SEND_SUCCESS_MESSAGE.to_string(),
            recipient_count: delivery.recipient_count,
        })
    }
}

pub fn active_recipients(recipients: &[String]) -> Vec<String> {
    recipients
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}
