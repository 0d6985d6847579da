//! One user's working session: summarize, edit, share

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::editor::{
    DraftSink, InFlight, Mailer, ShareComposer, ShareDraft, ShareOutcome, SummaryEditor,
};
use crate::summary::{SummarizeRequest, SummarizeResult, Summarizer};
use crate::{MeetnotesError, Result};

/// Holds the summary being edited and the share draft for a single user.
///
/// At most one summarization and one send are in flight at a time.
pub struct Workspace {
    summarizer: Arc<Summarizer>,
    summarizing: InFlight,
    editor: SummaryEditor,
    share: ShareComposer,
    last_request: Option<SummarizeRequest>,
}

impl Workspace {
    pub fn new(summarizer: Arc<Summarizer>, editor: SummaryEditor, share: ShareComposer) -> Self {
        Self {
            summarizer,
            summarizing: InFlight::new(),
            editor,
            share,
            last_request: None,
        }
    }

    pub fn from_settings(
        settings: &Settings,
        summarizer: Arc<Summarizer>,
        sink: Arc<dyn DraftSink>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self::new(
            summarizer,
            SummaryEditor::from_settings(settings, sink),
            ShareComposer::new(ShareDraft::from_settings(&settings.share), mailer),
        )
    }

    pub fn is_summarizing(&self) -> bool {
        self.summarizing.is_active()
    }

    /// Run one summarization without touching the editor.
    pub async fn generate(&self, request: &SummarizeRequest) -> Result<SummarizeResult> {
        let _guard = self.summarizing.try_begin().ok_or_else(|| {
            MeetnotesError::Summarization("A summary is already being generated".to_string())
        })?;
        self.summarizer.summarize(request).await
    }

    /// Summarize and, on success, replace the editor contents with the result.
    pub async fn summarize(&mut self, request: SummarizeRequest) -> Result<SummarizeResult> {
        self.editor.cancel_autosave();
        let result = self.generate(&request).await?;
        info!(
            "Loaded {} summary into editor ({} words)",
            result.resolved_template_name, result.word_count
        );
        self.editor.load_result(&result);
        self.last_request = Some(request);
        Ok(result)
    }

    /// Re-run the last successful request.
    pub async fn regenerate(&mut self) -> Result<SummarizeResult> {
        let request = self.last_request.clone().ok_or_else(|| {
            MeetnotesError::Validation("Nothing to regenerate yet".to_string())
        })?;
        self.summarize(request).await
    }

    pub async fn share_summary(&self) -> Result<ShareOutcome> {
        self.share.send(self.editor.text()).await
    }

    pub fn editor(&self) -> &SummaryEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut SummaryEditor {
        &mut self.editor
    }

    pub fn share(&self) -> &ShareComposer {
        &self.share
    }

    pub fn share_mut(&mut self) -> &mut ShareComposer {
        &mut self.share
    }
}
