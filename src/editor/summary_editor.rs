//! The editable summary: history plus debounced autosave

use chrono::NaiveDate;
use std::sync::Arc;

use crate::config::Settings;
use crate::editor::autosave::{Autosave, DraftSink, SaveStatus};
use crate::editor::history::EditHistory;
use crate::summary::SummarizeResult;

/// Summary text under edit.
///
/// `edit`, `undo` and `redo` debounce autosave on the current tokio runtime;
/// called outside one, each change is flushed to the sink right away.
pub struct SummaryEditor {
    history: EditHistory,
    autosave: Autosave,
    template_name: Option<String>,
}

impl SummaryEditor {
    pub fn new(autosave: Autosave) -> Self {
        Self {
            history: EditHistory::default(),
            autosave,
            template_name: None,
        }
    }

    pub fn from_settings(settings: &Settings, sink: Arc<dyn DraftSink>) -> Self {
        Self::new(Autosave::new(settings.autosave_delay(), sink))
    }

    /// Replace the text and history with a fresh summary. Cancels any
    /// pending autosave of the old text.
    pub fn load(&mut self, text: impl Into<String>) {
        self.autosave.cancel();
        self.history.load(text);
        self.template_name = None;
    }

    pub fn load_result(&mut self, result: &SummarizeResult) {
        self.load(result.summary_text.clone());
        self.template_name = Some(result.resolved_template_name.clone());
    }

    pub fn edit(&mut self, text: impl Into<String>) -> bool {
        let changed = self.history.edit(text);
        if changed {
            self.schedule_autosave();
        }
        changed
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.schedule_autosave();
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.schedule_autosave();
        }
        moved
    }

    fn schedule_autosave(&mut self) {
        let text = self.history.current().to_string();
        self.autosave.schedule(text);
    }

    /// Drop a pending autosave, e.g. when the editor is being torn down.
    pub fn cancel_autosave(&mut self) {
        self.autosave.cancel();
    }

    pub fn text(&self) -> &str {
        self.history.current()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn word_count(&self) -> usize {
        self.history.word_count()
    }

    pub fn char_count(&self) -> usize {
        self.history.char_count()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn save_status(&self) -> SaveStatus {
        self.autosave.status()
    }

    pub fn template_name(&self) -> Option<&str> {
        self.template_name.as_deref()
    }
}

/// File name used when a summary is downloaded.
pub fn download_file_name(date: NaiveDate) -> String {
    format!("meeting-summary-{}.txt", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::autosave::LatestDraft;
    use chrono::Utc;
    use std::time::Duration;

    fn editor() -> (SummaryEditor, Arc<LatestDraft>) {
        let latest = Arc::new(LatestDraft::default());
        let editor = SummaryEditor::new(Autosave::new(Duration::from_millis(1000), latest.clone()));
        (editor, latest)
    }

    #[tokio::test(start_paused = true)]
    async fn edits_are_autosaved_after_quiet_period() {
        let (mut editor, latest) = editor();
        editor.load("A");

        editor.edit("AB");
        editor.edit("ABC");
        assert_eq!(editor.save_status(), SaveStatus::Saving);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(latest.get().as_deref(), Some("ABC"));
        assert_eq!(editor.save_status(), SaveStatus::Saved);
    }

    #[tokio::test(start_paused = true)]
    async fn load_cancels_pending_autosave() {
        let (mut editor, latest) = editor();
        editor.load("A");
        editor.edit("edited");

        tokio::time::sleep(Duration::from_millis(500)).await;
        editor.load("regenerated");
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(latest.get(), None);
        assert_eq!(editor.text(), "regenerated");
        assert_eq!(editor.history().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn undo_flushes_the_restored_text() {
        let (mut editor, latest) = editor();
        editor.load("A");
        editor.edit("B");
        assert!(editor.undo());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(latest.get().as_deref(), Some("A"));
        assert!(editor.can_redo());
    }

    #[tokio::test]
    async fn duplicate_edit_schedules_nothing() {
        let (mut editor, _) = editor();
        editor.load("same");
        assert!(!editor.edit("same"));
        assert_eq!(editor.save_status(), SaveStatus::Saved);
    }

    #[tokio::test]
    async fn load_result_records_template_name() {
        let (mut editor, _) = editor();
        editor.load_result(&SummarizeResult {
            summary_text: "- Ship Friday".to_string(),
            word_count: 3,
            resolved_template_name: "Standard Meeting".to_string(),
            generated_at: Utc::now(),
        });

        assert_eq!(editor.template_name(), Some("Standard Meeting"));
        assert_eq!(editor.word_count(), 3);
        assert_eq!(editor.char_count(), 13);
    }

    #[test]
    fn editing_outside_a_runtime_saves_immediately() {
        let latest = Arc::new(LatestDraft::default());
        let mut editor =
            SummaryEditor::new(Autosave::new(Duration::from_millis(10), latest.clone()));
        editor.load("A");

        assert!(editor.edit("B"));
        assert_eq!(latest.get().as_deref(), Some("B"));
        assert!(editor.undo());
        assert_eq!(latest.get().as_deref(), Some("A"));
        assert!(editor.redo());
        assert_eq!(editor.text(), "B");
        assert_eq!(editor.save_status(), SaveStatus::Saved);
    }

    #[test]
    fn download_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).expect("valid date");
        assert_eq!(download_file_name(date), "meeting-summary-2024-03-07.txt");
    }
}
