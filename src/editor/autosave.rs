//! Debounced autosave: a single cancellable timer, rescheduled on every edit

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Receives the summary text once edits have gone quiet.
pub trait DraftSink: Send + Sync {
    fn flush(&self, text: &str);
}

impl<F> DraftSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn flush(&self, text: &str) {
        self(text)
    }
}

/// Keeps only the most recently flushed draft in memory.
#[derive(Debug, Default)]
pub struct LatestDraft {
    inner: Mutex<Option<String>>,
}

impl LatestDraft {
    pub fn get(&self) -> Option<String> {
        lock(&self.inner).clone()
    }
}

impl DraftSink for LatestDraft {
    fn flush(&self, text: &str) {
        *lock(&self.inner) = Some(text.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// A flush is scheduled and has not run yet
    Saving,
    Saved,
}

#[derive(Debug, Default)]
struct TimerState {
    /// Bumped on every schedule/cancel; a timer only flushes if it still
    /// holds the latest generation.
    generation: u64,
    saving: bool,
}

pub struct Autosave {
    quiet: Duration,
    sink: Arc<dyn DraftSink>,
    state: Arc<Mutex<TimerState>>,
    pending: Option<JoinHandle<()>>,
}

impl Autosave {
    pub fn new(quiet: Duration, sink: Arc<dyn DraftSink>) -> Self {
        Self {
            quiet,
            sink,
            state: Arc::default(),
            pending: None,
        }
    }

    /// Schedule `text` to be flushed after the quiet period, replacing any
    /// flush that is still pending.
    ///
    /// The timer runs on the current tokio runtime. Outside a runtime there
    /// is nothing to debounce on, so the text is flushed immediately.
    pub fn schedule(&mut self, text: String) {
        let Ok(runtime) = Handle::try_current() else {
            warn!("No tokio runtime for autosave timer, flushing draft immediately");
            self.flush_now(&text);
            return;
        };

        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.saving = true;
            state.generation
        };
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let quiet = self.quiet;
        let sink = self.sink.clone();
        let state = self.state.clone();
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(quiet).await;

            // Flush under the lock so a concurrent cancel cannot interleave.
            let mut state = lock(&state);
            if state.generation != generation {
                return;
            }
            sink.flush(&text);
            state.saving = false;
            debug!("Autosaved summary draft ({} chars)", text.chars().count());
        }));
    }

    fn flush_now(&mut self, text: &str) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let mut state = lock(&self.state);
        state.generation += 1;
        self.sink.flush(text);
        state.saving = false;
    }

    /// Drop any pending flush.
    pub fn cancel(&mut self) {
        {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.saving = false;
        }
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn status(&self) -> SaveStatus {
        if lock(&self.state).saving {
            SaveStatus::Saving
        } else {
            SaveStatus::Saved
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_sink() -> (Arc<dyn DraftSink>, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = seen.clone();
        let sink: Arc<dyn DraftSink> =
            Arc::new(move |text: &str| sink_seen.lock().unwrap().push(text.to_string()));
        (sink, seen)
    }

    #[test]
    fn without_a_runtime_edits_flush_immediately() {
        let (sink, seen) = recording_sink();
        let mut autosave = Autosave::new(Duration::from_millis(10), sink);

        autosave.schedule("a".to_string());
        autosave.schedule("ab".to_string());

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["a".to_string(), "ab".to_string()]
        );
        assert_eq!(autosave.status(), SaveStatus::Saved);
        autosave.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn only_last_edit_in_a_burst_is_flushed() {
        let (sink, seen) = recording_sink();
        let mut autosave = Autosave::new(Duration::from_millis(1000), sink);

        autosave.schedule("a".to_string());
        tokio::time::sleep(Duration::from_millis(500)).await;
        autosave.schedule("ab".to_string());
        tokio::time::sleep(Duration::from_millis(500)).await;
        autosave.schedule("abc".to_string());
        assert_eq!(autosave.status(), SaveStatus::Saving);

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(*seen.lock().unwrap(), vec!["abc".to_string()]);
        assert_eq!(autosave.status(), SaveStatus::Saved);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_flush() {
        let (sink, seen) = recording_sink();
        let mut autosave = Autosave::new(Duration::from_millis(1000), sink);

        autosave.schedule("draft".to_string());
        tokio::time::sleep(Duration::from_millis(900)).await;
        autosave.cancel();
        assert_eq!(autosave.status(), SaveStatus::Saved);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_flush_separately() {
        let (sink, seen) = recording_sink();
        let mut autosave = Autosave::new(Duration::from_millis(200), sink);

        autosave.schedule("first".to_string());
        tokio::time::sleep(Duration::from_millis(300)).await;
        autosave.schedule("second".to_string());
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn latest_draft_keeps_most_recent_flush() {
        let latest = Arc::new(LatestDraft::default());
        let mut autosave = Autosave::new(Duration::from_millis(50), latest.clone());

        assert_eq!(latest.get(), None);
        autosave.schedule("v1".to_string());
        tokio::time::sleep(Duration::from_millis(60)).await;
        autosave.schedule("v2".to_string());
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(latest.get().as_deref(), Some("v2"));
    }
}
