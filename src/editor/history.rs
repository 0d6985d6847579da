//! Linear undo/redo history over summary text

use crate::word_count;

/// Ordered snapshots of the summary with a cursor on the one being shown.
///
/// The sequence is never empty and `cursor < snapshots.len()` always holds.
/// A new edit drops every snapshot after the cursor before appending, so a
/// redo branch does not survive an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditHistory {
    snapshots: Vec<String>,
    cursor: usize,
}

impl EditHistory {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            snapshots: vec![text.into()],
            cursor: 0,
        }
    }

    /// Replace the whole history with a single snapshot.
    pub fn load(&mut self, text: impl Into<String>) {
        self.snapshots.clear();
        self.snapshots.push(text.into());
        self.cursor = 0;
    }

    /// Record a new snapshot. Returns `false` when `text` equals the current
    /// snapshot and nothing was recorded.
    pub fn edit(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.current() {
            return false;
        }
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(text);
        self.cursor = self.snapshots.len() - 1;
        true
    }

    pub fn undo(&mut self) -> bool {
        if self.can_undo() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.can_redo() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn current(&self) -> &str {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true: the history always holds at least one snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn word_count(&self) -> usize {
        word_count(self.current())
    }

    /// Length of the current snapshot in Unicode scalar values, so an emoji
    /// outside the BMP counts once rather than as a UTF-16 surrogate pair.
    pub fn char_count(&self) -> usize {
        self.current().chars().count()
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(String::new())
    }
}
