//! Summary editor
//!
//! Linear undo/redo over the summary text, debounced autosave, and the
//! share-by-email form with its mail transport seam.

pub mod autosave;
pub mod gate;
pub mod history;
pub mod share;
mod summary_editor;

pub use autosave::{Autosave, DraftSink, LatestDraft, SaveStatus};
pub use gate::{InFlight, InFlightGuard};
pub use history::EditHistory;
pub use share::{
    Delivery, EmailShareRequest, Mailer, ShareComposer, ShareDraft, ShareOutcome, StubMailer,
};
pub use summary_editor::{download_file_name, SummaryEditor};
