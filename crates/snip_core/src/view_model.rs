use crate::{EntryId, Notice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: SubmissionStatus,
    pub input: String,
    /// Latest short URL to display (and encode as a scannable code).
    pub last_result: Option<String>,
    pub error_message: Option<String>,
    /// Newest first.
    pub history: Vec<HistoryRowView>,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: EntryId,
    pub original_url: String,
    pub short_url: String,
}
