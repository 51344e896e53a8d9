use crate::{EntryId, History, ShortenFailure, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// History read from durable storage at startup.
    HistoryLoaded(History),
    /// User edited the URL input field.
    InputChanged(String),
    /// User submitted the current URL input.
    Submitted,
    /// Remote service answered (or failed) for a dispatched submission.
    ShortenFinished {
        submission: SubmissionId,
        /// Unix milliseconds at which the completion was observed.
        created_at_ms: u64,
        result: Result<String, ShortenFailure>,
    },
    /// User asked to copy a short URL.
    CopyRequested(String),
    /// User asked to delete a history entry.
    DeleteRequested(EntryId),
}
