use crate::{History, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Shorten { submission: SubmissionId, url: String },
    /// Overwrite durable storage with the full history.
    PersistHistory(History),
    CopyToClipboard { text: String },
}
