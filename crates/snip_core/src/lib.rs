//! Snip core: pure submission/history state machine and view-model helpers.
mod effect;
mod history;
mod input;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use history::{EntryId, History, HistoryEntry};
pub use input::{check_url_input, UrlInput};
pub use msg::Msg;
pub use state::{
    AppState, FailureKind, Notice, ShortenFailure, SubmissionId, SubmissionState, FAILURE_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, HistoryRowView, SubmissionStatus};
