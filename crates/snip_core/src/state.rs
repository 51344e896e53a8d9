use std::fmt;

use crate::view_model::{AppViewModel, HistoryRowView, SubmissionStatus};
use crate::{EntryId, History, HistoryEntry};

pub type SubmissionId = u64;

/// User-facing text for every failed submission, whatever its kind.
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Endpoint unreachable or non-2xx response.
    Network,
    /// 2xx response without a usable `short_url`.
    Protocol,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network failure"),
            FailureKind::Protocol => write!(f, "protocol failure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl ShortenFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// Lifecycle of the single submission slot.
///
/// The latest successful short URL only exists inside `Succeeded`, so a
/// stale result can never be shown next to an in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting {
        submission: SubmissionId,
        url: String,
    },
    Succeeded {
        short_url: String,
    },
    Failed(ShortenFailure),
}

/// Observable side-effect notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Shortened(String),
    SubmissionFailed,
    Copied(String),
    Deleted(EntryId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    history: History,
    submission: SubmissionState,
    input: String,
    last_submission: SubmissionId,
    last_entry_id: u64,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let (status, error_message) = match &self.submission {
            SubmissionState::Idle => (SubmissionStatus::Idle, None),
            SubmissionState::Submitting { .. } => (SubmissionStatus::Submitting, None),
            SubmissionState::Succeeded { .. } => (SubmissionStatus::Succeeded, None),
            SubmissionState::Failed(_) => {
                (SubmissionStatus::Failed, Some(FAILURE_MESSAGE.to_string()))
            }
        };
        AppViewModel {
            status,
            input: self.input.clone(),
            last_result: self.last_result().map(ToOwned::to_owned),
            error_message,
            history: self
                .history
                .iter()
                .map(|entry| HistoryRowView {
                    id: entry.id,
                    original_url: entry.original_url.clone(),
                    short_url: entry.short_url.clone(),
                })
                .collect(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionState::Submitting { .. })
    }

    /// Short URL of the most recent success, if it is still displayed.
    pub fn last_result(&self) -> Option<&str> {
        match &self.submission {
            SubmissionState::Succeeded { short_url } => Some(short_url),
            _ => None,
        }
    }

    /// Returns and clears the pending notice so it is shown once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn replace_history(&mut self, history: History) {
        if let Some(max) = history.max_id() {
            self.last_entry_id = self.last_entry_id.max(max.0);
        }
        self.history = history;
        self.mark_dirty();
    }

    /// Moves to `Submitting` for the current input and returns the new
    /// submission id together with the exact submitted text.
    pub(crate) fn begin_submission(&mut self) -> (SubmissionId, String) {
        self.last_submission += 1;
        let submission = self.last_submission;
        let url = self.input.clone();
        self.submission = SubmissionState::Submitting {
            submission,
            url: url.clone(),
        };
        self.mark_dirty();
        (submission, url)
    }

    /// The URL of the in-flight submission when `submission` matches it.
    pub(crate) fn in_flight_url(&self, submission: SubmissionId) -> Option<&str> {
        match &self.submission {
            SubmissionState::Submitting {
                submission: current,
                url,
            } if *current == submission => Some(url),
            _ => None,
        }
    }

    pub(crate) fn complete_success(&mut self, entry: HistoryEntry) {
        let short_url = entry.short_url.clone();
        self.history = self.history.prepend(entry);
        self.submission = SubmissionState::Succeeded {
            short_url: short_url.clone(),
        };
        self.input.clear();
        self.set_notice(Notice::Shortened(short_url));
    }

    pub(crate) fn complete_failure(&mut self, failure: ShortenFailure) {
        self.submission = SubmissionState::Failed(failure);
        self.set_notice(Notice::SubmissionFailed);
    }

    /// Fresh entry id: the observed creation time, bumped past every id
    /// handed out or loaded so far.
    pub(crate) fn next_entry_id(&mut self, created_at_ms: u64) -> EntryId {
        let id = created_at_ms.max(self.last_entry_id.saturating_add(1));
        self.last_entry_id = id;
        EntryId(id)
    }

    /// Removes `id` and reports whether the history held exactly that one
    /// entry before the removal.
    pub(crate) fn remove_entry(&mut self, id: EntryId) -> bool {
        let had_single_entry = self.history.len() == 1;
        self.history = self.history.remove(id);
        self.set_notice(Notice::Deleted(id));
        had_single_entry && self.history.is_empty()
    }

    pub(crate) fn clear_last_result(&mut self) {
        if matches!(self.submission, SubmissionState::Succeeded { .. }) {
            self.submission = SubmissionState::Idle;
            self.mark_dirty();
        }
    }
}
