use std::fmt;

use thiserror::Error;

pub type SubmissionId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ShortenCompleted {
        submission: SubmissionId,
        result: Result<ShortenOutput, ShortenError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutput {
    pub short_url: String,
    /// Bare code as reported by the service, when present.
    pub short_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ShortenError {
    pub kind: FailureKind,
    pub message: String,
}

impl ShortenError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        self.kind.is_network()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport failure: endpoint unreachable, connection reset, bad endpoint.
    Network,
    /// Non-2xx response.
    HttpStatus(u16),
    /// 2xx response whose body lacks a usable `short_url`.
    Protocol,
}

impl FailureKind {
    /// Network and HTTP status failures form one class; only `Protocol` differs.
    pub fn is_network(self) -> bool {
        !matches!(self, FailureKind::Protocol)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Protocol => write!(f, "protocol error"),
        }
    }
}
