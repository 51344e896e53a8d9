//! Snip engine: remote shortening client, background request runner and
//! atomic file persistence.
mod client;
mod engine;
mod persist;
mod types;

pub use client::{ReqwestShortenClient, ShortenClient, ShortenSettings, DEFAULT_ENDPOINT};
pub use engine::{EngineEvents, EngineHandle};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use types::{EngineEvent, FailureKind, ShortenError, ShortenOutput, SubmissionId};
