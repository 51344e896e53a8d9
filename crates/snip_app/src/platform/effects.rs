use std::sync::mpsc;
use std::thread;

use chrono::Utc;
use snip_core::{Effect, FailureKind, Msg, ShortenFailure};
use snip_engine::{EngineEvent, EngineEvents, EngineHandle, ShortenError, ShortenOutput};
use snip_logging::{snip_debug, snip_error, snip_info, snip_warn};

use super::clipboard::ClipboardWriter;
use super::controller::AppEvent;
use super::persistence::HistoryStore;

/// Executes the effects emitted by the core against the engine, the history
/// file and the clipboard.
pub struct EffectRunner {
    engine: EngineHandle,
    store: HistoryStore,
    clipboard: Box<dyn ClipboardWriter>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        store: HistoryStore,
        clipboard: Box<dyn ClipboardWriter>,
    ) -> Self {
        Self {
            engine,
            store,
            clipboard,
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Shorten { submission, url } => {
                    snip_info!(
                        "Shorten submission={} url_len={} url={}",
                        submission,
                        url.len(),
                        url
                    );
                    self.engine.shorten(submission, url);
                }
                Effect::PersistHistory(history) => {
                    if let Err(err) = self.store.save(&history) {
                        snip_error!(
                            "Failed to write history to {:?}: {}",
                            self.store.path(),
                            err
                        );
                    }
                }
                Effect::CopyToClipboard { text } => {
                    // Clipboard failures are not reported back to the user.
                    match self.clipboard.write_text(&text) {
                        Ok(()) => snip_debug!("Copied {} to clipboard", text),
                        Err(err) => snip_warn!("Clipboard copy ignored: {}", err),
                    }
                }
            }
        }
    }
}

/// Forwards engine completions into the app event channel until either side
/// goes away.
pub fn spawn_event_forwarder(
    events: EngineEvents,
    tx: mpsc::Sender<AppEvent>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("snip-events".to_string())
        .spawn(move || {
            while let Some(event) = events.recv() {
                let msg = map_event(event, now_ms());
                if tx.send(AppEvent::Core(msg)).is_err() {
                    break;
                }
            }
        })
}

fn now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

fn map_event(event: EngineEvent, created_at_ms: u64) -> Msg {
    match event {
        EngineEvent::ShortenCompleted { submission, result } => Msg::ShortenFinished {
            submission,
            created_at_ms,
            result: map_result(result),
        },
    }
}

fn map_result(result: Result<ShortenOutput, ShortenError>) -> Result<String, ShortenFailure> {
    match result {
        Ok(output) => Ok(output.short_url),
        Err(err) => {
            let kind = if err.is_network() {
                FailureKind::Network
            } else {
                FailureKind::Protocol
            };
            Err(ShortenFailure::new(kind, err.to_string()))
        }
    }
}
