use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use snip_logging::{snip_debug, snip_info, snip_warn};

use crate::client::{ReqwestShortenClient, ShortenClient, ShortenSettings};
use crate::{EngineEvent, ShortenError, ShortenOutput, SubmissionId};

enum EngineCommand {
    Shorten { submission: SubmissionId, url: String },
}

/// Sends shortening requests to a background runtime thread.
///
/// Requests run to completion: there is no cancel command and no timeout.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side for completions produced by an [`EngineHandle`].
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ShortenSettings) -> io::Result<(Self, EngineEvents)> {
        Self::with_client(Arc::new(ReqwestShortenClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn ShortenClient>) -> io::Result<(Self, EngineEvents)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("snip-engine-cmd".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(client.as_ref(), command, event_tx).await;
                    });
                }
                snip_debug!("engine command channel closed");
            })?;

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn shorten(&self, submission: SubmissionId, url: impl Into<String>) {
        if self
            .cmd_tx
            .send(EngineCommand::Shorten {
                submission,
                url: url.into(),
            })
            .is_err()
        {
            snip_warn!("engine stopped; submission {} not sent", submission);
        }
    }
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next completion; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn ShortenClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Shorten { submission, url } => {
            let result: Result<ShortenOutput, ShortenError> = client.shorten(&url).await;
            match &result {
                Ok(output) => snip_info!(
                    "submission {} shortened to {}",
                    submission,
                    output.short_url
                ),
                Err(err) => snip_warn!("submission {} failed: {}", submission, err),
            }
            let _ = event_tx.send(EngineEvent::ShortenCompleted { submission, result });
        }
    }
}
