use std::sync::{mpsc, Mutex};
use std::thread;

use publisher_logging::{publish_info, publish_warn};

use crate::client::{GitHubClient, RepositoryClient};
use crate::publish::{publish_draft, PostDraft};
use crate::repo::Credentials;
use crate::types::{EngineEvent, PublishError};

enum EngineCommand {
    Publish {
        credentials: Credentials,
        draft: PostDraft,
    },
    TestConnection {
        credentials: Credentials,
    },
}

/// Handle to the engine thread. Commands run one at a time on a dedicated
/// Tokio runtime, so at most one publish is ever in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    // Mutex so the handle stays shareable across threads; contention is nil
    // since a single event loop polls it.
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let event = runtime.block_on(handle_command(command));
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn enqueue_publish(&self, credentials: Credentials, draft: PostDraft) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Publish { credentials, draft });
    }

    pub fn enqueue_connection_test(&self, credentials: Credentials) {
        let _ = self.cmd_tx.send(EngineCommand::TestConnection { credentials });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::new()
    }
}

async fn handle_command(command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Publish { credentials, draft } => {
            let result = match GitHubClient::new(credentials) {
                Ok(client) => publish_draft(&client, &draft).await,
                Err(err) => Err(PublishError::from(err)),
            };
            match &result {
                Ok(post) => publish_info!("Published {}", post.html_url),
                Err(err) => publish_warn!("Publish failed: {err}"),
            }
            EngineEvent::PublishCompleted { result }
        }
        EngineCommand::TestConnection { credentials } => {
            let result = match GitHubClient::new(credentials) {
                Ok(client) => client
                    .test_connection()
                    .await
                    .map_err(PublishError::from),
                Err(err) => Err(PublishError::from(err)),
            };
            EngineEvent::ConnectionTested { result }
        }
    }
}
