use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use publisher_core::{
    ConnectionOutcome, DraftSpec, Effect, FailureClass, Msg, PublishOutcome, RepoConfig,
};
use publisher_engine::{
    ApiFailure, Credentials, EngineEvent, EngineHandle, PostDraft, PostOptions, PublishError,
};
use publisher_logging::publish_info;

/// Target directory for posts; fixed by the publishing surface.
const POSTS_DIRECTORY: &str = "posts";

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    config: RepoConfig,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, config: RepoConfig) -> Self {
        let runner = Self {
            engine: Arc::new(EngineHandle::new()),
            config,
        };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartPublish { draft } => {
                    publish_info!(
                        "StartPublish title={:?} content_len={}",
                        draft.title,
                        draft.content.len()
                    );
                    self.engine
                        .enqueue_publish(self.credentials(), map_draft(draft));
                }
                Effect::ProbeConnection => {
                    publish_info!(
                        "ProbeConnection owner={} repo={}",
                        self.config.owner,
                        self.config.repo
                    );
                    self.engine.enqueue_connection_test(self.credentials());
                }
            }
        }
    }

    fn credentials(&self) -> Credentials {
        Credentials::new(
            self.config.token.clone(),
            self.config.owner.clone(),
            self.config.repo.clone(),
        )
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = Arc::clone(&self.engine);
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_draft(draft: DraftSpec) -> PostDraft {
    PostDraft {
        title: draft.title,
        content: draft.content,
        options: PostOptions {
            directory: POSTS_DIRECTORY.to_string(),
            date_prefix: draft.date_prefix,
            filename: None,
        },
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PublishCompleted { result } => Msg::PublishFinished {
            outcome: match result {
                Ok(post) => PublishOutcome::Published { url: post.html_url },
                Err(err) => {
                    let (failure, message) = map_publish_error(&err);
                    PublishOutcome::Rejected { failure, message }
                }
            },
        },
        EngineEvent::ConnectionTested { result } => Msg::ConnectionTested {
            outcome: match result {
                Ok(identity) => ConnectionOutcome::Connected {
                    login: identity.login,
                },
                Err(err) => {
                    let (failure, message) = map_publish_error(&err);
                    ConnectionOutcome::Refused { failure, message }
                }
            },
        },
    }
}

fn map_publish_error(err: &PublishError) -> (FailureClass, String) {
    match err {
        PublishError::Config(err) => (FailureClass::Configuration, err.to_string()),
        PublishError::Validation(err) => (FailureClass::Validation, err.to_string()),
        PublishError::Api(err) => {
            let failure = match err.kind {
                ApiFailure::Authentication => FailureClass::Authentication,
                ApiFailure::NotFound => FailureClass::NotFound,
                ApiFailure::Conflict => FailureClass::Conflict,
                ApiFailure::Api => FailureClass::Api,
                ApiFailure::Network => FailureClass::Network,
            };
            (failure, err.message.clone())
        }
    }
}
