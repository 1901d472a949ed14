use crate::effect::DraftSpec;
use crate::state::{ConnectionOutcome, ConnectionStatus, FailureClass, PublishOutcome, StatusLine};
use crate::{AppState, Effect, Msg, PublishState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ConfigLoaded(config) => {
            state.set_config(config);
            Vec::new()
        }
        Msg::TitleChanged(text) => {
            state.set_title_input(text);
            Vec::new()
        }
        Msg::ContentChanged(text) => {
            state.set_content_input(text);
            Vec::new()
        }
        Msg::PublishClicked => {
            // Caller-owned guard: overlapping publish requests are rejected,
            // never raced against the in-flight one.
            if state.session() == PublishState::Publishing {
                return (state, Vec::new());
            }
            let Some(config) = state.config().cloned() else {
                state.set_status(StatusLine::error(
                    "Configure the repository connection first",
                ));
                return (state, Vec::new());
            };
            if state.content_input().is_empty() {
                state.set_status(StatusLine::error("Post content is empty"));
                return (state, Vec::new());
            }
            let title = match state.title_input().trim() {
                "" => None,
                trimmed => Some(trimmed.to_string()),
            };
            let draft = DraftSpec {
                title,
                content: state.content_input().to_string(),
                date_prefix: config.date_prefix,
            };
            state.begin_publish();
            vec![Effect::StartPublish { draft }]
        }
        Msg::TestConnectionClicked => {
            if state.probing() {
                return (state, Vec::new());
            }
            if state.config().is_none() {
                state.set_status(StatusLine::error(
                    "Configure the repository connection first",
                ));
                return (state, Vec::new());
            }
            state.begin_probe();
            vec![Effect::ProbeConnection]
        }
        Msg::PublishFinished { outcome } => {
            state.end_publish();
            match outcome {
                PublishOutcome::Published { url } => {
                    state.clear_draft();
                    state.set_status(StatusLine::success(format!("Published: {url}")));
                }
                PublishOutcome::Rejected { failure, message } => {
                    state.set_status(StatusLine::error(publish_failure_text(failure, &message)));
                }
            }
            Vec::new()
        }
        Msg::ConnectionTested { outcome } => {
            state.end_probe();
            match outcome {
                ConnectionOutcome::Connected { login } => {
                    state.set_connection(ConnectionStatus::Connected {
                        login: login.clone(),
                    });
                    state.set_status(StatusLine::success(format!("Connected as {login}")));
                }
                ConnectionOutcome::Refused { failure, message } => {
                    state.set_connection(ConnectionStatus::Failed);
                    state.set_status(StatusLine::error(connection_failure_text(
                        failure, &message,
                    )));
                }
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn publish_failure_text(failure: FailureClass, message: &str) -> String {
    match failure {
        FailureClass::Authentication => {
            "Token invalid or expired; check the configuration".to_string()
        }
        FailureClass::NotFound => "Repository not found or not accessible".to_string(),
        FailureClass::Conflict => {
            "A post with this filename already exists; change the title".to_string()
        }
        FailureClass::Network => format!("Network error: {message}"),
        FailureClass::Configuration | FailureClass::Validation | FailureClass::Api => {
            format!("Publish failed: {message}")
        }
    }
}

fn connection_failure_text(failure: FailureClass, message: &str) -> String {
    match failure {
        FailureClass::Authentication => "Token invalid or expired".to_string(),
        FailureClass::NotFound => "Repository not found or not accessible".to_string(),
        _ => format!("Connection failed: {message}"),
    }
}
