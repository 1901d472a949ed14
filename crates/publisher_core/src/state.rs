use crate::view_model::AppViewModel;

/// Publish session: the caller-owned guard that keeps at most one publish
/// in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishState {
    #[default]
    Idle,
    Publishing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Unknown,
    Connected {
        login: String,
    },
    Failed,
}

/// Classification of a publish or connection failure, mirrored from the
/// engine by the effect runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Configuration,
    Validation,
    Authentication,
    NotFound,
    Conflict,
    Api,
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published { url: String },
    Rejected { failure: FailureClass, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionOutcome {
    Connected { login: String },
    Refused { failure: FailureClass, message: String },
}

/// Resolved repository configuration as loaded by the host shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub date_prefix: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One line of user-facing feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    config: Option<RepoConfig>,
    title_input: String,
    content_input: String,
    session: PublishState,
    probing: bool,
    connection: ConnectionStatus,
    status: Option<StatusLine>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            probing: self.probing,
            connection: self.connection.clone(),
            status: self.status.clone(),
            title: self.title_input.clone(),
            char_count: self.content_input.chars().count(),
            can_publish: self.config.is_some()
                && self.session == PublishState::Idle
                && !self.content_input.is_empty(),
        }
    }

    /// Returns the dirty flag and clears it; the shell re-renders when true.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn session(&self) -> PublishState {
        self.session
    }

    pub(crate) fn probing(&self) -> bool {
        self.probing
    }

    pub(crate) fn config(&self) -> Option<&RepoConfig> {
        self.config.as_ref()
    }

    pub(crate) fn title_input(&self) -> &str {
        &self.title_input
    }

    pub(crate) fn content_input(&self) -> &str {
        &self.content_input
    }

    pub(crate) fn set_config(&mut self, config: RepoConfig) {
        self.config = Some(config);
        self.connection = ConnectionStatus::Unknown;
        self.dirty = true;
    }

    pub(crate) fn set_title_input(&mut self, text: String) {
        self.title_input = text;
        self.dirty = true;
    }

    pub(crate) fn set_content_input(&mut self, text: String) {
        self.content_input = text;
        self.dirty = true;
    }

    pub(crate) fn begin_publish(&mut self) {
        self.session = PublishState::Publishing;
        self.status = Some(StatusLine::info("Publishing..."));
        self.dirty = true;
    }

    pub(crate) fn end_publish(&mut self) {
        self.session = PublishState::Idle;
        self.dirty = true;
    }

    pub(crate) fn begin_probe(&mut self) {
        self.probing = true;
        self.status = Some(StatusLine::info("Testing connection..."));
        self.dirty = true;
    }

    pub(crate) fn end_probe(&mut self) {
        self.probing = false;
        self.dirty = true;
    }

    pub(crate) fn set_connection(&mut self, connection: ConnectionStatus) {
        self.connection = connection;
        self.dirty = true;
    }

    pub(crate) fn set_status(&mut self, status: StatusLine) {
        self.status = Some(status);
        self.dirty = true;
    }

    pub(crate) fn clear_draft(&mut self) {
        self.title_input.clear();
        self.content_input.clear();
        self.dirty = true;
    }
}
