use crate::state::{ConnectionOutcome, PublishOutcome, RepoConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Configuration loaded or saved by the host shell.
    ConfigLoaded(RepoConfig),
    /// User edited the title field.
    TitleChanged(String),
    /// User edited the content area.
    ContentChanged(String),
    /// User asked to publish the current draft.
    PublishClicked,
    /// User asked to probe the repository connection.
    TestConnectionClicked,
    /// Engine completion for a publish attempt.
    PublishFinished { outcome: PublishOutcome },
    /// Engine completion for a connection probe.
    ConnectionTested { outcome: ConnectionOutcome },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
