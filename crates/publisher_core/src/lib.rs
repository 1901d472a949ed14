//! Publisher core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{DraftSpec, Effect};
pub use msg::Msg;
pub use state::{
    AppState, ConnectionOutcome, ConnectionStatus, FailureClass, PublishOutcome, PublishState,
    RepoConfig, StatusLevel, StatusLine,
};
pub use update::update;
pub use view_model::AppViewModel;
