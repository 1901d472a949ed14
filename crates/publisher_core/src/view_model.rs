use crate::state::{ConnectionStatus, PublishState, StatusLine};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: PublishState,
    pub probing: bool,
    pub connection: ConnectionStatus,
    pub status: Option<StatusLine>,
    pub title: String,
    pub char_count: usize,
    pub can_publish: bool,
}
