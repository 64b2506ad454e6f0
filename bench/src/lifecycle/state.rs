use derive_more::Display;

/// State of a single managed server process.
///
/// `NotStarted -> Starting -> Ready -> Stopping -> Stopped`, with `Unresponsive`
/// reachable from `Starting` or `Ready`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum ServerState {
    #[default]
    #[display("not started")]
    NotStarted,
    #[display("starting")]
    Starting,
    #[display("ready")]
    Ready,
    #[display("stopping")]
    Stopping,
    #[display("stopped")]
    Stopped,
    #[display("unresponsive")]
    Unresponsive,
}

impl ServerState {
    pub fn can_transition_to(&self, next: ServerState) -> bool {
        use ServerState::*;
        matches!(
            (self, next),
            (NotStarted | Stopped, Starting)
                | (Starting, Ready)
                | (Starting | Ready, Unresponsive)
                | (Starting | Ready | Unresponsive, Stopping)
                | (Stopping, Stopped)
        )
    }
}
