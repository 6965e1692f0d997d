//! Session lifecycle states.

/// Lifecycle of a chat session.
///
/// ```text
/// Disconnected ──connect()──> Connecting ──socket up──> Connected
///                                  │                        │
///                                  │ connect error          │ shutdown() or
///                                  ↓                        ↓ fatal I/O error
///                             (no session)               Closed
/// ```
///
/// `Closed` is terminal: the connection is released, both I/O tasks stop,
/// and no further operations are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No connection attempt has started.
    Disconnected,

    /// TCP connect in progress.
    Connecting,

    /// Connection established; sender and receiver tasks running.
    Connected,

    /// Session over. Terminal.
    Closed,
}

impl SessionState {
    /// Whether this state is terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Closed
    }
}
