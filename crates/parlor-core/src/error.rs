//! Error types for the chat session.
//!
//! Strongly-typed errors for the session lifecycle. Network failures are
//! fatal to the session (nothing is retried); `ConnectionClosed` and
//! `InvalidIdentity` are caller errors that leave nothing to tear down.

use thiserror::Error;

/// Errors surfaced by the session and its I/O tasks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Connecting to the server failed. Fatal at startup; session creation
    /// is aborted.
    #[error("connect failed: {reason}")]
    ConnectFailed {
        /// Why the connection could not be established.
        reason: String,
    },

    /// Transmitting a frame failed. Fatal to an established session.
    #[error("send failed: {reason}")]
    SendFailed {
        /// Underlying I/O failure.
        reason: String,
    },

    /// Receiving from the server failed. Fatal to an established session.
    #[error("receive failed: {reason}")]
    RecvFailed {
        /// Underlying I/O failure.
        reason: String,
    },

    /// Operation attempted after the session closed. Caller error, not
    /// transient.
    #[error("connection closed")]
    ConnectionClosed,

    /// The peer violated the wire format. Fatal to an established session.
    #[error("protocol error: {0}")]
    Protocol(#[from] parlor_proto::ProtocolError),

    /// The display name cannot be carried by the wire format.
    #[error("invalid identity: {reason}")]
    InvalidIdentity {
        /// What was wrong with the name.
        reason: &'static str,
    },
}

impl SessionError {
    /// Returns true if this error ends the active session.
    ///
    /// Fatal errors are always terminal: the session closes, both I/O tasks
    /// stop, and nothing is retried. Non-fatal errors are caller mistakes
    /// that leave the session (if any) untouched.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConnectFailed { .. }
                | Self::SendFailed { .. }
                | Self::RecvFailed { .. }
                | Self::Protocol(_)
        )
    }
}
