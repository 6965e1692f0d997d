//! Session primitives for the parlor chat client.
//!
//! Runtime-free building blocks shared by the networking core and any
//! presentation layer:
//!
//! - [`Endpoint`] and [`SessionConfig`]: where to connect and how
//! - [`Identity`]: the fixed display name prefixed onto outgoing messages
//! - [`MessageLog`]: thread-safe append-only transcript with snapshot reads
//! - [`PendingOutgoing`]: bounded single-slot outgoing buffer with an
//!   event-driven wakeup for the sender
//! - [`SessionState`] and [`SessionError`]: lifecycle and failure taxonomy
//!
//! Everything here is owned explicitly by the session that creates it; there
//! is no process-wide mutable state.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod error;
mod identity;
mod log;
mod outgoing;
mod state;

pub use config::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_INPUT_LEN, DEFAULT_PORT, DEFAULT_RECV_BUFFER_CAPACITY,
    Endpoint, SessionConfig,
};
pub use error::SessionError;
pub use identity::{Identity, MAX_NAME_LEN};
pub use log::MessageLog;
pub use outgoing::PendingOutgoing;
pub use state::SessionState;
