//! Concurrent TCP networking core for the parlor chat client.
//!
//! Maintains one persistent connection to a chat server and runs independent
//! send and receive tasks alongside the caller's own loop. Incoming and
//! outgoing messages are published into a shared, ordered [`MessageLog`]
//! that a presentation layer (GUI, terminal, or test harness) polls once
//! per frame.
//!
//! # Components
//!
//! - [`transport`]: the TCP [`transport::Connection`] and the
//!   [`transport::FrameSink`]/[`transport::ByteSource`] seam the I/O tasks
//!   run against
//! - [`ChatSession`]: composition root owning the connection, the log, the
//!   pending-outgoing buffer, and both tasks
//!
//! # Data flow
//!
//! ```text
//! caller ──submit_outgoing──> PendingOutgoing ──> Sender ──> TCP
//! TCP ──> Receiver ──decode──> MessageLog <──messages── caller
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod receiver;
mod sender;
mod session;
pub mod transport;

pub use parlor_core::{
    Endpoint, Identity, MessageLog, PendingOutgoing, SessionConfig, SessionError, SessionState,
};
pub use session::ChatSession;
