//! Sender task.
//!
//! Drains the pending-outgoing buffer, frames each submission with the
//! session identity, and transmits it. Strictly event-driven: the task
//! suspends while the buffer is empty and is woken by `submit_outgoing`, so
//! an idle session burns no CPU.
//!
//! Any transmit failure is fatal: the task stops and the session closes.
//! Nothing is retried.

use std::sync::Arc;

use parlor_core::{Identity, MessageLog, PendingOutgoing, SessionError};
use parlor_proto::Frame;
use tokio::sync::watch;

use crate::transport::FrameSink;

/// Run the sender loop until shutdown or a fatal transmit error.
pub(crate) async fn run<S: FrameSink>(
    mut sink: S,
    identity: Identity,
    outgoing: Arc<PendingOutgoing>,
    log: Arc<MessageLog>,
    local_echo: bool,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), SessionError> {
    tracing::debug!(name = identity.name(), "sender task started");

    loop {
        tokio::select! {
            _ = shutdown.changed() => return Ok(()),
            () = outgoing.wait_nonempty() => {},
        }

        // A shutdown racing the wakeup may have drained nothing; re-check.
        let Some(text) = outgoing.take() else { continue };

        let frame = Frame::new(identity.name(), &text)?;
        let payload = frame.encode_to_vec();

        // The write itself can block indefinitely on an unresponsive peer;
        // shutdown must cancel it as well as the idle wait.
        tokio::select! {
            _ = shutdown.changed() => return Ok(()),
            sent = sink.send(&payload) => sent?,
        }
        tracing::trace!(bytes = frame.encoded_len(), "frame sent");

        if local_echo {
            log.append(frame.display());
        }
    }
}
