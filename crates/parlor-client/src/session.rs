//! Chat session composition root.
//!
//! [`ChatSession`] owns the connection, the message log, and the
//! pending-outgoing buffer, and runs the sender and receiver as independent
//! tasks. The presentation layer drives it through three calls:
//! `submit_outgoing`, `messages`, and `state`.
//!
//! # Lifecycle
//!
//! `Disconnected -> Connecting` happens inside [`ChatSession::connect`];
//! a session handle only exists once `Connected`. Either task reporting a
//! fatal I/O error, or an explicit [`ChatSession::shutdown`], drives the
//! session to `Closed`, signals both tasks to stop, and unblocks any
//! in-flight read or write. `Closed` is terminal.

use std::sync::{Arc, Mutex, PoisonError};

use parlor_core::{
    MessageLog, PendingOutgoing, SessionConfig, SessionError, SessionState,
};
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    receiver, sender,
    transport::{ByteSource, Connection, FrameSink},
};

/// Lifecycle shared between the session handle and its tasks.
#[derive(Debug)]
struct Lifecycle {
    state: Mutex<SessionState>,
    shutdown: watch::Sender<bool>,
}

impl Lifecycle {
    /// Transition to `Closed` and signal both tasks. Idempotent; returns
    /// whether this call performed the transition.
    fn close(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.is_terminal() {
            return false;
        }
        *state = SessionState::Closed;
        drop(state);

        // Receivers may already be gone; a failed send just means both
        // tasks have stopped.
        let _ = self.shutdown.send(true);
        true
    }

    fn state(&self) -> SessionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A connected chat session.
///
/// Owns all session state explicitly: identity, connection halves, log,
/// and pending buffer. Dropping the handle signals the tasks to stop;
/// [`ChatSession::shutdown`] additionally awaits them.
#[derive(Debug)]
pub struct ChatSession {
    lifecycle: Arc<Lifecycle>,
    log: Arc<MessageLog>,
    outgoing: Arc<PendingOutgoing>,
    tasks: Mutex<Option<(JoinHandle<()>, JoinHandle<()>)>>,
}

impl ChatSession {
    /// Connect to the configured endpoint and start the session.
    ///
    /// Fails fast (no retry) if the connect fails; nothing is spawned in
    /// that case.
    ///
    /// # Errors
    ///
    /// - `SessionError::ConnectFailed` if the TCP connect fails or times out
    pub async fn connect(config: SessionConfig) -> Result<Self, SessionError> {
        tracing::info!(endpoint = %config.endpoint, name = config.identity.name(), "connecting");

        let connection = Connection::connect(&config.endpoint, config.connect_timeout).await?;
        let (sink, source) = connection.into_split();

        Ok(Self::with_transport(sink, source, config))
    }

    /// Start a session over an already-established transport.
    ///
    /// This is the seam for tests and alternative transports; production
    /// callers use [`ChatSession::connect`].
    pub fn with_transport(
        sink: impl FrameSink + 'static,
        source: impl ByteSource + 'static,
        config: SessionConfig,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let lifecycle = Arc::new(Lifecycle {
            state: Mutex::new(SessionState::Connected),
            shutdown: shutdown_tx,
        });
        let log = Arc::new(MessageLog::new());
        let outgoing = Arc::new(PendingOutgoing::new(config.max_input_len));

        let send_task = tokio::spawn(drive(
            Arc::clone(&lifecycle),
            "sender",
            sender::run(
                sink,
                config.identity.clone(),
                Arc::clone(&outgoing),
                Arc::clone(&log),
                config.local_echo,
                shutdown_rx.clone(),
            ),
        ));

        let recv_task = tokio::spawn(drive(
            Arc::clone(&lifecycle),
            "receiver",
            receiver::run(source, Arc::clone(&log), config.recv_buffer_capacity, shutdown_rx),
        ));

        Self { lifecycle, log, outgoing, tasks: Mutex::new(Some((send_task, recv_task))) }
    }

    /// Submit text for transmission.
    ///
    /// Carriage returns and newlines are stripped; the result is truncated
    /// to the configured maximum input length on a character boundary, then
    /// stored in the pending buffer and the sender is woken. A submission
    /// that becomes empty after stripping is a no-op.
    ///
    /// # Errors
    ///
    /// - `SessionError::ConnectionClosed` if the session is closed
    pub fn submit_outgoing(&self, text: &str) -> Result<(), SessionError> {
        if self.lifecycle.state().is_terminal() {
            return Err(SessionError::ConnectionClosed);
        }

        let cleaned: String = text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        if cleaned.is_empty() {
            return Ok(());
        }

        self.outgoing.submit(&cleaned);
        Ok(())
    }

    /// A point-in-time snapshot of the message log, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.log.snapshot()
    }

    /// Current lifecycle state. A presentation layer should stop accepting
    /// input once this reports [`SessionState::Closed`].
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lifecycle.state()
    }

    /// Close the session and wait for both tasks to stop.
    ///
    /// Idempotent: later calls (and calls racing a fatal I/O error) are
    /// no-ops that still wait for any not-yet-joined task. The connection
    /// halves are dropped exactly once, by the tasks that own them.
    pub async fn shutdown(&self) {
        if self.lifecycle.close() {
            tracing::info!("session shutting down");
        }

        let tasks = {
            let mut slot = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
            slot.take()
        };

        if let Some((send_task, recv_task)) = tasks {
            let _ = send_task.await;
            let _ = recv_task.await;
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        // Tasks hold their own Arc of the lifecycle; signalling is enough
        // for them to stop and release the socket halves.
        self.lifecycle.close();
    }
}

/// Await a task outcome and close the session when it ends.
///
/// Fatal I/O errors are converted into a single close signal here; the
/// tasks themselves never retry and never mask failures.
async fn drive(
    lifecycle: Arc<Lifecycle>,
    task: &'static str,
    fut: impl Future<Output = Result<(), SessionError>> + Send,
) {
    match fut.await {
        Ok(()) => tracing::debug!(task, "task stopped"),
        Err(err) => tracing::error!(task, %err, "fatal error, closing session"),
    }
    lifecycle.close();
}
