//! Receiver task.
//!
//! Blocks on the transport for incoming bytes, restores frame boundaries
//! through the incremental decoder, and appends each decoded display string
//! to the shared message log.
//!
//! Any receive failure is fatal, including the peer closing the stream or
//! violating the wire format: the task stops and the session closes.

use std::sync::Arc;

use parlor_core::{MessageLog, SessionError};
use parlor_proto::FrameDecoder;
use tokio::sync::watch;

use crate::transport::ByteSource;

/// Run the receiver loop until shutdown or a fatal receive error.
pub(crate) async fn run<R: ByteSource>(
    mut source: R,
    log: Arc<MessageLog>,
    recv_buffer_capacity: usize,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), SessionError> {
    tracing::debug!(capacity = recv_buffer_capacity, "receiver task started");

    let mut decoder = FrameDecoder::default();
    let mut buf = vec![0u8; recv_buffer_capacity.max(1)];

    loop {
        let read = tokio::select! {
            _ = shutdown.changed() => return Ok(()),
            read = source.recv(&mut buf) => read?,
        };

        if read == 0 {
            return Err(SessionError::RecvFailed {
                reason: "peer closed the connection".to_owned(),
            });
        }

        for entry in decoder.push(&buf[..read])? {
            tracing::trace!(entry = %entry, "message received");
            log.append(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, time::Duration};

    use async_trait::async_trait;
    use tokio::time::timeout;

    use super::*;

    /// Source that replays scripted reads, then reports peer close.
    struct ScriptedSource {
        chunks: VecDeque<Vec<u8>>,
    }

    impl ScriptedSource {
        fn new(chunks: &[&[u8]]) -> Self {
            Self { chunks: chunks.iter().map(|c| c.to_vec()).collect() }
        }
    }

    #[async_trait]
    impl ByteSource for ScriptedSource {
        async fn recv(&mut self, buf: &mut [u8]) -> Result<usize, SessionError> {
            match self.chunks.pop_front() {
                Some(chunk) => {
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                },
                None => Ok(0),
            }
        }
    }

    async fn run_to_completion(source: ScriptedSource) -> (Vec<String>, Result<(), SessionError>) {
        let log = Arc::new(MessageLog::new());
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let result = timeout(
            Duration::from_secs(5),
            run(source, Arc::clone(&log), 4096, shutdown_rx),
        )
        .await
        .expect("receiver should stop once the script ends");

        (log.snapshot(), result)
    }

    #[tokio::test]
    async fn decodes_concatenated_frames_from_one_read() {
        let source = ScriptedSource::new(&[b"[A] hello\n[B] world\n"]);
        let (entries, result) = run_to_completion(source).await;

        assert_eq!(entries, vec!["[A] hello", "[B] world"]);
        assert!(matches!(result, Err(SessionError::RecvFailed { .. })));
    }

    #[tokio::test]
    async fn undelimited_read_appends_nothing() {
        // Pinned framing policy: no delimiter, no log entry.
        let source = ScriptedSource::new(&[b"[A] hello[B] world"]);
        let (entries, _result) = run_to_completion(source).await;

        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn partial_frames_complete_across_reads() {
        let source = ScriptedSource::new(&[b"[alice] he", b"llo\n[bob] ", b"hi\n"]);
        let (entries, _result) = run_to_completion(source).await;

        assert_eq!(entries, vec!["[alice] hello", "[bob] hi"]);
    }

    #[tokio::test]
    async fn malformed_stream_is_fatal() {
        let source = ScriptedSource::new(&[b"[alice] \xff\xfe\n"]);
        let (entries, result) = run_to_completion(source).await;

        assert!(entries.is_empty());
        assert!(matches!(result, Err(SessionError::Protocol(_))));
    }

    #[tokio::test]
    async fn shutdown_unblocks_a_waiting_receiver() {
        /// Source that never yields data.
        struct SilentSource;

        #[async_trait]
        impl ByteSource for SilentSource {
            async fn recv(&mut self, _buf: &mut [u8]) -> Result<usize, SessionError> {
                std::future::pending().await
            }
        }

        let log = Arc::new(MessageLog::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(run(SilentSource, log, 4096, shutdown_rx));
        shutdown_tx.send(true).unwrap();

        let result = timeout(Duration::from_secs(1), task).await.expect("must not leak");
        assert!(result.unwrap().is_ok());
    }
}
