//! TCP transport for the session.
//!
//! Provides [`Connection`] which owns the socket, plus the [`FrameSink`] and
//! [`ByteSource`] traits the sender and receiver tasks run against. TCP
//! halves implement the traits in production; tests substitute scripted
//! mocks, so every concurrency property of the session can be exercised
//! without a network.

use std::time::Duration;

use async_trait::async_trait;
use parlor_core::{Endpoint, SessionError};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};

/// Write side of the transport: blocking full-write of encoded frames.
#[async_trait]
pub trait FrameSink: Send {
    /// Write the entire payload, retrying partial writes internally.
    ///
    /// # Errors
    ///
    /// - `SessionError::SendFailed` on any hard I/O error; fatal to the
    ///   session
    async fn send(&mut self, bytes: &[u8]) -> Result<(), SessionError>;
}

/// Read side of the transport: blocking read of whatever is available.
#[async_trait]
pub trait ByteSource: Send {
    /// Read at least one byte into `buf`, blocking until data arrives.
    ///
    /// Returns `Ok(0)` when the peer closed the stream. No message framing
    /// is guaranteed: a single call may return a partial or concatenated
    /// payload.
    ///
    /// # Errors
    ///
    /// - `SessionError::RecvFailed` on any hard I/O error; fatal to the
    ///   session
    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize, SessionError>;
}

/// One live TCP stream bound to an [`Endpoint`].
///
/// At most one live stream exists per session. Splitting hands exclusive
/// ownership of each half to one task, so neither path ever holds a lock
/// across an I/O call.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
}

impl Connection {
    /// Resolve the endpoint and connect, failing fast after `timeout`.
    ///
    /// No retry: the caller decides whether a failed connect aborts the
    /// process.
    ///
    /// # Errors
    ///
    /// - `SessionError::ConnectFailed` if resolution, connect, or the
    ///   timeout fails
    pub async fn connect(endpoint: &Endpoint, timeout: Duration) -> Result<Self, SessionError> {
        let addr = endpoint.to_string();

        let stream = tokio::time::timeout(timeout, TcpStream::connect(addr.as_str()))
            .await
            .map_err(|_| SessionError::ConnectFailed {
                reason: format!("no connection to {addr} after {timeout:?}"),
            })?
            .map_err(|err| SessionError::ConnectFailed { reason: err.to_string() })?;

        // Chat frames are tiny; do not let Nagle delay them.
        if let Err(err) = stream.set_nodelay(true) {
            tracing::debug!(%err, "set_nodelay failed");
        }

        tracing::info!(%addr, "connected");
        Ok(Self { stream })
    }

    /// Split into owned sink and source halves for the two I/O tasks.
    #[must_use]
    pub fn into_split(self) -> (TcpFrameSink, TcpByteSource) {
        let (read, write) = self.stream.into_split();
        (TcpFrameSink { half: write }, TcpByteSource { half: read })
    }
}

/// [`FrameSink`] over the write half of a TCP stream.
#[derive(Debug)]
pub struct TcpFrameSink {
    half: OwnedWriteHalf,
}

#[async_trait]
impl FrameSink for TcpFrameSink {
    async fn send(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        self.half
            .write_all(bytes)
            .await
            .map_err(|err| SessionError::SendFailed { reason: err.to_string() })
    }
}

/// [`ByteSource`] over the read half of a TCP stream.
#[derive(Debug)]
pub struct TcpByteSource {
    half: OwnedReadHalf,
}

#[async_trait]
impl ByteSource for TcpByteSource {
    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize, SessionError> {
        self.half
            .read(buf)
            .await
            .map_err(|err| SessionError::RecvFailed { reason: err.to_string() })
    }
}
