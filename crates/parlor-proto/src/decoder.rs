//! Incremental frame decoder.
//!
//! TCP delivers an unframed byte stream: one read may yield a partial frame,
//! several concatenated frames, or exactly one. The decoder accumulates
//! bytes and yields one display string per complete line, leaving any
//! trailing partial line buffered until its delimiter arrives.
//!
//! Incoming lines are not required to carry a `[name]` tag; the whole line
//! is the display string, so server-formatted text passes through verbatim.
//!
//! # Security
//!
//! A peer that never sends a delimiter cannot grow the buffer without
//! bound: once the buffered partial line exceeds the configured maximum the
//! decoder fails with `FrameTooLarge` and the session ends.

use bytes::BytesMut;

use crate::errors::{ProtocolError, Result};

/// Incremental decoder turning received bytes into complete frames.
#[derive(Debug)]
pub struct FrameDecoder {
    /// Bytes received but not yet consumed by a complete line.
    buf: BytesMut,
    /// Maximum bytes a single line may occupy before decoding fails.
    max_frame: usize,
}

impl FrameDecoder {
    /// Create a decoder that rejects lines longer than `max_frame` bytes.
    #[must_use]
    pub fn new(max_frame: usize) -> Self {
        Self { buf: BytesMut::new(), max_frame }
    }

    /// Feed received bytes, returning every newly completed display string.
    ///
    /// Empty lines are skipped. A `\r` immediately before the delimiter is
    /// stripped, so CRLF peers decode identically.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::InvalidUtf8` if a completed line is not UTF-8
    /// - `ProtocolError::FrameTooLarge` if the buffered partial line exceeds
    ///   the configured maximum
    ///
    /// Errors are not recoverable; the stream is considered corrupt.
    pub fn push(&mut self, bytes: &[u8]) -> Result<Vec<String>> {
        self.buf.extend_from_slice(bytes);

        let mut entries = Vec::new();

        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line = self.buf.split_to(pos + 1);
            let line = &line[..pos];
            let line = line.strip_suffix(b"\r").unwrap_or(line);

            if line.is_empty() {
                continue;
            }

            let text =
                std::str::from_utf8(line).map_err(|_| ProtocolError::InvalidUtf8)?.to_owned();
            entries.push(text);
        }

        if self.buf.len() > self.max_frame {
            return Err(ProtocolError::FrameTooLarge {
                size: self.buf.len(),
                max: self.max_frame,
            });
        }

        Ok(entries)
    }

    /// Number of buffered bytes awaiting a delimiter.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(crate::Frame::MAX_ENCODED_SIZE)
    }
}
