//! Frame type and encoding.
//!
//! A `Frame` is one complete application-level message: a sender tag plus
//! the message text. On the wire it is rendered as
//! `[sender] content\n`: the bracket tag matches what peers display, and
//! the trailing newline is the frame delimiter.
//!
//! # Invariants
//!
//! - Delimiter Safety: neither field may contain `\n` or `\r`, so an encoded
//!   frame contains exactly one delimiter. Enforced by [`Frame::new`].
//!
//! - Size Limit: the encoded frame MUST NOT exceed
//!   [`Frame::MAX_ENCODED_SIZE`]. Violations are rejected at construction,
//!   so [`Frame::encode`] cannot fail.

use bytes::BufMut;

use crate::errors::{ProtocolError, Result};

/// One complete chat message as transmitted over the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Sender display name, without the surrounding brackets.
    sender: String,
    /// Message text.
    content: String,
}

impl Frame {
    /// Maximum encoded frame size in bytes, delimiter included.
    pub const MAX_ENCODED_SIZE: usize = 4096;

    /// Frame delimiter byte.
    pub const DELIMITER: u8 = b'\n';

    /// Create a frame, validating that it can be carried by the wire format.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::IllegalContent` if the sender is empty, contains
    ///   brackets or control characters, or the content contains line breaks
    /// - `ProtocolError::FrameTooLarge` if the encoded frame would exceed
    ///   [`Frame::MAX_ENCODED_SIZE`]
    pub fn new(sender: &str, content: &str) -> Result<Self> {
        if sender.is_empty() {
            return Err(ProtocolError::IllegalContent { reason: "sender must not be empty" });
        }

        if sender.chars().any(|c| c == '[' || c == ']' || c.is_control()) {
            return Err(ProtocolError::IllegalContent {
                reason: "sender must not contain brackets or control characters",
            });
        }

        if content.contains('\n') || content.contains('\r') {
            return Err(ProtocolError::IllegalContent {
                reason: "content must not contain line breaks",
            });
        }

        let frame = Self { sender: sender.to_owned(), content: content.to_owned() };

        let size = frame.encoded_len();
        if size > Self::MAX_ENCODED_SIZE {
            return Err(ProtocolError::FrameTooLarge { size, max: Self::MAX_ENCODED_SIZE });
        }

        Ok(frame)
    }

    /// Sender display name, without brackets.
    #[must_use]
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Message text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Display form appended to the message log: `[sender] content`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("[{}] {}", self.sender, self.content)
    }

    /// Size of the encoded frame in bytes, delimiter included.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        // "[" + sender + "] " + content + "\n"
        1 + self.sender.len() + 2 + self.content.len() + 1
    }

    /// Encode the frame into `dst` as `[sender] content\n`.
    ///
    /// Infallible: size and character constraints were enforced by
    /// [`Frame::new`].
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_u8(b'[');
        dst.put_slice(self.sender.as_bytes());
        dst.put_slice(b"] ");
        dst.put_slice(self.content.as_bytes());
        dst.put_u8(Self::DELIMITER);
    }

    /// Encode the frame into a fresh buffer.
    #[must_use]
    pub fn encode_to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf);
        buf
    }
}
