//! Error types for the parlor wire protocol.
//!
//! Framing violations are never transient: a peer that sends an oversized or
//! non-UTF-8 line is broken, and the session ends.

use thiserror::Error;

/// Convenience alias for protocol results.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while encoding or decoding frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame exceeds the maximum encoded size.
    #[error("frame too large: {size} bytes exceeds maximum of {max}")]
    FrameTooLarge {
        /// Actual (or accumulated) size in bytes.
        size: usize,
        /// Maximum permitted size in bytes.
        max: usize,
    },

    /// Received bytes are not valid UTF-8.
    #[error("frame is not valid UTF-8")]
    InvalidUtf8,

    /// Frame fields contain characters the wire format cannot carry.
    #[error("illegal frame content: {reason}")]
    IllegalContent {
        /// What was wrong with the field.
        reason: &'static str,
    },
}
