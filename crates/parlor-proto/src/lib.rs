//! Wire framing for the parlor chat protocol.
//!
//! The protocol is newline-delimited UTF-8 text. Each frame on the wire is
//! `[displayName] content` followed by a single `\n`. TCP gives no message
//! boundaries, so a single read may carry a partial frame, several
//! concatenated frames, or exactly one; [`FrameDecoder`] restores the
//! boundaries incrementally.
//!
//! # Components
//!
//! - [`Frame`]: one outgoing message, validated at construction
//! - [`FrameDecoder`]: incremental byte-stream to frame decoder
//! - [`ProtocolError`]: framing violations

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod decoder;
mod errors;
mod frame;

pub use decoder::FrameDecoder;
pub use errors::{ProtocolError, Result};
pub use frame::Frame;
