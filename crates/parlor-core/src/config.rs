//! Session configuration.
//!
//! Where to connect and how: server endpoint, display name, input bound,
//! receive buffer capacity, and the connect timeout. Everything has a
//! documented default and is immutable for the life of a session.

use std::{fmt, time::Duration};

use crate::identity::Identity;

/// Default chat server port.
pub const DEFAULT_PORT: u16 = 4578;

/// Default maximum outgoing input length in bytes.
pub const DEFAULT_MAX_INPUT_LEN: usize = 512;

/// Default receive buffer capacity in bytes.
pub const DEFAULT_RECV_BUFFER_CAPACITY: usize = 4096;

/// Default time allowed for the TCP connect to complete.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Network address of the chat server. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Server hostname or IP address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
}

impl Endpoint {
    /// Create an endpoint from host and port.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Configuration for one chat session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Server to connect to.
    pub endpoint: Endpoint,
    /// Display name prefixed onto outgoing messages.
    pub identity: Identity,
    /// Maximum outgoing input length in bytes; longer submissions are
    /// truncated on a character boundary.
    pub max_input_len: usize,
    /// Receive buffer capacity in bytes.
    pub recv_buffer_capacity: usize,
    /// Time allowed for the TCP connect to complete.
    pub connect_timeout: Duration,
    /// Append sent messages to the local transcript after a successful
    /// write. Off by default: without it, your own messages appear only if
    /// the server echoes them back.
    pub local_echo: bool,
}

impl SessionConfig {
    /// Create a configuration with default bounds and timeouts.
    #[must_use]
    pub fn new(endpoint: Endpoint, identity: Identity) -> Self {
        Self {
            endpoint,
            identity,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            recv_buffer_capacity: DEFAULT_RECV_BUFFER_CAPACITY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            local_echo: false,
        }
    }

    /// Enable or disable local echo of sent messages.
    #[must_use]
    pub fn with_local_echo(mut self, local_echo: bool) -> Self {
        self.local_echo = local_echo;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_displays_as_host_port() {
        let endpoint = Endpoint::new("chat.example.org", DEFAULT_PORT);
        assert_eq!(endpoint.to_string(), "chat.example.org:4578");
    }

    #[test]
    fn defaults_are_bounded() {
        let config =
            SessionConfig::new(Endpoint::new("127.0.0.1", 4578), Identity::new("a").unwrap());
        assert_eq!(config.max_input_len, DEFAULT_MAX_INPUT_LEN);
        assert_eq!(config.recv_buffer_capacity, DEFAULT_RECV_BUFFER_CAPACITY);
        assert!(!config.local_echo);
    }
}
