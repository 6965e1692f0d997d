//! Client identity.
//!
//! The display name is fixed for the lifetime of the session and is
//! prefixed, bracket-wrapped, onto every outgoing frame.

use crate::error::SessionError;

/// Maximum display name length in bytes.
pub const MAX_NAME_LEN: usize = 20;

/// Display name carried by every outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    display_name: String,
}

impl Identity {
    /// Create an identity, validating the name against the wire format.
    ///
    /// # Errors
    ///
    /// - `SessionError::InvalidIdentity` if the name is empty, longer than
    ///   [`MAX_NAME_LEN`] bytes, or contains brackets, whitespace-control,
    ///   or other control characters
    pub fn new(display_name: &str) -> Result<Self, SessionError> {
        if display_name.is_empty() {
            return Err(SessionError::InvalidIdentity { reason: "display name must not be empty" });
        }

        if display_name.len() > MAX_NAME_LEN {
            return Err(SessionError::InvalidIdentity {
                reason: "display name exceeds maximum length",
            });
        }

        if display_name.chars().any(|c| c == '[' || c == ']' || c.is_control()) {
            return Err(SessionError::InvalidIdentity {
                reason: "display name must not contain brackets or control characters",
            });
        }

        Ok(Self { display_name: display_name.to_owned() })
    }

    /// The raw display name, without brackets.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.display_name
    }

    /// The bracket tag form shown to peers, e.g. `[alice]`.
    #[must_use]
    pub fn tag(&self) -> String {
        format!("[{}]", self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_name_round_trips() {
        let identity = Identity::new("alice").unwrap();
        assert_eq!(identity.name(), "alice");
        assert_eq!(identity.tag(), "[alice]");
    }

    #[test]
    fn rejects_empty_name() {
        assert!(matches!(
            Identity::new(""),
            Err(SessionError::InvalidIdentity { .. })
        ));
    }

    #[test]
    fn rejects_overlong_name() {
        let name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(Identity::new(&name).is_err());
    }

    #[test]
    fn name_at_limit_is_accepted() {
        let name = "x".repeat(MAX_NAME_LEN);
        assert!(Identity::new(&name).is_ok());
    }

    #[test]
    fn rejects_brackets_and_control_characters() {
        assert!(Identity::new("[alice]").is_err());
        assert!(Identity::new("ali\tce").is_err());
        assert!(Identity::new("ali\nce").is_err());
    }
}
