//! Pending-outgoing buffer.
//!
//! A bounded single-slot text buffer between the presentation layer and the
//! sender task. The presentation layer is the only writer; the sender is the
//! only reader, and reading clears the slot. A later submission before the
//! sender drains replaces the slot: it models the not-yet-sent content of
//! the current input field, not a queue.
//!
//! The sender suspends on [`PendingOutgoing::wait_nonempty`] and is woken by
//! `submit`, so an idle session burns no CPU.

use std::sync::{Mutex, PoisonError};

use tokio::sync::Notify;

/// Bounded single-slot buffer holding not-yet-sent input text.
#[derive(Debug)]
pub struct PendingOutgoing {
    slot: Mutex<String>,
    wakeup: Notify,
    max_len: usize,
}

impl PendingOutgoing {
    /// Create an empty buffer bounded to `max_len` bytes.
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self { slot: Mutex::new(String::new()), wakeup: Notify::new(), max_len }
    }

    /// Store `text` (replacing any undrained content) and wake the sender.
    ///
    /// Text longer than the bound is truncated on a character boundary.
    pub fn submit(&self, text: &str) {
        let bounded = truncate_on_char_boundary(text, self.max_len);
        if bounded.len() < text.len() {
            tracing::debug!(submitted = text.len(), stored = bounded.len(), "input truncated");
        }

        *self.lock() = bounded.to_owned();
        self.wakeup.notify_one();
    }

    /// Take the pending text, leaving the slot empty. `None` if the slot
    /// was already empty.
    #[must_use]
    pub fn take(&self) -> Option<String> {
        let mut slot = self.lock();
        if slot.is_empty() { None } else { Some(std::mem::take(&mut *slot)) }
    }

    /// Whether the slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Suspend until the slot is non-empty.
    ///
    /// Returns immediately if content is already pending. The notified
    /// future is created before the emptiness check so a `submit` racing
    /// between check and await cannot be missed.
    pub async fn wait_nonempty(&self) {
        loop {
            let notified = self.wakeup.notified();
            if !self.is_empty() {
                return;
            }
            notified.await;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Truncate `text` to at most `max_len` bytes without splitting a character.
fn truncate_on_char_boundary(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }

    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;

    #[test]
    fn take_clears_the_slot() {
        let pending = PendingOutgoing::new(64);
        pending.submit("hello");
        assert_eq!(pending.take(), Some("hello".to_owned()));
        assert!(pending.is_empty());
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn later_submit_replaces_undrained_content() {
        let pending = PendingOutgoing::new(64);
        pending.submit("first");
        pending.submit("second");
        assert_eq!(pending.take(), Some("second".to_owned()));
    }

    #[test]
    fn oversized_input_is_truncated() {
        let pending = PendingOutgoing::new(4);
        pending.submit("hello");
        assert_eq!(pending.take(), Some("hell".to_owned()));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // "héllo": 'é' occupies bytes 1-2, so a 2-byte bound cuts before it.
        let pending = PendingOutgoing::new(2);
        pending.submit("héllo");
        assert_eq!(pending.take(), Some("h".to_owned()));
    }

    #[tokio::test]
    async fn submit_wakes_a_suspended_waiter() {
        let pending = Arc::new(PendingOutgoing::new(64));

        let waiter = {
            let pending = Arc::clone(&pending);
            tokio::spawn(async move {
                pending.wait_nonempty().await;
                pending.take()
            })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        pending.submit("ping");

        let taken = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
        assert_eq!(taken, Some("ping".to_owned()));
    }

    #[tokio::test]
    async fn wait_returns_immediately_when_content_pending() {
        let pending = PendingOutgoing::new(64);
        pending.submit("ready");
        tokio::time::timeout(Duration::from_millis(100), pending.wait_nonempty())
            .await
            .expect("should not suspend");
    }
}
