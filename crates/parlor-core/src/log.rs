//! Shared message log.
//!
//! An append-only ordered transcript shared between the receiver task
//! (writer) and the presentation layer (reader). The lock is held only for
//! the append or the copy, never across I/O, so a redraw loop polling
//! [`MessageLog::snapshot`] every frame can never block on the network.

use std::sync::{Mutex, PoisonError};

/// Thread-safe, append-only ordered sequence of display strings.
///
/// Entries are ordered by append-call order (single global append order
/// enforced by the internal lock). Existing entries are never mutated or
/// removed.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Mutex<Vec<String>>,
}

impl MessageLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the end of the log.
    pub fn append(&self, entry: String) {
        self.lock().push(entry);
    }

    /// A point-in-time copy of all entries, safe to iterate without any
    /// lock held.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of entries in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Acquire the entry lock. A poisoned lock is recovered: the log holds
    /// only plain strings, so no invariant can be left broken mid-update.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    #[test]
    fn appends_preserve_order() {
        let log = MessageLog::new();
        log.append("first".into());
        log.append("second".into());
        assert_eq!(log.snapshot(), vec!["first", "second"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn snapshot_is_detached_from_later_appends() {
        let log = MessageLog::new();
        log.append("first".into());
        let snapshot = log.snapshot();
        log.append("second".into());
        assert_eq!(snapshot, vec!["first"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn concurrent_appends_lose_nothing() {
        const WRITERS: usize = 8;
        const PER_WRITER: usize = 100;

        let log = Arc::new(MessageLog::new());

        let handles: Vec<_> = (0..WRITERS)
            .map(|w| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for i in 0..PER_WRITER {
                        log.append(format!("{w}:{i}"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // Every appended entry is present exactly once.
        let mut snapshot = log.snapshot();
        assert_eq!(snapshot.len(), WRITERS * PER_WRITER);
        snapshot.sort();
        snapshot.dedup();
        assert_eq!(snapshot.len(), WRITERS * PER_WRITER);
    }

    #[test]
    fn per_writer_order_is_preserved() {
        const PER_WRITER: usize = 50;

        let log = Arc::new(MessageLog::new());
        let writer = {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for i in 0..PER_WRITER {
                    log.append(format!("a:{i}"));
                }
            })
        };
        for i in 0..PER_WRITER {
            log.append(format!("b:{i}"));
        }
        writer.join().unwrap();

        // Each writer's entries appear in its own append order.
        let snapshot = log.snapshot();
        for prefix in ["a", "b"] {
            let seen: Vec<&String> =
                snapshot.iter().filter(|e| e.starts_with(prefix)).collect();
            let expected: Vec<String> =
                (0..PER_WRITER).map(|i| format!("{prefix}:{i}")).collect();
            assert_eq!(seen.len(), PER_WRITER);
            for (got, want) in seen.iter().zip(&expected) {
                assert_eq!(*got, want);
            }
        }
    }
}
