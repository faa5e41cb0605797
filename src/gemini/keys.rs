//! Round-robin API key ring shared by every request.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Ordered API keys plus a process-wide cursor.
///
/// The cursor survives across requests: a request that rotated past a failing key
/// leaves the next request starting at the key that worked. [`current`](Self::current)
/// and [`advance`](Self::advance) are separate atomic steps, so concurrent requests
/// may interleave their advances and observe keys out of order.
#[derive(Debug)]
pub struct KeyRing {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl KeyRing {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of slots, empty ones included.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Slot index the cursor points at.
    pub fn position(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    /// The slot at the cursor and its key, which may be empty.
    /// `None` only when the ring has no slots.
    pub fn current(&self) -> Option<(usize, &str)> {
        let slot = self.position();
        self.keys.get(slot).map(|key| (slot, key.as_str()))
    }

    /// Move the cursor to the next slot, wrapping at the end. Returns the new position.
    pub fn advance(&self) -> usize {
        let len = self.keys.len();
        if len == 0 {
            return 0;
        }
        let previous = match self
            .cursor
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |c| Some((c + 1) % len))
        {
            Ok(c) | Err(c) => c,
        };
        (previous + 1) % len
    }
}
