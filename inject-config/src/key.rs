//! Member keys.
//!
//! Every member of a registration has a key, and a registration holds at
//! most one member per key. A constructor's key is the fixed
//! [`CONSTRUCTOR_KEY`], so a registration has at most one constructor.
//! Method keys embed an ordinal drawn from a [`KeySequencer`] so the same
//! method can be configured several times.

use std::sync::atomic::{AtomicU64, Ordering};

/// Key shared by every constructor specification.
pub const CONSTRUCTOR_KEY: &str = "constructor";

/// Formats a method key: `method:<name>:<ordinal>`.
pub fn method_key(name: &str, ordinal: u64) -> String {
    format!("method:{}:{}", name, ordinal)
}

/// Hands out strictly increasing ordinals, starting at 1.
///
/// Safe to share between threads; each call takes a fresh ordinal.
#[derive(Debug)]
pub struct KeySequencer {
    next: AtomicU64,
}

impl KeySequencer {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn next_ordinal(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for KeySequencer {
    fn default() -> Self {
        Self::new()
    }
}
