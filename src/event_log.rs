//! Bounded event log.
//!
//! A fixed-capacity ring of [`LogEntry`] records kept in insertion order.
//! When the ring is full the oldest entry is evicted before the new one is
//! stored, so the log always holds the [`LOG_CAPACITY`] most recent entries.
//! Entries and their messages are fixed-size, so appending never allocates.

use core::fmt::{self, Write as _};

use heapless::Deque;
use serde::{Deserialize, Serialize};

use crate::config::LOG_CAPACITY;

/// Maximum message length (bytes). Longer messages are truncated.
pub const MESSAGE_CAP: usize = 96;

/// Log entry category, used by the presentation layer for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogCategory {
    Info,
    Alert,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Monotonic sequence number, unique for the lifetime of the log.
    pub seq: u64,
    /// Milliseconds since start-up at append time.
    pub timestamp_ms: u64,
    pub category: LogCategory,
    pub message: heapless::String<MESSAGE_CAP>,
}

#[derive(Debug, Default)]
pub struct EventLog {
    entries: Deque<LogEntry, LOG_CAPACITY>,
    next_seq: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a formatted message, evicting the oldest entry when full.
    /// Returns the sequence number of the stored entry.
    pub fn append(
        &mut self,
        timestamp_ms: u64,
        category: LogCategory,
        message: fmt::Arguments<'_>,
    ) -> u64 {
        let mut text = heapless::String::new();
        // A message that does not fit is stored truncated.
        let _ = text.write_fmt(message);

        if self.entries.is_full() {
            self.entries.pop_front();
        }

        let entry = LogEntry {
            seq: self.next_seq,
            timestamp_ms,
            category,
            message: text,
        };
        self.next_seq += 1;
        log::debug!("log[{}] {:?}: {}", entry.seq, entry.category, entry.message);

        let seq = entry.seq;
        // Cannot fail: a slot was freed above if the ring was full.
        let _ = self.entries.push_back(entry);
        seq
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entries whose sequence number is `>= seq`, oldest first.
    pub fn since(&self, seq: u64) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.seq >= seq)
    }

    /// Sequence number the next appended entry will receive; equal to the
    /// number of entries ever appended, evicted ones included.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}
