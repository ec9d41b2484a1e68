//! FIFO frontier of URLs waiting to be processed
//!
//! The frontier is only touched by the coordinator between rounds: entries
//! are drained at the start of a round and the links discovered during the
//! round are appended after the round barrier.

use std::collections::VecDeque;

/// A URL waiting in the frontier with its link distance from a seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL to process
    pub url: String,

    /// Number of links followed from a seed to reach this URL
    pub depth: u32,
}

impl FrontierEntry {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }
}

/// Breadth-first queue of frontier entries
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
}

impl Frontier {
    /// Creates a frontier holding every seed at depth 0
    pub fn seeded<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: seeds
                .into_iter()
                .map(|seed| FrontierEntry::new(seed, 0))
                .collect(),
        }
    }

    /// Appends an entry to the back of the queue
    pub fn push(&mut self, entry: FrontierEntry) {
        self.queue.push_back(entry);
    }

    /// Removes up to `batch_size` entries from the front of the queue
    ///
    /// Asking for more entries than are queued returns what is there.
    pub fn drain_batch(&mut self, batch_size: usize) -> Vec<FrontierEntry> {
        let take = batch_size.min(self.queue.len());
        self.queue.drain(..take).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
