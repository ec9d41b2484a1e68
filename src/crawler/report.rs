//! Crawl results handed back to the caller

use crate::graph::LinkGraph;
use crate::state::PageState;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

/// Result of a finished crawl: the frozen graph plus its report
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub graph: LinkGraph,
    pub report: CrawlReport,
}

/// Summary statistics for a crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    // Run metadata
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration: Duration,

    // Crawl bounds
    pub seeds: usize,
    pub max_pages: usize,
    pub max_depth: u32,

    /// Number of rounds dispatched
    pub rounds: usize,

    /// Frontier entries processed, including skipped ones
    pub entries_processed: usize,

    /// Pages a fetch was started for
    pub pages_attempted: usize,

    /// Pages that became graph nodes
    pub pages_graphed: usize,

    /// Link observations recorded, including dangling ones
    pub edges_observed: usize,

    /// Edges kept after dropping those with an unvisited endpoint
    pub edges_graphed: usize,

    /// Count of frontier entries by final state
    pub state_counts: HashMap<PageState, usize>,
}

impl CrawlReport {
    /// Returns how many entries ended in `state`
    pub fn count(&self, state: PageState) -> usize {
        self.state_counts.get(&state).copied().unwrap_or(0)
    }

    /// Pages a fetch was started for that did not make it into the graph
    pub fn pages_failed(&self) -> usize {
        self.state_counts
            .iter()
            .filter(|(state, _)| state.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Frontier entries dropped without a fetch
    pub fn entries_skipped(&self) -> usize {
        self.state_counts
            .iter()
            .filter(|(state, _)| state.is_skipped())
            .map(|(_, count)| count)
            .sum()
    }

    /// Returns the share of attempted pages that were graphed, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_attempted == 0 {
            return 0.0;
        }
        (self.pages_graphed as f64 / self.pages_attempted as f64) * 100.0
    }
}
