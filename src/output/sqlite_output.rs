//! SQLite result sink
//!
//! Each export creates a new run, stores the whole ranked crawl in it and
//! marks it completed. A failed save marks the run failed.

use crate::output::traits::{OutputResult, ResultSink};
use crate::storage::Storage;
use crate::RankedCrawl;

/// Exports ranked crawls into a storage backend
pub struct SqliteExporter<S: Storage> {
    storage: S,
    config_hash: String,
    last_run: Option<i64>,
}

impl<S: Storage> SqliteExporter<S> {
    /// Creates a new exporter
    ///
    /// # Arguments
    ///
    /// * `storage` - The storage backend to use
    /// * `config_hash` - Hash recorded with every run
    pub fn new(storage: S, config_hash: impl Into<String>) -> Self {
        Self {
            storage,
            config_hash: config_hash.into(),
            last_run: None,
        }
    }

    /// ID of the run written by the most recent export
    pub fn last_run(&self) -> Option<i64> {
        self.last_run
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: Storage> ResultSink for SqliteExporter<S> {
    fn name(&self) -> &str {
        "SQLite database"
    }

    fn export(&mut self, crawl: &RankedCrawl) -> OutputResult<()> {
        let run_id = self.storage.create_run(&self.config_hash)?;
        self.last_run = Some(run_id);

        if let Err(e) = self.storage.save_ranked_crawl(run_id, crawl) {
            tracing::error!("Failed to save run {}: {}", run_id, e);
            if let Err(mark_err) = self.storage.fail_run(run_id) {
                tracing::warn!("Could not mark run {} as failed: {}", run_id, mark_err);
            }
            return Err(e.into());
        }

        self.storage.complete_run(run_id)?;
        tracing::info!(
            "Saved run {} with {} pages and {} links",
            run_id,
            crawl.graph.node_count(),
            crawl.graph.edge_count()
        );

        Ok(())
    }
}
