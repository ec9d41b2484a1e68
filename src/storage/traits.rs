//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::state::PageState;
use crate::storage::{PageRecord, RunRecord};
use crate::RankedCrawl;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// A run is created first, then filled with a ranked crawl in one go, then
/// marked completed.
pub trait Storage {
    // ===== Run Management =====

    /// Creates a new run
    ///
    /// # Arguments
    ///
    /// * `config_hash` - Hash of the configuration file
    ///
    /// # Returns
    ///
    /// The ID of the newly created run
    fn create_run(&mut self, config_hash: &str) -> StorageResult<i64>;

    /// Gets a run by ID
    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord>;

    /// Gets the most recent run
    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>>;

    /// Marks a run as completed with a finish timestamp
    fn complete_run(&mut self, run_id: i64) -> StorageResult<()>;

    /// Marks a run as failed
    fn fail_run(&mut self, run_id: i64) -> StorageResult<()>;

    // ===== Graph Persistence =====

    /// Stores every node, edge, score and report figure of a ranked crawl
    ///
    /// All rows are written in a single transaction.
    fn save_ranked_crawl(&mut self, run_id: i64, crawl: &RankedCrawl) -> StorageResult<()>;

    /// Looks up a stored page by URL
    fn get_page(&self, run_id: i64, url: &str) -> StorageResult<PageRecord>;

    /// Returns the `limit` highest ranked pages of a run
    fn top_pages(&self, run_id: i64, limit: usize) -> StorageResult<Vec<PageRecord>>;

    /// Returns the URLs a stored page links to
    fn out_links(&self, run_id: i64, url: &str) -> StorageResult<Vec<String>>;

    // ===== Statistics =====

    /// Counts the pages stored for a run
    fn count_pages(&self, run_id: i64) -> StorageResult<u64>;

    /// Counts the links stored for a run
    fn count_links(&self, run_id: i64) -> StorageResult<u64>;

    /// Loads the frontier entry outcomes recorded for a run
    fn state_counts(&self, run_id: i64) -> StorageResult<HashMap<PageState, u64>>;
}
