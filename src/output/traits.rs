//! Result sink trait and error types
//!
//! A sink receives the finished [`RankedCrawl`] once, after ranking, and
//! persists it in its own format.

use crate::storage::StorageError;
use crate::RankedCrawl;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] StorageError),

    #[error("Failed to format output: {0}")]
    Format(String),
}

impl From<std::fmt::Error> for OutputError {
    fn from(e: std::fmt::Error) -> Self {
        Self::Format(e.to_string())
    }
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for result sinks
///
/// Implementations must not mutate the crawl; several sinks may export the
/// same result one after another.
pub trait ResultSink {
    /// Short human readable name used in log messages
    fn name(&self) -> &str;

    /// Writes the ranked crawl to this sink
    ///
    /// # Arguments
    ///
    /// * `crawl` - The frozen graph, its ranking and the crawl report
    fn export(&mut self, crawl: &RankedCrawl) -> OutputResult<()>;
}

/// Runs every sink over the same crawl, stopping at the first failure
pub fn export_all(sinks: &mut [Box<dyn ResultSink>], crawl: &RankedCrawl) -> OutputResult<()> {
    for sink in sinks.iter_mut() {
        tracing::info!("Exporting results to {}", sink.name());
        sink.export(crawl)?;
    }
    Ok(())
}
