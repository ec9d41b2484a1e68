//! Output module for exporting ranked crawls
//!
//! This module handles:
//! - Text exports of the adjacency matrix and PageRank results
//! - Markdown summaries of crawl results
//! - Persisting runs to SQLite
//! - Printing rankings and statistics to the console

mod markdown;
mod sqlite_output;
pub mod stats;
mod text;
mod traits;

pub use markdown::{format_markdown_summary, generate_markdown_summary, MarkdownSummary};
pub use sqlite_output::SqliteExporter;
pub use stats::{print_report, print_top};
pub use text::{format_adjacency_matrix, format_pagerank_results, TextExporter};
pub use traits::{export_all, OutputError, OutputResult, ResultSink};

use crate::config::Config;
use crate::storage::open_storage;
use std::path::Path;

/// Builds the sinks a run exports to
///
/// Text files and the markdown summary always go to the output directory.
/// The SQLite sink is added when a database path is configured and
/// `use_database` is set.
///
/// # Arguments
///
/// * `config` - The run configuration
/// * `config_hash` - Hash of the configuration file
/// * `use_database` - Whether the SQLite sink may be used
pub fn build_sinks(
    config: &Config,
    config_hash: &str,
    use_database: bool,
) -> OutputResult<Vec<Box<dyn ResultSink>>> {
    let directory = Path::new(&config.output.directory);
    let mut sinks: Vec<Box<dyn ResultSink>> = vec![
        Box::new(TextExporter::new(directory)),
        Box::new(MarkdownSummary::new(directory).with_config_hash(config_hash)),
    ];

    if let (true, Some(db_path)) = (use_database, config.output.database_path.as_deref()) {
        let db_path = Path::new(db_path);
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let storage = open_storage(db_path)?;
        sinks.push(Box::new(SqliteExporter::new(storage, config_hash)));
    }

    Ok(sinks)
}
