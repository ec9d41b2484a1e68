//! Sumi-Rank: a concurrent link-graph crawler with PageRank scoring
//!
//! This crate crawls outward from a set of seed URLs in bounded concurrent
//! rounds, assembles the discovered pages into a directed link graph, and
//! ranks every page with damped power iteration.

pub mod config;
pub mod crawler;
pub mod graph;
pub mod output;
pub mod rank;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Rank operations
#[derive(Debug, Error)]
pub enum SumiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Per-page fetch failures reported by a [`crawler::PageSource`]
///
/// These never abort a crawl; the coordinator logs them and skips the page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("Failed to decode body of {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// Returns the URL the failure belongs to
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Transport { url, .. }
            | Self::Status { url, .. }
            | Self::ContentMismatch { url, .. }
            | Self::Decode { url, .. } => url,
        }
    }
}

/// Result type alias for Sumi-Rank operations
pub type Result<T> = std::result::Result<T, SumiError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlOutcome, CrawlReport, PageSource};
pub use graph::LinkGraph;
pub use rank::{RankConfig, RankEngine, Ranking};
pub use state::PageState;

/// The finished product of a crawl: the frozen graph, its ranking, and
/// the crawl report
#[derive(Debug, Clone)]
pub struct RankedCrawl {
    pub graph: LinkGraph,
    pub ranking: Ranking,
    pub report: CrawlReport,
}
