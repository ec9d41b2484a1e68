use serde::Deserialize;

/// Main configuration structure for Sumi-Rank
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// URLs the crawl starts from, all at depth 0
    #[serde(default)]
    pub seeds: Vec<String>,

    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub rank: RankConfig,

    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages fetched over the whole crawl
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Deepest link distance from a seed that is still fetched (inclusive)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of fetches dispatched concurrently per round
    #[serde(rename = "batch-size")]
    pub batch_size: usize,

    /// Only URLs containing this substring are fetched; empty disables it
    #[serde(rename = "url-filter")]
    pub url_filter: String,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Idle connections kept open per host
    #[serde(rename = "max-connections-per-host")]
    pub max_connections_per_host: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 1000,
            max_depth: 20,
            batch_size: 1000,
            url_filter: String::new(),
            request_timeout_secs: 5,
            max_connections_per_host: 50,
        }
    }
}

impl CrawlerConfig {
    /// Returns the URL filter, or `None` when filtering is disabled
    pub fn filter(&self) -> Option<&str> {
        if self.url_filter.is_empty() {
            None
        } else {
            Some(&self.url_filter)
        }
    }
}

/// PageRank configuration
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Probability of following a link rather than jumping, in [0, 1)
    pub damping: f64,

    /// Mean absolute change below which the iteration stops
    pub epsilon: f64,

    /// Upper bound on the number of iterations
    #[serde(rename = "max-iterations")]
    pub max_iterations: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            epsilon: 1e-4,
            max_iterations: 100,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the text reports and markdown summary
    pub directory: String,

    /// Optional SQLite database receiving the graph and scores
    #[serde(rename = "database-path")]
    pub database_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "crawl_results".to_string(),
            database_path: None,
        }
    }
}
