//! Crawler module for web page fetching and link graph construction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`PageSource`] port
//! - HTML parsing and link extraction
//! - The round-based frontier
//! - Overall crawl coordination and graph assembly

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod report;
mod source;

pub use coordinator::{assemble_graph, Coordinator};
pub use fetcher::{build_http_client, fetch_url, HttpSource};
pub use frontier::{Frontier, FrontierEntry};
pub use parser::{extract_links_from_html, parse_html};
pub use report::{CrawlOutcome, CrawlReport};
pub use source::PageSource;

use crate::config::Config;
use crate::rank::RankEngine;
use crate::{RankedCrawl, SumiError};
use std::sync::Arc;

/// Runs a complete crawl over HTTP and ranks the result
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the crawl and rank settings
/// 2. Build the HTTP client
/// 3. Crawl outward from the configured seeds
/// 4. Rank the assembled link graph
///
/// # Arguments
///
/// * `config` - The full run configuration
///
/// # Returns
///
/// * `Ok(RankedCrawl)` - Crawl completed (individual page failures included)
/// * `Err(SumiError)` - Invalid settings or the HTTP client could not be built
pub async fn crawl(config: &Config) -> Result<RankedCrawl, SumiError> {
    let source = HttpSource::new(&config.user_agent, &config.crawler)?;
    crawl_with_source(config, Arc::new(source)).await
}

/// Runs a crawl through an arbitrary [`PageSource`] and ranks the result
///
/// Settings are validated before any page is fetched.
pub async fn crawl_with_source(
    config: &Config,
    source: Arc<dyn PageSource>,
) -> Result<RankedCrawl, SumiError> {
    let engine = RankEngine::new(config.rank)?;
    let coordinator = Coordinator::new(config.crawler.clone(), source)?;

    let CrawlOutcome { graph, report } = coordinator.run(&config.seeds).await;
    let ranking = engine.rank(&graph);

    Ok(RankedCrawl {
        graph,
        ranking,
        report,
    })
}
