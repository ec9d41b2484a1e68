//! Crawler coordinator - main crawl orchestration logic
//!
//! The crawl runs as a breadth-first sequence of rounds:
//! 1. Drain up to `batch_size` entries from the frontier
//! 2. Spawn one task per entry and wait for all of them (round barrier)
//! 3. Fold the page reports back in: record link observations and queue
//!    unclaimed links one level deeper
//! 4. Repeat until the frontier is empty or the page budget is spent
//!
//! Workers share only the claim set and the page budget. Everything else
//! travels back to the coordinator in the [`PageReport`] each task returns,
//! and the link graph is assembled once after the last round.

use crate::config::{validate_crawler_config, CrawlerConfig};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::report::{CrawlOutcome, CrawlReport};
use crate::crawler::PageSource;
use crate::graph::LinkGraph;
use crate::state::{ClaimSet, PageState, VisitBudget};
use crate::url::{has_http_scheme, matches_filter};
use crate::ConfigError;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: CrawlerConfig,
    source: Arc<dyn PageSource>,
}

/// State shared by the workers of one crawl
struct CrawlContext {
    source: Arc<dyn PageSource>,
    claims: ClaimSet,
    budget: VisitBudget,
    max_depth: u32,
    url_filter: Option<String>,
}

/// What a worker reports about the frontier entry it processed
#[derive(Debug)]
struct PageReport {
    url: String,
    depth: u32,
    state: PageState,
    links: Vec<String>,
}

impl PageReport {
    fn without_links(url: String, depth: u32, state: PageState) -> Self {
        Self {
            url,
            depth,
            state,
            links: Vec::new(),
        }
    }
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `source` - The fetch/parse port pages are retrieved through
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Configuration is valid
    /// * `Err(ConfigError)` - A cap is zero or otherwise unusable
    pub fn new(config: CrawlerConfig, source: Arc<dyn PageSource>) -> Result<Self, ConfigError> {
        validate_crawler_config(&config)?;
        Ok(Self { config, source })
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Crawls outward from `seeds` and assembles the link graph
    ///
    /// Per-page failures are logged and skipped; they never abort the crawl.
    /// An empty seed list yields an empty graph.
    pub async fn run<S: AsRef<str>>(&self, seeds: &[S]) -> CrawlOutcome {
        let started_at = Utc::now();
        let start_time = Instant::now();

        let context = Arc::new(CrawlContext {
            source: Arc::clone(&self.source),
            claims: ClaimSet::new(),
            budget: VisitBudget::new(self.config.max_pages),
            max_depth: self.config.max_depth,
            url_filter: self.config.filter().map(str::to_string),
        });

        let mut frontier = Frontier::seeded(seeds.iter().map(|s| s.as_ref().to_string()));
        let mut visited: Vec<String> = Vec::new();
        let mut observations: Vec<(String, String)> = Vec::new();
        let mut state_counts: HashMap<PageState, usize> = HashMap::new();
        let mut rounds = 0;
        let mut entries_processed = 0;

        tracing::info!("Starting crawl from {} seed URLs", seeds.len());

        while !frontier.is_empty() && !context.budget.is_exhausted() {
            rounds += 1;
            let batch = frontier.drain_batch(self.config.batch_size);

            tracing::info!(
                "Round {}: dispatching {} URLs ({} still queued, {}/{} pages visited)",
                rounds,
                batch.len(),
                frontier.len(),
                context.budget.granted(),
                context.budget.max_pages()
            );

            for report in run_round(&context, batch).await {
                entries_processed += 1;
                *state_counts.entry(report.state).or_insert(0) += 1;

                if report.state.is_success() {
                    visited.push(report.url.clone());
                }

                for link in report.links {
                    if !context.claims.is_claimed(&link) && !context.budget.is_exhausted() {
                        frontier.push(FrontierEntry::new(link.clone(), report.depth + 1));
                    }
                    observations.push((report.url.clone(), link));
                }
            }
        }

        if !frontier.is_empty() {
            tracing::info!(
                "Page limit of {} reached with {} URLs left in the frontier",
                self.config.max_pages,
                frontier.len()
            );
        }

        tracing::info!("Building link graph");
        let graph = assemble_graph(&visited, &observations);

        let report = CrawlReport {
            started_at,
            finished_at: Utc::now(),
            duration: start_time.elapsed(),
            seeds: seeds.len(),
            max_pages: self.config.max_pages,
            max_depth: self.config.max_depth,
            rounds,
            entries_processed,
            pages_attempted: state_counts
                .iter()
                .filter(|(state, _)| state.was_attempted())
                .map(|(_, count)| count)
                .sum(),
            pages_graphed: graph.node_count(),
            edges_observed: observations.len(),
            edges_graphed: graph.edge_count(),
            state_counts,
        };

        tracing::info!(
            "Crawl completed: {} pages attempted, {} in graph, {} edges, {} rounds in {:?}",
            report.pages_attempted,
            report.pages_graphed,
            report.edges_graphed,
            report.rounds,
            report.duration
        );

        CrawlOutcome { graph, report }
    }
}

/// Builds the link graph from the pages that were fetched successfully
///
/// Every visited URL becomes a node, in the order given. An observation
/// becomes an edge only if both its endpoints were visited; the rest are
/// dropped.
pub fn assemble_graph(visited: &[String], observations: &[(String, String)]) -> LinkGraph {
    let mut graph = LinkGraph::new();
    for url in visited {
        graph.add_node(url);
    }

    let nodes: HashSet<&str> = visited.iter().map(String::as_str).collect();
    for (src, dst) in observations {
        if nodes.contains(src.as_str()) && nodes.contains(dst.as_str()) {
            graph.add_edge(src, dst);
        }
    }

    graph
}

/// Processes one batch concurrently and waits for every task
///
/// Reports come back in batch order regardless of completion order. A task
/// that panics is reported as a failed page.
async fn run_round(context: &Arc<CrawlContext>, batch: Vec<FrontierEntry>) -> Vec<PageReport> {
    let mut slots: Vec<(FrontierEntry, Option<PageReport>)> =
        batch.iter().map(|entry| (entry.clone(), None)).collect();

    let mut tasks = JoinSet::new();
    for (position, entry) in batch.into_iter().enumerate() {
        let context = Arc::clone(context);
        tasks.spawn(async move { (position, visit(&context, entry).await) });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((position, report)) => slots[position].1 = Some(report),
            Err(e) => tracing::error!("Crawl task failed: {}", e),
        }
    }

    slots
        .into_iter()
        .map(|(entry, report)| {
            report.unwrap_or_else(|| {
                PageReport::without_links(entry.url, entry.depth, PageState::Failed)
            })
        })
        .collect()
}

/// Processes a single frontier entry
///
/// Admission checks run before the claim so that an entry rejected for its
/// depth does not block the same URL from being claimed later.
async fn visit(context: &CrawlContext, entry: FrontierEntry) -> PageReport {
    let FrontierEntry { url, depth } = entry;

    if depth > context.max_depth {
        tracing::trace!("Skipping {}: depth {} exceeds limit", url, depth);
        return PageReport::without_links(url, depth, PageState::DepthExceeded);
    }

    if !has_http_scheme(&url) {
        tracing::debug!("Skipping {}: not an HTTP(S) URL", url);
        return PageReport::without_links(url, depth, PageState::UnsupportedScheme);
    }

    if !matches_filter(&url, context.url_filter.as_deref()) {
        tracing::trace!("Skipping {}: does not match URL filter", url);
        return PageReport::without_links(url, depth, PageState::FilteredOut);
    }

    if !context.claims.claim(&url) {
        return PageReport::without_links(url, depth, PageState::AlreadyClaimed);
    }

    let Some(ordinal) = context.budget.try_take() else {
        tracing::debug!("Skipping {}: page limit reached", url);
        return PageReport::without_links(url, depth, PageState::OverCap);
    };

    tracing::info!(
        "[{}] ({}/{}) {}",
        depth,
        ordinal,
        context.budget.max_pages(),
        url
    );

    match context.source.fetch(&url).await {
        Ok(content) => {
            let links = context.source.extract_links(&content, &url);
            tracing::debug!("Found {} links on {}", links.len(), url);
            PageReport {
                url,
                depth,
                state: PageState::Processed,
                links,
            }
        }
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", url, e);
            let state = PageState::from_fetch_error(&e);
            PageReport::without_links(url, depth, state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FetchError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory web: URL -> outbound links; unknown URLs fail with 404
    #[derive(Default)]
    struct StaticWeb {
        pages: HashMap<String, Vec<String>>,
        fetches: AtomicUsize,
    }

    impl StaticWeb {
        fn page(mut self, url: &str, links: &[&str]) -> Self {
            self.pages.insert(
                url.to_string(),
                links.iter().map(|l| l.to_string()).collect(),
            );
            self
        }

        fn build(self) -> Arc<Self> {
            Arc::new(self)
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageSource for StaticWeb {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            match self.pages.get(url) {
                Some(links) => Ok(links.join("\n")),
                None => Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }

        fn extract_links(&self, content: &str, _base_url: &str) -> Vec<String> {
            content
                .lines()
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()
        }
    }

    fn config(max_pages: usize, max_depth: u32, batch_size: usize) -> CrawlerConfig {
        CrawlerConfig {
            max_pages,
            max_depth,
            batch_size,
            ..CrawlerConfig::default()
        }
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let web = StaticWeb::default().build();
        assert!(Coordinator::new(config(10, 2, 0), web).is_err());
    }

    #[tokio::test]
    async fn test_empty_seed_list() {
        let web = StaticWeb::default().build();
        let coordinator = Coordinator::new(config(10, 2, 5), web).unwrap();

        let outcome = coordinator.run::<String>(&[]).await;
        assert!(outcome.graph.is_empty());
        assert_eq!(outcome.graph.edge_count(), 0);
        assert_eq!(outcome.report.rounds, 0);
        assert_eq!(outcome.report.pages_attempted, 0);
    }

    #[tokio::test]
    async fn test_crawls_cycle_once_per_page() {
        let web = StaticWeb::default()
            .page("https://a.com/", &["https://b.com/", "https://c.com/"])
            .page("https://b.com/", &["https://a.com/", "https://c.com/"])
            .page("https://c.com/", &["https://a.com/"])
            .build();
        let coordinator = Coordinator::new(config(100, 10, 10), web.clone()).unwrap();

        let outcome = coordinator.run(&["https://a.com/"]).await;

        assert_eq!(outcome.graph.node_count(), 3);
        assert_eq!(outcome.graph.edge_count(), 5);
        assert_eq!(web.fetch_count(), 3);
        assert_eq!(outcome.report.pages_attempted, 3);
        assert_eq!(outcome.report.pages_graphed, 3);
    }

    #[tokio::test]
    async fn test_duplicate_seeds_fetched_once() {
        let web = StaticWeb::default().page("https://a.com/", &[]).build();
        let coordinator = Coordinator::new(config(100, 10, 10), web.clone()).unwrap();

        let outcome = coordinator
            .run(&["https://a.com/", "https://a.com/", "https://a.com/"])
            .await;

        assert_eq!(web.fetch_count(), 1);
        assert_eq!(outcome.graph.node_count(), 1);
        assert_eq!(outcome.report.count(PageState::AlreadyClaimed), 2);
    }

    #[tokio::test]
    async fn test_depth_limit_is_inclusive() {
        let web = StaticWeb::default()
            .page("https://a.com/0", &["https://a.com/1"])
            .page("https://a.com/1", &["https://a.com/2"])
            .page("https://a.com/2", &["https://a.com/3"])
            .page("https://a.com/3", &[])
            .build();
        let coordinator = Coordinator::new(config(100, 1, 10), web.clone()).unwrap();

        let outcome = coordinator.run(&["https://a.com/0"]).await;

        assert!(outcome.graph.contains("https://a.com/0"));
        assert!(outcome.graph.contains("https://a.com/1"));
        assert!(!outcome.graph.contains("https://a.com/2"));
        assert_eq!(web.fetch_count(), 2);
        assert_eq!(outcome.report.count(PageState::DepthExceeded), 1);
    }

    #[tokio::test]
    async fn test_page_cap_is_never_exceeded() {
        let links: Vec<String> = (0..50).map(|i| format!("https://a.com/{i}")).collect();
        let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
        let mut web = StaticWeb::default().page("https://a.com/", &link_refs);
        for link in &link_refs {
            web = web.page(link, &[]);
        }
        let web = web.build();
        let coordinator = Coordinator::new(config(10, 5, 100), web.clone()).unwrap();

        let outcome = coordinator.run(&["https://a.com/"]).await;

        assert_eq!(web.fetch_count(), 10);
        assert_eq!(outcome.graph.node_count(), 10);
        assert_eq!(outcome.report.pages_attempted, 10);
        assert!(outcome.report.count(PageState::OverCap) > 0);
    }

    #[tokio::test]
    async fn test_fetch_failures_do_not_abort() {
        let web = StaticWeb::default()
            .page("https://a.com/", &["https://missing.com/", "https://b.com/"])
            .page("https://b.com/", &[])
            .build();
        let coordinator = Coordinator::new(config(100, 5, 10), web).unwrap();

        let outcome = coordinator.run(&["https://a.com/"]).await;

        assert_eq!(outcome.graph.node_count(), 2);
        assert!(!outcome.graph.contains("https://missing.com/"));
        assert!(!outcome.graph.has_edge("https://a.com/", "https://missing.com/"));
        assert_eq!(outcome.report.count(PageState::HttpError), 1);
        assert_eq!(outcome.report.pages_attempted, 3);
        assert_eq!(outcome.report.pages_failed(), 1);
        assert_eq!(outcome.report.edges_observed, 2);
        assert_eq!(outcome.report.edges_graphed, 1);
    }

    #[tokio::test]
    async fn test_url_filter_and_scheme() {
        let web = StaticWeb::default()
            .page(
                "https://keep.com/",
                &["https://other.com/", "ftp://keep.com/file", "https://keep.com/b"],
            )
            .page("https://keep.com/b", &[])
            .page("https://other.com/", &[])
            .build();
        let crawler = CrawlerConfig {
            url_filter: "keep.com".to_string(),
            ..config(100, 5, 10)
        };
        let coordinator = Coordinator::new(crawler, web.clone()).unwrap();

        let outcome = coordinator.run(&["https://keep.com/"]).await;

        assert_eq!(outcome.graph.node_count(), 2);
        assert_eq!(outcome.report.count(PageState::FilteredOut), 1);
        assert_eq!(outcome.report.count(PageState::UnsupportedScheme), 1);
        assert_eq!(web.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_small_batches_take_more_rounds() {
        let web = StaticWeb::default()
            .page(
                "https://a.com/",
                &["https://b.com/", "https://c.com/", "https://d.com/"],
            )
            .page("https://b.com/", &[])
            .page("https://c.com/", &[])
            .page("https://d.com/", &[])
            .build();
        let coordinator = Coordinator::new(config(100, 5, 1), web).unwrap();

        let outcome = coordinator.run(&["https://a.com/"]).await;

        assert_eq!(outcome.graph.node_count(), 4);
        assert_eq!(outcome.report.rounds, 4);
    }

    #[tokio::test]
    async fn test_self_link_single_page() {
        let web = StaticWeb::default()
            .page("https://a.com/", &["https://a.com/"])
            .build();
        let coordinator = Coordinator::new(config(100, 5, 10), web).unwrap();

        let outcome = coordinator.run(&["https://a.com/"]).await;

        assert_eq!(outcome.graph.node_count(), 1);
        assert_eq!(outcome.graph.edge_count(), 1);
        assert!(outcome.graph.has_edge("https://a.com/", "https://a.com/"));
    }

    #[test]
    fn test_assemble_graph_prunes_dangling_edges() {
        let visited = vec!["https://a.com/".to_string(), "https://b.com/".to_string()];
        let observations = vec![
            ("https://a.com/".to_string(), "https://b.com/".to_string()),
            ("https://a.com/".to_string(), "https://b.com/".to_string()),
            ("https://a.com/".to_string(), "https://never.com/".to_string()),
            ("https://ghost.com/".to_string(), "https://a.com/".to_string()),
        ];

        let graph = assemble_graph(&visited, &observations);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge("https://a.com/", "https://b.com/"));
        assert!(!graph.contains("https://never.com/"));
        assert!(!graph.contains("https://ghost.com/"));
    }
}
