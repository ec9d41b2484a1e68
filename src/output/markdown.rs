//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a ranked
//! crawl: run metadata, crawl statistics, convergence and the top pages.

use crate::output::traits::{OutputResult, ResultSink};
use crate::state::PageState;
use crate::RankedCrawl;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of pages listed in the summary table
pub const SUMMARY_TOP_PAGES: usize = 20;

pub const SUMMARY_FILE: &str = "summary.md";

/// Writes `summary.md` into the output directory
#[derive(Debug, Clone)]
pub struct MarkdownSummary {
    directory: PathBuf,
    config_hash: Option<String>,
}

impl MarkdownSummary {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            config_hash: None,
        }
    }

    /// Records the configuration hash in the run information section
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(SUMMARY_FILE)
    }
}

impl ResultSink for MarkdownSummary {
    fn name(&self) -> &str {
        "markdown summary"
    }

    fn export(&mut self, crawl: &RankedCrawl) -> OutputResult<()> {
        fs::create_dir_all(&self.directory)?;
        let path = self.path();
        generate_markdown_summary(crawl, self.config_hash.as_deref(), &path)?;
        tracing::info!("Summary saved to {}", path.display());
        Ok(())
    }
}

/// Generates a markdown summary file
///
/// # Arguments
///
/// * `crawl` - The ranked crawl
/// * `config_hash` - Hash of the configuration the run used, if known
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(
    crawl: &RankedCrawl,
    config_hash: Option<&str>,
    output_path: &Path,
) -> OutputResult<()> {
    fs::write(output_path, format_markdown_summary(crawl, config_hash))?;
    Ok(())
}

/// Formats a ranked crawl as markdown
pub fn format_markdown_summary(crawl: &RankedCrawl, config_hash: Option<&str>) -> String {
    let report = &crawl.report;
    let ranking = &crawl.ranking;
    let mut md = String::new();

    md.push_str("# Sumi-Rank Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", report.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        report.duration.as_secs_f64()
    ));
    if let Some(hash) = config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Crawl statistics
    md.push_str("## Crawl Statistics\n\n");
    md.push_str(&format!("- **Seeds**: {}\n", report.seeds));
    md.push_str(&format!(
        "- **Limits**: {} pages, depth {}\n",
        report.max_pages, report.max_depth
    ));
    md.push_str(&format!("- **Rounds**: {}\n", report.rounds));
    md.push_str(&format!(
        "- **Frontier Entries Processed**: {}\n",
        report.entries_processed
    ));
    md.push_str(&format!("- **Pages Attempted**: {}\n", report.pages_attempted));
    md.push_str(&format!("- **Pages Graphed**: {}\n", report.pages_graphed));
    md.push_str(&format!("- **Pages Failed**: {}\n", report.pages_failed()));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n",
        report.success_rate()
    ));
    md.push_str(&format!(
        "- **Links**: {} observed, {} kept in graph\n\n",
        report.edges_observed, report.edges_graphed
    ));

    // State breakdown, in a fixed order
    let states: Vec<(PageState, usize)> = PageState::all_states()
        .into_iter()
        .map(|state| (state, report.count(state)))
        .filter(|(_, count)| *count > 0)
        .collect();
    if !states.is_empty() {
        md.push_str("## Frontier Entry Outcomes\n\n");
        md.push_str("| State | Count |\n");
        md.push_str("|-------|-------|\n");
        for (state, count) in states {
            md.push_str(&format!("| {} | {} |\n", state, count));
        }
        md.push('\n');
    }

    // Convergence
    md.push_str("## PageRank\n\n");
    md.push_str(&format!("- **Damping Factor**: {}\n", ranking.damping()));
    md.push_str(&format!("- **Iterations**: {}\n", ranking.iterations()));
    md.push_str(&format!(
        "- **Converged**: {}\n",
        if ranking.converged() { "yes" } else { "no" }
    ));
    if let Some(delta) = ranking.final_delta() {
        md.push_str(&format!("- **Final Mean Delta**: {:.8}\n", delta));
    }
    md.push_str(&format!("- **Total Rank Mass**: {:.6}\n\n", ranking.total()));

    // Top pages
    if !ranking.is_empty() {
        md.push_str(&format!("## Top {} Pages\n\n", SUMMARY_TOP_PAGES));
        md.push_str("| # | URL | PageRank | In | Out |\n");
        md.push_str("|---|-----|----------|----|-----|\n");

        for (position, (url, score)) in ranking.top(SUMMARY_TOP_PAGES).into_iter().enumerate() {
            md.push_str(&format!(
                "| {} | {} | {:.8} | {} | {} |\n",
                position + 1,
                url,
                score,
                crawl.graph.in_links(url).len(),
                crawl.graph.out_degree(url)
            ));
        }
        md.push('\n');
    }

    md
}
