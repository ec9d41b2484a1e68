//! Console summaries
//!
//! This module prints the top ranked pages and the crawl report to stdout.

use crate::crawler::CrawlReport;
use crate::rank::Ranking;
use crate::state::PageState;

/// Prints the `n` highest ranked pages to stdout
pub fn print_top(ranking: &Ranking, n: usize) {
    print!("{}", format_top(ranking, n));
}

/// Formats the `n` highest ranked pages, one per line
pub fn format_top(ranking: &Ranking, n: usize) -> String {
    let top = ranking.top(n);
    let mut out = format!("=== Top {} pages by PageRank ===\n", top.len());
    for (position, (url, score)) in top.into_iter().enumerate() {
        out.push_str(&format!("#{}: {:.6} - {}\n", position + 1, score, url));
    }
    out
}

/// Prints the crawl report and convergence outcome to stdout
pub fn print_report(report: &CrawlReport, ranking: &Ranking) {
    print!("{}", format_report(report, ranking));
}

/// Formats the crawl report and convergence outcome
pub fn format_report(report: &CrawlReport, ranking: &Ranking) -> String {
    let mut out = String::from("=== Crawl Statistics ===\n\n");

    out.push_str("Overview:\n");
    out.push_str(&format!("  Seeds: {}\n", report.seeds));
    out.push_str(&format!("  Rounds: {}\n", report.rounds));
    out.push_str(&format!(
        "  Pages attempted: {} (limit {})\n",
        report.pages_attempted, report.max_pages
    ));
    out.push_str(&format!("  Pages in graph: {}\n", report.pages_graphed));
    out.push_str(&format!(
        "  Links: {} observed, {} in graph\n",
        report.edges_observed, report.edges_graphed
    ));
    out.push_str(&format!("  Duration: {:.2?}\n\n", report.duration));

    // Sort states by count (descending), name as tie-break
    let mut state_counts: Vec<(PageState, usize)> = report
        .state_counts
        .iter()
        .map(|(state, count)| (*state, *count))
        .collect();
    state_counts.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| a.0.to_db_string().cmp(b.0.to_db_string()))
    });

    if !state_counts.is_empty() {
        out.push_str("Frontier entries by state:\n");
        for (state, count) in state_counts {
            let percentage = if report.entries_processed > 0 {
                (count as f64 / report.entries_processed as f64) * 100.0
            } else {
                0.0
            };
            out.push_str(&format!("  {}: {} ({:.1}%)\n", state, count, percentage));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "PageRank: {} iterations, converged: {}\n",
        ranking.iterations(),
        if ranking.converged() { "yes" } else { "no" }
    ));
    out.push_str(&format!(
        "Success Rate: {:.1}% ({} / {} attempted pages graphed)\n",
        report.success_rate(),
        report.pages_graphed,
        report.pages_attempted
    ));

    out
}
