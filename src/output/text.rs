//! Plain text exports
//!
//! Writes two files into the output directory:
//! - `adjacency_matrix.txt`: node index, 0/1 matrix and adjacency list
//! - `pagerank_results.txt`: pages by descending score plus statistics

use crate::graph::LinkGraph;
use crate::output::traits::{OutputResult, ResultSink};
use crate::rank::Ranking;
use crate::RankedCrawl;
use std::fs;
use std::path::{Path, PathBuf};

pub const ADJACENCY_FILE: &str = "adjacency_matrix.txt";
pub const PAGERANK_FILE: &str = "pagerank_results.txt";

/// Writes the graph and ranking as text files
#[derive(Debug, Clone)]
pub struct TextExporter {
    directory: PathBuf,
}

impl TextExporter {
    /// Creates an exporter writing into `directory`
    ///
    /// The directory is created on export if it does not exist.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl ResultSink for TextExporter {
    fn name(&self) -> &str {
        "text files"
    }

    fn export(&mut self, crawl: &RankedCrawl) -> OutputResult<()> {
        fs::create_dir_all(&self.directory)?;

        let adjacency_path = self.directory.join(ADJACENCY_FILE);
        fs::write(&adjacency_path, format_adjacency_matrix(&crawl.graph))?;
        tracing::info!("Adjacency matrix saved to {}", adjacency_path.display());

        let pagerank_path = self.directory.join(PAGERANK_FILE);
        fs::write(&pagerank_path, format_pagerank_results(&crawl.ranking))?;
        tracing::info!("PageRank results saved to {}", pagerank_path.display());

        Ok(())
    }
}

/// Formats the graph as a URL index, a 0/1 matrix and an adjacency list
///
/// Row `i`, column `j` of the matrix is 1 when page `i` links to page `j`.
pub fn format_adjacency_matrix(graph: &LinkGraph) -> String {
    let urls: Vec<&str> = graph.nodes().collect();
    let mut out = String::new();

    out.push_str("Link Graph Adjacency Matrix\n");
    out.push_str("===========================\n");
    out.push_str(&format!("Total nodes: {}\n", urls.len()));
    out.push_str(&format!("Total edges: {}\n\n", graph.edge_count()));

    out.push_str("URL index:\n");
    for (i, url) in urls.iter().enumerate() {
        out.push_str(&format!("[{}] {}\n", i, url));
    }
    out.push('\n');

    out.push_str("Matrix (1 = link, 0 = no link):\n\n");
    for src in &urls {
        let row: Vec<&str> = urls
            .iter()
            .map(|dst| if graph.has_edge(src, dst) { "1" } else { "0" })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }

    out.push_str("\nAdjacency list:\n");
    for url in &urls {
        let links = graph.out_links(url);
        out.push_str(&format!("\n{}\n", url));
        out.push_str(&format!("  Outgoing links: {}\n", links.len()));
        for dst in links {
            out.push_str(&format!("    -> {}\n", dst));
        }
    }

    out
}

/// Formats the ranking in descending score order with summary statistics
pub fn format_pagerank_results(ranking: &Ranking) -> String {
    let mut out = String::new();

    out.push_str("PageRank Results\n");
    out.push_str("================\n");
    out.push_str(&format!("Total pages: {}\n", ranking.len()));
    out.push_str(&format!("Damping factor (d): {}\n", ranking.damping()));
    out.push_str(&format!(
        "Iterations: {} ({})\n\n",
        ranking.iterations(),
        if ranking.converged() {
            "converged"
        } else {
            "not converged"
        }
    ));

    out.push_str("Pages by importance:\n\n");
    for (position, (url, score)) in ranking.ranked().into_iter().enumerate() {
        out.push_str(&format!("#{}\n", position + 1));
        out.push_str(&format!("URL: {}\n", url));
        out.push_str(&format!("PageRank: {:.8}\n\n", score));
    }

    if let (Some(max), Some(min), Some(mean)) = (ranking.max(), ranking.min(), ranking.mean()) {
        out.push_str("=== Statistics ===\n");
        out.push_str(&format!("Maximum PageRank: {:.8}\n", max));
        out.push_str(&format!("Minimum PageRank: {:.8}\n", min));
        out.push_str(&format!("Mean PageRank: {:.8}\n", mean));
        out.push_str(&format!("Total PageRank: {:.8}\n", ranking.total()));
        if let Some(delta) = ranking.final_delta() {
            out.push_str(&format!("Final mean delta: {:.8}\n", delta));
        }
    }

    out
}
