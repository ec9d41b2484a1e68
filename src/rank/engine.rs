//! Damped power iteration
//!
//! Every iteration computes all new scores from the complete previous
//! snapshot (Jacobi-style), so results do not depend on visiting order.

use crate::config::{validate_rank_config, RankConfig};
use crate::graph::LinkGraph;
use crate::rank::Ranking;
use crate::ConfigError;

/// Computes PageRank scores for a [`LinkGraph`]
#[derive(Debug, Clone)]
pub struct RankEngine {
    config: RankConfig,
}

impl RankEngine {
    /// Creates a new engine after validating its configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Damping factor, convergence threshold and iteration cap
    ///
    /// # Returns
    ///
    /// * `Ok(RankEngine)` - The configuration is usable
    /// * `Err(ConfigError)` - Damping outside [0, 1), non-positive epsilon or
    ///   a zero iteration cap
    pub fn new(config: RankConfig) -> Result<Self, ConfigError> {
        validate_rank_config(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Ranks every node of the graph
    ///
    /// # Algorithm
    ///
    /// 1. Every node starts at `1/N`
    /// 2. Each iteration sets
    ///    `rank'(v) = (1 - d)/N + d * sum(rank(u) / out_degree(u))` over the
    ///    pages `u` linking to `v`
    /// 3. The iteration delta is the mean absolute change across all nodes
    /// 4. Stops once the delta drops below epsilon or the iteration cap is hit
    ///
    /// An empty graph produces an empty ranking.
    pub fn rank(&self, graph: &LinkGraph) -> Ranking {
        let n = graph.node_count();
        if n == 0 {
            tracing::info!("No pages to rank");
            return Ranking::empty(self.config.damping);
        }

        tracing::info!("Computing PageRank for {} pages", n);

        let mut ranks = initial_ranks(n);
        let mut deltas = Vec::new();
        let mut converged = false;

        for iteration in 1..=self.config.max_iterations {
            let next = self.step(graph, &ranks);
            let delta = mean_absolute_change(&ranks, &next);
            ranks = next;
            deltas.push(delta);

            tracing::debug!("Iteration {}: mean delta = {:.6}", iteration, delta);

            if delta < self.config.epsilon {
                converged = true;
                tracing::info!("PageRank converged after {} iterations", iteration);
                break;
            }
        }

        if !converged {
            tracing::warn!(
                "PageRank stopped at the {} iteration limit without converging",
                self.config.max_iterations
            );
        }

        let scores = graph.nodes().map(str::to_string).zip(ranks).collect();
        Ranking::new(scores, deltas, converged, self.config.damping)
    }

    /// Runs a single iteration from the snapshot `ranks`
    ///
    /// `ranks` is indexed by node insertion order and must cover every node.
    pub fn step(&self, graph: &LinkGraph, ranks: &[f64]) -> Vec<f64> {
        let n = graph.node_count();
        let damping = self.config.damping;
        let teleport = (1.0 - damping) / n as f64;

        (0..n)
            .map(|v| {
                let inflow: f64 = graph
                    .incoming_at(v)
                    .iter()
                    .map(|&u| {
                        let degree = graph.out_degree_at(u);
                        if degree > 0 {
                            ranks[u] / degree as f64
                        } else {
                            0.0
                        }
                    })
                    .sum();
                teleport + damping * inflow
            })
            .collect()
    }
}

impl Default for RankEngine {
    fn default() -> Self {
        Self {
            config: RankConfig::default(),
        }
    }
}

/// Total rank held by pages without out-links
///
/// `ranks` is indexed by node insertion order. This is the mass an iteration
/// loses, scaled by the damping factor.
pub fn dangling_mass(graph: &LinkGraph, ranks: &[f64]) -> f64 {
    (0..graph.node_count())
        .filter(|&id| graph.out_degree_at(id) == 0)
        .map(|id| ranks[id])
        .sum()
}

fn initial_ranks(n: usize) -> Vec<f64> {
    vec![1.0 / n as f64; n]
}

fn mean_absolute_change(previous: &[f64], next: &[f64]) -> f64 {
    let total: f64 = previous
        .iter()
        .zip(next)
        .map(|(old, new)| (new - old).abs())
        .sum();
    total / previous.len() as f64
}
