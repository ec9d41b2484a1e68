//! Ranking results

use std::cmp::Ordering;
use std::collections::HashMap;

/// PageRank scores for every node plus convergence information
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    /// Scores in graph insertion order
    scores: Vec<(String, f64)>,

    index: HashMap<String, usize>,

    /// Mean absolute change recorded after every iteration
    deltas: Vec<f64>,

    converged: bool,

    damping: f64,
}

impl Ranking {
    pub(crate) fn new(
        scores: Vec<(String, f64)>,
        deltas: Vec<f64>,
        converged: bool,
        damping: f64,
    ) -> Self {
        let index = scores
            .iter()
            .enumerate()
            .map(|(i, (url, _))| (url.clone(), i))
            .collect();

        Self {
            scores,
            index,
            deltas,
            converged,
            damping,
        }
    }

    /// Ranking of an empty graph
    pub(crate) fn empty(damping: f64) -> Self {
        Self {
            damping,
            ..Self::default()
        }
    }

    /// Returns the score of `url`, if it was ranked
    pub fn score(&self, url: &str) -> Option<f64> {
        self.index.get(url).map(|&i| self.scores[i].1)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterates over `(url, score)` in graph insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(url, score)| (url.as_str(), *score))
    }

    /// Returns all pages ordered by descending score
    ///
    /// Ties are broken by URL so the order is stable between runs.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        ranked
    }

    /// Returns the `n` highest-scoring pages
    pub fn top(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    /// Number of iterations that were run
    pub fn iterations(&self) -> usize {
        self.deltas.len()
    }

    /// Whether the delta dropped below epsilon before the iteration cap
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn deltas(&self) -> &[f64] {
        &self.deltas
    }

    pub fn final_delta(&self) -> Option<f64> {
        self.deltas.last().copied()
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Sum of all scores
    pub fn total(&self) -> f64 {
        self.scores.iter().map(|(_, score)| score).sum()
    }

    pub fn max(&self) -> Option<f64> {
        self.scores.iter().map(|(_, s)| *s).reduce(f64::max)
    }

    pub fn min(&self) -> Option<f64> {
        self.scores.iter().map(|(_, s)| *s).reduce(f64::min)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.scores.is_empty() {
            None
        } else {
            Some(self.total() / self.scores.len() as f64)
        }
    }
}
