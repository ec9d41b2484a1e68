//! PageRank computation over a finished link graph
//!
//! This module contains:
//! - The damped power-iteration engine
//! - The ranking result with convergence information
//!
//! Rank mass held by dangling pages (no out-links) is not redistributed, so
//! the scores of a graph with dangling pages sum to less than one.

mod engine;
mod ranking;

pub use crate::config::RankConfig;
pub use engine::{dangling_mass, RankEngine};
pub use ranking::Ranking;
