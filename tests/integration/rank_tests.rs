//! Integration tests for graph ranking
//!
//! These tests exercise the public graph and rank APIs on hand-built graphs
//! and check the properties every ranking must satisfy.

use sumi_rank::rank::dangling_mass;
use sumi_rank::{LinkGraph, RankConfig, RankEngine};

fn url(i: usize) -> String {
    format!("https://site{}.example/", i)
}

/// A chain 0 -> 1 -> ... -> n-1 whose tail links back to 0, plus chords
fn chain_with_cycle(n: usize) -> LinkGraph {
    let mut graph = LinkGraph::new();
    for i in 0..n {
        graph.add_node(&url(i));
    }
    for i in 0..n {
        graph.add_edge(&url(i), &url((i + 1) % n));
        if i % 3 == 0 {
            graph.add_edge(&url(i), &url((i * 7 + 2) % n));
        }
    }
    graph
}

/// A tree hanging off a root, where leaves have no out-links
fn tree_with_leaves(n: usize) -> LinkGraph {
    let mut graph = LinkGraph::new();
    graph.add_node(&url(0));
    for i in 1..n {
        graph.add_edge(&url((i - 1) / 2), &url(i));
    }
    graph
}

#[test]
fn test_rankings_converge_on_small_graphs() {
    let engine = RankEngine::default();
    for n in 1..=20 {
        for graph in [chain_with_cycle(n), tree_with_leaves(n)] {
            let ranking = engine.rank(&graph);
            assert!(ranking.converged(), "graph of {} nodes did not converge", n);
            assert!(ranking.iterations() <= 100);
            assert_eq!(ranking.len(), n);
        }
    }
}

#[test]
fn test_scores_are_bounded() {
    let engine = RankEngine::default();
    for n in 1..=20 {
        for graph in [chain_with_cycle(n), tree_with_leaves(n)] {
            let floor = (1.0 - 0.85) / n as f64;
            let ranking = engine.rank(&graph);
            assert!(ranking.total() <= 1.0 + 1e-9);
            for (page, score) in ranking.iter() {
                assert!(score >= floor - 1e-12, "{} scored below the teleport floor", page);
                assert!(score <= 1.0 + 1e-9);
            }
        }
    }
}

#[test]
fn test_mass_conserved_without_dangling_pages() {
    let engine = RankEngine::default();
    for n in 1..=20 {
        let ranking = engine.rank(&chain_with_cycle(n));
        assert!(
            (ranking.total() - 1.0).abs() < 1e-9,
            "cycle of {} nodes leaked mass: {}",
            n,
            ranking.total()
        );
    }
}

#[test]
fn test_each_step_loses_exactly_damped_dangling_mass() {
    let engine = RankEngine::default();
    let graph = tree_with_leaves(12);
    let mut ranks = vec![1.0 / 12.0; 12];

    for _ in 0..5 {
        let before: f64 = ranks.iter().sum();
        let lost = 0.85 * dangling_mass(&graph, &ranks);
        let next = engine.step(&graph, &ranks);
        let after: f64 = next.iter().sum();
        assert!((before - lost - after).abs() < 1e-12);
        ranks = next;
    }
}

#[test]
fn test_three_page_scenario() {
    // A <-> B and A -> C, with C dangling
    let mut graph = LinkGraph::new();
    graph.add_edge("A", "B");
    graph.add_edge("A", "C");
    graph.add_edge("B", "A");

    let ranking = RankEngine::default().rank(&graph);
    let a = ranking.score("A").unwrap();
    let b = ranking.score("B").unwrap();
    let c = ranking.score("C").unwrap();

    assert!(a > b);
    assert!((b - c).abs() < 1e-9, "B and C share the same single in-link");
    assert!(ranking.total() < 1.0);

    let ranked: Vec<&str> = ranking.ranked().into_iter().map(|(u, _)| u).collect();
    assert_eq!(ranked[0], "A");
}

#[test]
fn test_rank_is_deterministic() {
    let engine = RankEngine::default();
    let graph = chain_with_cycle(17);
    let first = engine.rank(&graph);
    let second = engine.rank(&graph);
    assert_eq!(first.ranked(), second.ranked());
    assert_eq!(first.deltas(), second.deltas());
}

#[test]
fn test_deltas_shrink_towards_convergence() {
    let engine = RankEngine::default();
    for n in 1..=20 {
        for graph in [chain_with_cycle(n), tree_with_leaves(n)] {
            let ranking = engine.rank(&graph);
            let deltas = ranking.deltas();
            assert!(!deltas.is_empty());
            assert!(ranking.final_delta().unwrap() < 1e-4);

            // The tail never grows
            let tail = &deltas[deltas.len() / 2..];
            for pair in tail.windows(2) {
                assert!(
                    pair[1] <= pair[0] + 1e-15,
                    "delta grew from {} to {} on a graph of {} nodes",
                    pair[0],
                    pair[1],
                    n
                );
            }

            // Each step shrinks the difference by at least the damping factor
            for pair in deltas.windows(2) {
                assert!(pair[1] <= 0.85 * pair[0] + 1e-15);
            }
        }
    }
}

#[test]
fn test_custom_config() {
    let engine = RankEngine::new(RankConfig {
        damping: 0.5,
        epsilon: 1e-8,
        max_iterations: 500,
    })
    .unwrap();

    let mut graph = LinkGraph::new();
    graph.add_edge("x", "y");
    graph.add_edge("y", "x");

    let ranking = engine.rank(&graph);
    assert!(ranking.converged());
    assert!((ranking.score("x").unwrap() - 0.5).abs() < 1e-6);
    assert!((ranking.score("y").unwrap() - 0.5).abs() < 1e-6);
    assert_eq!(ranking.damping(), 0.5);
}
