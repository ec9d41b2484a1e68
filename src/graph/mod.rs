//! Directed link graph
//!
//! The graph is append-only: nodes and edges can be added but never removed.
//! It is assembled once after a crawl finishes and is read-only afterwards.
//!
//! Nodes keep their insertion order and every out-link list keeps the order
//! in which its edges were first added, so iteration (and therefore rank
//! summation and exported output) is reproducible.

use std::collections::{HashMap, HashSet};

/// A single page in the graph with its adjacency in both directions
#[derive(Debug, Clone)]
struct Node {
    url: String,
    outgoing: Vec<usize>,
    incoming: Vec<usize>,
}

/// Directed graph of pages keyed by URL, without parallel edges
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edges: HashSet<(usize, usize)>,
}

impl LinkGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures a node exists for `url`, returning its position
    ///
    /// Adding an existing node is a no-op.
    pub fn add_node(&mut self, url: &str) -> usize {
        if let Some(&id) = self.index.get(url) {
            return id;
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            url: url.to_string(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        });
        self.index.insert(url.to_string(), id);
        id
    }

    /// Adds the edge `src -> dst`, creating either endpoint if needed
    ///
    /// Returns `true` if the edge was new. Self-loops are allowed.
    pub fn add_edge(&mut self, src: &str, dst: &str) -> bool {
        let from = self.add_node(src);
        let to = self.add_node(dst);

        if !self.edges.insert((from, to)) {
            return false;
        }

        self.nodes[from].outgoing.push(to);
        self.nodes[to].incoming.push(from);
        true
    }

    /// Returns the pages `url` links to, in insertion order
    ///
    /// Unknown URLs have no out-links.
    pub fn out_links(&self, url: &str) -> Vec<&str> {
        self.index
            .get(url)
            .map(|&id| self.urls_of(&self.nodes[id].outgoing))
            .unwrap_or_default()
    }

    /// Returns the pages linking to `url`, in the order the edges were added
    ///
    /// Unknown URLs have no in-links.
    pub fn in_links(&self, url: &str) -> Vec<&str> {
        self.index
            .get(url)
            .map(|&id| self.urls_of(&self.nodes[id].incoming))
            .unwrap_or_default()
    }

    /// Number of distinct destinations `url` links to
    pub fn out_degree(&self, url: &str) -> usize {
        self.index
            .get(url)
            .map(|&id| self.nodes[id].outgoing.len())
            .unwrap_or(0)
    }

    /// Returns true if the edge `src -> dst` exists
    pub fn has_edge(&self, src: &str, dst: &str) -> bool {
        match (self.index.get(src), self.index.get(dst)) {
            (Some(&from), Some(&to)) => self.edges.contains(&(from, to)),
            _ => false,
        }
    }

    /// Returns true if `url` is a node of the graph
    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over node URLs in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.url.as_str())
    }

    /// Iterates over all edges grouped by source, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes.iter().flat_map(move |node| {
            node.outgoing
                .iter()
                .map(move |&to| (node.url.as_str(), self.nodes[to].url.as_str()))
        })
    }

    /// Sources linking to the node at `id`
    pub(crate) fn incoming_at(&self, id: usize) -> &[usize] {
        &self.nodes[id].incoming
    }

    /// Out-degree of the node at `id`
    pub(crate) fn out_degree_at(&self, id: usize) -> usize {
        self.nodes[id].outgoing.len()
    }

    fn urls_of(&self, ids: &[usize]) -> Vec<&str> {
        ids.iter().map(|&id| self.nodes[id].url.as_str()).collect()
    }
}
