//! Read-only structural queries over a neighborhood graph.

use std::collections::HashMap;

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use verselink_core::Graph;

/// An undirected petgraph view of a [`Graph`], borrowing its node ids.
#[derive(Debug)]
pub struct Topology<'g> {
    graph: UnGraph<&'g str, ()>,
    index: HashMap<&'g str, NodeIndex>,
}

impl<'g> Topology<'g> {
    pub fn of(source: &'g Graph) -> Self {
        let mut graph = UnGraph::with_capacity(source.node_count(), source.edge_count());
        let mut index = HashMap::with_capacity(source.node_count());

        for node in source.nodes() {
            let id = node.id.as_str();
            index.insert(id, graph.add_node(id));
        }
        for edge in source.edges() {
            // Graph guarantees both endpoints exist.
            if let (Some(&a), Some(&b)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) {
                graph.update_edge(a, b, ());
            }
        }

        Self { graph, index }
    }

    /// Ids of the nodes adjacent to `id`, in no particular order.
    pub fn neighbors(&self, id: &str) -> Vec<&'g str> {
        self.index
            .get(id)
            .map(|&idx| self.graph.neighbors(idx).map(|n| self.graph[n]).collect())
            .unwrap_or_default()
    }

    /// Number of distinct nodes adjacent to `id`; 0 for unknown ids.
    pub fn degree(&self, id: &str) -> usize {
        self.neighbors(id).len()
    }

    /// Number of connected components, counting isolated nodes.
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// The `n` best-connected nodes, highest degree first.
    ///
    /// Ties keep graph node order.
    pub fn hubs(&self, n: usize) -> Vec<(&'g str, usize)> {
        let mut degrees: Vec<(&'g str, usize)> = self
            .graph
            .node_indices()
            .map(|idx| (self.graph[idx], self.graph.neighbors(idx).count()))
            .collect();
        degrees.sort_by(|a, b| b.1.cmp(&a.1));
        degrees.truncate(n);
        degrees
    }
}
