use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::model::ids::NodeId;

/// A song in a neighborhood graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub track_name: String,
    pub artist_name: String,
    pub track_uri: String,
    /// Topic cluster, always within the palette range.
    pub topic_id: usize,
    pub topic_words: Vec<String>,
    pub topic_probs: Vec<f64>,
    pub lyrics: String,
    pub duration_ms: f64,
    pub color: Rgb,
}

impl GraphNode {
    /// Display label, `"<track> - <artist>"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.track_name, self.artist_name)
    }

    pub fn track_url(&self) -> Option<String> {
        super::track_url(&self.track_uri)
    }

    /// Track length, if the reported duration is usable.
    pub fn duration(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.duration_ms / 1000.0).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
}

impl GraphEdge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// The neighborhood of a selected song.
///
/// Node ids are unique and every edge connects two nodes of the same graph;
/// [`Graph::new`] refuses to construct anything else. Connectivity is not
/// required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    seed: NodeId,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl Graph {
    /// Validate and assemble a graph around `seed`.
    ///
    /// Fails with [`Error::DanglingEdge`] for the first edge whose endpoint
    /// is not among `nodes`. Duplicate node ids are a caller bug and are
    /// reported as a parse error on the node list.
    pub fn new(seed: NodeId, nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Result<Self> {
        let mut ids: HashSet<&str> = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(Error::parse(
                    "nodes",
                    format!("duplicate node id {}", node.id),
                ));
            }
        }

        if let Some(edge) = edges
            .iter()
            .find(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
        {
            return Err(Error::DanglingEdge(
                edge.source.to_string(),
                edge.target.to_string(),
            ));
        }

        Ok(Self { seed, nodes, edges })
    }

    /// The song the neighborhood was requested for.
    pub fn seed(&self) -> &NodeId {
        &self.seed
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
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

    /// Topics present in the graph with their node counts, most common first.
    pub fn topic_histogram(&self) -> Vec<(usize, usize)> {
        let mut counts: Vec<(usize, usize)> = Vec::new();
        for node in &self.nodes {
            match counts.iter_mut().find(|(topic, _)| *topic == node.topic_id) {
                Some((_, count)) => *count += 1,
                None => counts.push((node.topic_id, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn node(id: &str, topic_id: usize) -> GraphNode {
        GraphNode {
            id: NodeId::new(id),
            track_name: format!("Song {id}"),
            artist_name: "Band".to_string(),
            track_uri: format!("spotify:track:{id}"),
            topic_id,
            topic_words: vec!["love".to_string()],
            topic_probs: vec![0.5],
            lyrics: format!("lyrics of {id}"),
            duration_ms: 180_000.0,
            color: Rgb::new(0, 0, 0),
        }
    }

    #[test]
    fn test_valid_graph() {
        let graph = Graph::new(
            NodeId::new("n1"),
            vec![node("n1", 3), node("n2", 3)],
            vec![GraphEdge::new("n1", "n2")],
        )
        .unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.seed(), &NodeId::new("n1"));
        assert!(graph.contains("n2"));
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let err = Graph::new(
            NodeId::new("n1"),
            vec![node("n1", 0)],
            vec![GraphEdge::new("n1", "n3")],
        )
        .unwrap_err();
        assert_eq!(err, Error::DanglingEdge("n1".to_string(), "n3".to_string()));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Graph::new(NodeId::new("n1"), vec![node("n1", 0), node("n1", 1)], vec![]);
        assert!(matches!(result, Err(Error::Parse { field: "nodes", .. })));
    }

    #[test]
    fn test_isolated_nodes_allowed() {
        let graph = Graph::new(NodeId::new("a"), vec![node("a", 0), node("b", 1)], vec![]).unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_topic_histogram() {
        let graph = Graph::new(
            NodeId::new("a"),
            vec![node("a", 2), node("b", 5), node("c", 5)],
            vec![],
        )
        .unwrap();
        assert_eq!(graph.topic_histogram(), vec![(5, 2), (2, 1)]);
    }

    #[test]
    fn test_node_label_and_duration() {
        let n = node("x", 0);
        assert_eq!(n.label(), "Song x - Band");
        assert_eq!(n.duration(), Some(Duration::from_secs(180)));
    }

    #[test]
    fn test_negative_duration_is_none() {
        let mut n = node("x", 0);
        n.duration_ms = -5.0;
        assert_eq!(n.duration(), None);
    }
}
