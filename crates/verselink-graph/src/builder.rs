//! Graph construction from raw backend data.

use std::collections::{HashMap, HashSet};

use verselink_core::topics::{topic_probs_from_value, topic_words_from_value};
use verselink_core::wire::{RawGraph, RawNodeData};
use verselink_core::{topic_color, Error, Graph, GraphEdge, GraphNode, NodeId, Result};

/// A validated graph together with the concatenated lyrics of its nodes.
#[derive(Debug, Clone)]
pub struct BuiltGraph {
    pub graph: Graph,
    /// Node lyrics in node order, joined by single spaces.
    pub lyrics: String,
}

fn make_node(id: &NodeId, meta: &RawNodeData) -> Result<GraphNode> {
    let color = topic_color(meta.topic_id)?;
    let topic_id =
        usize::try_from(meta.topic_id).map_err(|_| Error::TopicOutOfRange(meta.topic_id))?;
    Ok(GraphNode {
        id: id.clone(),
        track_name: meta.track_name.clone(),
        artist_name: meta.artist_name.clone(),
        track_uri: meta.track_uri.clone(),
        topic_id,
        topic_words: topic_words_from_value(&meta.topic_words)?,
        topic_probs: topic_probs_from_value(&meta.topic_probs)?,
        lyrics: meta.lyrics.clone(),
        duration_ms: meta.duration,
        color,
    })
}

/// Build the neighborhood graph of `seed`.
///
/// Every id in `node_ids` must have an entry in `metadata`, every edge must
/// connect two listed ids, and every topic id must fall within the palette.
/// The first violation fails the whole build; nothing partial is returned.
/// Metadata is looked up for every id before any node is decoded, so a
/// missing entry is reported ahead of a bad topic on an earlier node.
///
/// Repeated ids collapse into one node at the position of their first
/// occurrence. The metadata map holds a single entry per id, so that entry
/// is the one used.
pub fn build(
    seed: &NodeId,
    node_ids: &[NodeId],
    edges: &[(NodeId, NodeId)],
    metadata: &HashMap<NodeId, RawNodeData>,
) -> Result<BuiltGraph> {
    let mut seen: HashSet<&NodeId> = HashSet::with_capacity(node_ids.len());
    let mut found = Vec::with_capacity(node_ids.len());

    for id in node_ids {
        if !seen.insert(id) {
            log::warn!("duplicate node id {} in graph of {}", id, seed);
            continue;
        }
        let meta = metadata
            .get(id)
            .ok_or_else(|| Error::MissingNodeMetadata(id.to_string()))?;
        found.push((id, meta));
    }

    let nodes = found
        .into_iter()
        .map(|(id, meta)| make_node(id, meta))
        .collect::<Result<Vec<_>>>()?;

    if !seen.contains(seed) {
        log::warn!("graph of {} does not contain the seed node", seed);
    }

    let lyrics = nodes
        .iter()
        .map(|n| n.lyrics.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let edges = edges
        .iter()
        .map(|(source, target)| GraphEdge::new(source.clone(), target.clone()))
        .collect();

    let graph = Graph::new(seed.clone(), nodes, edges)?;
    log::debug!(
        "built graph of {}: {} nodes, {} edges",
        seed,
        graph.node_count(),
        graph.edge_count()
    );

    Ok(BuiltGraph { graph, lyrics })
}

/// Build from a parsed `graph` endpoint response.
pub fn build_from_response(seed: &NodeId, raw: &RawGraph) -> Result<BuiltGraph> {
    build(seed, &raw.nodes, &raw.edges, &raw.node_data)
}
