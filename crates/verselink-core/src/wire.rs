//! Raw response shapes of the lyrics backend.
//!
//! These mirror the JSON exactly; conversion into the validated model types
//! happens in the search and graph crates.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{NodeId, ResultKey};

/// Metadata attached to a search hit.
///
/// The backend may send extra fields (lyrics, for instance); they are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPayload {
    pub artist_name: String,
    pub track_name: String,
    pub track_uri: String,
    /// Printed Python list, or a JSON array.
    pub topic_words: Value,
    /// Printed Python list, or a JSON array.
    pub topic_probs: Value,
    pub topic_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHit {
    pub payload: RawPayload,
    pub score: f64,
}

/// Per-node metadata in a graph response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNodeData {
    pub track_name: String,
    pub artist_name: String,
    pub topic_id: i64,
    pub topic_words: Value,
    pub topic_probs: Value,
    pub lyrics: String,
    /// Track length in milliseconds.
    pub duration: f64,
    pub track_uri: String,
}

/// The `graph` endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGraph {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<(NodeId, NodeId)>,
    pub node_data: HashMap<NodeId, RawNodeData>,
}

/// Parse a `search` response body, keeping the backend's key order.
///
/// A body that is not a JSON object, or a hit with a missing or mistyped
/// field, fails with [`Error::MalformedPayload`].
pub fn parse_search_response(body: &str) -> Result<Vec<(ResultKey, RawHit)>> {
    let object: Map<String, Value> =
        serde_json::from_str(body).map_err(|e| Error::MalformedPayload {
            key: "<response>".to_string(),
            message: e.to_string(),
        })?;

    object
        .into_iter()
        .map(|(key, value)| {
            let hit: RawHit =
                serde_json::from_value(value).map_err(|e| Error::MalformedPayload {
                    key: key.clone(),
                    message: e.to_string(),
                })?;
            Ok((ResultKey::new(key), hit))
        })
        .collect()
}

/// Parse a `graph` response body.
pub fn parse_graph_response(body: &str) -> Result<RawGraph> {
    serde_json::from_str(body).map_err(|e| Error::parse("graph response", e.to_string()))
}
