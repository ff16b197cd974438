//! Derivation of a [`Neighborhood`] from a raw `graph` response.
//!
//! Parse, validate into a colored graph, then count words over the
//! concatenated lyrics. Any failure aborts the whole derivation, so a
//! caller either gets a matching graph and word table or neither.

use verselink_core::wire::parse_graph_response;
use verselink_core::{Neighborhood, NodeId, Result, ResultKey};
use verselink_graph::build_from_response;
use verselink_search::{analyze, Stopwords};

pub fn neighborhood(key: &ResultKey, body: &str, stopwords: &Stopwords) -> Result<Neighborhood> {
    let raw = parse_graph_response(body)?;
    let seed = NodeId::new(key.as_str());
    let built = build_from_response(&seed, &raw)?;
    let words = analyze(&built.lyrics, stopwords);

    log::info!(
        "neighborhood of {}: {} songs, {} edges, {} terms",
        key,
        built.graph.node_count(),
        built.graph.edge_count(),
        words.len()
    );

    Ok(Neighborhood {
        key: key.clone(),
        graph: built.graph,
        words,
    })
}
