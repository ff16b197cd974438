pub mod graph;
pub mod ids;
pub mod result;
pub mod words;

pub use graph::{Graph, GraphEdge, GraphNode};
pub use ids::{NodeId, ResultKey};
pub use result::{RankedResultList, SearchResult};
pub use words::{WordFrequencyEntry, WordFrequencyTable, MAX_TERMS};

const SPOTIFY_TRACK_BASE: &str = "https://open.spotify.com/track/";

/// Public web URL for a `spotify:track:<id>` URI.
///
/// Returns `None` for any other URI shape.
pub fn track_url(track_uri: &str) -> Option<String> {
    let mut parts = track_uri.split(':');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some("spotify"), Some("track"), Some(id), None) if !id.is_empty() => {
            Some(format!("{SPOTIFY_TRACK_BASE}{id}"))
        }
        _ => None,
    }
}
