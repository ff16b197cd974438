//! Core domain model for verselink.
//!
//! This crate defines the render-ready models produced from the lyrics
//! backend (ranked search results, neighborhood graphs, word-frequency
//! tables), the deterministic color rules, the lenient topic-list parser,
//! the raw wire types, and the selection state reducer that decides which
//! derived views are valid at any moment.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod color;
pub mod error;
pub mod model;
pub mod state;
pub mod topics;
pub mod wire;

pub use color::{score_color, topic_color, Rgb, PALETTE_SIZE};
pub use error::{Error, ErrorKind, Result};
pub use model::{
    Graph, GraphEdge, GraphNode, NodeId, RankedResultList, ResultKey, SearchResult,
    WordFrequencyEntry, WordFrequencyTable,
};
pub use state::{ErrorReport, Event, Neighborhood, Phase, SelectionState, Transition};
