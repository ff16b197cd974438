//! Song neighborhood graph for verselink.
//!
//! Validates raw node/edge data from the backend into a colored
//! [`Graph`](verselink_core::Graph) and answers topology questions about it
//! through petgraph.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod builder;
pub mod topology;

pub use builder::{build, build_from_response, BuiltGraph};
pub use topology::Topology;
