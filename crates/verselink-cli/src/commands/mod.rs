pub mod config;
pub mod explore;
pub mod graph;
pub mod ping;
pub mod search;

pub use explore::run_explore;
pub use graph::run_graph;
pub use ping::run_ping;
pub use search::run_search;
