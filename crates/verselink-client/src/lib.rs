//! Backend client and async session driver for verselink.
//!
//! Fetches search and graph responses from the lyrics backend with retries,
//! derives neighborhoods from them, and drives the selection state machine
//! through a [`Session`] whose snapshots views can subscribe to.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod backend;
pub mod config;
pub mod http;
pub mod pipeline;
pub mod resilience;
pub mod session;

pub use backend::{Backend, GraphParams, SearchParams};
pub use config::Config;
pub use http::HttpBackend;
pub use pipeline::neighborhood;
pub use resilience::RetryPolicy;
pub use session::{Outcome, Session};
