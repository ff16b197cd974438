//! The boundary to the lyrics backend.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use verselink_core::{Result, ResultKey};

/// Parameters of a `search` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub top_k: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { top_k: 10 }
    }
}

/// Parameters of a `graph` request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphParams {
    /// Neighbors fetched per node while the graph grows.
    pub top_k: usize,
    /// Maximum number of nodes.
    pub size: usize,
    /// Minimum similarity score for an edge.
    pub threshold: f64,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            top_k: 20,
            size: 15,
            threshold: 0.1,
        }
    }
}

/// Source of raw search and graph responses.
///
/// Implementations return the response body untouched; decoding and
/// validation happen in the pipeline. Failures to reach the backend, or
/// non-success responses, are reported as
/// [`Error::NetworkFailure`](verselink_core::Error::NetworkFailure).
#[async_trait]
pub trait Backend: Send + Sync {
    async fn search(&self, query: &str, params: &SearchParams) -> Result<String>;

    async fn graph(&self, key: &ResultKey, params: &GraphParams) -> Result<String>;
}

#[async_trait]
impl<T: Backend + ?Sized> Backend for Arc<T> {
    async fn search(&self, query: &str, params: &SearchParams) -> Result<String> {
        (**self).search(query, params).await
    }

    async fn graph(&self, key: &ResultKey, params: &GraphParams) -> Result<String> {
        (**self).graph(key, params).await
    }
}
