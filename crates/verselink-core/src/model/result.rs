use serde::{Deserialize, Serialize};

use crate::color::{score_color, Rgb};
use crate::model::ids::ResultKey;

/// A single search hit with its decoded payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub key: ResultKey,
    pub track_name: String,
    pub artist_name: String,
    pub track_uri: String,
    pub topic_id: i64,
    pub topic_words: Vec<String>,
    pub topic_probs: Vec<f64>,
    /// Relevance to the query. Usually in `[0, 0.6]`, but any value is kept.
    pub score: f64,
}

impl SearchResult {
    /// Ramp color for this hit's score.
    pub fn color(&self) -> Rgb {
        score_color(self.score)
    }

    pub fn track_url(&self) -> Option<String> {
        super::track_url(&self.track_uri)
    }
}

/// Search hits ordered by score, highest first.
///
/// The sort is stable: hits with equal scores keep the order in which the
/// backend returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedResultList(Vec<SearchResult>);

impl RankedResultList {
    #[must_use]
    pub fn new(mut results: Vec<SearchResult>) -> Self {
        // `total_cmp` keeps the order total even for NaN scores.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self(results)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[SearchResult] {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&SearchResult> {
        self.0.iter().find(|r| r.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ResultKey> {
        self.0.iter().map(|r| &r.key)
    }
}

impl<'a> IntoIterator for &'a RankedResultList {
    type Item = &'a SearchResult;
    type IntoIter = std::slice::Iter<'a, SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for RankedResultList {
    type Item = SearchResult;
    type IntoIter = std::vec::IntoIter<SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
