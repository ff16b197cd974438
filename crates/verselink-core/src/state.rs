//! Selection state and its transition function.
//!
//! [`SelectionState`] is an immutable snapshot: [`SelectionState::apply`]
//! consumes an [`Event`] and yields the next snapshot, leaving the current
//! one untouched. Every asynchronous operation carries a sequence number
//! assigned at dispatch; a completion is applied only if its number is the
//! one most recently dispatched for that kind of operation, so a slow,
//! superseded response can never overwrite a newer one.

use serde::Serialize;

use crate::error::{Error, ErrorKind, Result};
use crate::model::{Graph, RankedResultList, ResultKey, WordFrequencyTable};

/// Coarse lifecycle stage, derived from the snapshot contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No query has been issued yet.
    Idle,
    /// A query has been issued; results may be empty or still loading.
    ResultsLoaded,
    /// A neighborhood graph and word table are available.
    SongSelected,
}

/// Graph and word table derived from one selected result.
///
/// Kept together so the two can only ever be replaced as a pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighborhood {
    pub key: ResultKey,
    pub graph: Graph,
    pub words: WordFrequencyTable,
}

/// User-visible record of the last failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&Error> for ErrorReport {
    fn from(error: &Error) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone)]
pub enum Event {
    QuerySubmitted { seq: u64, term: String },
    SearchCompleted { seq: u64, results: RankedResultList },
    SearchFailed { seq: u64, error: Error },
    SelectionRequested { seq: u64, key: ResultKey },
    SelectionCompleted { seq: u64, neighborhood: Neighborhood },
    SelectionFailed { seq: u64, error: Error },
}

/// Result of feeding an event to [`SelectionState::apply`].
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Transition {
    /// The event produced a new snapshot.
    Applied(SelectionState),
    /// The event answered a superseded request and was discarded.
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    search_term: Option<String>,
    results: RankedResultList,
    selected_key: Option<ResultKey>,
    neighborhood: Option<Neighborhood>,
    pending_search: Option<u64>,
    pending_selection: Option<(u64, ResultKey)>,
    last_error: Option<ErrorReport>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.neighborhood.is_some() {
            Phase::SongSelected
        } else if self.search_term.is_some() {
            Phase::ResultsLoaded
        } else {
            Phase::Idle
        }
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn results(&self) -> &RankedResultList {
        &self.results
    }

    /// The key the user selected most recently.
    ///
    /// While a selection is loading this already names the new key, and
    /// [`Self::neighborhood`] still holds the previous one.
    pub fn selected_key(&self) -> Option<&ResultKey> {
        self.selected_key.as_ref()
    }

    pub fn neighborhood(&self) -> Option<&Neighborhood> {
        self.neighborhood.as_ref()
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.neighborhood.as_ref().map(|n| &n.graph)
    }

    pub fn word_frequencies(&self) -> Option<&WordFrequencyTable> {
        self.neighborhood.as_ref().map(|n| &n.words)
    }

    pub fn is_searching(&self) -> bool {
        self.pending_search.is_some()
    }

    pub fn is_loading_selection(&self) -> bool {
        self.pending_selection.is_some()
    }

    pub fn last_error(&self) -> Option<&ErrorReport> {
        self.last_error.as_ref()
    }

    /// Compute the snapshot that follows `event`.
    ///
    /// Returns [`Error::UnknownResult`] when a selection names a key that is
    /// not in the current results; every other event either applies or is
    /// reported as [`Transition::Stale`].
    pub fn apply(&self, event: Event) -> Result<Transition> {
        let transition = match event {
            Event::QuerySubmitted { seq, term } => {
                log::debug!("query #{} submitted: {:?}", seq, term);
                let mut next = self.clone();
                next.search_term = Some(term);
                next.pending_search = Some(seq);
                next.last_error = None;
                next.clear_selection();
                Transition::Applied(next)
            }
            Event::SearchCompleted { seq, results } => {
                if self.pending_search != Some(seq) {
                    log::debug!("discarding stale search response #{}", seq);
                    return Ok(Transition::Stale);
                }
                log::debug!("search #{} completed with {} results", seq, results.len());
                let mut next = self.clone();
                next.results = results;
                next.pending_search = None;
                // A selection made against the previous list no longer applies.
                next.clear_selection();
                Transition::Applied(next)
            }
            Event::SearchFailed { seq, error } => {
                if self.pending_search != Some(seq) {
                    log::debug!("discarding stale search failure #{}", seq);
                    return Ok(Transition::Stale);
                }
                log::warn!("search #{} failed: {}", seq, error);
                let mut next = self.clone();
                next.pending_search = None;
                next.last_error = Some(ErrorReport::from(&error));
                Transition::Applied(next)
            }
            Event::SelectionRequested { seq, key } => {
                if !self.results.contains(key.as_str()) {
                    return Err(Error::UnknownResult(key.to_string()));
                }
                log::debug!("selection #{} requested for {}", seq, key);
                let mut next = self.clone();
                next.selected_key = Some(key.clone());
                next.pending_selection = Some((seq, key));
                next.last_error = None;
                Transition::Applied(next)
            }
            Event::SelectionCompleted { seq, neighborhood } => {
                match &self.pending_selection {
                    Some((pending, key)) if *pending == seq && *key == neighborhood.key => {}
                    _ => {
                        log::debug!("discarding stale selection response #{}", seq);
                        return Ok(Transition::Stale);
                    }
                }
                log::debug!(
                    "selection #{} completed: {} nodes, {} terms",
                    seq,
                    neighborhood.graph.node_count(),
                    neighborhood.words.len()
                );
                let mut next = self.clone();
                next.selected_key = Some(neighborhood.key.clone());
                next.neighborhood = Some(neighborhood);
                next.pending_selection = None;
                Transition::Applied(next)
            }
            Event::SelectionFailed { seq, error } => {
                if self.pending_selection.as_ref().map(|(s, _)| *s) != Some(seq) {
                    log::debug!("discarding stale selection failure #{}", seq);
                    return Ok(Transition::Stale);
                }
                log::warn!("selection #{} failed: {}", seq, error);
                let mut next = self.clone();
                next.pending_selection = None;
                // Fall back to whatever is still on screen.
                next.selected_key = self.neighborhood.as_ref().map(|n| n.key.clone());
                next.last_error = Some(ErrorReport::from(&error));
                Transition::Applied(next)
            }
        };
        Ok(transition)
    }

    fn clear_selection(&mut self) {
        self.selected_key = None;
        self.neighborhood = None;
        self.pending_selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphNode, NodeId, SearchResult};
    use crate::Rgb;

    fn hit(key: &str, score: f64) -> SearchResult {
        SearchResult {
            key: ResultKey::new(key),
            track_name: key.to_uppercase(),
            artist_name: "Artist".to_string(),
            track_uri: String::new(),
            topic_id: 1,
            topic_words: Vec::new(),
            topic_probs: Vec::new(),
            score,
        }
    }

    fn neighborhood(key: &str) -> Neighborhood {
        let node = GraphNode {
            id: NodeId::new(key),
            track_name: key.to_string(),
            artist_name: "Artist".to_string(),
            track_uri: String::new(),
            topic_id: 1,
            topic_words: Vec::new(),
            topic_probs: Vec::new(),
            lyrics: "hello".to_string(),
            duration_ms: 0.0,
            color: Rgb::new(1, 2, 3),
        };
        Neighborhood {
            key: ResultKey::new(key),
            graph: Graph::new(NodeId::new(key), vec![node], vec![]).unwrap(),
            words: WordFrequencyTable::from_counts(vec![("hello".to_string(), 1)]),
        }
    }

    fn applied(state: &SelectionState, event: Event) -> SelectionState {
        match state.apply(event).unwrap() {
            Transition::Applied(next) => next,
            Transition::Stale => panic!("event unexpectedly stale"),
        }
    }

    fn loaded(keys: &[(&str, f64)]) -> SelectionState {
        let state = applied(
            &SelectionState::new(),
            Event::QuerySubmitted {
                seq: 1,
                term: "love".to_string(),
            },
        );
        let results = RankedResultList::new(keys.iter().map(|(k, s)| hit(k, *s)).collect());
        applied(&state, Event::SearchCompleted { seq: 1, results })
    }

    fn selected(key: &str, seq: u64) -> SelectionState {
        let state = loaded(&[("A", 0.5), ("B", 0.3)]);
        let state = applied(
            &state,
            Event::SelectionRequested {
                seq,
                key: ResultKey::new(key),
            },
        );
        applied(
            &state,
            Event::SelectionCompleted {
                seq,
                neighborhood: neighborhood(key),
            },
        )
    }

    #[test]
    fn test_starts_idle() {
        let state = SelectionState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.results().is_empty());
        assert!(state.graph().is_none());
    }

    #[test]
    fn test_query_moves_to_results_loaded_even_when_empty() {
        let state = loaded(&[]);
        assert_eq!(state.phase(), Phase::ResultsLoaded);
        assert_eq!(state.search_term(), Some("love"));
        assert!(!state.is_searching());
    }

    #[test]
    fn test_results_are_ranked() {
        let state = loaded(&[("B", 0.3), ("A", 0.5)]);
        let keys: Vec<&str> = state.results().keys().map(ResultKey::as_str).collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[test]
    fn test_selection_populates_graph_and_words_together() {
        let state = selected("A", 1);
        assert_eq!(state.phase(), Phase::SongSelected);
        assert_eq!(state.selected_key().map(ResultKey::as_str), Some("A"));
        assert!(state.graph().is_some());
        assert!(state.word_frequencies().is_some());
    }

    #[test]
    fn test_new_query_clears_selection_immediately() {
        let state = selected("A", 1);
        let state = applied(
            &state,
            Event::QuerySubmitted {
                seq: 2,
                term: "rain".to_string(),
            },
        );
        assert_eq!(state.phase(), Phase::ResultsLoaded);
        assert!(state.selected_key().is_none());
        assert!(state.graph().is_none());
        assert!(state.word_frequencies().is_none());
        // Old results stay visible until the new ones arrive.
        assert_eq!(state.results().len(), 2);
        assert!(state.is_searching());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let state = loaded(&[("A", 0.5)]);
        let err = state
            .apply(Event::SelectionRequested {
                seq: 1,
                key: ResultKey::new("Z"),
            })
            .unwrap_err();
        assert_eq!(err, Error::UnknownResult("Z".to_string()));
    }

    #[test]
    fn test_stale_search_response_discarded() {
        let state = applied(
            &SelectionState::new(),
            Event::QuerySubmitted {
                seq: 1,
                term: "a".to_string(),
            },
        );
        let state = applied(
            &state,
            Event::QuerySubmitted {
                seq: 2,
                term: "b".to_string(),
            },
        );
        let stale = state
            .apply(Event::SearchCompleted {
                seq: 1,
                results: RankedResultList::new(vec![hit("old", 0.9)]),
            })
            .unwrap();
        assert_eq!(stale, Transition::Stale);
    }

    #[test]
    fn test_last_dispatched_selection_wins() {
        let state = loaded(&[("A", 0.5), ("B", 0.3)]);
        let state = applied(
            &state,
            Event::SelectionRequested {
                seq: 1,
                key: ResultKey::new("A"),
            },
        );
        let state = applied(
            &state,
            Event::SelectionRequested {
                seq: 2,
                key: ResultKey::new("B"),
            },
        );
        // B completes first, then A's slow response arrives.
        let state = applied(
            &state,
            Event::SelectionCompleted {
                seq: 2,
                neighborhood: neighborhood("B"),
            },
        );
        let late = state
            .apply(Event::SelectionCompleted {
                seq: 1,
                neighborhood: neighborhood("A"),
            })
            .unwrap();
        assert_eq!(late, Transition::Stale);
        assert_eq!(state.neighborhood().map(|n| n.key.as_str()), Some("B"));
    }

    #[test]
    fn test_selection_after_new_query_is_stale() {
        let state = loaded(&[("A", 0.5)]);
        let state = applied(
            &state,
            Event::SelectionRequested {
                seq: 1,
                key: ResultKey::new("A"),
            },
        );
        let state = applied(
            &state,
            Event::QuerySubmitted {
                seq: 2,
                term: "other".to_string(),
            },
        );
        let late = state
            .apply(Event::SelectionCompleted {
                seq: 1,
                neighborhood: neighborhood("A"),
            })
            .unwrap();
        assert_eq!(late, Transition::Stale);
    }

    #[test]
    fn test_failed_search_keeps_previous_results() {
        let state = loaded(&[("A", 0.5)]);
        let state = applied(
            &state,
            Event::QuerySubmitted {
                seq: 2,
                term: "other".to_string(),
            },
        );
        let state = applied(
            &state,
            Event::SearchFailed {
                seq: 2,
                error: Error::NetworkFailure("timeout".to_string()),
            },
        );
        assert_eq!(state.results().len(), 1);
        assert_eq!(
            state.last_error().map(|e| e.kind),
            Some(ErrorKind::NetworkFailure)
        );
    }

    #[test]
    fn test_failed_selection_keeps_previous_neighborhood() {
        let state = selected("A", 1);
        let state = applied(
            &state,
            Event::SelectionRequested {
                seq: 2,
                key: ResultKey::new("B"),
            },
        );
        assert_eq!(state.selected_key().map(ResultKey::as_str), Some("B"));
        let state = applied(
            &state,
            Event::SelectionFailed {
                seq: 2,
                error: Error::DanglingEdge("x".to_string(), "y".to_string()),
            },
        );
        assert_eq!(state.selected_key().map(ResultKey::as_str), Some("A"));
        assert_eq!(state.neighborhood().map(|n| n.key.as_str()), Some("A"));
        assert_eq!(
            state.last_error().map(|e| e.kind),
            Some(ErrorKind::DanglingEdge)
        );
    }

    #[test]
    fn test_failed_first_selection_returns_to_no_selection() {
        let state = loaded(&[("A", 0.5)]);
        let state = applied(
            &state,
            Event::SelectionRequested {
                seq: 1,
                key: ResultKey::new("A"),
            },
        );
        let state = applied(
            &state,
            Event::SelectionFailed {
                seq: 1,
                error: Error::MissingNodeMetadata("A".to_string()),
            },
        );
        assert_eq!(state.phase(), Phase::ResultsLoaded);
        assert!(state.selected_key().is_none());
    }

    #[test]
    fn test_apply_does_not_mutate_receiver() {
        let state = loaded(&[("A", 0.5)]);
        let before = state.clone();
        let _next = applied(
            &state,
            Event::QuerySubmitted {
                seq: 9,
                term: "x".to_string(),
            },
        );
        assert_eq!(state, before);
    }
}
