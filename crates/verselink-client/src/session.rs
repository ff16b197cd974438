//! Async driver for the selection state machine.
//!
//! A [`Session`] owns the current [`SelectionState`] and is the only thing
//! that feeds it events. Each intent allocates a sequence number, records
//! the dispatch, awaits the backend, runs the pure pipeline stages and
//! reports the completion. The reducer drops completions that have been
//! superseded in the meantime, so intents may overlap freely.
//!
//! Snapshots are published on a [`tokio::sync::watch`] channel; views
//! subscribe and redraw whenever a new one arrives.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use verselink_core::{Error, Event, Result, ResultKey, SelectionState, Transition};
use verselink_search::{rank_response, Stopwords};

use crate::backend::{Backend, GraphParams, SearchParams};
use crate::pipeline;

/// What became of a finished intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The completion was applied and a new snapshot published.
    Applied,
    /// A newer intent of the same kind (or a newer query) was dispatched
    /// first; the completion was discarded.
    Superseded,
    /// The operation failed and the failure was recorded in the snapshot.
    Failed(Error),
}

#[derive(Debug)]
pub struct Session<B> {
    backend: B,
    stopwords: Stopwords,
    search_seq: AtomicU64,
    selection_seq: AtomicU64,
    state: watch::Sender<SelectionState>,
}

impl<B: Backend> Session<B> {
    pub fn new(backend: B, stopwords: Stopwords) -> Self {
        let (state, _) = watch::channel(SelectionState::new());
        Self {
            backend,
            stopwords,
            search_seq: AtomicU64::new(0),
            selection_seq: AtomicU64::new(0),
            state,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Receive every snapshot published from now on.
    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.state.subscribe()
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> SelectionState {
        self.state.borrow().clone()
    }

    /// Search for `term` and publish the ranked results.
    ///
    /// The selection is cleared as soon as the query is dispatched; results
    /// of the previous query stay visible until the new ones arrive.
    pub async fn submit_query(&self, term: &str, params: &SearchParams) -> Outcome {
        let term = term.to_string();
        let seq = match self.begin(&self.search_seq, |seq| Event::QuerySubmitted {
            seq,
            term: term.clone(),
        }) {
            Ok(seq) => seq,
            Err(error) => return Outcome::Failed(error),
        };
        log::info!("searching for {:?}", term);

        let ranked = match self.backend.search(&term, params).await {
            Ok(body) => rank_response(&body),
            Err(error) => Err(error),
        };

        match ranked {
            Ok(results) => self.finish(Event::SearchCompleted { seq, results }, None),
            Err(error) => self.finish(
                Event::SearchFailed {
                    seq,
                    error: error.clone(),
                },
                Some(error),
            ),
        }
    }

    /// Fetch and derive the neighborhood of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownResult`] without contacting the backend when
    /// `key` is not among the current results.
    pub async fn select_result(&self, key: &ResultKey, params: &GraphParams) -> Result<Outcome> {
        let seq = self.begin(&self.selection_seq, |seq| Event::SelectionRequested {
            seq,
            key: key.clone(),
        })?;
        log::info!("loading neighborhood of {}", key);

        let derived = match self.backend.graph(key, params).await {
            Ok(body) => pipeline::neighborhood(key, &body, &self.stopwords),
            Err(error) => Err(error),
        };

        Ok(match derived {
            Ok(neighborhood) => {
                self.finish(Event::SelectionCompleted { seq, neighborhood }, None)
            }
            Err(error) => self.finish(
                Event::SelectionFailed {
                    seq,
                    error: error.clone(),
                },
                Some(error),
            ),
        })
    }

    /// Allocate the next sequence number from `counter` and apply the
    /// dispatch event built from it.
    ///
    /// Allocation happens under the channel's write lock, so sequence order
    /// always matches the order in which dispatches reach the reducer.
    fn begin(&self, counter: &AtomicU64, event: impl FnOnce(u64) -> Event) -> Result<u64> {
        let mut result = Ok(0);
        self.state.send_if_modified(|state| {
            let seq = counter.fetch_add(1, Ordering::SeqCst) + 1;
            match state.apply(event(seq)) {
                Ok(Transition::Applied(next)) => {
                    *state = next;
                    result = Ok(seq);
                    true
                }
                Ok(Transition::Stale) => {
                    result = Ok(seq);
                    false
                }
                Err(error) => {
                    result = Err(error);
                    false
                }
            }
        });
        result
    }

    fn finish(&self, event: Event, failure: Option<Error>) -> Outcome {
        let mut applied = false;
        self.state.send_if_modified(|state| match state.apply(event) {
            Ok(Transition::Applied(next)) => {
                *state = next;
                applied = true;
                true
            }
            Ok(Transition::Stale) => false,
            Err(error) => {
                log::warn!("completion rejected: {}", error);
                false
            }
        });

        match (applied, failure) {
            (false, _) => Outcome::Superseded,
            (true, Some(error)) => Outcome::Failed(error),
            (true, None) => Outcome::Applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use verselink_core::{ErrorKind, Phase};

    const SEARCH: &str = r#"{
        "b": {"payload": {"artist_name": "B", "track_name": "Bee", "track_uri": "spotify:track:b",
              "topic_words": "['x']", "topic_probs": "[0.1]", "topic_id": 1}, "score": 0.3},
        "a": {"payload": {"artist_name": "A", "track_name": "Ay", "track_uri": "spotify:track:a",
              "topic_words": "['y']", "topic_probs": "[0.2]", "topic_id": 2}, "score": 0.5}
    }"#;

    const GRAPH: &str = r#"{
        "nodes": ["a"], "edges": [],
        "node_data": {"a": {"track_name": "Ay", "artist_name": "A", "topic_id": 2,
            "topic_words": "['y']", "topic_probs": "[0.2]", "lyrics": "sun sun moon",
            "duration": 1000, "track_uri": "spotify:track:a"}}
    }"#;

    #[derive(Debug)]
    struct Fixed {
        fail_graph: bool,
    }

    #[async_trait]
    impl Backend for Fixed {
        async fn search(&self, _query: &str, _params: &SearchParams) -> Result<String> {
            Ok(SEARCH.to_string())
        }

        async fn graph(&self, _key: &ResultKey, _params: &GraphParams) -> Result<String> {
            if self.fail_graph {
                Err(Error::NetworkFailure("connection refused".to_string()))
            } else {
                Ok(GRAPH.to_string())
            }
        }
    }

    fn session(fail_graph: bool) -> Session<Fixed> {
        Session::new(Fixed { fail_graph }, Stopwords::english())
    }

    #[tokio::test]
    async fn test_query_then_select() {
        let session = session(false);
        assert_eq!(session.snapshot().phase(), Phase::Idle);

        let outcome = session.submit_query("love", &SearchParams::default()).await;
        assert_eq!(outcome, Outcome::Applied);
        let snap = session.snapshot();
        assert_eq!(snap.phase(), Phase::ResultsLoaded);
        let keys: Vec<&str> = snap.results().keys().map(ResultKey::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);

        let outcome = session
            .select_result(&ResultKey::new("a"), &GraphParams::default())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Applied);
        let snap = session.snapshot();
        assert_eq!(snap.phase(), Phase::SongSelected);
        assert_eq!(snap.word_frequencies().unwrap().count_of("sun"), Some(2));
    }

    #[tokio::test]
    async fn test_unknown_key_is_rejected() {
        let session = session(false);
        session.submit_query("love", &SearchParams::default()).await;
        let err = session
            .select_result(&ResultKey::new("zzz"), &GraphParams::default())
            .await
            .unwrap_err();
        assert_eq!(err, Error::UnknownResult("zzz".to_string()));
        assert_eq!(session.snapshot().phase(), Phase::ResultsLoaded);
    }

    #[tokio::test]
    async fn test_failed_selection_is_recorded() {
        let session = session(true);
        session.submit_query("love", &SearchParams::default()).await;
        let outcome = session
            .select_result(&ResultKey::new("a"), &GraphParams::default())
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Failed(Error::NetworkFailure(_))));
        let snap = session.snapshot();
        assert_eq!(snap.phase(), Phase::ResultsLoaded);
        assert_eq!(snap.last_error().unwrap().kind, ErrorKind::NetworkFailure);
        assert!(snap.selected_key().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_new_snapshots() {
        let session = session(false);
        let mut rx = session.subscribe();
        session.submit_query("love", &SearchParams::default()).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().results().len(), 2);
    }
}
