//! Search result ranking.

use verselink_core::topics::{topic_probs_from_value, topic_words_from_value};
use verselink_core::wire::{parse_search_response, RawHit};
use verselink_core::{RankedResultList, Result, ResultKey, SearchResult};

fn decode(key: ResultKey, hit: RawHit) -> Result<SearchResult> {
    let RawHit { payload, score } = hit;
    Ok(SearchResult {
        topic_words: topic_words_from_value(&payload.topic_words)?,
        topic_probs: topic_probs_from_value(&payload.topic_probs)?,
        key,
        track_name: payload.track_name,
        artist_name: payload.artist_name,
        track_uri: payload.track_uri,
        topic_id: payload.topic_id,
        score,
    })
}

/// Decode raw hits and order them by score, highest first.
///
/// Hits are never dropped or merged; ties keep their input order. Any hit
/// with an undecodable topic list fails the whole ranking.
pub fn rank(hits: Vec<(ResultKey, RawHit)>) -> Result<RankedResultList> {
    let results = hits
        .into_iter()
        .map(|(key, hit)| decode(key, hit))
        .collect::<Result<Vec<_>>>()?;
    log::debug!("ranking {} search hits", results.len());
    Ok(RankedResultList::new(results))
}

/// Parse a `search` response body and rank it.
pub fn rank_response(body: &str) -> Result<RankedResultList> {
    rank(parse_search_response(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use verselink_core::Error;

    fn body(hits: &[(&str, f64, i64)]) -> String {
        let mut object = serde_json::Map::new();
        for (key, score, topic) in hits {
            object.insert(
                (*key).to_string(),
                json!({
                    "payload": {
                        "artist_name": "Artist",
                        "track_name": format!("Track {key}"),
                        "track_uri": format!("spotify:track:{key}"),
                        "topic_words": "['love', 'night']",
                        "topic_probs": "[0.3, 0.1]",
                        "topic_id": topic,
                    },
                    "score": score,
                }),
            );
        }
        serde_json::Value::Object(object).to_string()
    }

    #[test]
    fn test_love_query_ranks_a_before_b() {
        let ranked = rank_response(&body(&[("B", 0.3, 1), ("A", 0.5, 2)])).unwrap();
        let keys: Vec<&str> = ranked.keys().map(ResultKey::as_str).collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[test]
    fn test_scores_non_increasing() {
        let ranked = rank_response(&body(&[
            ("a", 0.1, 0),
            ("b", 0.55, 0),
            ("c", 0.3, 0),
            ("d", 0.3, 0),
            ("e", 0.0, 0),
        ]))
        .unwrap();
        let scores: Vec<f64> = ranked.iter().map(|r| r.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn test_ties_are_stable() {
        let ranked = rank_response(&body(&[("x", 0.2, 0), ("y", 0.2, 0), ("z", 0.2, 0)])).unwrap();
        let keys: Vec<&str> = ranked.keys().map(ResultKey::as_str).collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_ties_keep_response_order_not_key_order() {
        let tied = r#"{
            "zeta": {"payload": {"artist_name": "Z", "track_name": "Zeta", "track_uri": "spotify:track:zeta",
                "topic_words": "['x']", "topic_probs": "[0.1]", "topic_id": 0}, "score": 0.2},
            "alpha": {"payload": {"artist_name": "A", "track_name": "Alpha", "track_uri": "spotify:track:alpha",
                "topic_words": "['x']", "topic_probs": "[0.1]", "topic_id": 1}, "score": 0.2},
            "mid": {"payload": {"artist_name": "M", "track_name": "Mid", "track_uri": "spotify:track:mid",
                "topic_words": "['x']", "topic_probs": "[0.1]", "topic_id": 2}, "score": 0.2}
        }"#;
        let ranked = rank_response(tied).unwrap();
        let keys: Vec<&str> = ranked.keys().map(ResultKey::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_topic_lists_decoded() {
        let ranked = rank_response(&body(&[("a", 0.1, 4)])).unwrap();
        let first = &ranked.as_slice()[0];
        assert_eq!(first.topic_words, vec!["love", "night"]);
        assert_eq!(first.topic_probs, vec![0.3, 0.1]);
        assert_eq!(first.topic_id, 4);
    }

    #[test]
    fn test_bad_topic_list_fails_ranking() {
        let bad = json!({
            "a": {
                "payload": {
                    "artist_name": "x", "track_name": "y", "track_uri": "z",
                    "topic_words": "['unterminated", "topic_probs": "[]", "topic_id": 0
                },
                "score": 0.2
            }
        });
        let err = rank_response(&bad.to_string()).unwrap_err();
        assert!(matches!(err, Error::Parse { field: "topic_words", .. }));
    }

    #[test]
    fn test_missing_score_is_malformed() {
        let bad = json!({"a": {"payload": {}}});
        assert!(matches!(
            rank_response(&bad.to_string()),
            Err(Error::MalformedPayload { .. })
        ));
    }
}
