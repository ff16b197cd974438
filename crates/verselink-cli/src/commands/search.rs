use anyhow::{Context, Result};
use verselink_client::{Backend, Config, HttpBackend, SearchParams};
use verselink_core::RankedResultList;

/// Search the backend and print the ranked results.
pub async fn run_search(config: &Config, query: &str, params: &SearchParams, json: bool) -> Result<()> {
    let backend = HttpBackend::from_config(config)?;

    let body = backend
        .search(query, params)
        .await
        .with_context(|| format!("Search for {query:?} failed"))?;
    let results = verselink_search::rank_response(&body).context("Unusable search response")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    print_results(query, &results);
    Ok(())
}

fn print_results(query: &str, results: &RankedResultList) {
    if results.is_empty() {
        println!("No results for {:?}.", query);
        return;
    }

    println!("Results for {:?}", query);
    println!("{}", "=".repeat(14 + query.len()));
    for (rank, result) in results.iter().enumerate() {
        println!(
            "{:>3}. {:.3}  [{}] {} - {}",
            rank + 1,
            result.score,
            result.key,
            result.artist_name,
            result.track_name
        );
        if !result.topic_words.is_empty() {
            let words: Vec<&str> = result
                .topic_words
                .iter()
                .take(5)
                .map(String::as_str)
                .collect();
            println!("       topic {}: {}", result.topic_id, words.join(", "));
        }
        if let Some(url) = result.track_url() {
            println!("       {}", url);
        }
    }
    println!("\nRun 'verselink graph <key>' to explore a song's neighborhood.");
}
