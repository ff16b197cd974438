use anyhow::{Context, Result};
use verselink_client::{neighborhood, Backend, Config, GraphParams, HttpBackend};
use verselink_core::{Neighborhood, ResultKey};
use verselink_graph::Topology;
use verselink_search::WordCloud;

/// Number of word-cloud terms printed in text mode.
const SHOWN_TERMS: usize = 20;

/// Number of best-connected songs listed under the node table.
const SHOWN_HUBS: usize = 3;

/// Fetch a song's neighborhood and print the graph and its top words.
pub async fn run_graph(config: &Config, key: &str, params: &GraphParams, json: bool) -> Result<()> {
    let backend = HttpBackend::from_config(config)?;
    let key = ResultKey::from(key);

    let body = backend
        .graph(&key, params)
        .await
        .with_context(|| format!("Graph request for {key} failed"))?;
    let hood = neighborhood(&key, &body, &config.stopwords())
        .with_context(|| format!("Unusable graph response for {key}"))?;
    let cloud = WordCloud::from_table(&hood.words);

    if json {
        let value = serde_json::json!({
            "neighborhood": hood,
            "word_cloud": cloud,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_graph(&hood);
    print_cloud(&cloud);
    Ok(())
}

fn format_duration(ms: f64) -> String {
    if !ms.is_finite() || ms <= 0.0 {
        return "-".to_string();
    }
    let secs = (ms / 1000.0).round() as u64;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// `None` when no node has any edge.
fn format_hubs(hubs: &[(&str, usize)]) -> Option<String> {
    let parts: Vec<String> = hubs
        .iter()
        .filter(|(_, degree)| *degree > 0)
        .map(|(id, degree)| format!("{id} ({degree})"))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn print_graph(hood: &Neighborhood) {
    let graph = &hood.graph;
    let topology = Topology::of(graph);

    println!("Neighborhood of {}", hood.key);
    println!("================{}\n", "=".repeat(hood.key.as_str().len()));
    println!(
        "{} songs, {} edges, {} connected component(s)\n",
        graph.node_count(),
        graph.edge_count(),
        topology.component_count()
    );

    for node in graph.nodes() {
        let marker = if node.id == *graph.seed() { "*" } else { " " };
        println!(
            "{} {} topic {:>2}  degree {:>2}  {:>6}  [{}] {}",
            marker,
            node.color,
            node.topic_id,
            topology.degree(node.id.as_str()),
            format_duration(node.duration_ms),
            node.id,
            node.label()
        );
    }

    if let Some(hubs) = format_hubs(&topology.hubs(SHOWN_HUBS)) {
        println!("\nBest connected: {hubs}");
    }

    let histogram = graph.topic_histogram();
    if !histogram.is_empty() {
        let parts: Vec<String> = histogram
            .iter()
            .map(|(topic, count)| format!("{topic}×{count}"))
            .collect();
        println!("\nTopics: {}", parts.join("  "));
    }
}

fn print_cloud(cloud: &WordCloud) {
    if cloud.is_empty() {
        println!("\nNo words left after filtering.");
        return;
    }

    println!("\nTop words:");
    for entry in cloud.entries().iter().take(SHOWN_TERMS) {
        println!(
            "  {:<16} {:>4}  size {:>5.1}",
            entry.term, entry.count, entry.font_size
        );
    }
}
