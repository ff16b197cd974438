use anyhow::{Context, Result};
use clap::Parser;

use verselink_client::Config;

mod commands;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "verselink", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Lyrics backend API (default: http://localhost:6555/api/)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Search lyrics by meaning
    ///
    /// Sends the query to the backend's semantic search and prints the hits
    /// ranked by similarity score, highest first. Each line shows the score,
    /// the result key (used by 'verselink graph'), the song, its dominant
    /// topic and a Spotify link when the track has one.
    Search {
        /// Free-text query
        query: String,

        /// Number of results to request
        #[arg(long)]
        top_k: Option<usize>,

        /// Print the ranked results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the similarity neighborhood of one song
    ///
    /// Fetches the graph of songs similar to the given result key, colors
    /// each song by topic, and summarizes the combined lyrics as a
    /// stopword-filtered word-frequency table with word cloud sizes.
    Graph {
        /// Result key from 'verselink search'
        key: String,

        /// Neighbors fetched per node while the graph grows
        #[arg(long)]
        top_k: Option<usize>,

        /// Maximum number of songs in the graph
        #[arg(long)]
        size: Option<usize>,

        /// Minimum similarity for an edge
        #[arg(long)]
        threshold: Option<f64>,

        /// Print the neighborhood as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive explorer: search, pick a song, browse its neighborhood
    Explore {
        /// Query to run on startup
        query: Option<String>,
    },
    /// Check that the backend is reachable
    Ping,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn log_level(name: &str) -> twyg::LogLevel {
    match name.to_ascii_lowercase().as_str() {
        "trace" => twyg::LogLevel::Trace,
        "debug" => twyg::LogLevel::Debug,
        "warn" | "warning" => twyg::LogLevel::Warn,
        "error" => twyg::LogLevel::Error,
        _ => twyg::LogLevel::Info,
    }
}

fn setup_logging(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose {
        twyg::LogLevel::Debug
    } else {
        log_level(&config.log_level)
    };
    let opts = twyg::OptsBuilder::new()
        .coloured(config.log_coloured)
        .level(level)
        .build()
        .map_err(|e| anyhow::anyhow!("{e:?}"))
        .context("Invalid logging options")?;
    twyg::setup(opts)
        .map_err(|e| anyhow::anyhow!("{e:?}"))
        .context("Failed to set up logging")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?.with_base_url(cli.base_url);
    setup_logging(&config, cli.verbose)?;
    log::debug!("using backend {}", config.base_url);

    match cli.command {
        Commands::Search { query, top_k, json } => {
            let mut params = config.search_params();
            if let Some(top_k) = top_k {
                params.top_k = top_k;
            }
            commands::run_search(&config, &query, &params, json).await?;
        }
        Commands::Graph {
            key,
            top_k,
            size,
            threshold,
            json,
        } => {
            let mut params = config.graph_params();
            if let Some(top_k) = top_k {
                params.top_k = top_k;
            }
            if let Some(size) = size {
                params.size = size;
            }
            if let Some(threshold) = threshold {
                params.threshold = threshold;
            }
            commands::run_graph(&config, &key, &params, json).await?;
        }
        Commands::Explore { query } => {
            commands::run_explore(&config, query)?;
        }
        Commands::Ping => {
            commands::run_ping(&config).await?;
        }
        Commands::Config { command } => match command {
            ConfigCommand::Show => commands::config::show_config(&config)?,
            ConfigCommand::Path => commands::config::show_path()?,
            ConfigCommand::Example => commands::config::show_example()?,
            ConfigCommand::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
