use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use verselink_search::Stopwords;

use crate::backend::{GraphParams, SearchParams};
use crate::resilience::RetryPolicy;

/// Configuration for verselink.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (VERSELINK_* prefix)
/// 3. Config file (~/.config/verselink/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the lyrics backend API.
    ///
    /// Can be set via:
    /// - CLI: --base-url http://host:port/api/
    /// - ENV: VERSELINK_BASE_URL
    /// - Config: base_url = "..."
    /// - Default: http://localhost:6555/api/
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Retries after a failed backend request before giving up.
    pub max_retries: usize,

    /// Number of hits requested per search.
    pub search_top_k: usize,

    /// Neighbors fetched per node while growing a graph.
    pub graph_top_k: usize,

    /// Maximum number of nodes in a graph.
    pub graph_size: usize,

    /// Minimum similarity score for a graph edge.
    pub graph_threshold: f64,

    /// Words filtered from word clouds in addition to the built-in list.
    pub extra_stopwords: Vec<String>,

    /// Log level: error, warn, info, debug or trace.
    pub log_level: String,

    /// Colour log output.
    pub log_coloured: bool,
}

impl Default for Config {
    fn default() -> Self {
        let search = SearchParams::default();
        let graph = GraphParams::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_retries: 3,
            search_top_k: search.top_k,
            graph_top_k: graph.top_k,
            graph_size: graph.size,
            graph_threshold: graph.threshold,
            extra_stopwords: Vec::new(),
            log_level: "info".to_string(),
            log_coloured: true,
        }
    }
}

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:6555/api/";

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/verselink/config.toml
    /// Reads environment variables with VERSELINK_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific file plus the environment.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("verselink");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Apply the `--base-url` CLI override, if given.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries)
    }

    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            top_k: self.search_top_k,
        }
    }

    pub fn graph_params(&self) -> GraphParams {
        GraphParams {
            top_k: self.graph_top_k,
            size: self.graph_size,
            threshold: self.graph_threshold,
        }
    }

    /// The built-in English list plus `extra_stopwords`.
    pub fn stopwords(&self) -> Stopwords {
        Stopwords::english().with_extra(&self.extra_stopwords)
    }
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/verselink/config.toml
/// - macOS: ~/Library/Application Support/verselink/config.toml
/// - Windows: %APPDATA%\verselink\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("verselink")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Verselink Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (VERSELINK_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Lyrics backend API
#
# Can also be set via:
# - CLI: verselink --base-url http://host:6555/api/ search "rain"
# - Environment: VERSELINK_BASE_URL=http://host:6555/api/
base_url = "http://localhost:6555/api/"

# Request timeout (seconds) and retries on network failures
#timeout_secs = 30
#max_retries = 3

# Number of results per search
#search_top_k = 10

# Neighborhood graph shape: neighbors per node, maximum nodes, and the
# minimum similarity for an edge
#graph_top_k = 20
#graph_size = 15
#graph_threshold = 0.1

# Additional words to leave out of word clouds
#extra_stopwords = ["baby", "yeah"]

# Logging
#log_level = "info"
#log_coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

/// Create the example config at `config_path` if nothing is there yet.
pub fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
