use std::sync::Arc;

use anyhow::Result;
use verselink_client::{Config, HttpBackend, Session};

use crate::tui;

/// Run the interactive explorer against the configured backend.
///
/// Logging is silenced while the terminal UI owns the screen; failures show
/// up in the status bar instead.
pub fn run_explore(config: &Config, query: Option<String>) -> Result<()> {
    let backend = HttpBackend::from_config(config)?;
    let session = Arc::new(Session::new(backend, config.stopwords()));
    let params = tui::Params {
        search: config.search_params(),
        graph: config.graph_params(),
    };

    let level = log::max_level();
    log::set_max_level(log::LevelFilter::Off);
    let result = tokio::task::block_in_place(|| tui::run_tui(&session, params, query));
    log::set_max_level(level);

    result
}
