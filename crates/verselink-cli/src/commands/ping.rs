use anyhow::{Context, Result};
use verselink_client::{Config, HttpBackend};

/// Check the backend's health endpoint.
pub async fn run_ping(config: &Config) -> Result<()> {
    let backend = HttpBackend::from_config(config)?;
    backend
        .ping()
        .await
        .with_context(|| format!("Backend at {} is not answering", backend.base_url()))?;
    println!("✓ Backend at {} is up", backend.base_url());
    Ok(())
}
