use anyhow::Result;
use verselink_client::{config, Config};

/// Show the effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    let path = config::config_file_path();

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", path.display());
    let exists = path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  base_url: {}", config.base_url);
    println!("  timeout_secs: {}", config.timeout_secs);
    println!("  max_retries: {}", config.max_retries);
    println!("  search_top_k: {}", config.search_top_k);
    println!("  graph_top_k: {}", config.graph_top_k);
    println!("  graph_size: {}", config.graph_size);
    println!("  graph_threshold: {}", config.graph_threshold);
    if config.extra_stopwords.is_empty() {
        println!("  extra_stopwords: <none>");
    } else {
        println!("  extra_stopwords: {}", config.extra_stopwords.join(", "));
    }
    println!("  log_level: {}", config.log_level);
    println!("  log_coloured: {}", config.log_coloured);

    println!("\nPriority: CLI args > ENV vars (VERSELINK_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", path.display());
        println!("\nEdit this file to configure verselink.");
    } else {
        println!("Config file already exists: {}", path.display());
    }

    Ok(())
}
