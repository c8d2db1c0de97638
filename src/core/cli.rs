//! Non-interactive commands: config info, loaded datasets, backend health.
//!
//! These print plain text and exit non-zero on failure.

use std::process;

use crate::core::api::ApiClient;
use crate::core::config::{self, Config};
use crate::core::paths;

fn display_dir(dir: Option<std::path::PathBuf>) -> String {
    dir.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    process::exit(1);
}

/// Load config, exiting with a message when it is invalid.
pub fn load_config(server: Option<&str>) -> Config {
    config::load(server).unwrap_or_else(|e| fail(e))
}

/// Build the API client, exiting with a message on failure.
pub fn client(config: &Config) -> ApiClient {
    ApiClient::new(config).unwrap_or_else(|e| fail(e))
}

/// Run the `config` command: display server, timeout and directories.
pub fn run_config(server: Option<&str>) {
    let config = load_config(server);
    println!("Server:      {}", config.server_url);
    println!("Timeout:     {}s", config.timeout.as_secs());
    println!("Config:      {}", display_dir(paths::config_dir()));
    println!("Cache:       {}", display_dir(paths::cache_dir()));
    println!("Transcripts: {}", display_dir(paths::transcripts_dir()));
}

/// Run the `datasets` command: one tab-separated line per loaded dataset.
pub async fn run_datasets(server: Option<&str>) {
    let config = load_config(server);
    let datasets = client(&config)
        .datasets()
        .await
        .unwrap_or_else(|e| fail(e));
    if datasets.is_empty() {
        println!("No datasets loaded.");
        return;
    }
    for d in datasets {
        println!(
            "{}\t{}\t{} rows\t{}",
            d.file_id,
            d.filename,
            d.rows,
            d.columns.join(", ")
        );
    }
}

/// Run the `health` command.
pub async fn run_health(server: Option<&str>) {
    let config = load_config(server);
    let report = client(&config).health().await.unwrap_or_else(|e| fail(e));
    println!("Status:   {}", report.status);
    println!(
        "Model:    {}",
        if report.model_connected {
            "connected"
        } else {
            "not connected"
        }
    );
    println!("Datasets: {}", report.loaded_datasets);
}
