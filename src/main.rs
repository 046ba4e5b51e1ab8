use env_logger::Builder;
use log::{LevelFilter, info};
use std::path::Path;

use anyhow::Context;
use wireless_hypergraph::config::StudyConfig;
use wireless_hypergraph::study::run_study;

fn main() -> anyhow::Result<()> {
    // Optional first argument: path to a TOML study config.
    let config_path = std::env::args().nth(1);
    let config = match &config_path {
        Some(path) => StudyConfig::load(Path::new(path))?,
        None => StudyConfig::default(),
    };

    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter(Some("wireless_hypergraph"), config.log_level_filter()?)
        .init();

    match &config_path {
        Some(path) => info!("Loaded configuration file: {}", path),
        None => info!("No configuration file given, using defaults"),
    }

    let report = run_study(&config).context("Transition study failed")?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
