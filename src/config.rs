//! Configuration loading for the `U_k` transition study.

use anyhow::{Context, anyhow, bail, ensure};
use log::LevelFilter;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

use crate::network::{MAX_STATIONS, REFERENCE_ROUNDING_DECIMALS, ReceptionModel};
use crate::search::BisectionOptions;

/// Parameters of a study run. Every field has a default, so an empty file
/// reproduces the published `U_3`..`U_5` results.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StudyConfig {
    /// Reception threshold (β).
    pub threshold: f64,
    /// Decimal places energy is rounded to before comparison.
    pub rounding_decimals: Option<u32>,
    /// Compare raw energy values; overrides `rounding_decimals`.
    pub exact_energy: bool,
    /// Values of k for which `U_k` is searched.
    pub station_counts: Vec<usize>,
    /// Lower end of the path loss exponent bracket.
    pub alpha_lo: f64,
    /// Upper end of the path loss exponent bracket.
    pub alpha_hi: f64,
    pub bisection: BisectionOptions,
    /// Log level for this crate's messages (error, warn, info, debug, trace).
    pub log_level: String,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            rounding_decimals: REFERENCE_ROUNDING_DECIMALS,
            exact_energy: false,
            station_counts: vec![3, 4, 5],
            alpha_lo: 1.0,
            alpha_hi: 10.0,
            bisection: BisectionOptions::new(1e-4, 100),
            log_level: "info".to_string(),
        }
    }
}

impl StudyConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(config_path).with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config file: {}", config_path.display()))
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: StudyConfig = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.threshold.is_finite() && self.threshold > 0.0,
            "threshold must be positive, got {}",
            self.threshold
        );
        ensure!(!self.station_counts.is_empty(), "station-counts must not be empty");
        for &k in &self.station_counts {
            if !(2..=MAX_STATIONS).contains(&k) {
                bail!("station count {} outside supported range 2-{}", k, MAX_STATIONS);
            }
        }
        ensure!(
            self.alpha_lo.is_finite() && self.alpha_hi.is_finite() && self.alpha_lo > 0.0 && self.alpha_lo < self.alpha_hi,
            "invalid path loss exponent bracket [{}, {}]",
            self.alpha_lo,
            self.alpha_hi
        );
        self.model().validate()?;
        self.bisection.validate()?;
        self.log_level_filter()?;
        Ok(())
    }

    pub fn log_level_filter(&self) -> anyhow::Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level).map_err(|_| anyhow!("Unknown log level '{}'", self.log_level))
    }

    /// Reception model for the configured threshold and rounding. The path
    /// loss exponent is the lower bracket end; searches overwrite it.
    pub fn model(&self) -> ReceptionModel {
        let rounding = if self.exact_energy { None } else { self.rounding_decimals };
        ReceptionModel::new(self.alpha_lo, self.threshold).with_rounding(rounding)
    }
}
