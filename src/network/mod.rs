//! Wireless network model.
//!
//! A wireless network `<S, α, β>` is a set of stations in the plane together
//! with a path-loss exponent and a reception threshold. This module holds the
//! value types and their validation; the physics lives in
//! `signal_calculations` and station placement in `geometry`.
//!
//! ## Module Organization
//!
//! - `geometry`: distances and station layout generators
//! - `signal_calculations`: received energy, forbidden-set test, worst-case interference

pub mod geometry;
pub mod signal_calculations;

use serde::{Deserialize, Serialize};

use crate::error::HypergraphError;
use crate::hypergraph::{Hypergraph, generate_hypergraph};

/// Largest station count accepted by the builder. Subset enumeration is
/// exponential in the number of stations.
pub const MAX_STATIONS: usize = 20;

/// Rounding applied by the published `U_k` transition study. Models built
/// with [`ReceptionModel::new`] compare raw energy.
pub const REFERENCE_ROUNDING_DECIMALS: Option<u32> = Some(3);

/// Largest accepted rounding precision; `10^16` already exceeds the integer
/// resolution of `f64`.
pub const MAX_ROUNDING_DECIMALS: u32 = 15;

/// A station position in the Euclidean plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub x: f64,
    pub y: f64,
}

impl Station {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Station {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Reception model parameters: how energy decays and when it is too much.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReceptionModel {
    /// Path loss exponent (α). Energy at distance `d` is `d^(-α)`.
    pub path_loss_exponent: f64,
    /// Reception threshold (β). A receiver whose accumulated energy reaches
    /// this value cannot decode.
    pub threshold: f64,
    /// Decimal places the energy is rounded to before comparison; `None`
    /// compares the raw value.
    pub rounding_decimals: Option<u32>,
}

impl ReceptionModel {
    /// Model comparing raw energy against the threshold.
    pub fn new(path_loss_exponent: f64, threshold: f64) -> Self {
        Self {
            path_loss_exponent,
            threshold,
            rounding_decimals: None,
        }
    }

    pub fn with_rounding(mut self, rounding_decimals: Option<u32>) -> Self {
        self.rounding_decimals = rounding_decimals;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_path_loss_exponent(mut self, path_loss_exponent: f64) -> Self {
        self.path_loss_exponent = path_loss_exponent;
        self
    }

    /// Check that both scalars are finite and strictly positive and that the
    /// rounding precision is representable.
    pub fn validate(&self) -> Result<(), HypergraphError> {
        if !self.path_loss_exponent.is_finite() || self.path_loss_exponent <= 0.0 {
            return Err(HypergraphError::invalid(
                "alpha",
                format!("path loss exponent must be positive and finite, got {}", self.path_loss_exponent),
            ));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(HypergraphError::invalid(
                "threshold",
                format!("reception threshold must be positive and finite, got {}", self.threshold),
            ));
        }
        if let Some(decimals) = self.rounding_decimals {
            if decimals > MAX_ROUNDING_DECIMALS {
                return Err(HypergraphError::invalid(
                    "rounding_decimals",
                    format!("at most {} decimals are supported, got {}", MAX_ROUNDING_DECIMALS, decimals),
                ));
            }
        }
        Ok(())
    }
}

/// Validate a station list for hypergraph construction.
pub fn validate_stations(stations: &[Station]) -> Result<(), HypergraphError> {
    if stations.len() < 2 {
        return Err(HypergraphError::invalid(
            "stations",
            format!("at least 2 stations are required, got {}", stations.len()),
        ));
    }
    if stations.len() > MAX_STATIONS {
        return Err(HypergraphError::invalid(
            "stations",
            format!("station count {} exceeds maximum of {}", stations.len(), MAX_STATIONS),
        ));
    }
    for (idx, station) in stations.iter().enumerate() {
        if !station.x.is_finite() || !station.y.is_finite() {
            return Err(HypergraphError::invalid(
                "stations",
                format!("station {} has non-finite position ({}, {})", idx, station.x, station.y),
            ));
        }
    }
    Ok(())
}

/// A validated wireless network `<S, α, β>`.
#[derive(Debug, Clone, Serialize)]
pub struct WirelessNetwork {
    stations: Vec<Station>,
    model: ReceptionModel,
}

impl WirelessNetwork {
    pub fn new(stations: Vec<Station>, model: ReceptionModel) -> Result<Self, HypergraphError> {
        model.validate()?;
        validate_stations(&stations)?;
        Ok(Self { stations, model })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn model(&self) -> &ReceptionModel {
        &self.model
    }

    /// The hypergraph generated by this network.
    pub fn hypergraph(&self) -> Hypergraph {
        generate_hypergraph(&self.stations, &self.model)
    }

    /// True iff every station can transmit at the same time.
    pub fn is_feasible(&self) -> bool {
        !signal_calculations::is_forbidden(&self.stations, &self.model)
    }
}
