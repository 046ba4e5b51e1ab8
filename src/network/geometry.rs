//! Planar geometry and station layouts.
//!
//! Contains helper functions for:
//! - Euclidean distance between stations
//! - Deterministic layouts (k stations spaced uniformly on a circle)
//! - Random layouts (uniform in a rectangle, Gaussian angular jitter on a circle)

use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use super::Station;
use crate::error::HypergraphError;

/// Euclidean distance between two stations.
pub fn distance(a: &Station, b: &Station) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Station at polar coordinates (`radius`, `angle` in radians) around the origin.
pub fn polar_to_station(radius: f64, angle: f64) -> Station {
    Station::new(radius * angle.cos(), radius * angle.sin())
}

/// Place `k` stations uniformly on a circle of the given radius centred at
/// the origin (the layout called `U_k` when `radius == 1`).
///
/// The first station sits at `(radius, 0)`; the rest follow counter-clockwise
/// at `360/k` degree steps.
pub fn uniform_circle(k: usize, radius: f64) -> Vec<Station> {
    (0..k).map(|i| polar_to_station(radius, 2.0 * PI * i as f64 / k as f64)).collect()
}

/// Place `n` stations uniformly at random in `[0, width) x [0, height)`.
///
/// # Returns
///
/// `Err(InvalidParameter)` if either side is not a positive finite number.
pub fn random_in_rectangle<R: Rng + ?Sized>(n: usize, width: f64, height: f64, rng: &mut R) -> Result<Vec<Station>, HypergraphError> {
    for (name, side) in [("width", width), ("height", height)] {
        if !side.is_finite() || side <= 0.0 {
            return Err(HypergraphError::invalid(name, format!("must be positive and finite, got {}", side)));
        }
    }
    Ok((0..n).map(|_| Station::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height))).collect())
}

/// Perturb the uniform circle layout: each station's angle gets an
/// independent Normal(0, `sigma_degrees`) offset. Radius is kept.
///
/// With `sigma_degrees == 0` this is exactly [`uniform_circle`].
pub fn jittered_circle<R: Rng + ?Sized>(k: usize, radius: f64, sigma_degrees: f64, rng: &mut R) -> Result<Vec<Station>, HypergraphError> {
    let normal = Normal::new(0.0_f64, sigma_degrees)
        .map_err(|e| HypergraphError::invalid("sigma_degrees", format!("invalid angular deviation {}: {}", sigma_degrees, e)))?;
    Ok((0..k)
        .map(|i| {
            let degrees = 360.0 * i as f64 / k as f64 + normal.sample(rng);
            polar_to_station(radius, degrees.to_radians())
        })
        .collect())
}
