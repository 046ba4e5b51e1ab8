//! Energy and interference calculations.
//!
//! Path loss is modelled as a pure power law: a transmission received at
//! distance `d` carries energy `d^(-α)`. The energy at a receiver is the sum
//! over every active transmitter. A set of stations is *forbidden* when some
//! member collects at least the reception threshold from the others.
//!
//! Coincident stations have zero distance; their contribution is treated as
//! infinite energy, so any set holding two coincident stations is forbidden.

use super::geometry::distance;
use super::{ReceptionModel, Station};

/// Energy received at distance `distance` for path loss exponent `alpha`.
///
/// # Formula
///
/// ```text
/// E(d) = d^(-α)
/// ```
///
/// Returns `f64::INFINITY` for `distance == 0`.
pub fn energy_at_distance(distance: f64, alpha: f64) -> f64 {
    if distance == 0.0 {
        return f64::INFINITY;
    }
    distance.powf(-alpha)
}

/// Interference at `receiver` due to a single transmission from `transmitter`.
pub fn interference(transmitter: &Station, receiver: &Station, alpha: f64) -> f64 {
    energy_at_distance(distance(transmitter, receiver), alpha)
}

/// Total energy at `receiver` due to every station in `transmitters`.
pub fn received_energy(transmitters: &[Station], receiver: &Station, alpha: f64) -> f64 {
    transmitters.iter().map(|t| interference(t, receiver, alpha)).sum()
}

/// Energy at `stations[receiver]` due to every other station in the slice.
///
/// Members are skipped by index, not by position, so a coincident duplicate
/// of the receiver still counts as a transmitter.
pub fn energy_from_others(stations: &[Station], receiver: usize, alpha: f64) -> f64 {
    let target = &stations[receiver];
    stations
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != receiver)
        .map(|(_, s)| interference(s, target, alpha))
        .sum()
}

/// Worst-case (maximum) interference over all receivers in `stations`, each
/// receiver hearing every other station.
///
/// # Returns
///
/// `Some((energy, receiver_index))`, or `None` for an empty slice. Ties keep
/// the lowest index.
pub fn worst_case_interference(stations: &[Station], alpha: f64) -> Option<(f64, usize)> {
    let mut worst: Option<(f64, usize)> = None;
    for idx in 0..stations.len() {
        let energy = energy_from_others(stations, idx, alpha);
        match worst {
            Some((max, _)) if energy <= max => {}
            _ => worst = Some((energy, idx)),
        }
    }
    worst
}

/// Round `value` to `decimals` decimal places. Non-finite values pass through.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// True iff `subset` cannot be simultaneously active under `model`: some
/// member receives (rounded) energy of at least the threshold from the rest.
///
/// The comparison is `>=`, so energy exactly equal to the threshold is
/// already forbidden. Two stations at distance 1 with α = 2 therefore form an
/// edge for τ <= 1, not only τ < 1. The transition found by bisection is the
/// same either way.
pub fn is_forbidden(subset: &[Station], model: &ReceptionModel) -> bool {
    (0..subset.len()).any(|idx| {
        let raw = energy_from_others(subset, idx, model.path_loss_exponent);
        let energy = match model.rounding_decimals {
            Some(decimals) => round_to_decimals(raw, decimals),
            None => raw,
        };
        energy >= model.threshold
    })
}
