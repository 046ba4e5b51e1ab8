//! Bisection search for critical network parameters.
//!
//! A property of the generated hypergraph (for instance "has no hyperedges")
//! is assumed monotone in one model parameter. Given a bracket whose two ends
//! disagree on the property, [`bisect`] halves the bracket until it is
//! narrower than the tolerance. Each step rebuilds the hypergraph at the
//! midpoint; nothing is cached between steps.
//!
//! The `U_k` helpers reproduce the published transition values of the path
//! loss exponent for k stations spaced uniformly on the unit circle.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::HypergraphError;
use crate::hypergraph::{Hypergraph, build_hypergraph_with};
use crate::network::geometry::uniform_circle;
use crate::network::{ReceptionModel, Station};

/// Tolerance used when none is configured.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Iteration cap used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Stopping rules for the bisection loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BisectionOptions {
    /// Stop once `hi - lo` drops below this width (ε).
    pub tolerance: f64,
    /// Give up with `ConvergenceFailure` after this many midpoint evaluations.
    pub max_iterations: usize,
}

impl Default for BisectionOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl BisectionOptions {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self { tolerance, max_iterations }
    }

    pub fn validate(&self) -> Result<(), HypergraphError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(HypergraphError::invalid(
                "epsilon",
                format!("tolerance must be positive and finite, got {}", self.tolerance),
            ));
        }
        if self.max_iterations == 0 {
            return Err(HypergraphError::invalid("max_iter", "iteration cap must be at least 1"));
        }
        Ok(())
    }
}

/// Result of a converged bisection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BisectionOutcome {
    /// Midpoint of the final bracket; within `tolerance` of the transition.
    pub value: f64,
    /// Final bracket, `hi - lo < tolerance`.
    pub lo: f64,
    pub hi: f64,
    /// Number of midpoint evaluations performed.
    pub iterations: usize,
}

/// Which scalar of the reception model is being searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelParameter {
    Threshold,
    PathLossExponent,
}

impl ModelParameter {
    fn apply(self, model: &ReceptionModel, value: f64) -> ReceptionModel {
        match self {
            ModelParameter::Threshold => model.with_threshold(value),
            ModelParameter::PathLossExponent => model.with_path_loss_exponent(value),
        }
    }
}

/// Locate the point in `[lo, hi]` where a monotone boolean predicate changes
/// value.
///
/// # Parameters
///
/// * `predicate` - evaluated at both ends first, then once per iteration;
///   evaluation errors abort the search
/// * `lo`, `hi` - bracket ends, `lo <= hi`
/// * `options` - tolerance and iteration cap
///
/// # Returns
///
/// * `NoBracketingTransition` when the predicate agrees at both ends
///   (always the case for `lo == hi`)
/// * `ConvergenceFailure` with the last bracket when the iteration cap is hit
pub fn bisect<F>(mut predicate: F, lo: f64, hi: f64, options: &BisectionOptions) -> Result<BisectionOutcome, HypergraphError>
where
    F: FnMut(f64) -> Result<bool, HypergraphError>,
{
    options.validate()?;
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(HypergraphError::invalid("bracket", format!("[{}, {}] is not a finite interval", lo, hi)));
    }

    let value_at_lo = predicate(lo)?;
    let value_at_hi = predicate(hi)?;
    if value_at_lo == value_at_hi {
        return Err(HypergraphError::NoBracketingTransition { lo, hi, value: value_at_lo });
    }

    let (mut lo, mut hi) = (lo, hi);
    let mut iterations = 0;
    while hi - lo >= options.tolerance {
        if iterations >= options.max_iterations {
            return Err(HypergraphError::ConvergenceFailure { lo, hi, iterations });
        }
        let mid = lo + (hi - lo) / 2.0;
        iterations += 1;
        let value_at_mid = predicate(mid)?;
        debug!("Bisection step {}: P({}) = {}, bracket [{}, {}]", iterations, mid, value_at_mid, lo, hi);
        // Keep the end whose value differs from the midpoint.
        if value_at_mid == value_at_lo {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Ok(BisectionOutcome {
        value: lo + (hi - lo) / 2.0,
        lo,
        hi,
        iterations,
    })
}

/// Bisect one parameter of `model` on a hypergraph property, rebuilding the
/// hypergraph at every evaluated point.
pub fn bisect_model_parameter<P>(
    stations: &[Station],
    model: &ReceptionModel,
    parameter: ModelParameter,
    mut property: P,
    lo: f64,
    hi: f64,
    options: &BisectionOptions,
) -> Result<BisectionOutcome, HypergraphError>
where
    P: FnMut(&Hypergraph) -> bool,
{
    let outcome = bisect(
        |value| {
            let hypergraph = build_hypergraph_with(stations, &parameter.apply(model, value))?;
            Ok(property(&hypergraph))
        },
        lo,
        hi,
        options,
    )?;
    info!(
        "Critical {:?} = {} after {} iterations (bracket [{}, {}])",
        parameter, outcome.value, outcome.iterations, outcome.lo, outcome.hi
    );
    Ok(outcome)
}

/// Critical reception threshold for `property` at fixed path loss exponent.
pub fn bisect_threshold<P>(
    stations: &[Station],
    alpha: f64,
    property: P,
    lo: f64,
    hi: f64,
    options: &BisectionOptions,
) -> Result<BisectionOutcome, HypergraphError>
where
    P: FnMut(&Hypergraph) -> bool,
{
    // The threshold placeholder is overwritten at every evaluation.
    let model = ReceptionModel::new(alpha, lo);
    bisect_model_parameter(stations, &model, ModelParameter::Threshold, property, lo, hi, options)
}

/// Critical path loss exponent for `property` at fixed reception threshold.
pub fn bisect_path_loss_exponent<P>(
    stations: &[Station],
    threshold: f64,
    property: P,
    lo: f64,
    hi: f64,
    options: &BisectionOptions,
) -> Result<BisectionOutcome, HypergraphError>
where
    P: FnMut(&Hypergraph) -> bool,
{
    let model = ReceptionModel::new(lo, threshold);
    bisect_model_parameter(stations, &model, ModelParameter::PathLossExponent, property, lo, hi, options)
}

/// True iff `k` stations spaced uniformly on the unit circle can all be
/// active at once.
pub fn is_uniform_circle_feasible(k: usize, alpha: f64, threshold: f64) -> Result<bool, HypergraphError> {
    let stations = uniform_circle(k, 1.0);
    build_hypergraph_with(&stations, &ReceptionModel::new(alpha, threshold)).map(|h| h.is_empty())
}

/// Smallest path loss exponent for which `U_k` is feasible, searched in
/// `[lo, hi]`.
pub fn smallest_feasible_path_loss_exponent(
    k: usize,
    model: &ReceptionModel,
    lo: f64,
    hi: f64,
    options: &BisectionOptions,
) -> Result<BisectionOutcome, HypergraphError> {
    let stations = uniform_circle(k, 1.0);
    bisect_model_parameter(&stations, model, ModelParameter::PathLossExponent, Hypergraph::is_empty, lo, hi, options)
}
