//! The `U_k` transition study: for each configured k, the smallest path loss
//! exponent at which k stations spaced uniformly on the unit circle become
//! feasible, plus the hypergraph just below the transition.

use log::info;
use serde::Serialize;

use crate::config::StudyConfig;
use crate::error::HypergraphError;
use crate::hypergraph::Hyperedge;
use crate::hypergraph::build_hypergraph_with;
use crate::network::geometry::uniform_circle;
use crate::search::{BisectionOutcome, smallest_feasible_path_loss_exponent};

#[derive(Debug, Clone, Serialize)]
pub struct UniformCircleResult {
    pub station_count: usize,
    pub outcome: BisectionOutcome,
    /// Hyperedges of `U_k` at the infeasible end of the final bracket.
    pub edges_below_transition: Vec<Hyperedge>,
    pub interference_degree_below_transition: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudyReport {
    pub threshold: f64,
    pub rounding_decimals: Option<u32>,
    pub results: Vec<UniformCircleResult>,
}

/// Run the study described by `config`.
pub fn run_study(config: &StudyConfig) -> Result<StudyReport, HypergraphError> {
    let model = config.model();
    let mut results = Vec::with_capacity(config.station_counts.len());

    for &k in &config.station_counts {
        let outcome = smallest_feasible_path_loss_exponent(k, &model, config.alpha_lo, config.alpha_hi, &config.bisection)?;
        let below = build_hypergraph_with(&uniform_circle(k, 1.0), &model.with_path_loss_exponent(outcome.lo))?;
        info!("The smallest path loss exponent such that U_{} is feasible is gamma = {}", k, outcome.value);

        results.push(UniformCircleResult {
            station_count: k,
            outcome,
            interference_degree_below_transition: below.interference_degree(),
            edges_below_transition: below.edges().cloned().collect(),
        });
    }

    Ok(StudyReport {
        threshold: model.threshold,
        rounding_decimals: model.rounding_decimals,
        results,
    })
}
