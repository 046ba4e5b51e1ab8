//! Error type shared by the hypergraph builder and the bisection search.

/// Errors reported by hypergraph construction and bisection search.
///
/// Every failure is reported to the caller immediately; nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum HypergraphError {
    /// An argument is outside its valid domain (`name` is the argument).
    InvalidParameter { name: &'static str, reason: String },
    /// The predicate has the same value at both ends of the bracket.
    NoBracketingTransition { lo: f64, hi: f64, value: bool },
    /// The iteration budget ran out before the bracket shrank below tolerance.
    ConvergenceFailure { lo: f64, hi: f64, iterations: usize },
}

impl HypergraphError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        HypergraphError::InvalidParameter { name, reason: reason.into() }
    }
}

impl std::fmt::Display for HypergraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HypergraphError::InvalidParameter { name, reason } => write!(f, "Invalid parameter '{}': {}", name, reason),
            HypergraphError::NoBracketingTransition { lo, hi, value } => {
                write!(f, "No transition in bracket [{}, {}]: predicate is {} at both ends", lo, hi, value)
            }
            HypergraphError::ConvergenceFailure { lo, hi, iterations } => {
                write!(f, "Bisection did not converge after {} iterations, last bracket [{}, {}]", iterations, lo, hi)
            }
        }
    }
}

impl std::error::Error for HypergraphError {}
