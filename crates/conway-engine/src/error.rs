//! Error types for the simulation driver.

/// Errors raised by the iteration drivers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A count argument was outside its permitted range.
    #[error("{parameter} must be {requirement}, got {value}")]
    Range {
        /// Name of the offending argument as clients see it.
        parameter: &'static str,
        /// What the argument must satisfy.
        requirement: &'static str,
        /// The value supplied.
        value: i64,
    },

    /// No fixed point was reached within the iteration budget.
    #[error("final state not reached within {max_iterations} iterations")]
    NotConverged {
        /// The exhausted budget.
        max_iterations: usize,
    },
}
