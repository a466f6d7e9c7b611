//! Error types for ACO trials.
//!
//! Every failure aborts the trial; no partial results are returned.

use thiserror::Error;

/// Result type alias for ACO operations.
pub type AcoResult<T> = Result<T, AcoError>;

/// Errors surfaced before or during a trial.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// The problem instance cannot be turned into a usable distance matrix.
    ///
    /// Raised for non-square rows, negative or non-finite distances,
    /// asymmetric entries, non-finite coordinates, or fewer than two cities.
    #[error("malformed input: {reason}")]
    MalformedInput {
        /// Which input invariant was violated.
        reason: String,
    },

    /// A constructed tour has zero or non-finite length, or a length so
    /// small that its pheromone deposit overflows.
    ///
    /// Pheromone deposit divides by the tour length, so the trial cannot
    /// continue.
    #[error("degenerate fitness: tour length {fitness} yields no finite pheromone deposit")]
    DegenerateFitness {
        /// The offending tour length.
        fitness: f64,
    },

    /// A configuration constant lies outside its valid range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        /// Name of the configuration field.
        field: &'static str,
        /// Description of the violated range.
        reason: String,
    },
}

impl AcoError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        AcoError::MalformedInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        AcoError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_violation() {
        let err = AcoError::config("evaporation_rate", "must be in (0, 1), got 1.5");
        assert_eq!(
            err.to_string(),
            "invalid configuration: evaporation_rate must be in (0, 1), got 1.5"
        );

        let err = AcoError::malformed("need at least 2 cities, got 1");
        assert!(err.to_string().contains("at least 2 cities"));

        let err = AcoError::DegenerateFitness { fitness: 0.0 };
        assert!(err.to_string().contains("tour length 0"));
    }
}
