//! Error types
//!
//! Only genuinely invalid input is reported as an error. Outcomes of the
//! step-size search that still carry a usable number (unbounded stability,
//! no stable step, non-convergence, empty spectrum) are statuses on the
//! result, see [`SolveStatus`](crate::solver::SolveStatus).
//!
//! # Taxonomy
//!
//! | Error                 | Raised by                                  | Fatal |
//! |-----------------------|--------------------------------------------|-------|
//! | `ConfigurationError`  | method constructors, solver configuration  | yes   |
//! | `SpectrumError`       | operators and eigenvalue computation       | yes   |
//! | `StabilityError`      | high-level entry points (wraps both)       | yes   |

use thiserror::Error;

/// Invalid method parameters or solver settings
///
/// Surfaced immediately: no stability test is attempted with a
/// misconfigured method or solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Stage count below the minimum the method family supports
    #[error("invalid stage count {stages}: {family} requires at least {minimum} stage(s)")]
    InvalidStageCount {
        family: &'static str,
        stages: usize,
        minimum: usize,
    },

    /// Damping parameter must be finite and non-negative
    #[error("invalid damping parameter {damping}: must be finite and >= 0")]
    InvalidDamping { damping: f64 },

    /// Coefficient arrays that do not describe a valid stability function
    #[error("malformed coefficients: {reason}")]
    MalformedCoefficients { reason: String },

    /// `Method::by_name` received a name it does not know
    #[error("unknown method '{name}'")]
    UnknownMethod { name: String },

    /// A solver setting outside its admissible range
    #[error("invalid solver setting {parameter} = {value}: {reason}")]
    InvalidSetting {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Failures while building an operator or computing its spectrum
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpectrumError {
    /// Eigenvalues are only defined for square operators
    #[error("operator matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// NaN or infinity in the operator matrix
    #[error("non-finite entry in operator matrix at ({row}, {col})")]
    NonFiniteEntry { row: usize, col: usize },

    /// The Schur iteration did not converge
    #[error("eigenvalue decomposition of a {size}x{size} matrix did not converge")]
    DecompositionFailed { size: usize },

    /// Operator parameters outside their physical range
    #[error("invalid operator: {reason}")]
    InvalidOperator { reason: String },
}

/// Umbrella error of the high-level entry points
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StabilityError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Spectrum(#[from] SpectrumError),
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_stage_count() {
        let err = ConfigurationError::InvalidStageCount {
            family: "RKC2",
            stages: 1,
            minimum: 2,
        };
        assert_eq!(
            err.to_string(),
            "invalid stage count 1: RKC2 requires at least 2 stage(s)"
        );
    }

    #[test]
    fn test_display_unknown_method() {
        let err = ConfigurationError::UnknownMethod { name: "rk99".to_string() };
        assert!(err.to_string().contains("rk99"));
    }

    #[test]
    fn test_stability_error_from_configuration() {
        let err: StabilityError = ConfigurationError::InvalidDamping { damping: -1.0 }.into();
        assert!(matches!(err, StabilityError::Configuration(_)));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_stability_error_from_spectrum() {
        let err: StabilityError = SpectrumError::NotSquare { rows: 2, cols: 3 }.into();
        assert!(matches!(err, StabilityError::Spectrum(_)));
        assert_eq!(err.to_string(), "operator matrix must be square, got 2x3");
    }

    #[test]
    fn test_error_trait_object() {
        let err = SpectrumError::DecompositionFailed { size: 4 };
        let dyn_err: &dyn std::error::Error = &err;
        assert!(dyn_err.to_string().contains("4x4"));
    }
}
