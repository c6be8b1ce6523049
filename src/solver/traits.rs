//! Step-size solver traits and types
//!
//! # Design Philosophy
//!
//! - `Solver` trait: the search interface, independent of the method and
//!   of the operator
//! - `SolverConfiguration`: tolerances and iteration caps of the search
//! - `StepSizeResult`: the step size plus a `SolveStatus` flag, so that a
//!   degraded outcome is never indistinguishable from a converged one
//!
//! Only invalid settings are errors. Every other outcome, including the
//! degenerate ones, is an `Ok` result with a status.

use std::collections::HashMap;
use std::fmt;

use crate::error::ConfigurationError;
use crate::spectrum::Spectrum;
use super::problem::StabilityProblem;

// =================================================================================================
// Solver Trait
// =================================================================================================

/// Maximal stable step-size search
///
/// # Implementing
///
/// ```rust
/// use stab_rs::error::ConfigurationError;
/// use stab_rs::solver::{
///     SolveStatus, Solver, SolverConfiguration, StabilityProblem, StepSizeResult,
/// };
///
/// /// Reports the CFL-like estimate 1/max|λ| without testing anything
/// struct Heuristic;
///
/// impl Solver for Heuristic {
///     fn solve(
///         &self,
///         problem: &StabilityProblem,
///         config: &SolverConfiguration,
///     ) -> Result<StepSizeResult, ConfigurationError> {
///         config.validate()?;
///         let h = 1.0 / problem.spectrum().max_modulus();
///         Ok(StepSizeResult::new(h, SolveStatus::Converged, (h, h), 0))
///     }
///
///     fn name(&self) -> &str {
///         "Heuristic"
///     }
/// }
/// ```
pub trait Solver {
    /// Find the largest h such that every h·λⱼ is in the stability region
    ///
    /// # Errors
    ///
    /// Only `ConfigurationError` for invalid settings; search outcomes are
    /// reported through [`StepSizeResult::status`].
    fn solve(
        &self,
        problem: &StabilityProblem,
        config: &SolverConfiguration,
    ) -> Result<StepSizeResult, ConfigurationError>;

    /// Solver name (stored in result metadata)
    fn name(&self) -> &str;
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Tolerances and caps of the bracket-and-bisect search
///
/// # Fields
///
/// | Field                      | Default            | Meaning                               |
/// |----------------------------|--------------------|---------------------------------------|
/// | `tolerance`                | 1e-10              | stable iff \|R(hλ)\| ≤ 1 + tolerance  |
/// | `step_tolerance`           | 1e-10              | stop when hi − lo ≤ tol_h·max(1, lo)  |
/// | `initial_step`             | `None`             | first probe, default 1/max\|λ\|       |
/// | `max_bracket_iterations`   | 60                 | doublings or halvings                 |
/// | `max_bisection_iterations` | 200                | bisection steps                       |
/// | `min_step`                 | `f64::MIN_POSITIVE`| floor of the halving phase            |
///
/// # Examples
///
/// ```rust
/// use stab_rs::solver::SolverConfiguration;
///
/// let config = SolverConfiguration::new()
///     .with_tolerance(1e-8)
///     .with_max_bisection_iterations(100);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_bracket_iterations, 60);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfiguration {
    /// Amplification slack: |R| ≤ 1 + tolerance counts as stable
    pub tolerance: f64,

    /// Relative bracket width at which bisection stops
    pub step_tolerance: f64,

    /// First probe of the bracketing phase
    pub initial_step: Option<f64>,

    /// Cap on doublings (growth) or halvings (shrink)
    pub max_bracket_iterations: usize,

    /// Cap on bisection steps
    pub max_bisection_iterations: usize,

    /// Smallest step tried before giving up
    pub min_step: f64,
}

impl Default for SolverConfiguration {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            step_tolerance: 1e-10,
            initial_step: None,
            max_bracket_iterations: 60,
            max_bisection_iterations: 200,
            min_step: f64::MIN_POSITIVE,
        }
    }
}

impl SolverConfiguration {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Tighter tolerances for reference computations
    pub fn high_precision() -> Self {
        Self {
            tolerance: 1e-13,
            step_tolerance: 1e-14,
            max_bisection_iterations: 400,
            ..Self::default()
        }
    }

    /// Set the amplification tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the bisection stopping tolerance
    pub fn with_step_tolerance(mut self, step_tolerance: f64) -> Self {
        self.step_tolerance = step_tolerance;
        self
    }

    /// Set the first probe
    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = Some(initial_step);
        self
    }

    /// Set the bracketing cap
    pub fn with_max_bracket_iterations(mut self, iterations: usize) -> Self {
        self.max_bracket_iterations = iterations;
        self
    }

    /// Set the bisection cap
    pub fn with_max_bisection_iterations(mut self, iterations: usize) -> Self {
        self.max_bisection_iterations = iterations;
        self
    }

    /// Set the halving floor
    pub fn with_min_step(mut self, min_step: f64) -> Self {
        self.min_step = min_step;
        self
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// `InvalidSetting` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigurationError::InvalidSetting {
                parameter: "tolerance",
                value: self.tolerance,
                reason: "must be finite and >= 0",
            });
        }

        if !self.step_tolerance.is_finite() || self.step_tolerance <= 0.0 {
            return Err(ConfigurationError::InvalidSetting {
                parameter: "step_tolerance",
                value: self.step_tolerance,
                reason: "must be finite and > 0",
            });
        }

        if let Some(h) = self.initial_step
            && (!h.is_finite() || h <= 0.0)
        {
            return Err(ConfigurationError::InvalidSetting {
                parameter: "initial_step",
                value: h,
                reason: "must be finite and > 0",
            });
        }

        if self.max_bracket_iterations == 0 {
            return Err(ConfigurationError::InvalidSetting {
                parameter: "max_bracket_iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }

        if self.max_bisection_iterations == 0 {
            return Err(ConfigurationError::InvalidSetting {
                parameter: "max_bisection_iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }

        if !self.min_step.is_finite() || self.min_step <= 0.0 {
            return Err(ConfigurationError::InvalidSetting {
                parameter: "min_step",
                value: self.min_step,
                reason: "must be finite and > 0",
            });
        }

        Ok(())
    }
}

// =================================================================================================
// Solve status
// =================================================================================================

/// How the search ended
///
/// Every variant except `Converged` is logged at warn level by the solver
/// and must be checked before trusting the step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveStatus {
    /// Bracket narrowed below the step tolerance
    Converged,

    /// Empty spectrum: every h is trivially stable, step size is +∞
    DegenerateSpectrum,

    /// No instability found within the growth cap, step size is +∞
    Unbounded {
        /// Largest probe found stable
        largest_stable_step: f64,
    },

    /// Even the smallest probe was unstable, step size is 0
    NoStableStep {
        /// Smallest probe tested
        smallest_tested_step: f64,
    },

    /// Bisection cap reached, step size is the last stable probe
    NonConvergent {
        /// hi − lo when the search stopped
        bracket_width: f64,
    },
}

impl SolveStatus {
    /// True for every outcome other than `Converged`
    pub fn is_warning(&self) -> bool {
        !matches!(self, SolveStatus::Converged)
    }

    /// Short identifier (used in metadata and CSV headers)
    pub fn name(&self) -> &'static str {
        match self {
            SolveStatus::Converged => "Converged",
            SolveStatus::DegenerateSpectrum => "DegenerateSpectrum",
            SolveStatus::Unbounded { .. } => "Unbounded",
            SolveStatus::NoStableStep { .. } => "NoStableStep",
            SolveStatus::NonConvergent { .. } => "NonConvergent",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Converged => write!(f, "converged"),
            SolveStatus::DegenerateSpectrum => write!(f, "degenerate input: empty spectrum"),
            SolveStatus::Unbounded { largest_stable_step } => write!(
                f,
                "unbounded stability: no instability up to h = {:e}",
                largest_stable_step
            ),
            SolveStatus::NoStableStep { smallest_tested_step } => write!(
                f,
                "no stable step size: unstable down to h = {:e}",
                smallest_tested_step
            ),
            SolveStatus::NonConvergent { bracket_width } => write!(
                f,
                "non-convergent: bracket width {:e} above tolerance",
                bracket_width
            ),
        }
    }
}

// =================================================================================================
// Step size result
// =================================================================================================

/// Outcome of a step-size search
///
/// # Sentinels
///
/// | Status               | `step_size`   | `scaled_spectrum` |
/// |----------------------|---------------|-------------------|
/// | `Converged`          | h*            | {h*·λⱼ}           |
/// | `NonConvergent`      | best stable h | {h·λⱼ}            |
/// | `NoStableStep`       | 0             | `None`            |
/// | `Unbounded`          | +∞            | `None`            |
/// | `DegenerateSpectrum` | +∞            | `None`            |
#[derive(Debug, Clone)]
pub struct StepSizeResult {
    /// Maximal stable step size (see sentinels above)
    pub step_size: f64,

    /// How the search ended
    pub status: SolveStatus,

    /// Final bracket (lo known stable, hi known unstable or last probe)
    pub bracket: (f64, f64),

    /// Number of stability tests performed
    pub evaluations: usize,

    /// {h·λⱼ} at the returned step, for display by the caller
    pub scaled_spectrum: Option<Spectrum>,

    /// Diagnostic key/value pairs (method, operator, solver...)
    pub metadata: HashMap<String, String>,
}

impl StepSizeResult {
    /// Create a result without scaled spectrum or metadata
    pub fn new(step_size: f64, status: SolveStatus, bracket: (f64, f64), evaluations: usize) -> Self {
        Self {
            step_size,
            status,
            bracket,
            evaluations,
            scaled_spectrum: None,
            metadata: HashMap::new(),
        }
    }

    /// Attach the scaled spectrum
    pub fn with_scaled_spectrum(mut self, scaled: Spectrum) -> Self {
        self.scaled_spectrum = Some(scaled);
        self
    }

    /// True when the search converged to tolerance
    pub fn is_converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }

    /// True when the step size is a finite number
    pub fn is_bounded(&self) -> bool {
        self.step_size.is_finite()
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = SolverConfiguration::default();
        assert_eq!(config.tolerance, 1e-10);
        assert_eq!(config.step_tolerance, 1e-10);
        assert_eq!(config.initial_step, None);
        assert_eq!(config.max_bracket_iterations, 60);
        assert_eq!(config.max_bisection_iterations, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_high_precision_is_valid() {
        let config = SolverConfiguration::high_precision();
        assert!(config.tolerance < SolverConfiguration::default().tolerance);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SolverConfiguration::new()
            .with_initial_step(0.5)
            .with_step_tolerance(1e-6)
            .with_min_step(1e-12)
            .with_max_bracket_iterations(10);
        assert_eq!(config.initial_step, Some(0.5));
        assert_eq!(config.step_tolerance, 1e-6);
        assert_eq!(config.min_step, 1e-12);
        assert_eq!(config.max_bracket_iterations, 10);
    }

    #[test]
    fn test_invalid_settings() {
        let cases = [
            (SolverConfiguration::new().with_tolerance(-1.0), "tolerance"),
            (SolverConfiguration::new().with_tolerance(f64::NAN), "tolerance"),
            (SolverConfiguration::new().with_step_tolerance(0.0), "step_tolerance"),
            (SolverConfiguration::new().with_initial_step(-0.1), "initial_step"),
            (SolverConfiguration::new().with_initial_step(f64::INFINITY), "initial_step"),
            (SolverConfiguration::new().with_max_bracket_iterations(0), "max_bracket_iterations"),
            (SolverConfiguration::new().with_max_bisection_iterations(0), "max_bisection_iterations"),
            (SolverConfiguration::new().with_min_step(0.0), "min_step"),
        ];

        for (config, expected) in cases {
            match config.validate() {
                Err(ConfigurationError::InvalidSetting { parameter, .. }) => {
                    assert_eq!(parameter, expected)
                }
                other => panic!("expected InvalidSetting for {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_status_flags() {
        assert!(!SolveStatus::Converged.is_warning());
        assert!(SolveStatus::DegenerateSpectrum.is_warning());
        assert!(SolveStatus::Unbounded { largest_stable_step: 1.0 }.is_warning());
        assert!(SolveStatus::NoStableStep { smallest_tested_step: 1e-300 }.is_warning());
        assert!(SolveStatus::NonConvergent { bracket_width: 0.1 }.is_warning());
    }

    #[test]
    fn test_status_display() {
        let status = SolveStatus::NonConvergent { bracket_width: 0.5 };
        assert!(status.to_string().starts_with("non-convergent"));
        assert_eq!(status.name(), "NonConvergent");
        assert_eq!(SolveStatus::DegenerateSpectrum.to_string(), "degenerate input: empty spectrum");
    }

    #[test]
    fn test_result_metadata() {
        let mut result = StepSizeResult::new(1.5, SolveStatus::Converged, (1.5, 1.5 + 1e-11), 42);
        result.add_metadata("method", "RK4");
        assert!(result.is_converged());
        assert!(result.is_bounded());
        assert_eq!(result.metadata.get("method"), Some(&"RK4".to_string()));
        assert!(result.scaled_spectrum.is_none());
    }
}
