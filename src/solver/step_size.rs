//! Maximal stable step-size search
//!
//! # Algorithm
//!
//! Two phases over the scale factor h, using the region test as an oracle.
//!
//! ## 1. Bracketing
//!
//! ```text
//! h₀ = initial_step  or  1/max|λⱼ|  or  1
//!
//! h₀ stable:    lo = h₀;  hi = 2·lo, 4·lo, ...  until unstable
//!               (cap hit → Unbounded, h* = +∞)
//! h₀ unstable:  hi = h₀;  lo = hi/2, hi/4, ... until stable
//!               (cap or min_step hit → NoStableStep, h* = 0)
//! ```
//!
//! ## 2. Bisection
//!
//! ```text
//! while hi − lo > tol_h·max(1, lo):
//!     mid = (lo + hi)/2
//!     stable(mid) ? lo = mid : hi = mid
//! h* = lo
//! ```
//!
//! Hitting `max_bisection_iterations` returns the current lo flagged
//! `NonConvergent`.
//!
//! # Invariants
//!
//! - lo is always a tested stable step (or 0)
//! - hi is always a tested unstable step once bracketing succeeds
//! - stability is assumed monotone in h near h*; methods whose region is
//!   not star-shaped along the spectrum directions may see the search
//!   settle on an inner boundary
//!
//! # Cost
//!
//! Each probe evaluates R at every eigenvalue: O(N·s) for an s-stage
//! explicit method, O(N·s³) for an implicit tableau. Typical searches take
//! 40 to 60 probes at the default tolerances.

use std::cell::Cell;
use std::collections::HashMap;

use crate::error::{ConfigurationError, StabilityError};
use crate::methods::StabilityFunction;
use crate::spectrum::{Spectrum, SpectrumProvider};
use super::problem::StabilityProblem;
use super::region_test::StabilityRegionTest;
use super::traits::{SolveStatus, Solver, SolverConfiguration, StepSizeResult};

// =================================================================================================
// Bracket-and-Bisect Solver
// =================================================================================================

/// Bracket-and-bisect search for the maximal stable step size
///
/// # Example
///
/// ```rust
/// use stab_rs::methods::Method;
/// use stab_rs::solver::{SolverConfiguration, StepSizeSolver};
/// use stab_rs::spectrum::Spectrum;
///
/// let solver = StepSizeSolver::new();
/// let result = solver
///     .search(&Method::forward_euler(), &Spectrum::from_real(&[-4.0]), &SolverConfiguration::default())
///     .unwrap();
///
/// assert!(result.is_converged());
/// assert!((result.step_size - 0.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StepSizeSolver;

impl StepSizeSolver {
    /// Create a new solver
    pub fn new() -> Self {
        Self
    }

    /// Search the maximal stable step of `function` over `spectrum`
    ///
    /// # Errors
    ///
    /// `ConfigurationError::InvalidSetting` from `config.validate()`.
    pub fn search(
        &self,
        function: &dyn StabilityFunction,
        spectrum: &Spectrum,
        config: &SolverConfiguration,
    ) -> Result<StepSizeResult, ConfigurationError> {
        // ====== Step 1: Validation ======

        config.validate()?;

        if spectrum.is_empty() {
            log::warn!(
                "Empty spectrum for {}: every step size is trivially stable",
                function.name()
            );
            let mut result = StepSizeResult::new(
                f64::INFINITY,
                SolveStatus::DegenerateSpectrum,
                (0.0, f64::INFINITY),
                0,
            );
            self.describe(&mut result, function, config);
            return Ok(result);
        }

        // ====== Step 2: Bracketing ======

        let test = StabilityRegionTest::new(function, config.tolerance);
        let evaluations = Cell::new(0usize);
        let mut probe = |h: f64| {
            evaluations.set(evaluations.get() + 1);
            let stable = test.is_stable(h, spectrum);
            log::trace!("probe h = {:e}: {}", h, if stable { "stable" } else { "unstable" });
            stable
        };

        let initial = initial_step(spectrum, config);
        log::debug!(
            "Step-size search for {} on {} eigenvalues, initial probe h = {:e}",
            function.name(),
            spectrum.len(),
            initial
        );

        let (mut lo, mut hi) = if probe(initial) {
            match grow(&mut probe, initial, config.max_bracket_iterations) {
                Ok(bracket) => bracket,
                Err(largest_stable_step) => {
                    log::warn!(
                        "{}: no instability found up to h = {:e}, stability unbounded",
                        function.name(),
                        largest_stable_step
                    );
                    let mut result = StepSizeResult::new(
                        f64::INFINITY,
                        SolveStatus::Unbounded { largest_stable_step },
                        (largest_stable_step, f64::INFINITY),
                        evaluations.get(),
                    );
                    self.describe(&mut result, function, config);
                    return Ok(result);
                }
            }
        } else {
            match shrink(&mut probe, initial, config.max_bracket_iterations, config.min_step) {
                Ok(bracket) => bracket,
                Err(smallest_tested_step) => {
                    log::warn!(
                        "{}: unstable down to h = {:e}, no stable step size",
                        function.name(),
                        smallest_tested_step
                    );
                    let mut result = StepSizeResult::new(
                        0.0,
                        SolveStatus::NoStableStep { smallest_tested_step },
                        (0.0, smallest_tested_step),
                        evaluations.get(),
                    );
                    self.describe(&mut result, function, config);
                    return Ok(result);
                }
            }
        };

        log::debug!("Bracket [{:e}, {:e}] after {} probes", lo, hi, evaluations.get());

        // ====== Step 3: Bisection ======

        let mut iterations = 0usize;
        let mut status = SolveStatus::Converged;

        while hi - lo > config.step_tolerance * lo.max(1.0) {
            if iterations >= config.max_bisection_iterations {
                status = SolveStatus::NonConvergent { bracket_width: hi - lo };
                log::warn!(
                    "{}: bisection stopped after {} iterations with bracket [{:e}, {:e}]",
                    function.name(),
                    iterations,
                    lo,
                    hi
                );
                break;
            }

            let mid = 0.5 * (lo + hi);
            if probe(mid) {
                lo = mid;
            } else {
                hi = mid;
            }
            iterations += 1;
        }

        log::debug!(
            "h* = {:e} for {} ({} bisection iterations, {} probes)",
            lo,
            function.name(),
            iterations,
            evaluations.get()
        );

        // ====== Step 4: Build Result ======

        let mut result = StepSizeResult::new(lo, status, (lo, hi), evaluations.get())
            .with_scaled_spectrum(spectrum.scaled(lo));

        self.describe(&mut result, function, config);
        result.add_metadata("bisection iterations", &iterations.to_string());
        result.add_metadata("initial step", &initial.to_string());

        Ok(result)
    }

    /// Common metadata for every outcome
    fn describe(&self, result: &mut StepSizeResult, function: &dyn StabilityFunction, config: &SolverConfiguration) {
        result.add_metadata("solver", self.name());
        result.add_metadata("method", function.name());
        result.add_metadata("status", result.status.name());
        result.add_metadata("tolerance", &config.tolerance.to_string());
        result.add_metadata("step tolerance", &config.step_tolerance.to_string());
        result.add_metadata("evaluations", &result.evaluations.to_string());
    }
}

impl Solver for StepSizeSolver {
    fn solve(
        &self,
        problem: &StabilityProblem,
        config: &SolverConfiguration,
    ) -> Result<StepSizeResult, ConfigurationError> {
        let mut result = self.search(problem.method(), problem.spectrum(), config)?;
        result.add_metadata("operator", problem.operator_name());
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Bracket-Bisect"
    }
}

// =================================================================================================
// Search phases
// =================================================================================================

/// First probe: configured, else 1/max|λ|, else 1
fn initial_step(spectrum: &Spectrum, config: &SolverConfiguration) -> f64 {
    config.initial_step.unwrap_or_else(|| {
        let modulus = spectrum.max_modulus();
        if modulus > 0.0 && modulus.is_finite() && (1.0 / modulus).is_finite() {
            1.0 / modulus
        } else {
            1.0
        }
    })
}

/// Double a stable step until instability
///
/// `Ok((lo, hi))` with lo stable and hi unstable, or `Err(lo)` with the
/// largest stable probe when the cap (or overflow) is reached first.
fn grow<F: FnMut(f64) -> bool>(probe: &mut F, stable: f64, max_iterations: usize) -> Result<(f64, f64), f64> {
    let mut lo = stable;
    for _ in 0..max_iterations {
        let hi = 2.0 * lo;
        if !hi.is_finite() {
            break;
        }
        if !probe(hi) {
            return Ok((lo, hi));
        }
        lo = hi;
    }
    Err(lo)
}

/// Halve an unstable step until stability
///
/// `Ok((lo, hi))` with lo stable and hi unstable, or `Err(hi)` with the
/// smallest unstable probe when the cap or the floor is reached first.
fn shrink<F: FnMut(f64) -> bool>(
    probe: &mut F,
    unstable: f64,
    max_iterations: usize,
    min_step: f64,
) -> Result<(f64, f64), f64> {
    let mut hi = unstable;
    for _ in 0..max_iterations {
        let lo = 0.5 * hi;
        if lo < min_step {
            break;
        }
        if probe(lo) {
            return Ok((lo, hi));
        }
        hi = lo;
    }
    Err(hi)
}

// =================================================================================================
// High-level entry point
// =================================================================================================

/// Largest stable step of `method` for the spectrum of `operator`
///
/// Computes the spectrum, runs [`StepSizeSolver`] and records the operator
/// name in the result metadata. The returned `scaled_spectrum` replaces a
/// diagnostic plot: the caller owns any rendering.
///
/// # Errors
///
/// - `StabilityError::Spectrum` when the operator cannot produce its eigenvalues
/// - `StabilityError::Configuration` for invalid solver settings
///
/// # Example
///
/// ```rust
/// use stab_rs::methods::Method;
/// use stab_rs::operators::UpwindAdvection;
/// use stab_rs::solver::{linearly_stable_step_size, SolverConfiguration};
///
/// let method = Method::classical_rk4();
/// let operator = UpwindAdvection::new(1.0, 1.0, 40).unwrap();
///
/// let result = linearly_stable_step_size(&method, &operator, &SolverConfiguration::default()).unwrap();
/// assert!(result.is_converged());
/// assert!(result.step_size > 0.0 && result.step_size < 1.0);
/// ```
pub fn linearly_stable_step_size(
    method: &dyn StabilityFunction,
    operator: &dyn SpectrumProvider,
    config: &SolverConfiguration,
) -> Result<StepSizeResult, StabilityError> {
    let spectrum = operator.spectrum()?;
    let mut result = StepSizeSolver::new().search(method, &spectrum, config)?;
    result.add_metadata("operator", operator.name());
    Ok(result)
}

/// Step sizes of one method over several operators, keyed by operator name
///
/// # Errors
///
/// The first spectrum or configuration error encountered.
pub fn step_size_table(
    method: &dyn StabilityFunction,
    operators: &[&dyn SpectrumProvider],
    config: &SolverConfiguration,
) -> Result<HashMap<String, StepSizeResult>, StabilityError> {
    operators
        .iter()
        .map(|operator| {
            linearly_stable_step_size(method, *operator, config)
                .map(|result| (operator.name().to_string(), result))
        })
        .collect()
}

// =================================================================================================
// Tests
// =================================================================================================
