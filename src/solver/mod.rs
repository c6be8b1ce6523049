//! Step-size solvers
//!
//! This module finds the largest step size for which a time-stepping
//! method is linearly stable on the spectrum of a discretization operator.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Problem** (`StabilityProblem`) - WHAT to analyse
//!    - Stability function of the method
//!    - Spectrum of the operator
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to search
//!    - Amplification tolerance
//!    - Bracket tolerance and iteration caps
//!
//! 3. **Solver** (`Solver` trait) - The search
//!    - Uses the region test as an oracle
//!    - Returns the step size with a status flag
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver`, `SolverConfiguration`, `SolveStatus`, `StepSizeResult`
//! - **`problem`**: `StabilityProblem`
//! - **`region_test`**: `StabilityRegionTest`, the |R(hλ)| ≤ 1 + tol predicate
//! - **`step_size`**: `StepSizeSolver` and `linearly_stable_step_size`
//! - **`region`**: axis intervals and boundary tracing
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐      ┌───────────────────┐
//! │ Method          │      │ Operator          │
//! │ (R(z))          │      │ (SpectrumProvider)│
//! └────────┬────────┘      └────────┬──────────┘
//!          │                        │ eigenvalues
//!          └──────────┬─────────────┘
//!                     │
//!            ┌────────▼─────────────┐
//!            │ StabilityProblem     │ ← WHAT to analyse
//!            └────────┬─────────────┘
//!                     │
//!            ┌────────▼─────────────┐
//!            │ SolverConfiguration  │ ← HOW to search
//!            └────────┬─────────────┘
//!                     │
//!            ┌────────▼─────────────┐      ┌─────────────────────┐
//!            │ StepSizeSolver       │ ───► │ StabilityRegionTest │
//!            │ (bracket + bisect)   │ ◄─── │ max|R(hλⱼ)| ≤ 1+tol │
//!            └────────┬─────────────┘      └─────────────────────┘
//!                     │
//!            ┌────────▼─────────────┐
//!            │ StepSizeResult       │ ← h*, status, {h*·λⱼ}
//!            └──────────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use stab_rs::methods::Method;
//! use stab_rs::operators::UpwindAdvection;
//! use stab_rs::solver::{SolveStatus, Solver, SolverConfiguration, StabilityProblem, StepSizeSolver};
//!
//! // 1. Problem (WHAT)
//! let operator = UpwindAdvection::new(1.0, 1.0, 40).unwrap();
//! let problem = StabilityProblem::from_operator(Box::new(Method::classical_rk4()), &operator).unwrap();
//!
//! // 2. Configuration (HOW)
//! let config = SolverConfiguration::default();
//!
//! // 3. Solve
//! let result = StepSizeSolver::new().solve(&problem, &config).unwrap();
//!
//! // 4. Check the status before trusting the number
//! match result.status {
//!     SolveStatus::Converged => println!("h* = {:.6}", result.step_size),
//!     other => println!("flagged: {}", other),
//! }
//! ```
//!
//! # Error Handling
//!
//! Invalid settings are `Err(ConfigurationError)`. Degraded outcomes are
//! `Ok` results whose status is not `Converged`:
//!
//! - `DegenerateSpectrum`: empty spectrum
//! - `Unbounded`: no instability within the growth cap (A-stable methods)
//! - `NoStableStep`: unstable down to the floor (growing modes, inconsistent methods)
//! - `NonConvergent`: bisection cap hit, best stable estimate returned

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod problem;
mod region_test;
mod step_size;
mod region;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Stored in an AtomicUsize so benchmarks and tests can change it at runtime.
// Relaxed ordering: the value is a performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of eigenvalues above which the region test switches to
/// parallel iteration.
///
/// Below roughly 1 000 eigenvalues the overhead of Rayon's thread-pool
/// dispatch outweighs the cost of evaluating low-stage stability functions.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// The region test scans sequentially when the spectrum holds at most this
/// many eigenvalues, and with Rayon above it, but only when the crate is
/// compiled with the `parallel` feature. Boundary tracing applies the same
/// rule to its number of rays.
///
/// # Example
///
/// ```rust
/// use stab_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use stab_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Only compiled in test builds.
///
/// ```rust,ignore
/// let _guard = crate::solver::ThresholdGuard::save(50);
/// // threshold is now 50 …
/// // … and is automatically restored when _guard is dropped.
/// ```
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Bypass the public setter so that restoring never panics.
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    SolveStatus,
    Solver,
    SolverConfiguration,
    StepSizeResult,
};

pub use problem::StabilityProblem;
pub use region_test::{is_stable, max_amplification, StabilityRegionTest};
pub use step_size::{linearly_stable_step_size, step_size_table, StepSizeSolver};
pub use region::{
    imaginary_stability_interval,
    real_stability_interval,
    trace_stability_boundary,
    BoundaryPoint,
    StabilityBoundary,
};

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 999);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let _guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_threshold_guard_restores_previous_value() {
        let before = parallel_threshold();
        {
            let _guard = ThresholdGuard::save(42);
            assert_eq!(parallel_threshold(), 42);
        }
        assert_eq!(parallel_threshold(), before);
    }

    #[test]
    fn test_threshold_is_visible_across_threads() {
        use std::thread;

        let _guard = ThresholdGuard::save(1234);

        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(parallel_threshold))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1234);
        }
    }
}
