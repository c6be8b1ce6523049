//! Stability function trait
//!
//! A time-stepping method applied to the scalar test equation
//! y' = λy with step h multiplies the solution by R(z), z = hλ, at every
//! step. This module defines the interface every method exposes to the
//! stability analysis.

use num_complex::Complex64;

// =================================================================================================
// Stability Function Trait
// =================================================================================================

/// Absolute-stability function R(z) of a time-stepping method
///
/// # Responsibility
///
/// Maps a scaled eigenvalue z = h·λ to the per-step amplification factor.
/// Does NOT decide stability (that's the region test's job) and does NOT
/// search for a step size (that's the solver's job).
///
/// # Contract
///
/// - `evaluate` is deterministic and free of side effects
/// - non-finite input produces non-finite output (never masked)
/// - consistent methods satisfy R(0) = 1
///
/// # Implementing
///
/// ```rust
/// use num_complex::Complex64;
/// use stab_rs::methods::StabilityFunction;
///
/// /// Forward Euler: R(z) = 1 + z
/// struct Euler;
///
/// impl StabilityFunction for Euler {
///     fn evaluate(&self, z: Complex64) -> Complex64 {
///         Complex64::new(1.0, 0.0) + z
///     }
///
///     fn name(&self) -> &str {
///         "Euler"
///     }
/// }
///
/// assert_eq!(Euler.amplification(Complex64::new(-2.0, 0.0)), 1.0);
/// ```
pub trait StabilityFunction: Send + Sync {
    /// Evaluate R(z)
    fn evaluate(&self, z: Complex64) -> Complex64;

    /// |R(z)|, the amplification factor at z
    fn amplification(&self, z: Complex64) -> f64 {
        self.evaluate(z).norm()
    }

    /// Name of the method (used for display, logging and export headers)
    fn name(&self) -> &str;

    /// Number of stages, when the method has a stage structure
    fn stages(&self) -> Option<usize> {
        None
    }

    /// Whether the method is explicit
    ///
    /// Explicit methods have polynomial stability functions and therefore
    /// bounded stability regions.
    fn is_explicit(&self) -> bool {
        true
    }
}

impl<T: StabilityFunction + ?Sized> StabilityFunction for &T {
    fn evaluate(&self, z: Complex64) -> Complex64 {
        (**self).evaluate(z)
    }

    fn amplification(&self, z: Complex64) -> f64 {
        (**self).amplification(z)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn stages(&self) -> Option<usize> {
        (**self).stages()
    }

    fn is_explicit(&self) -> bool {
        (**self).is_explicit()
    }
}

impl<T: StabilityFunction + ?Sized> StabilityFunction for Box<T> {
    fn evaluate(&self, z: Complex64) -> Complex64 {
        (**self).evaluate(z)
    }

    fn amplification(&self, z: Complex64) -> f64 {
        (**self).amplification(z)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn stages(&self) -> Option<usize> {
        (**self).stages()
    }

    fn is_explicit(&self) -> bool {
        (**self).is_explicit()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
