//! Stability region membership test
//!
//! # Definition
//!
//! A step h is stable for a spectrum {λⱼ} when every scaled eigenvalue lies
//! in the (tolerance-widened) absolute stability region:
//!
//! ```text
//! max_j |R(h·λⱼ)| ≤ 1 + tol
//! ```
//!
//! The boundary is inclusive. A non-finite amplification (pole of a
//! rational R, NaN eigenvalue, overflow) counts as unstable.
//!
//! # Parallelism
//!
//! With the `parallel` feature, spectra longer than
//! [`parallel_threshold()`](crate::solver::parallel_threshold) are scanned
//! with Rayon. The result is identical to the sequential scan.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use num_complex::Complex64;

use crate::methods::StabilityFunction;
use crate::spectrum::Spectrum;

// =================================================================================================
// Stability Region Test
// =================================================================================================

/// Predicate "h·λⱼ is in the stability region for every j"
///
/// # Example
///
/// ```rust
/// use stab_rs::methods::Method;
/// use stab_rs::solver::StabilityRegionTest;
/// use stab_rs::spectrum::Spectrum;
///
/// let euler = Method::forward_euler();
/// let test = StabilityRegionTest::new(&euler, 1e-10);
/// let spectrum = Spectrum::from_real(&[-1.0]);
///
/// assert!(test.is_stable(2.0, &spectrum));   // |1 - 2| = 1, inclusive
/// assert!(!test.is_stable(2.1, &spectrum));
/// ```
#[derive(Clone, Copy)]
pub struct StabilityRegionTest<'a> {
    function: &'a dyn StabilityFunction,
    tolerance: f64,
}

impl<'a> StabilityRegionTest<'a> {
    /// Create a test for `function` with amplification slack `tolerance`
    pub fn new(function: &'a dyn StabilityFunction, tolerance: f64) -> Self {
        Self { function, tolerance }
    }

    /// Amplification bound 1 + tolerance
    pub fn limit(&self) -> f64 {
        1.0 + self.tolerance
    }

    /// Tested stability function
    pub fn function(&self) -> &'a dyn StabilityFunction {
        self.function
    }

    /// True when |R(h·λⱼ)| ≤ 1 + tol for every j
    ///
    /// Stops at the first unstable eigenvalue. An empty spectrum is
    /// trivially stable and logged as a warning.
    pub fn is_stable(&self, h: f64, spectrum: &Spectrum) -> bool {
        if spectrum.is_empty() {
            log::warn!("Stability test on an empty spectrum: trivially stable");
            return true;
        }

        let limit = self.limit();
        let stable_at = |lambda: &Complex64| self.function.amplification(lambda * h) <= limit;

        #[cfg(feature = "parallel")]
        if spectrum.len() > super::parallel_threshold() {
            return spectrum.as_slice().par_iter().all(stable_at);
        }

        spectrum.iter().all(stable_at)
    }

    /// max_j |R(h·λⱼ)|
    ///
    /// NaN when any amplification is NaN, 0 for an empty spectrum.
    pub fn max_amplification(&self, h: f64, spectrum: &Spectrum) -> f64 {
        let amplification = |lambda: &Complex64| self.function.amplification(lambda * h);

        #[cfg(feature = "parallel")]
        if spectrum.len() > super::parallel_threshold() {
            return spectrum
                .as_slice()
                .par_iter()
                .map(amplification)
                .reduce(|| 0.0, nan_max);
        }

        spectrum.iter().map(amplification).fold(0.0, nan_max)
    }

    /// Indices of the eigenvalues outside the region at step h
    pub fn unstable_indices(&self, h: f64, spectrum: &Spectrum) -> Vec<usize> {
        let limit = self.limit();
        spectrum
            .iter()
            .enumerate()
            .filter(|(_, lambda)| !(self.function.amplification(*lambda * h) <= limit))
            .map(|(index, _)| index)
            .collect()
    }
}

impl std::fmt::Debug for StabilityRegionTest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StabilityRegionTest")
            .field("method", &self.function.name())
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

/// Stand-alone form of [`StabilityRegionTest::is_stable`]
pub fn is_stable(function: &dyn StabilityFunction, h: f64, spectrum: &Spectrum, tolerance: f64) -> bool {
    StabilityRegionTest::new(function, tolerance).is_stable(h, spectrum)
}

/// Stand-alone form of [`StabilityRegionTest::max_amplification`]
pub fn max_amplification(function: &dyn StabilityFunction, h: f64, spectrum: &Spectrum) -> f64 {
    StabilityRegionTest::new(function, 0.0).max_amplification(h, spectrum)
}

/// Maximum that propagates NaN
fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::Method;
    use approx::assert_relative_eq;

    fn rk4() -> Method {
        Method::classical_rk4()
    }

    #[test]
    fn test_zero_step_is_stable() {
        let method = rk4();
        let spectrum = Spectrum::from_vec(vec![Complex64::new(-5.0, 3.0), Complex64::new(2.0, 0.0)]);
        assert!(is_stable(&method, 0.0, &spectrum, 0.0));
    }

    #[test]
    fn test_inclusive_boundary() {
        // |R(-2)| = 1 exactly for forward Euler
        let euler = Method::forward_euler();
        let spectrum = Spectrum::from_real(&[-1.0]);
        assert!(is_stable(&euler, 2.0, &spectrum, 0.0));
        assert!(!is_stable(&euler, 2.0 + 1e-9, &spectrum, 0.0));
    }

    #[test]
    fn test_single_unstable_eigenvalue_decides() {
        let euler = Method::forward_euler();
        let spectrum = Spectrum::from_real(&[-0.1, -0.2, -10.0]);
        let test = StabilityRegionTest::new(&euler, 1e-10);
        assert!(!test.is_stable(1.0, &spectrum));
        assert_eq!(test.unstable_indices(1.0, &spectrum), vec![2]);
    }

    #[test]
    fn test_empty_spectrum_trivially_stable() {
        let method = rk4();
        assert!(is_stable(&method, 1e6, &Spectrum::empty(), 1e-10));
        assert_eq!(max_amplification(&method, 1.0, &Spectrum::empty()), 0.0);
    }

    #[test]
    fn test_nan_amplification_is_unstable() {
        let method = rk4();
        let spectrum = Spectrum::from_vec(vec![Complex64::new(f64::NAN, 0.0)]);
        assert!(!is_stable(&method, 1.0, &spectrum, 1e-10));
        assert!(max_amplification(&method, 1.0, &spectrum).is_nan());
    }

    #[test]
    fn test_pole_is_unstable() {
        // Backward Euler has a pole at z = 1
        let be = Method::by_name("backward_euler").unwrap();
        let spectrum = Spectrum::from_real(&[1.0]);
        assert!(!is_stable(&be, 1.0, &spectrum, 1e-10));
    }

    #[test]
    fn test_max_amplification() {
        let euler = Method::forward_euler();
        let spectrum = Spectrum::from_real(&[-1.0, -3.0]);
        // |1 - 0.5| and |1 - 1.5|
        assert_relative_eq!(max_amplification(&euler, 0.5, &spectrum), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let _guard = crate::solver::ThresholdGuard::save(16);
        let method = rk4();
        let spectrum: Spectrum = (0..500)
            .map(|k| Complex64::from_polar(1.0, 0.01 * k as f64) - Complex64::new(1.0, 0.0))
            .collect();
        let test = StabilityRegionTest::new(&method, 1e-10);

        for h in [0.5, 1.0, 1.4, 2.0, 3.0] {
            let scan = spectrum.iter().all(|l| method.amplification(l * h) <= test.limit());
            assert_eq!(test.is_stable(h, &spectrum), scan);
        }
    }
}
