//! Spectrum container
//!
//! This module provides the immutable set of complex eigenvalues the
//! stability analysis works on, together with the dense eigenvalue
//! computation used when an operator is only known through its matrix.

use nalgebra::linalg::Schur;
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;
use std::fmt;

use crate::error::SpectrumError;

/// Eigenvalues of a discretization operator
///
/// Order carries no meaning. The container is immutable once built; the
/// solver only borrows it.
///
/// # Sources
///
/// | Constructor     | Input                                      |
/// |-----------------|--------------------------------------------|
/// | `from_vec`      | eigenvalues already known (analytic)       |
/// | `from_real`     | real eigenvalues (symmetric operators)     |
/// | `from_matrix`   | dense real matrix, real Schur decomposition|
///
/// # Example
///
/// ```rust
/// use num_complex::Complex64;
/// use stab_rs::spectrum::Spectrum;
///
/// let spectrum = Spectrum::from_vec(vec![
///     Complex64::new(-1.0, 2.0),
///     Complex64::new(-1.0, -2.0),
/// ]);
///
/// assert_eq!(spectrum.len(), 2);
/// assert!((spectrum.max_modulus() - 5.0_f64.sqrt()).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    eigenvalues: DVector<Complex64>,
}

impl Spectrum {
    /// Create from known eigenvalues
    pub fn from_vec(eigenvalues: Vec<Complex64>) -> Self {
        Self {
            eigenvalues: DVector::from_vec(eigenvalues),
        }
    }

    /// Create from a nalgebra vector of eigenvalues
    pub fn from_vector(eigenvalues: DVector<Complex64>) -> Self {
        Self { eigenvalues }
    }

    /// Create from purely real eigenvalues
    pub fn from_real(eigenvalues: &[f64]) -> Self {
        Self::from_vec(eigenvalues.iter().map(|&x| Complex64::new(x, 0.0)).collect())
    }

    /// Empty spectrum
    pub fn empty() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Eigenvalues of a dense real matrix
    ///
    /// Uses nalgebra's real Schur decomposition; complex conjugate pairs are
    /// read off the 2×2 diagonal blocks. A 0×0 matrix gives an empty
    /// spectrum.
    ///
    /// # Errors
    ///
    /// - `NotSquare` for a rectangular matrix
    /// - `NonFiniteEntry` when the matrix contains NaN or infinity
    /// - `DecompositionFailed` when the Schur iteration does not converge
    pub fn from_matrix(matrix: &DMatrix<f64>) -> Result<Self, SpectrumError> {
        let (rows, cols) = matrix.shape();

        if rows != cols {
            return Err(SpectrumError::NotSquare { rows, cols });
        }

        if let Some(index) = matrix.iter().position(|x| !x.is_finite()) {
            // Column-major storage
            return Err(SpectrumError::NonFiniteEntry {
                row: index % rows,
                col: index / rows,
            });
        }

        if rows == 0 {
            return Ok(Self::empty());
        }

        let max_iterations = 1000 + 100 * rows;
        let schur = Schur::try_new(matrix.clone(), f64::EPSILON, max_iterations).ok_or_else(|| {
            log::warn!("Schur decomposition of a {}x{} operator did not converge", rows, rows);
            SpectrumError::DecompositionFailed { size: rows }
        })?;

        let eigenvalues = schur.complex_eigenvalues();
        log::debug!("Computed {} eigenvalues from a dense operator", eigenvalues.len());

        Ok(Self::from_vector(eigenvalues))
    }

    // ========================================== Queries ==========================================

    /// Number of eigenvalues
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    /// True when the spectrum holds no eigenvalue
    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Iterate over the eigenvalues
    pub fn iter(&self) -> impl Iterator<Item = &Complex64> {
        self.eigenvalues.iter()
    }

    /// Eigenvalues as a contiguous slice
    pub fn as_slice(&self) -> &[Complex64] {
        self.eigenvalues.as_slice()
    }

    /// Eigenvalues as a nalgebra vector
    pub fn eigenvalues(&self) -> &DVector<Complex64> {
        &self.eigenvalues
    }

    /// Largest modulus, 0 for an empty spectrum
    ///
    /// NaN moduli are skipped; see [`Spectrum::is_finite`].
    pub fn max_modulus(&self) -> f64 {
        self.eigenvalues.iter().map(|l| l.norm()).fold(0.0, f64::max)
    }

    /// Smallest real part, `None` for an empty spectrum
    pub fn min_real_part(&self) -> Option<f64> {
        self.eigenvalues.iter().map(|l| l.re).reduce(f64::min)
    }

    /// Largest real part, `None` for an empty spectrum
    pub fn max_real_part(&self) -> Option<f64> {
        self.eigenvalues.iter().map(|l| l.re).reduce(f64::max)
    }

    /// True when every eigenvalue is finite
    pub fn is_finite(&self) -> bool {
        self.eigenvalues.iter().all(|l| l.re.is_finite() && l.im.is_finite())
    }

    /// The scaled spectrum {h·λⱼ}
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            eigenvalues: self.eigenvalues.map(|l| l * factor),
        }
    }
}

impl std::ops::Mul<f64> for Spectrum {
    type Output = Spectrum;
    fn mul(self, factor: f64) -> Self::Output {
        Self {
            eigenvalues: self.eigenvalues.map(|l| l * factor),
        }
    }
}

impl std::ops::Mul<f64> for &Spectrum {
    type Output = Spectrum;
    fn mul(self, factor: f64) -> Self::Output {
        self.scaled(factor)
    }
}

impl FromIterator<Complex64> for Spectrum {
    fn from_iter<I: IntoIterator<Item = Complex64>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl From<Vec<Complex64>> for Spectrum {
    fn from(eigenvalues: Vec<Complex64>) -> Self {
        Self::from_vec(eigenvalues)
    }
}

impl fmt::Display for Spectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Spectrum [{} eigenvalues, max |λ| = {:.6e}]", self.len(), self.max_modulus())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
