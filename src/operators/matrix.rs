//! Dense matrix operator
//!
//! Wraps any square real matrix (a semi-discretization assembled
//! elsewhere) as a [`SpectrumProvider`]. Eigenvalues come from the real
//! Schur decomposition, O(N³) per call.

use nalgebra::DMatrix;

use crate::error::SpectrumError;
use crate::spectrum::{Spectrum, SpectrumProvider};

/// Square real matrix whose eigenvalues are computed on demand
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use stab_rs::operators::MatrixOperator;
/// use stab_rs::spectrum::SpectrumProvider;
///
/// let op = MatrixOperator::new(DMatrix::from_row_slice(2, 2, &[-2.0, 1.0, 1.0, -2.0])).unwrap();
/// let mut re: Vec<f64> = op.spectrum().unwrap().iter().map(|l| l.re).collect();
/// re.sort_by(f64::total_cmp);
///
/// assert!((re[0] + 3.0).abs() < 1e-12);
/// assert!((re[1] + 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixOperator {
    matrix: DMatrix<f64>,
    name: String,
}

impl MatrixOperator {
    /// Wrap a matrix
    ///
    /// # Errors
    ///
    /// `NotSquare` or `NonFiniteEntry`, checked once here so that
    /// `spectrum()` can only fail on non-convergence.
    pub fn new(matrix: DMatrix<f64>) -> Result<Self, SpectrumError> {
        Self::named(matrix, "Matrix operator")
    }

    /// Wrap a matrix with a display name
    pub fn named(matrix: DMatrix<f64>, name: impl Into<String>) -> Result<Self, SpectrumError> {
        let (rows, cols) = matrix.shape();
        if rows != cols {
            return Err(SpectrumError::NotSquare { rows, cols });
        }
        if let Some(index) = matrix.iter().position(|x| !x.is_finite()) {
            return Err(SpectrumError::NonFiniteEntry {
                row: index % rows,
                col: index / rows,
            });
        }

        Ok(Self {
            matrix,
            name: name.into(),
        })
    }

    /// The wrapped matrix
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}

impl SpectrumProvider for MatrixOperator {
    fn spectrum(&self) -> Result<Spectrum, SpectrumError> {
        Spectrum::from_matrix(&self.matrix)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.matrix.nrows())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
