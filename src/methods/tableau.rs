//! Butcher tableaux
//!
//! # Mathematical Background
//!
//! An s-stage Runge-Kutta method is defined by its Butcher tableau
//!
//! ```text
//!  c │ A
//! ───┼────
//!    │ bᵀ
//! ```
//!
//! Applied to y' = λy with y₀ = 1 and z = hλ, the stage values solve
//!
//! ```text
//! (I − zA)·Y = e         e = (1, ..., 1)ᵀ
//! ```
//!
//! and the step returns
//!
//! ```text
//! R(z) = 1 + z·bᵀY = 1 + z·bᵀ(I − zA)⁻¹e
//! ```
//!
//! # Evaluation Strategy
//!
//! - **Explicit** (A strictly lower triangular): forward substitution,
//!   O(s²) complex operations, I − zA is never singular
//! - **Implicit**: complex LU factorization of I − zA per evaluation.
//!   A singular system means z is a pole of R; the result is NaN so the
//!   region test counts it as unstable.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

use crate::error::ConfigurationError;
use super::polynomial::StabilityPolynomial;
use super::traits::StabilityFunction;

/// Runge-Kutta method in Butcher form
///
/// # Example
///
/// ```rust
/// use num_complex::Complex64;
/// use stab_rs::methods::{ButcherTableau, StabilityFunction};
///
/// let rk4 = ButcherTableau::classical_rk4();
/// assert_eq!(rk4.stages(), Some(4));
/// assert!(rk4.is_explicit());
///
/// let r = rk4.evaluate(Complex64::new(-1.0, 0.0));
/// assert!((r.re - 0.375).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ButcherTableau {
    /// Stage coupling coefficients (s × s)
    a: DMatrix<f64>,

    /// Quadrature weights (length s)
    b: DVector<f64>,

    /// Abscissae, row sums of A (length s)
    c: DVector<f64>,

    /// Cached structural flag
    explicit: bool,

    name: String,
}

impl ButcherTableau {
    /// Create a tableau; abscissae are taken as the row sums of A
    ///
    /// # Errors
    ///
    /// - `InvalidStageCount` for an empty tableau
    /// - `MalformedCoefficients` for a non-square A, a weight vector of the
    ///   wrong length, or non-finite entries
    pub fn new(
        name: impl Into<String>,
        a: DMatrix<f64>,
        b: DVector<f64>,
    ) -> Result<Self, ConfigurationError> {
        let stages = b.len();

        if stages == 0 {
            return Err(ConfigurationError::InvalidStageCount {
                family: "Runge-Kutta",
                stages,
                minimum: 1,
            });
        }

        if a.nrows() != stages || a.ncols() != stages {
            return Err(ConfigurationError::MalformedCoefficients {
                reason: format!(
                    "A is {}x{} but b has {} weights",
                    a.nrows(),
                    a.ncols(),
                    stages
                ),
            });
        }

        if a.iter().chain(b.iter()).any(|x| !x.is_finite()) {
            return Err(ConfigurationError::MalformedCoefficients {
                reason: "tableau contains a non-finite coefficient".to_string(),
            });
        }

        let c = DVector::from_iterator(stages, a.row_iter().map(|row| row.sum()));

        let explicit = (0..stages).all(|i| (i..stages).all(|j| a[(i, j)] == 0.0));

        Ok(Self {
            a,
            b,
            c,
            explicit,
            name: name.into(),
        })
    }

    // ====================================== Named tableaux ======================================

    /// Forward Euler (1 stage, order 1)
    pub fn forward_euler() -> Self {
        Self::from_rows("Forward Euler", 1, &[0.0], &[1.0])
    }

    /// Explicit midpoint rule (2 stages, order 2)
    pub fn explicit_midpoint() -> Self {
        Self::from_rows(
            "Explicit Midpoint",
            2,
            &[0.0, 0.0,
              0.5, 0.0],
            &[0.0, 1.0],
        )
    }

    /// Shu-Osher strong-stability-preserving RK3 (3 stages, order 3)
    pub fn ssp_rk3() -> Self {
        Self::from_rows(
            "SSP RK3",
            3,
            &[0.0,  0.0,  0.0,
              1.0,  0.0,  0.0,
              0.25, 0.25, 0.0],
            &[1.0 / 6.0, 1.0 / 6.0, 2.0 / 3.0],
        )
    }

    /// Classical fourth-order Runge-Kutta (4 stages, order 4)
    pub fn classical_rk4() -> Self {
        Self::from_rows(
            "Classical RK4",
            4,
            &[0.0, 0.0, 0.0, 0.0,
              0.5, 0.0, 0.0, 0.0,
              0.0, 0.5, 0.0, 0.0,
              0.0, 0.0, 1.0, 0.0],
            &[1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0],
        )
    }

    /// Backward Euler (1 implicit stage, order 1)
    pub fn backward_euler() -> Self {
        Self::from_rows("Backward Euler", 1, &[1.0], &[1.0])
    }

    /// Implicit midpoint rule (1 implicit stage, order 2)
    pub fn implicit_midpoint() -> Self {
        Self::from_rows("Implicit Midpoint", 1, &[0.5], &[1.0])
    }

    /// Built-in tableaux are well formed by construction
    fn from_rows(name: &str, stages: usize, a: &[f64], b: &[f64]) -> Self {
        let a = DMatrix::from_row_slice(stages, stages, a);
        let b = DVector::from_row_slice(b);
        let c = DVector::from_iterator(stages, a.row_iter().map(|row| row.sum()));
        let explicit = (0..stages).all(|i| (i..stages).all(|j| a[(i, j)] == 0.0));
        Self {
            a,
            b,
            c,
            explicit,
            name: name.to_string(),
        }
    }

    // ========================================== Queries ==========================================

    /// Coupling matrix A
    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    /// Weights b
    pub fn b(&self) -> &DVector<f64> {
        &self.b
    }

    /// Abscissae c
    pub fn c(&self) -> &DVector<f64> {
        &self.c
    }

    /// Stability polynomial of an explicit tableau
    ///
    /// Coefficients c₀ = 1 and cₖ = bᵀA^(k−1)e for k = 1..s. Returns `None`
    /// for implicit tableaux, whose stability function is rational.
    pub fn stability_polynomial(&self) -> Option<StabilityPolynomial> {
        if !self.explicit {
            return None;
        }

        let stages = self.b.len();
        let mut coefficients = Vec::with_capacity(stages + 1);
        coefficients.push(1.0);

        let mut power = DVector::from_element(stages, 1.0);
        for _ in 0..stages {
            coefficients.push(self.b.dot(&power));
            power = &self.a * power;
        }

        StabilityPolynomial::named(coefficients, self.name.clone()).ok()
    }

    // ======================================== Evaluation =========================================

    /// Stage values by forward substitution (explicit tableaux only)
    fn explicit_stages(&self, z: Complex64) -> Vec<Complex64> {
        let stages = self.b.len();
        let mut y: Vec<Complex64> = Vec::with_capacity(stages);

        for i in 0..stages {
            let coupling = (0..i).fold(Complex64::new(0.0, 0.0), |acc, j| acc + y[j] * self.a[(i, j)]);
            y.push(Complex64::new(1.0, 0.0) + z * coupling);
        }

        y
    }

    /// Stage values from a complex LU solve of (I − zA)Y = e
    fn implicit_stages(&self, z: Complex64) -> Option<DVector<Complex64>> {
        let stages = self.b.len();
        let system = DMatrix::<Complex64>::from_fn(stages, stages, |i, j| {
            let identity = if i == j { 1.0 } else { 0.0 };
            Complex64::new(identity, 0.0) - z * self.a[(i, j)]
        });
        let rhs = DVector::from_element(stages, Complex64::new(1.0, 0.0));

        system.lu().solve(&rhs)
    }
}

impl StabilityFunction for ButcherTableau {
    fn evaluate(&self, z: Complex64) -> Complex64 {
        let weighted = if self.explicit {
            self.explicit_stages(z)
                .iter()
                .zip(self.b.iter())
                .fold(Complex64::new(0.0, 0.0), |acc, (y, &w)| acc + *y * w)
        } else {
            match self.implicit_stages(z) {
                Some(stage_values) => stage_values
                    .iter()
                    .zip(self.b.iter())
                    .fold(Complex64::new(0.0, 0.0), |acc, (y, &w)| acc + *y * w),
                // z is a pole of R
                None => return Complex64::new(f64::NAN, f64::NAN),
            }
        };

        Complex64::new(1.0, 0.0) + z * weighted
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stages(&self) -> Option<usize> {
        Some(self.b.len())
    }

    fn is_explicit(&self) -> bool {
        self.explicit
    }
}

// =================================================================================================
// Tests
// =================================================================================================
