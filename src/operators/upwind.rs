//! First-order upwind advection on a periodic grid
//!
//! # Mathematical Background
//!
//! Linear advection with constant velocity a:
//!
//! ```text
//! ∂u/∂t + a·∂u/∂x = 0        x ∈ [0, L), periodic
//! ```
//!
//! On N cells of width Δx = L/N, the upwind difference takes the
//! neighbour the flow comes from:
//!
//! ```text
//! a > 0:  du_j/dt = -(a/Δx)·(u_j − u_{j−1})
//! a < 0:  du_j/dt = -(|a|/Δx)·(u_j − u_{j+1})
//! ```
//!
//! The operator is circulant, so its eigenvectors are Fourier modes and its
//! eigenvalues are known in closed form (θ_k = 2πk/N, k = 0..N−1):
//!
//! ```text
//! λ_k = -(|a|/Δx)·(1 − e^{∓iθ_k})
//! ```
//!
//! They lie on a circle of radius |a|/Δx centred at −|a|/Δx, touching the
//! origin. Halving Δx doubles every eigenvalue, so the stable step of any
//! explicit method halves (the CFL condition).

use nalgebra::DMatrix;
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::SpectrumError;
use crate::spectrum::{Spectrum, SpectrumProvider};

/// Periodic first-order upwind discretization of u_t + a·u_x = 0
///
/// # Example
///
/// ```rust
/// use stab_rs::operators::UpwindAdvection;
/// use stab_rs::spectrum::SpectrumProvider;
///
/// let op = UpwindAdvection::new(1.0, 1.0, 40).unwrap();
/// let spectrum = op.spectrum().unwrap();
///
/// assert_eq!(spectrum.len(), 40);
/// // Largest eigenvalue modulus is 2|a|/Δx
/// assert!((spectrum.max_modulus() - 80.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UpwindAdvection {
    /// Advection velocity a
    velocity: f64,

    /// Domain length L
    length: f64,

    /// Number of cells N
    points: usize,

    /// Cell width Δx = L/N
    dx: f64,
}

impl UpwindAdvection {
    /// Create the operator
    ///
    /// # Errors
    ///
    /// `InvalidOperator` when `points == 0`, when `length` is not a positive
    /// finite number, or when `velocity` is not finite.
    pub fn new(velocity: f64, length: f64, points: usize) -> Result<Self, SpectrumError> {
        if points == 0 {
            return Err(SpectrumError::InvalidOperator {
                reason: "upwind grid needs at least one cell".to_string(),
            });
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(SpectrumError::InvalidOperator {
                reason: format!("domain length must be positive, got {}", length),
            });
        }
        if !velocity.is_finite() {
            return Err(SpectrumError::InvalidOperator {
                reason: format!("velocity must be finite, got {}", velocity),
            });
        }

        Ok(Self {
            velocity,
            length,
            points,
            dx: length / points as f64,
        })
    }

    /// Advection velocity a
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Domain length L
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of cells N
    pub fn points(&self) -> usize {
        self.points
    }

    /// Cell width Δx
    pub fn spacing(&self) -> f64 {
        self.dx
    }

    /// Explicit N×N operator matrix
    pub fn matrix(&self) -> DMatrix<f64> {
        let n = self.points;
        let coefficient = self.velocity.abs() / self.dx;
        let mut m = DMatrix::zeros(n, n);

        for j in 0..n {
            let upstream = if self.velocity >= 0.0 { (j + n - 1) % n } else { (j + 1) % n };
            m[(j, j)] -= coefficient;
            m[(j, upstream)] += coefficient;
        }

        m
    }
}

impl SpectrumProvider for UpwindAdvection {
    fn spectrum(&self) -> Result<Spectrum, SpectrumError> {
        let coefficient = self.velocity.abs() / self.dx;
        let direction = if self.velocity >= 0.0 { -1.0 } else { 1.0 };

        Ok((0..self.points)
            .map(|k| {
                let theta = 2.0 * PI * k as f64 / self.points as f64;
                let mode = Complex64::from_polar(1.0, direction * theta);
                (Complex64::new(1.0, 0.0) - mode) * (-coefficient)
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Upwind advection"
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.points)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matrix_rows_sum_to_zero() {
        // Constants are in the kernel
        let m = UpwindAdvection::new(2.0, 1.0, 8).unwrap().matrix();
        for row in m.row_iter() {
            assert_relative_eq!(row.sum(), 0.0, epsilon = 1e-12);
        }
        assert_relative_eq!(m[(0, 0)], -16.0);
        assert_relative_eq!(m[(0, 7)], 16.0);
        assert_relative_eq!(m[(3, 2)], 16.0);
    }

    #[test]
    fn test_negative_velocity_uses_right_neighbour() {
        let m = UpwindAdvection::new(-1.0, 1.0, 4).unwrap().matrix();
        assert_relative_eq!(m[(0, 1)], 4.0);
        assert_relative_eq!(m[(3, 0)], 4.0);
        assert_relative_eq!(m[(1, 0)], 0.0);
    }

    #[test]
    fn test_eigenvalues_on_circle() {
        let op = UpwindAdvection::new(1.5, 2.0, 16).unwrap();
        let radius = 1.5 / op.spacing();
        let centre = Complex64::new(-radius, 0.0);

        let spectrum = op.spectrum().unwrap();
        for lambda in spectrum.iter() {
            assert_relative_eq!((lambda - centre).norm(), radius, epsilon = 1e-10);
            assert!(lambda.re <= 1e-12);
        }
        // k = 0 is the constant mode
        assert_relative_eq!(spectrum.as_slice()[0].norm(), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_eigenvalues_match_matrix_action() {
        // A·v_k = λ_k·v_k for the Fourier mode v_k
        let op = UpwindAdvection::new(1.0, 1.0, 6).unwrap();
        let m = op.matrix();
        let spectrum = op.spectrum().unwrap();

        for (k, lambda) in spectrum.iter().enumerate() {
            let theta = 2.0 * PI * k as f64 / 6.0;
            for j in 0..6 {
                let mut action = Complex64::new(0.0, 0.0);
                for i in 0..6 {
                    action += Complex64::from_polar(1.0, theta * i as f64) * m[(j, i)];
                }
                let expected = lambda * Complex64::from_polar(1.0, theta * j as f64);
                assert!((action - expected).norm() < 1e-10);
            }
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(UpwindAdvection::new(1.0, 1.0, 0).is_err());
        assert!(UpwindAdvection::new(1.0, 0.0, 10).is_err());
        assert!(UpwindAdvection::new(f64::INFINITY, 1.0, 10).is_err());
    }
}
