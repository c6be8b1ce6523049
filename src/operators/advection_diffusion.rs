//! Centered advection-diffusion(-reaction) on a periodic grid
//!
//! # Mathematical Background
//!
//! ```text
//! ∂u/∂t + a·∂u/∂x = ν·∂²u/∂x² + σ·u        x ∈ [0, L), periodic
//! ```
//!
//! Second-order centered differences on N points, Δx = L/N:
//!
//! ```text
//! du_j/dt = -(a/2Δx)·(u_{j+1} − u_{j−1}) + (ν/Δx²)·(u_{j+1} − 2u_j + u_{j−1}) + σ·u_j
//! ```
//!
//! Eigenvalues for θ_k = 2πk/N:
//!
//! ```text
//! λ_k = σ − (4ν/Δx²)·sin²(θ_k/2) − i·(a/Δx)·sin θ_k
//! ```
//!
//! | Regime        | Spectrum shape                                 |
//! |---------------|------------------------------------------------|
//! | ν = 0         | imaginary segment [−i·a/Δx, i·a/Δx]            |
//! | a = 0         | real segment [−4ν/Δx², 0]                      |
//! | both          | ellipse through the origin                     |
//! | σ > 0         | whole ellipse shifted into Re λ > 0            |
//!
//! A positive reaction rate σ makes the constant mode physically growing;
//! no method with R bounded by 1 near the origin can then be stable for
//! any finite step beyond the tolerance band.

use nalgebra::DMatrix;
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::SpectrumError;
use crate::spectrum::{Spectrum, SpectrumProvider};

/// Periodic centered discretization of u_t + a·u_x = ν·u_xx + σ·u
///
/// # Example
///
/// ```rust
/// use stab_rs::operators::CenteredAdvectionDiffusion;
/// use stab_rs::spectrum::SpectrumProvider;
///
/// // Pure diffusion: real spectrum in [-4ν/Δx², 0]
/// let op = CenteredAdvectionDiffusion::new(0.0, 0.5, 1.0, 10).unwrap();
/// let spectrum = op.spectrum().unwrap();
///
/// assert!((spectrum.min_real_part().unwrap() + 200.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CenteredAdvectionDiffusion {
    /// Advection velocity a
    velocity: f64,

    /// Diffusion coefficient ν ≥ 0
    diffusion: f64,

    /// Linear reaction rate σ
    reaction: f64,

    /// Domain length L
    length: f64,

    /// Number of points N
    points: usize,

    /// Spacing Δx = L/N
    dx: f64,
}

impl CenteredAdvectionDiffusion {
    /// Create the operator without reaction term
    ///
    /// # Errors
    ///
    /// `InvalidOperator` when `points == 0`, when `length` is not positive,
    /// when `diffusion` is negative, or when any parameter is not finite.
    pub fn new(
        velocity: f64,
        diffusion: f64,
        length: f64,
        points: usize,
    ) -> Result<Self, SpectrumError> {
        if points == 0 {
            return Err(SpectrumError::InvalidOperator {
                reason: "grid needs at least one point".to_string(),
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
        if !diffusion.is_finite() || diffusion < 0.0 {
            return Err(SpectrumError::InvalidOperator {
                reason: format!("diffusion coefficient must be finite and >= 0, got {}", diffusion),
            });
        }

        Ok(Self {
            velocity,
            diffusion,
            reaction: 0.0,
            length,
            points,
            dx: length / points as f64,
        })
    }

    /// Add a linear reaction term σ·u (σ > 0 is a source)
    ///
    /// # Errors
    ///
    /// `InvalidOperator` for a non-finite rate.
    pub fn with_reaction(mut self, rate: f64) -> Result<Self, SpectrumError> {
        if !rate.is_finite() {
            return Err(SpectrumError::InvalidOperator {
                reason: format!("reaction rate must be finite, got {}", rate),
            });
        }
        self.reaction = rate;
        Ok(self)
    }

    /// Advection velocity a
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Diffusion coefficient ν
    pub fn diffusion(&self) -> f64 {
        self.diffusion
    }

    /// Reaction rate σ
    pub fn reaction(&self) -> f64 {
        self.reaction
    }

    /// Domain length L
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of points N
    pub fn points(&self) -> usize {
        self.points
    }

    /// Grid spacing Δx
    pub fn spacing(&self) -> f64 {
        self.dx
    }

    /// Cell Péclet number a·Δx/ν (infinite without diffusion)
    pub fn peclet(&self) -> f64 {
        if self.diffusion == 0.0 {
            f64::INFINITY
        } else {
            self.velocity.abs() * self.dx / self.diffusion
        }
    }

    /// Explicit N×N operator matrix
    pub fn matrix(&self) -> DMatrix<f64> {
        let n = self.points;
        let advection = self.velocity / (2.0 * self.dx);
        let diffusion = self.diffusion / (self.dx * self.dx);
        let mut m = DMatrix::zeros(n, n);

        for j in 0..n {
            let left = (j + n - 1) % n;
            let right = (j + 1) % n;

            m[(j, j)] += self.reaction - 2.0 * diffusion;
            m[(j, right)] += diffusion - advection;
            m[(j, left)] += diffusion + advection;
        }

        m
    }
}

impl SpectrumProvider for CenteredAdvectionDiffusion {
    fn spectrum(&self) -> Result<Spectrum, SpectrumError> {
        let n = self.points as f64;
        let advection = self.velocity / self.dx;
        let diffusion = 4.0 * self.diffusion / (self.dx * self.dx);

        Ok((0..self.points)
            .map(|k| {
                let theta = 2.0 * PI * k as f64 / n;
                let half = (0.5 * theta).sin();
                Complex64::new(self.reaction - diffusion * half * half, -advection * theta.sin())
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Centered advection-diffusion"
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
    fn test_pure_advection_is_imaginary() {
        let op = CenteredAdvectionDiffusion::new(1.0, 0.0, 1.0, 20).unwrap();
        for lambda in op.spectrum().unwrap().iter() {
            assert_relative_eq!(lambda.re, 0.0, epsilon = 1e-12);
            assert!(lambda.im.abs() <= 20.0 + 1e-9);
        }
        assert!(op.peclet().is_infinite());
    }

    #[test]
    fn test_reaction_shifts_spectrum() {
        let base = CenteredAdvectionDiffusion::new(1.0, 0.1, 1.0, 16).unwrap();
        let shifted = base.clone().with_reaction(0.25).unwrap();

        let a = base.spectrum().unwrap();
        let b = shifted.spectrum().unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(y.re - x.re, 0.25, epsilon = 1e-12);
            assert_relative_eq!(y.im, x.im, epsilon = 1e-12);
        }
        assert_relative_eq!(b.max_real_part().unwrap(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_stencil() {
        // a = 2, ν = 1, Δx = 0.25: advection 4, diffusion 16
        let m = CenteredAdvectionDiffusion::new(2.0, 1.0, 1.0, 4).unwrap().matrix();
        assert_relative_eq!(m[(1, 1)], -32.0);
        assert_relative_eq!(m[(1, 2)], 12.0);
        assert_relative_eq!(m[(1, 0)], 20.0);
        // Periodic wrap
        assert_relative_eq!(m[(0, 3)], 20.0);
        assert_relative_eq!(m[(3, 0)], 12.0);
    }

    #[test]
    fn test_eigenvalues_match_matrix_action() {
        let op = CenteredAdvectionDiffusion::new(1.0, 0.05, 1.0, 8)
            .unwrap()
            .with_reaction(-0.3)
            .unwrap();
        let m = op.matrix();
        let spectrum = op.spectrum().unwrap();

        for (k, lambda) in spectrum.iter().enumerate() {
            let theta = 2.0 * PI * k as f64 / 8.0;
            for j in 0..8 {
                let mut action = Complex64::new(0.0, 0.0);
                for i in 0..8 {
                    action += Complex64::from_polar(1.0, theta * i as f64) * m[(j, i)];
                }
                let expected = lambda * Complex64::from_polar(1.0, theta * j as f64);
                assert!((action - expected).norm() < 1e-10);
            }
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(CenteredAdvectionDiffusion::new(1.0, -0.1, 1.0, 10).is_err());
        assert!(CenteredAdvectionDiffusion::new(1.0, 0.1, -1.0, 10).is_err());
        assert!(CenteredAdvectionDiffusion::new(1.0, 0.1, 1.0, 0).is_err());

        let op = CenteredAdvectionDiffusion::new(1.0, 0.1, 1.0, 10).unwrap();
        assert!(op.with_reaction(f64::NAN).is_err());
    }
}
