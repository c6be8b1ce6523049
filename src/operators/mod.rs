//! Semi-discretization operators
//!
//! Method-of-lines discretizations of linear PDEs, each exposed as a
//! [`SpectrumProvider`](crate::spectrum::SpectrumProvider).
//!
//! # Available Operators
//!
//! - **[`UpwindAdvection`]**: periodic first-order upwind, u_t + a·u_x = 0
//!   - Spectrum: circle of radius |a|/Δx through the origin
//!
//! - **[`CenteredAdvectionDiffusion`]**: periodic centered differences,
//!   u_t + a·u_x = ν·u_xx + σ·u
//!   - Spectrum: ellipse, optionally shifted by the reaction rate
//!
//! - **[`MatrixOperator`]**: any dense square matrix
//!   - Spectrum: real Schur decomposition
//!
//! The structured operators return their eigenvalues in closed form; their
//! `matrix()` can be wrapped in a `MatrixOperator` to obtain the same
//! spectrum numerically.

mod upwind;
mod advection_diffusion;
mod matrix;

pub use upwind::UpwindAdvection;
pub use advection_diffusion::CenteredAdvectionDiffusion;
pub use matrix::MatrixOperator;
