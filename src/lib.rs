//! stab-rs: Linear Stability Step-Size Analysis
//!
//! Computes the largest step size h* for which a time-stepping method is
//! linearly stable on the spectrum of a spatial discretization operator:
//! every scaled eigenvalue h*·λⱼ must lie inside the method's stability
//! region {z : |R(z)| ≤ 1}.
//!
//! # Architecture
//!
//! stab-rs is built on two core principles:
//!
//! 1. **Separation of Method and Operator**
//!    - Methods are described only by their stability function R(z)
//!    - Operators are described only by their eigenvalues
//!
//! 2. **Extensibility and Type Safety**
//!    - Trait-based design (`StabilityFunction`, `SpectrumProvider`, `Solver`)
//!    - Typed errors for invalid input, status flags for degraded outcomes
//!
//! # Quick Start
//!
//! ```rust
//! use stab_rs::prelude::*;
//!
//! # fn main() -> Result<(), StabilityError> {
//! // 1. Method and operator
//! let method = Method::classical_rk4();
//! let operator = UpwindAdvection::new(1.0, 1.0, 40)?;
//!
//! // 2. Search configuration
//! let config = SolverConfiguration::default();
//!
//! // 3. Maximal stable step
//! let result = linearly_stable_step_size(&method, &operator, &config)?;
//!
//! // 4. Check the status, then use the step size
//! assert_eq!(result.status, SolveStatus::Converged);
//! assert!((result.step_size * 40.0 - 1.39265).abs() < 1e-4);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`methods`]: Stability functions (polynomials, rational functions, Butcher tableaus, Chebyshev families)
//! - [`spectrum`]: Eigenvalue containers and the `SpectrumProvider` trait
//! - [`operators`]: Model discretization operators with analytic spectra
//! - [`solver`]: Region test, step-size search, region geometry
//! - [`output`]: CSV export of results
//! - [`error`]: Error types
//!
//! # Features
//!
//! - `parallel`: scan large spectra and trace boundaries with Rayon

pub mod error;
pub mod methods;
pub mod spectrum;
pub mod operators;
pub mod solver;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use stab_rs::prelude::*;
    //! ```
    pub use crate::error::{ConfigurationError, SpectrumError, StabilityError};
    pub use crate::methods::{Method,
                             StabilityFunction,
                             StabilityPolynomial,
                             RationalStability,
                             ButcherTableau,
                             ChebyshevFamily};
    pub use crate::spectrum::{Spectrum, SpectrumProvider};
    pub use crate::operators::{UpwindAdvection,
                               CenteredAdvectionDiffusion,
                               MatrixOperator};
    pub use crate::solver::{Solver,
                            SolverConfiguration,
                            SolveStatus,
                            StabilityProblem,
                            StepSizeResult,
                            StepSizeSolver,
                            linearly_stable_step_size};
}
