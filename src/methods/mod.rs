//! Time-stepping methods and their stability functions
//!
//! This module contains every method the stability analysis can examine,
//! each one exposing its absolute-stability function through the
//! [`StabilityFunction`] trait.
//!
//! # Available Families
//!
//! - **[`StabilityPolynomial`]**: explicit methods given directly by R(z)
//!   - Evaluation: Horner's rule
//!   - Use: Taylor methods, explicit RK with s ≤ 4 stages
//!
//! - **[`RationalStability`]**: implicit methods, R(z) = N(z)/D(z)
//!   - Evaluation: two Horner passes and a complex division
//!   - Use: Padé approximants (backward Euler, trapezoidal, Gauss, Radau)
//!
//! - **[`ButcherTableau`]**: any Runge-Kutta method given by (A, b, c)
//!   - Evaluation: R(z) = 1 + z·bᵀ(I − zA)⁻¹e
//!   - Use: methods known only by their coefficients
//!
//! - **[`ChebyshevFamily`]**: Runge-Kutta-Chebyshev with s stages and damping ε
//!   - Evaluation: stage recurrence
//!   - Use: diffusion-dominated problems, long real stability intervals
//!
//! # The `Method` Union
//!
//! [`Method`] gathers the families into one closed type, so a method can be
//! stored, cloned and selected by name without boxing:
//!
//! ```rust
//! use num_complex::Complex64;
//! use stab_rs::methods::{Method, StabilityFunction};
//!
//! let rk4 = Method::by_name("rk4").unwrap();
//! let rkc = Method::chebyshev(10, 0.05).unwrap();
//!
//! for method in [&rk4, &rkc] {
//!     assert_eq!(method.evaluate(Complex64::new(0.0, 0.0)), Complex64::new(1.0, 0.0));
//! }
//! ```

pub mod traits;
pub mod polynomial;
pub mod rational;
pub mod tableau;
pub mod chebyshev;

pub use traits::StabilityFunction;
pub use polynomial::StabilityPolynomial;
pub use rational::RationalStability;
pub use tableau::ButcherTableau;
pub use chebyshev::{ChebyshevFamily, ChebyshevOrder};

use num_complex::Complex64;

use crate::error::ConfigurationError;

// =================================================================================================
// Method
// =================================================================================================

/// Immutable description of a time-stepping method
///
/// Built once from a name or parameters, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    /// Explicit method given by its stability polynomial
    Polynomial(StabilityPolynomial),

    /// Implicit method given by a rational stability function
    Rational(RationalStability),

    /// Runge-Kutta method given by its Butcher tableau
    RungeKutta(ButcherTableau),

    /// Runge-Kutta-Chebyshev family member
    Chebyshev(ChebyshevFamily),
}

impl Method {
    /// Names understood by [`Method::by_name`]
    pub const NAMES: &'static [&'static str] = &[
        "forward_euler",
        "explicit_midpoint",
        "ssp_rk3",
        "classical_rk4",
        "backward_euler",
        "trapezoidal",
        "implicit_midpoint",
    ];

    /// Look up a classical method by name
    ///
    /// Matching is case-insensitive and treats `-` like `_`.
    ///
    /// | Name                               | Method                 |
    /// |------------------------------------|------------------------|
    /// | `forward_euler`, `fe`              | R(z) = 1 + z           |
    /// | `explicit_midpoint`                | 2-stage, order 2       |
    /// | `ssp_rk3`, `ssprk33`               | Shu-Osher SSP RK3      |
    /// | `classical_rk4`, `rk4`, `rk44`     | Kutta's RK4            |
    /// | `backward_euler`, `be`             | Padé (0, 1)            |
    /// | `trapezoidal`, `crank_nicolson`    | Padé (1, 1)            |
    /// | `implicit_midpoint`                | 1-stage Gauss          |
    ///
    /// # Errors
    ///
    /// `UnknownMethod` for any other name.
    pub fn by_name(name: &str) -> Result<Self, ConfigurationError> {
        let key = name.trim().to_ascii_lowercase().replace('-', "_");

        let method = match key.as_str() {
            "forward_euler" | "fe" => Method::RungeKutta(ButcherTableau::forward_euler()),
            "explicit_midpoint" => Method::RungeKutta(ButcherTableau::explicit_midpoint()),
            "ssp_rk3" | "ssprk33" => Method::RungeKutta(ButcherTableau::ssp_rk3()),
            "classical_rk4" | "rk4" | "rk44" => Method::RungeKutta(ButcherTableau::classical_rk4()),
            "backward_euler" | "be" => Method::RungeKutta(ButcherTableau::backward_euler()),
            "trapezoidal" | "crank_nicolson" => Method::Rational(RationalStability::named(
                vec![1.0, 0.5],
                vec![1.0, -0.5],
                "Trapezoidal",
            )?),
            "implicit_midpoint" => Method::RungeKutta(ButcherTableau::implicit_midpoint()),
            _ => {
                return Err(ConfigurationError::UnknownMethod {
                    name: name.to_string(),
                });
            }
        };

        Ok(method)
    }

    /// Forward Euler
    pub fn forward_euler() -> Self {
        Method::RungeKutta(ButcherTableau::forward_euler())
    }

    /// Classical four-stage Runge-Kutta
    pub fn classical_rk4() -> Self {
        Method::RungeKutta(ButcherTableau::classical_rk4())
    }

    /// Truncated exponential of the given order
    pub fn taylor(order: usize) -> Result<Self, ConfigurationError> {
        Ok(Method::Polynomial(StabilityPolynomial::taylor(order)?))
    }

    /// (p, q) Padé approximant of exp(z)
    pub fn pade(p: usize, q: usize) -> Result<Self, ConfigurationError> {
        Ok(Method::Rational(RationalStability::pade(p, q)?))
    }

    /// Stability polynomial from ascending coefficients
    pub fn polynomial(coefficients: Vec<f64>) -> Result<Self, ConfigurationError> {
        Ok(Method::Polynomial(StabilityPolynomial::new(coefficients)?))
    }

    /// Rational stability function from ascending coefficients
    pub fn rational(numerator: Vec<f64>, denominator: Vec<f64>) -> Result<Self, ConfigurationError> {
        Ok(Method::Rational(RationalStability::new(numerator, denominator)?))
    }

    /// Runge-Kutta method from its tableau
    pub fn runge_kutta(tableau: ButcherTableau) -> Self {
        Method::RungeKutta(tableau)
    }

    /// First-order Runge-Kutta-Chebyshev (RKC1)
    ///
    /// # Errors
    ///
    /// `InvalidStageCount` for `stages == 0`, `InvalidDamping` for a
    /// negative or non-finite `damping`.
    pub fn chebyshev(stages: usize, damping: f64) -> Result<Self, ConfigurationError> {
        Ok(Method::Chebyshev(ChebyshevFamily::new(stages, damping, ChebyshevOrder::First)?))
    }

    /// Second-order Runge-Kutta-Chebyshev (RKC2), `stages >= 2`
    pub fn chebyshev_second_order(stages: usize, damping: f64) -> Result<Self, ConfigurationError> {
        Ok(Method::Chebyshev(ChebyshevFamily::new(stages, damping, ChebyshevOrder::Second)?))
    }

    /// The method as a trait object
    fn inner(&self) -> &dyn StabilityFunction {
        match self {
            Method::Polynomial(p) => p,
            Method::Rational(r) => r,
            Method::RungeKutta(t) => t,
            Method::Chebyshev(c) => c,
        }
    }
}

impl StabilityFunction for Method {
    fn evaluate(&self, z: Complex64) -> Complex64 {
        self.inner().evaluate(z)
    }

    fn amplification(&self, z: Complex64) -> f64 {
        self.inner().amplification(z)
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn stages(&self) -> Option<usize> {
        self.inner().stages()
    }

    fn is_explicit(&self) -> bool {
        self.inner().is_explicit()
    }
}

impl From<StabilityPolynomial> for Method {
    fn from(p: StabilityPolynomial) -> Self {
        Method::Polynomial(p)
    }
}

impl From<RationalStability> for Method {
    fn from(r: RationalStability) -> Self {
        Method::Rational(r)
    }
}

impl From<ButcherTableau> for Method {
    fn from(t: ButcherTableau) -> Self {
        Method::RungeKutta(t)
    }
}

impl From<ChebyshevFamily> for Method {
    fn from(c: ChebyshevFamily) -> Self {
        Method::Chebyshev(c)
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
    fn test_every_listed_name_resolves() {
        for name in Method::NAMES {
            let method = Method::by_name(name).unwrap();
            let r0 = method.evaluate(Complex64::new(0.0, 0.0));
            assert_relative_eq!(r0.re, 1.0, epsilon = 1e-14);
            assert_relative_eq!(r0.im, 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_aliases() {
        let z = Complex64::new(-1.3, 0.4);
        let rk4 = Method::by_name("classical_rk4").unwrap();
        for alias in ["rk4", "RK44", "Classical-RK4"] {
            let other = Method::by_name(alias).unwrap();
            assert_eq!(other.evaluate(z), rk4.evaluate(z));
        }
        assert!(Method::by_name("crank_nicolson").is_ok());
        assert!(Method::by_name("be").is_ok());
    }

    #[test]
    fn test_unknown_name() {
        let err = Method::by_name("leapfrog").unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownMethod { name: "leapfrog".to_string() });
    }

    #[test]
    fn test_rk4_tableau_matches_taylor() {
        let tableau = Method::classical_rk4();
        let taylor = Method::taylor(4).unwrap();
        let z = Complex64::new(-2.1, 1.7);
        assert!((tableau.evaluate(z) - taylor.evaluate(z)).norm() < 1e-13);
    }

    #[test]
    fn test_trapezoidal_matches_pade() {
        let named = Method::by_name("trapezoidal").unwrap();
        let pade = Method::pade(1, 1).unwrap();
        let z = Complex64::new(-3.0, 2.0);
        assert!((named.evaluate(z) - pade.evaluate(z)).norm() < 1e-14);
        assert!(!named.is_explicit());
    }

    #[test]
    fn test_chebyshev_constructors() {
        let rkc1 = Method::chebyshev(10, 0.05).unwrap();
        assert_eq!(rkc1.stages(), Some(10));
        assert!(rkc1.name().starts_with("RKC1"));

        let rkc2 = Method::chebyshev_second_order(5, 0.0).unwrap();
        assert!(rkc2.name().starts_with("RKC2"));

        assert!(matches!(
            Method::chebyshev(0, 0.0),
            Err(ConfigurationError::InvalidStageCount { .. })
        ));
        assert!(matches!(
            Method::chebyshev(4, -1.0),
            Err(ConfigurationError::InvalidDamping { .. })
        ));
    }

    #[test]
    fn test_from_conversions() {
        let method: Method = StabilityPolynomial::taylor(2).unwrap().into();
        assert!(matches!(method, Method::Polynomial(_)));

        let method: Method = ButcherTableau::ssp_rk3().into();
        assert_eq!(method.stages(), Some(3));
    }
}
