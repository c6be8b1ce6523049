//! Rational stability functions
//!
//! Implicit Runge-Kutta methods have rational stability functions
//! R(z) = N(z)/D(z). The classical families are Padé approximants of
//! exp(z):
//!
//! ```text
//! N_pq(z) = Σ_{j=0..p} (p+q-j)! p! / ((p+q)! j! (p-j)!) · zʲ
//! D_pq(z) = Σ_{j=0..q} (p+q-j)! q! / ((p+q)! j! (q-j)!) · (-z)ʲ
//! ```
//!
//! | (p, q) | Method             | A-stable |
//! |--------|--------------------|----------|
//! | (0, 1) | Backward Euler     | yes (L)  |
//! | (1, 1) | Trapezoidal rule   | yes      |
//! | (1, 2) | Radau IIA, 2 stage | yes (L)  |
//! | (2, 2) | Gauss, 2 stage     | yes      |
//!
//! A-stable methods keep the whole left half-plane inside their stability
//! region, so a spectrum with non-positive real parts never bounds the
//! step size. The solver reports that as an unbounded outcome.

use num_complex::Complex64;

use crate::error::ConfigurationError;
use super::polynomial::StabilityPolynomial;
use super::traits::StabilityFunction;

/// Rational stability function N(z)/D(z)
///
/// # Example
///
/// ```rust
/// use num_complex::Complex64;
/// use stab_rs::methods::{RationalStability, StabilityFunction};
///
/// let backward_euler = RationalStability::pade(0, 1).unwrap();
/// let r = backward_euler.evaluate(Complex64::new(-1.0, 0.0));
/// assert!((r.re - 0.5).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RationalStability {
    numerator: StabilityPolynomial,
    denominator: StabilityPolynomial,
    name: String,
}

impl RationalStability {
    /// Create from numerator and denominator coefficients (ascending)
    ///
    /// # Errors
    ///
    /// `MalformedCoefficients` when either polynomial is malformed or
    /// D(0) = 0 (the stability function must be defined at the origin).
    pub fn new(numerator: Vec<f64>, denominator: Vec<f64>) -> Result<Self, ConfigurationError> {
        Self::named(numerator, denominator, "Rational")
    }

    /// Create with a display name
    pub fn named(
        numerator: Vec<f64>,
        denominator: Vec<f64>,
        name: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let numerator = StabilityPolynomial::new(numerator)?;
        let denominator = StabilityPolynomial::new(denominator)?;

        if denominator.coefficients()[0] == 0.0 {
            return Err(ConfigurationError::MalformedCoefficients {
                reason: "denominator vanishes at z = 0".to_string(),
            });
        }

        Ok(Self {
            numerator,
            denominator,
            name: name.into(),
        })
    }

    /// (p, q) Padé approximant of exp(z)
    ///
    /// # Errors
    ///
    /// `MalformedCoefficients` when p + q exceeds 170 (factorials overflow).
    pub fn pade(p: usize, q: usize) -> Result<Self, ConfigurationError> {
        if p + q > 170 {
            return Err(ConfigurationError::MalformedCoefficients {
                reason: format!("Padé degrees ({}, {}) too large", p, q),
            });
        }

        let total = factorial(p + q);

        let numerator: Vec<f64> = (0..=p)
            .map(|j| factorial(p + q - j) * factorial(p) / (total * factorial(j) * factorial(p - j)))
            .collect();

        // (-z)ʲ folded into the sign of each coefficient
        let denominator: Vec<f64> = (0..=q)
            .map(|j| {
                let magnitude =
                    factorial(p + q - j) * factorial(q) / (total * factorial(j) * factorial(q - j));
                if j % 2 == 0 { magnitude } else { -magnitude }
            })
            .collect();

        Self::named(numerator, denominator, format!("Pade({}, {})", p, q))
    }

    /// Numerator polynomial
    pub fn numerator(&self) -> &StabilityPolynomial {
        &self.numerator
    }

    /// Denominator polynomial
    pub fn denominator(&self) -> &StabilityPolynomial {
        &self.denominator
    }
}

impl StabilityFunction for RationalStability {
    /// N(z)/D(z); at a pole the division yields a non-finite value
    fn evaluate(&self, z: Complex64) -> Complex64 {
        self.numerator.horner(z) / self.denominator.horner(z)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_explicit(&self) -> bool {
        self.denominator.degree() == 0
    }
}

/// n! as a float
fn factorial(n: usize) -> f64 {
    (1..=n).fold(1.0, |acc, k| acc * k as f64)
}

// =================================================================================================
// Tests
// =================================================================================================
