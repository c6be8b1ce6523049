//! Polynomial stability functions
//!
//! # Mathematical Background
//!
//! Every explicit Runge-Kutta method applied to y' = λy produces a
//! polynomial stability function
//!
//! ```text
//! R(z) = c₀ + c₁z + c₂z² + ... + cₛzˢ
//! ```
//!
//! whose degree is at most the number of stages. A method of order p
//! matches the Taylor expansion of exp(z) up to zᵖ, so every s-stage,
//! order-s method (s ≤ 4) shares the truncated exponential:
//!
//! | Method            | R(z)                              | Real interval |
//! |-------------------|-----------------------------------|---------------|
//! | Forward Euler     | 1 + z                             | [-2, 0]       |
//! | RK2 (midpoint)    | 1 + z + z²/2                      | [-2, 0]       |
//! | SSP RK3           | 1 + z + z²/2 + z³/6               | [-2.51, 0]    |
//! | Classical RK4     | 1 + z + z²/2 + z³/6 + z⁴/24       | [-2.79, 0]    |
//!
//! # Evaluation
//!
//! Horner's rule on complex arithmetic: s multiplications and s additions,
//! no powers formed explicitly.

use num_complex::Complex64;

use crate::error::ConfigurationError;
use super::traits::StabilityFunction;

/// Stability polynomial with real coefficients in ascending powers
///
/// # Example
///
/// ```rust
/// use num_complex::Complex64;
/// use stab_rs::methods::{StabilityFunction, StabilityPolynomial};
///
/// let rk4 = StabilityPolynomial::taylor(4).unwrap();
/// let r = rk4.evaluate(Complex64::new(-1.0, 0.0));
/// assert!((r.re - 0.375).abs() < 1e-12); // 1 - 1 + 1/2 - 1/6 + 1/24
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityPolynomial {
    /// cₖ multiplies zᵏ
    coefficients: Vec<f64>,

    /// Display name
    name: String,
}

impl StabilityPolynomial {
    /// Create from ascending coefficients
    ///
    /// Trailing zero coefficients are dropped so that `degree()` reports the
    /// true degree.
    ///
    /// # Errors
    ///
    /// `MalformedCoefficients` when the array is empty, contains a
    /// non-finite value, or is identically zero.
    pub fn new(coefficients: Vec<f64>) -> Result<Self, ConfigurationError> {
        Self::named(coefficients, "Polynomial")
    }

    /// Create from ascending coefficients with a display name
    pub fn named(
        mut coefficients: Vec<f64>,
        name: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        if coefficients.is_empty() {
            return Err(ConfigurationError::MalformedCoefficients {
                reason: "stability polynomial needs at least one coefficient".to_string(),
            });
        }

        if let Some(index) = coefficients.iter().position(|c| !c.is_finite()) {
            return Err(ConfigurationError::MalformedCoefficients {
                reason: format!("coefficient {} is not finite", index),
            });
        }

        while coefficients.len() > 1 && coefficients.last() == Some(&0.0) {
            coefficients.pop();
        }

        if coefficients == [0.0] {
            return Err(ConfigurationError::MalformedCoefficients {
                reason: "stability polynomial is identically zero".to_string(),
            });
        }

        Ok(Self {
            coefficients,
            name: name.into(),
        })
    }

    /// Truncated exponential 1 + z + z²/2! + ... + zᵖ/p!
    ///
    /// This is the stability function of every explicit p-stage method of
    /// order p for p ≤ 4, and of the order-p Taylor series method in
    /// general.
    ///
    /// # Errors
    ///
    /// `InvalidStageCount` for `order == 0`.
    pub fn taylor(order: usize) -> Result<Self, ConfigurationError> {
        if order == 0 {
            return Err(ConfigurationError::InvalidStageCount {
                family: "Taylor",
                stages: order,
                minimum: 1,
            });
        }

        // cₖ = 1/k! built incrementally to avoid factorial overflow
        let mut coefficients = Vec::with_capacity(order + 1);
        let mut term = 1.0;
        coefficients.push(term);
        for k in 1..=order {
            term /= k as f64;
            coefficients.push(term);
        }

        Self::named(coefficients, format!("Taylor({})", order))
    }

    /// Ascending coefficients
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Polynomial degree
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Order of consistency with exp(z)
    ///
    /// Largest p such that cₖ = 1/k! for every k ≤ p (within 1e-12).
    /// Returns `None` when R(0) ≠ 1.
    pub fn order(&self) -> Option<usize> {
        let mut factorial = 1.0;
        let mut order = None;
        for (k, &c) in self.coefficients.iter().enumerate() {
            if k > 0 {
                factorial *= k as f64;
            }
            if (c - 1.0 / factorial).abs() > 1e-12 {
                break;
            }
            order = Some(k);
        }
        order
    }

    /// Horner evaluation shared with the rational functions
    pub(crate) fn horner(&self, z: Complex64) -> Complex64 {
        self.coefficients
            .iter()
            .rev()
            .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
    }
}

impl StabilityFunction for StabilityPolynomial {
    fn evaluate(&self, z: Complex64) -> Complex64 {
        self.horner(z)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stages(&self) -> Option<usize> {
        Some(self.degree())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
