//! Runge-Kutta-Chebyshev families
//!
//! # Mathematical Background
//!
//! Runge-Kutta-Chebyshev (RKC) methods trade order for a real-axis
//! stability interval growing like s², which makes them the explicit
//! method of choice for diffusion-dominated (parabolic) problems.
//!
//! With damping ε ≥ 0 and s stages:
//!
//! ```text
//! w₀ = 1 + ε/s²
//! ```
//!
//! - **First order (RKC1)**: w₁ = Tₛ(w₀)/Tₛ'(w₀) and
//!   R(z) = Tₛ(w₀ + w₁z) / Tₛ(w₀)
//! - **Second order (RKC2)**: w₁ = Tₛ'(w₀)/Tₛ''(w₀),
//!   bⱼ = Tⱼ''(w₀)/Tⱼ'(w₀)² and R(z) = 1 − bₛTₛ(w₀) + bₛTₛ(w₀ + w₁z)
//!
//! where Tₛ is the Chebyshev polynomial of the first kind.
//!
//! # Damping
//!
//! Undamped methods (ε = 0) touch |R| = 1 at s − 1 interior points of the
//! real interval. Eigenvalues slightly off the real axis near those points
//! leave the stability region. Damping pulls |R| strictly below 1 along
//! the interval at the cost of a slightly shorter interval, roughly
//! (2 − 4ε/3)s² for RKC1.
//!
//! # Evaluation
//!
//! R(z) has degree s, and expanding it in monomials is ill-conditioned
//! already for a few tens of stages. Instead the method's own stage
//! recurrence is applied to the test equation y' = λy with y₀ = 1:
//!
//! ```text
//! Y₀ = 1
//! Y₁ = 1 + μ̃₁z
//! Yⱼ = (1 − μⱼ − νⱼ) + μⱼYⱼ₋₁ + νⱼYⱼ₋₂ + μ̃ⱼzYⱼ₋₁ + γ̃ⱼz     j = 2..s
//! R(z) = Yₛ
//! ```
//!
//! The coefficients are ratios of Chebyshev values at w₀ ≥ 1, computed once
//! at construction.

use num_complex::Complex64;

use crate::error::ConfigurationError;
use super::traits::StabilityFunction;

/// Order of a Runge-Kutta-Chebyshev family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChebyshevOrder {
    /// RKC1: R(z) = Tₛ(w₀ + w₁z)/Tₛ(w₀)
    First,

    /// RKC2: second-order shifted and scaled Chebyshev polynomial
    Second,
}

impl ChebyshevOrder {
    /// Minimum number of stages for the family
    pub fn minimum_stages(&self) -> usize {
        match self {
            ChebyshevOrder::First => 1,
            ChebyshevOrder::Second => 2,
        }
    }

    /// Short family name
    pub fn family(&self) -> &'static str {
        match self {
            ChebyshevOrder::First => "RKC1",
            ChebyshevOrder::Second => "RKC2",
        }
    }
}

/// Coefficients of stage j ≥ 2 of the recurrence
#[derive(Debug, Clone, Copy, PartialEq)]
struct StageCoefficients {
    mu: f64,
    nu: f64,
    mu_tilde: f64,
    gamma_tilde: f64,
}

/// Runge-Kutta-Chebyshev method with s stages and damping ε
///
/// # Example
///
/// ```rust
/// use num_complex::Complex64;
/// use stab_rs::methods::{ChebyshevFamily, ChebyshevOrder, StabilityFunction};
///
/// let rkc = ChebyshevFamily::new(10, 0.0, ChebyshevOrder::First).unwrap();
///
/// // Undamped RKC1 reaches z = -2s² on the real axis
/// assert!((rkc.real_interval_estimate() - 200.0).abs() < 1e-9);
/// assert!(rkc.amplification(Complex64::new(-200.0, 0.0)) <= 1.0 + 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChebyshevFamily {
    stages: usize,
    damping: f64,
    order: ChebyshevOrder,

    /// Shift of the Chebyshev argument
    w0: f64,

    /// Scale of the Chebyshev argument
    w1: f64,

    /// Coefficient of z in the first stage
    mu_tilde_1: f64,

    /// Coefficients of stages 2..=s
    recurrence: Vec<StageCoefficients>,

    name: String,
}

impl ChebyshevFamily {
    /// Create a Chebyshev family member
    ///
    /// # Errors
    ///
    /// - `InvalidStageCount` when `stages` is below the family minimum
    ///   (1 for first order, 2 for second order)
    /// - `InvalidDamping` when `damping` is negative, not finite, or so
    ///   large that Tₛ(w₀) overflows the stage coefficients
    pub fn new(stages: usize, damping: f64, order: ChebyshevOrder) -> Result<Self, ConfigurationError> {
        if stages < order.minimum_stages() {
            return Err(ConfigurationError::InvalidStageCount {
                family: order.family(),
                stages,
                minimum: order.minimum_stages(),
            });
        }

        if !damping.is_finite() || damping < 0.0 {
            return Err(ConfigurationError::InvalidDamping { damping });
        }

        let s = stages as f64;
        let w0 = 1.0 + damping / (s * s);
        let (t, dt, d2t) = chebyshev_values(stages, w0);

        let (w1, mu_tilde_1, recurrence): (f64, f64, Vec<StageCoefficients>) = match order {
            ChebyshevOrder::First => {
                let w1 = t[stages] / dt[stages];
                let recurrence = (2..=stages)
                    .map(|j| StageCoefficients {
                        mu: 2.0 * w0 * t[j - 1] / t[j],
                        nu: -t[j - 2] / t[j],
                        mu_tilde: 2.0 * w1 * t[j - 1] / t[j],
                        gamma_tilde: 0.0,
                    })
                    .collect();
                (w1, w1 / w0, recurrence)
            }
            ChebyshevOrder::Second => {
                let w1 = dt[stages] / d2t[stages];

                // b₀ = b₁ = b₂ since T₁'' vanishes
                let mut b = vec![0.0; stages + 1];
                for j in 2..=stages {
                    b[j] = d2t[j] / (dt[j] * dt[j]);
                }
                b[0] = b[2];
                b[1] = b[2];

                let recurrence = (2..=stages)
                    .map(|j| {
                        let mu_tilde = 2.0 * b[j] * w1 / b[j - 1];
                        let a_prev = 1.0 - b[j - 1] * t[j - 1];
                        StageCoefficients {
                            mu: 2.0 * b[j] * w0 / b[j - 1],
                            nu: -b[j] / b[j - 2],
                            mu_tilde,
                            gamma_tilde: -a_prev * mu_tilde,
                        }
                    })
                    .collect();
                (w1, b[1] * w1, recurrence)
            }
        };

        let coefficients_finite = w1.is_finite()
            && mu_tilde_1.is_finite()
            && recurrence.iter().all(|c| {
                c.mu.is_finite() && c.nu.is_finite() && c.mu_tilde.is_finite() && c.gamma_tilde.is_finite()
            });

        if !coefficients_finite {
            return Err(ConfigurationError::InvalidDamping { damping });
        }

        Ok(Self {
            stages,
            damping,
            order,
            w0,
            w1,
            mu_tilde_1,
            recurrence,
            name: format!("{}(s={}, eps={})", order.family(), stages, damping),
        })
    }

    /// Number of stages s
    pub fn stage_count(&self) -> usize {
        self.stages
    }

    /// Damping parameter ε
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Family order
    pub fn order(&self) -> ChebyshevOrder {
        self.order
    }

    /// (w₀, w₁)
    pub fn shift_and_scale(&self) -> (f64, f64) {
        (self.w0, self.w1)
    }

    /// Left end of the real interval predicted by w₀ + w₁z = −1
    ///
    /// Exact for RKC1; for RKC2 the true interval is this value up to the
    /// width of the damping band.
    pub fn real_interval_estimate(&self) -> f64 {
        (1.0 + self.w0) / self.w1
    }
}

impl StabilityFunction for ChebyshevFamily {
    fn evaluate(&self, z: Complex64) -> Complex64 {
        let one = Complex64::new(1.0, 0.0);

        let mut previous = one;
        let mut current = one + z * self.mu_tilde_1;

        for stage in &self.recurrence {
            let next = one * (1.0 - stage.mu - stage.nu)
                + current * stage.mu
                + previous * stage.nu
                + z * current * stage.mu_tilde
                + z * stage.gamma_tilde;
            previous = current;
            current = next;
        }

        current
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stages(&self) -> Option<usize> {
        Some(self.stages)
    }
}

/// Tⱼ(w), Tⱼ'(w), Tⱼ''(w) for j = 0..=s by the three-term recurrence
fn chebyshev_values(stages: usize, w: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut t = Vec::with_capacity(stages + 1);
    let mut dt = Vec::with_capacity(stages + 1);
    let mut d2t = Vec::with_capacity(stages + 1);

    t.extend([1.0, w]);
    dt.extend([0.0, 1.0]);
    d2t.extend([0.0, 0.0]);

    for j in 1..stages {
        t.push(2.0 * w * t[j] - t[j - 1]);
        dt.push(2.0 * t[j] + 2.0 * w * dt[j] - dt[j - 1]);
        d2t.push(4.0 * dt[j] + 2.0 * w * d2t[j] - d2t[j - 1]);
    }

    (t, dt, d2t)
}

// =================================================================================================
// Tests
// =================================================================================================
