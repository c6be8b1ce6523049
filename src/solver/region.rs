//! Stability region geometry
//!
//! The step-size search answers "how far along the spectrum directions can
//! we scale before leaving the region". Applied to unit spectra it also
//! measures the region itself:
//!
//! | Query                            | Spectrum   | Result                          |
//! |----------------------------------|------------|---------------------------------|
//! | `real_stability_interval`        | {−1}       | L, region ⊇ [−L, 0]             |
//! | `imaginary_stability_interval`   | {i}        | β, region ⊇ [−iβ, iβ]           |
//! | `trace_stability_boundary`       | {e^{iθₖ}}  | boundary radius along each ray  |
//!
//! # Star-shaped assumption
//!
//! Boundary tracing returns the first exit point along each ray from the
//! origin. For regions that are star-shaped with respect to the origin
//! (all RK and Chebyshev methods in this crate, near the origin) this is
//! the boundary; otherwise it is the innermost crossing.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::ConfigurationError;
use crate::methods::StabilityFunction;
use crate::spectrum::Spectrum;
use super::step_size::StepSizeSolver;
use super::traits::{SolveStatus, SolverConfiguration, StepSizeResult};

// =================================================================================================
// Axis intervals
// =================================================================================================

/// Length L of the real-axis stability interval [−L, 0]
///
/// # Example
///
/// ```rust
/// use stab_rs::methods::Method;
/// use stab_rs::solver::{real_stability_interval, SolverConfiguration};
///
/// let result = real_stability_interval(&Method::forward_euler(), &SolverConfiguration::default()).unwrap();
/// assert!((result.step_size - 2.0).abs() < 1e-9);
/// ```
pub fn real_stability_interval(
    method: &dyn StabilityFunction,
    config: &SolverConfiguration,
) -> Result<StepSizeResult, ConfigurationError> {
    StepSizeSolver::new().search(method, &Spectrum::from_real(&[-1.0]), config)
}

/// Half-length β of the imaginary-axis stability interval [−iβ, iβ]
///
/// Only the upper half-axis is probed; real-coefficient stability
/// functions satisfy R(z̄) = R(z)‾.
pub fn imaginary_stability_interval(
    method: &dyn StabilityFunction,
    config: &SolverConfiguration,
) -> Result<StepSizeResult, ConfigurationError> {
    StepSizeSolver::new().search(method, &Spectrum::from_vec(vec![Complex64::new(0.0, 1.0)]), config)
}

// =================================================================================================
// Boundary tracing
// =================================================================================================

/// Boundary crossing along one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPoint {
    /// Ray direction θ in [0, 2π)
    pub angle: f64,

    /// Distance from the origin to the boundary (+∞ when unbounded)
    pub radius: f64,

    /// Outcome of the search along the ray
    pub status: SolveStatus,
}

impl BoundaryPoint {
    /// Boundary point r·e^{iθ}, `None` for an unbounded ray
    pub fn point(&self) -> Option<Complex64> {
        if self.radius.is_finite() {
            Some(Complex64::from_polar(self.radius, self.angle))
        } else {
            None
        }
    }

    /// True when the region extends to infinity along the ray
    pub fn is_unbounded(&self) -> bool {
        matches!(self.status, SolveStatus::Unbounded { .. })
    }
}

/// Polyline approximation of a stability region boundary
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityBoundary {
    method: String,
    points: Vec<BoundaryPoint>,
}

impl StabilityBoundary {
    /// Name of the traced method
    pub fn method_name(&self) -> &str {
        &self.method
    }

    /// All rays, in increasing angle
    pub fn points(&self) -> &[BoundaryPoint] {
        &self.points
    }

    /// Number of rays
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no ray was traced
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Finite boundary points as complex numbers
    pub fn polyline(&self) -> Vec<Complex64> {
        self.points.iter().filter_map(BoundaryPoint::point).collect()
    }

    /// True when every ray hit the boundary at a finite radius
    pub fn is_bounded(&self) -> bool {
        self.points.iter().all(|p| p.radius.is_finite())
    }

    /// Largest finite radius
    pub fn max_radius(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.radius)
            .filter(|r| r.is_finite())
            .reduce(f64::max)
    }
}

/// Trace the stability region boundary along `rays` equally spaced rays
///
/// Ray k has direction θₖ = 2πk/rays. The radius along each ray is the
/// maximal stable step for the spectrum {e^{iθₖ}}.
///
/// # Errors
///
/// `InvalidSetting` for `rays == 0` or an invalid configuration.
///
/// # Example
///
/// ```rust
/// use stab_rs::methods::Method;
/// use stab_rs::solver::{trace_stability_boundary, SolverConfiguration};
///
/// let boundary = trace_stability_boundary(&Method::forward_euler(), 8, &SolverConfiguration::default()).unwrap();
///
/// // |1 + z| = 1 along θ = π gives r = 2
/// assert!((boundary.points()[4].radius - 2.0).abs() < 1e-9);
/// ```
pub fn trace_stability_boundary(
    method: &dyn StabilityFunction,
    rays: usize,
    config: &SolverConfiguration,
) -> Result<StabilityBoundary, ConfigurationError> {
    if rays == 0 {
        return Err(ConfigurationError::InvalidSetting {
            parameter: "rays",
            value: 0.0,
            reason: "must be at least 1",
        });
    }
    config.validate()?;

    let solver = StepSizeSolver::new();
    let trace_ray = |k: usize| -> Result<BoundaryPoint, ConfigurationError> {
        let angle = 2.0 * PI * k as f64 / rays as f64;
        let direction = Spectrum::from_vec(vec![Complex64::from_polar(1.0, angle)]);
        let result = solver.search(method, &direction, config)?;
        Ok(BoundaryPoint {
            angle,
            radius: result.step_size,
            status: result.status,
        })
    };

    log::debug!("Tracing stability boundary of {} along {} rays", method.name(), rays);

    #[cfg(feature = "parallel")]
    let points = if rays > super::parallel_threshold() {
        (0..rays).into_par_iter().map(trace_ray).collect::<Result<Vec<_>, _>>()?
    } else {
        (0..rays).map(trace_ray).collect::<Result<Vec<_>, _>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let points = (0..rays).map(trace_ray).collect::<Result<Vec<_>, _>>()?;

    Ok(StabilityBoundary {
        method: method.name().to_string(),
        points,
    })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::Method;
    use approx::assert_relative_eq;

    #[test]
    fn test_rk4_intervals() {
        let rk4 = Method::classical_rk4();
        let config = SolverConfiguration::default();

        let real = real_stability_interval(&rk4, &config).unwrap();
        assert_relative_eq!(real.step_size, 2.785293563269, epsilon = 1e-8);

        let imaginary = imaginary_stability_interval(&rk4, &config).unwrap();
        assert_relative_eq!(imaginary.step_size, 2.0 * 2.0_f64.sqrt(), epsilon = 1e-8);
    }

    #[test]
    fn test_undamped_chebyshev_interval_is_two_s_squared() {
        let rkc = Method::chebyshev(10, 0.0).unwrap();
        let real = real_stability_interval(&rkc, &SolverConfiguration::default()).unwrap();
        assert_relative_eq!(real.step_size, 200.0, epsilon = 1e-6);
    }

    #[test]
    fn test_damped_chebyshev_interval_is_shorter() {
        let rkc = Method::chebyshev(10, 0.05).unwrap();
        let real = real_stability_interval(&rkc, &SolverConfiguration::default()).unwrap();
        assert_relative_eq!(real.step_size, 193.6546606719494, epsilon = 1e-6);
    }

    #[test]
    fn test_second_order_chebyshev_interval() {
        let rkc2 = Method::chebyshev_second_order(10, 0.0).unwrap();
        let real = real_stability_interval(&rkc2, &SolverConfiguration::default()).unwrap();
        assert_relative_eq!(real.step_size, 66.0, epsilon = 1e-6);
    }

    #[test]
    fn test_forward_euler_circle() {
        let boundary =
            trace_stability_boundary(&Method::forward_euler(), 36, &SolverConfiguration::default()).unwrap();
        assert_eq!(boundary.len(), 36);
        assert_eq!(boundary.method_name(), "Forward Euler");

        // Left half-plane rays cross |1 + z| = 1 at r = -2cos θ
        for point in boundary.points() {
            if point.angle.cos() < -0.1 {
                assert_relative_eq!(point.radius, -2.0 * point.angle.cos(), epsilon = 1e-8);
                let z = point.point().unwrap();
                assert_relative_eq!((Complex64::new(1.0, 0.0) + z).norm(), 1.0, epsilon = 1e-8);
            }
        }
        assert!(boundary.is_bounded());
        assert_relative_eq!(boundary.max_radius().unwrap(), 2.0, epsilon = 1e-8);
    }

    #[test]
    fn test_implicit_method_has_unbounded_rays() {
        let be = Method::by_name("backward_euler").unwrap();
        let boundary = trace_stability_boundary(&be, 8, &SolverConfiguration::default()).unwrap();

        // θ = π points into the left half-plane
        assert!(boundary.points()[4].is_unbounded());
        assert!(boundary.points()[4].point().is_none());
        assert!(!boundary.is_bounded());
        // θ = 0: |1/(1 - r)| ≤ 1 needs r ≥ 2, the first exit is at r ≈ 0
        assert!(boundary.points()[0].radius < 1e-6);
    }

    #[test]
    fn test_zero_rays_rejected() {
        let err = trace_stability_boundary(&Method::forward_euler(), 0, &SolverConfiguration::default())
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSetting { parameter: "rays", .. }));
    }
}
