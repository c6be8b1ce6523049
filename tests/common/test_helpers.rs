//! Helper functions for integration tests

use stab_rs::methods::StabilityFunction;
use stab_rs::solver::{linearly_stable_step_size, SolverConfiguration, StepSizeResult};
use stab_rs::spectrum::SpectrumProvider;

/// Default search configuration
pub fn default_config() -> SolverConfiguration {
    SolverConfiguration::default()
}

/// Maximal stable step with the default configuration
pub fn solve(method: &dyn StabilityFunction, operator: &dyn SpectrumProvider) -> StepSizeResult {
    linearly_stable_step_size(method, operator, &default_config())
        .unwrap_or_else(|e| panic!("{} on {}: {}", method.name(), operator.name(), e))
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
