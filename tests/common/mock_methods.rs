//! Mock methods and operators for integration tests

use num_complex::Complex64;
use stab_rs::error::SpectrumError;
use stab_rs::methods::StabilityFunction;
use stab_rs::spectrum::{Spectrum, SpectrumProvider};

/// R(z) = c for every z
///
/// With c > 1 every step size is unstable; with c ≤ 1 none is.
pub struct ConstantAmplification {
    value: f64,
}

impl ConstantAmplification {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl StabilityFunction for ConstantAmplification {
    fn evaluate(&self, _z: Complex64) -> Complex64 {
        Complex64::new(self.value, 0.0)
    }

    fn name(&self) -> &str {
        "Constant"
    }
}

/// Operator returning a fixed list of eigenvalues
pub struct FixedSpectrum {
    name: String,
    eigenvalues: Vec<Complex64>,
}

impl FixedSpectrum {
    pub fn new(name: &str, eigenvalues: Vec<Complex64>) -> Self {
        Self {
            name: name.to_string(),
            eigenvalues,
        }
    }

    pub fn real(name: &str, eigenvalues: &[f64]) -> Self {
        Self::new(name, eigenvalues.iter().map(|&re| Complex64::new(re, 0.0)).collect())
    }
}

impl SpectrumProvider for FixedSpectrum {
    fn spectrum(&self) -> Result<Spectrum, SpectrumError> {
        Ok(Spectrum::from_vec(self.eigenvalues.clone()))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.eigenvalues.len())
    }
}
