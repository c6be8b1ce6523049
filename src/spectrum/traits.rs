//! Spectrum provider trait
//!
//! Anything that can hand the stability analysis a set of eigenvalues:
//! a semi-discretization operator, a dense matrix, or a precomputed
//! [`Spectrum`].

use super::data::Spectrum;
use crate::error::SpectrumError;

// =================================================================================================
// Spectrum Provider Trait
// =================================================================================================

/// Source of the eigenvalues of a discretization operator
///
/// # Responsibility
///
/// Produces the spectrum. Does NOT scale it (the solver does) and does NOT
/// know about time-stepping methods.
///
/// # Implementing
///
/// ```rust
/// use num_complex::Complex64;
/// use stab_rs::error::SpectrumError;
/// use stab_rs::spectrum::{Spectrum, SpectrumProvider};
///
/// /// Pure decay u' = -k u
/// struct Decay {
///     rate: f64,
/// }
///
/// impl SpectrumProvider for Decay {
///     fn spectrum(&self) -> Result<Spectrum, SpectrumError> {
///         Ok(Spectrum::from_real(&[-self.rate]))
///     }
///
///     fn name(&self) -> &str {
///         "Decay"
///     }
/// }
///
/// let spectrum = Decay { rate: 3.0 }.spectrum().unwrap();
/// assert_eq!(spectrum.as_slice()[0], Complex64::new(-3.0, 0.0));
/// ```
pub trait SpectrumProvider: Send + Sync {
    /// Compute (or return) the eigenvalues
    fn spectrum(&self) -> Result<Spectrum, SpectrumError>;

    /// Name of the operator (used for display and export headers)
    fn name(&self) -> &str;

    /// Number of degrees of freedom, when known without computing the spectrum
    fn dimension(&self) -> Option<usize> {
        None
    }
}

impl SpectrumProvider for Spectrum {
    fn spectrum(&self) -> Result<Spectrum, SpectrumError> {
        Ok(self.clone())
    }

    fn name(&self) -> &str {
        "Spectrum"
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: SpectrumProvider + ?Sized> SpectrumProvider for &T {
    fn spectrum(&self) -> Result<Spectrum, SpectrumError> {
        (**self).spectrum()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn dimension(&self) -> Option<usize> {
        (**self).dimension()
    }
}

impl<T: SpectrumProvider + ?Sized> SpectrumProvider for Box<T> {
    fn spectrum(&self) -> Result<Spectrum, SpectrumError> {
        (**self).spectrum()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn dimension(&self) -> Option<usize> {
        (**self).dimension()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
