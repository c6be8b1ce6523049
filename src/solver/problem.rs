use crate::error::SpectrumError;
use crate::methods::StabilityFunction;
use crate::spectrum::{Spectrum, SpectrumProvider};

/// Stability problem
///
/// Defines a specific case to analyse:
/// - Time-stepping method (stability function)
/// - Operator spectrum (eigenvalues)
///
/// # Design
///
/// The spectrum is computed once when the problem is built; the same
/// problem can then be handed to several solvers or configurations.
/// This is the "WHAT to analyse" (not "HOW to search").
///
/// # Examples
///
/// ```rust
/// use stab_rs::methods::Method;
/// use stab_rs::operators::UpwindAdvection;
/// use stab_rs::solver::StabilityProblem;
///
/// let operator = UpwindAdvection::new(1.0, 1.0, 20).unwrap();
/// let problem = StabilityProblem::from_operator(Box::new(Method::classical_rk4()), &operator).unwrap();
///
/// assert_eq!(problem.method_name(), "Classical RK4");
/// assert_eq!(problem.operator_name(), "Upwind advection");
/// assert_eq!(problem.len(), 20);
/// ```
pub struct StabilityProblem {
    /// Time-stepping method
    method: Box<dyn StabilityFunction>,

    /// Eigenvalues of the operator
    spectrum: Spectrum,

    /// Where the spectrum came from
    operator_name: String,
}

impl StabilityProblem {
    /// Create a problem from an explicit spectrum
    pub fn new(method: Box<dyn StabilityFunction>, spectrum: Spectrum) -> Self {
        Self {
            method,
            spectrum,
            operator_name: "Spectrum".to_string(),
        }
    }

    /// Create a problem from an operator, computing its spectrum
    ///
    /// # Errors
    ///
    /// Any `SpectrumError` raised by the operator.
    pub fn from_operator(
        method: Box<dyn StabilityFunction>,
        operator: &dyn SpectrumProvider,
    ) -> Result<Self, SpectrumError> {
        let spectrum = operator.spectrum()?;
        Ok(Self {
            method,
            spectrum,
            operator_name: operator.name().to_string(),
        })
    }

    /// Stability function of the method
    pub fn method(&self) -> &dyn StabilityFunction {
        self.method.as_ref()
    }

    /// Operator spectrum
    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    /// Method name
    pub fn method_name(&self) -> &str {
        self.method.name()
    }

    /// Operator name
    pub fn operator_name(&self) -> &str {
        &self.operator_name
    }

    /// Number of eigenvalues
    pub fn len(&self) -> usize {
        self.spectrum.len()
    }

    /// True when the spectrum is empty
    pub fn is_empty(&self) -> bool {
        self.spectrum.is_empty()
    }
}

impl std::fmt::Debug for StabilityProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StabilityProblem")
            .field("method", &self.method_name())
            .field("stages", &self.method.stages())
            .field("explicit", &self.method.is_explicit())
            .field("operator", &self.operator_name)
            .field("eigenvalues", &self.spectrum.len())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
