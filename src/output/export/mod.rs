//! Export module for stability analysis results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module.
//! Adding a new format means adding a file, without modifying existing code.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use stab_rs::methods::Method;
//! use stab_rs::output::export::{CsvExporter, Exporter};
//! use stab_rs::solver::{trace_stability_boundary, SolverConfiguration};
//!
//! let method = Method::classical_rk4();
//! let boundary = trace_stability_boundary(&method, 360, &SolverConfiguration::default()).unwrap();
//!
//! CsvExporter::default().export_boundary(&boundary, "rk4_region.csv").unwrap();
//! ```

pub mod csv;

// Re-export the most commonly used types at the module level so users can write:
//   use stab_rs::output::export::{CsvExporter, CsvConfig, CsvError};
pub use csv::{CsvConfig, CsvError, CsvExporter, CsvMetadata};

use crate::methods::StabilityFunction;
use crate::solver::{StabilityBoundary, StepSizeResult};

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so the
/// caller can react to the precise failure without downcasting.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports the scaled spectrum {h*·λⱼ} of a step-size result.
    ///
    /// Columns: `re`, `im`, and `amplification` = |R(h*·λⱼ)| evaluated
    /// with `method`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `result` carries no scaled spectrum (any status except converged
    ///   or non-convergent)
    /// - the path is invalid or the directory does not exist
    fn export_spectrum(
        &self,
        method: &dyn StabilityFunction,
        result: &StepSizeResult,
        path: &str,
    ) -> Result<(), Self::Error>;

    /// Exports the finite points of a traced stability boundary.
    ///
    /// Columns: `angle`, `radius`, `re`, `im`.
    ///
    /// # Errors
    ///
    /// Returns an error if no ray has a finite boundary point or the path
    /// is invalid.
    fn export_boundary(&self, boundary: &StabilityBoundary, path: &str) -> Result<(), Self::Error>;
}
