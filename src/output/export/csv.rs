//! CSV export of stability analysis results
//!
//! Writes the scaled spectrum of a step-size search and traced stability
//! boundaries to CSV files readable by Python pandas, MATLAB, gnuplot or a
//! spreadsheet, so that plotting stays outside the library.
//!
//! # Features
//!
//! - **Metadata support**: optional `#` comment header with a timestamp,
//!   the method, the operator, the step size and the solver status
//! - **Customizable**: delimiter, decimal separator, precision, notation
//! - **Validation**: rejects empty data and non-finite values
//!
//! # Files
//!
//! ## Scaled spectrum
//!
//! ```csv
//! re,im,amplification
//! -1.392647,0.000000,1.000000
//! -1.375543,0.217863,0.999874
//! ...
//! ```
//!
//! ## Stability boundary
//!
//! ```csv
//! angle,radius,re,im
//! 1.570796,2.828427,0.000000,2.828427
//! ...
//! ```
//!
//! Unbounded rays have no finite boundary point; they are skipped and
//! counted in the metadata header.
//!
//! ## With Metadata
//!
//! ```csv
//! # Linear Stability Analysis
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Method: Classical RK4
//! # Operator: Upwind advection
//! # Step Size: 0.034816
//! # Status: Converged
//! #
//! re,im,amplification
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};

use thiserror::Error;

use crate::methods::StabilityFunction;
use crate::solver::{StabilityBoundary, StepSizeResult};
use super::Exporter;

// =============================================================================
// Errors
// =============================================================================

/// Failures of the CSV exporter
#[derive(Debug, Error)]
pub enum CsvError {
    /// Nothing to write
    #[error("empty data: {what}")]
    EmptyData { what: &'static str },

    /// The result carries no scaled spectrum (unbounded or failed search)
    #[error("no scaled spectrum to export (status: {status})")]
    MissingSpectrum { status: String },

    /// NaN or infinity in a row
    #[error("invalid data: non-finite value in row {row}")]
    NonFinite { row: usize },

    /// File creation or write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use stab_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert!(!config.include_metadata);
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places (default: 6)
    pub precision: usize,

    /// Scientific notation instead of fixed (default: false)
    pub scientific: bool,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header; built from the result when `None`
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            scientific: false,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places, scientific notation)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            scientific: true,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable the metadata header with automatic content
    pub fn with_header(mut self) -> Self {
        self.include_metadata = true;
        self
    }

    /// Builder pattern: enable metadata with explicit content
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only non-`None` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvMetadata {
    /// Method name (e.g. "Classical RK4")
    pub method_name: Option<String>,

    /// Operator name (e.g. "Upwind advection")
    pub operator_name: Option<String>,

    /// Maximal stable step size
    pub step_size: Option<f64>,

    /// Solver status
    pub status: Option<String>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata from a step-size result
    pub fn from_result(result: &StepSizeResult) -> Self {
        Self {
            method_name: result.metadata.get("method").cloned(),
            operator_name: result.metadata.get("operator").cloned(),
            step_size: Some(result.step_size),
            status: Some(result.status.to_string()),
            custom: Vec::new(),
        }
    }

    /// Metadata from a traced boundary
    pub fn from_boundary(boundary: &StabilityBoundary) -> Self {
        let unbounded = boundary.points().iter().filter(|p| !p.radius.is_finite()).count();
        let mut metadata = Self {
            method_name: Some(boundary.method_name().to_string()),
            ..Default::default()
        };
        metadata.add_custom("Rays".to_string(), boundary.len().to_string());
        metadata.add_custom("Unbounded Rays".to_string(), unbounded.to_string());
        metadata
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> Result<(), CsvError> {
    writeln!(out, "# Linear Stability Analysis")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(method) = &metadata.method_name {
        writeln!(out, "# Method: {}", method)?;
    }
    if let Some(operator) = &metadata.operator_name {
        writeln!(out, "# Operator: {}", operator)?;
    }
    if let Some(step_size) = metadata.step_size {
        writeln!(out, "# Step Size: {}", step_size)?;
    }
    if let Some(status) = &metadata.status {
        writeln!(out, "# Status: {}", status)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;

    Ok(())
}

/// Format number with configured precision, notation and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = if config.scientific {
        format!("{:.prec$e}", value, prec = config.precision)
    } else {
        format!("{:.prec$}", value, prec = config.precision)
    };

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Write a header line and validated numeric rows
fn write_table<W: Write>(
    out: &mut W,
    columns: &[&str],
    rows: &[Vec<f64>],
    config: &CsvConfig,
) -> Result<(), CsvError> {
    let delimiter = config.delimiter.to_string();

    writeln!(out, "{}", columns.join(&delimiter))?;

    for row in rows {
        let line: Vec<String> = row.iter().map(|&v| format_number(v, config)).collect();
        writeln!(out, "{}", line.join(&delimiter))?;
    }

    Ok(())
}

/// Reject rows containing NaN or infinity
fn validate_rows(rows: &[Vec<f64>]) -> Result<(), CsvError> {
    match rows.iter().position(|row| row.iter().any(|v| !v.is_finite())) {
        Some(row) => Err(CsvError::NonFinite { row }),
        None => Ok(()),
    }
}

// =============================================================================
// CSV Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
///
/// # Example
///
/// ```rust,no_run
/// use stab_rs::methods::Method;
/// use stab_rs::operators::UpwindAdvection;
/// use stab_rs::output::export::{CsvConfig, CsvExporter, Exporter};
/// use stab_rs::solver::{linearly_stable_step_size, SolverConfiguration};
///
/// let method = Method::classical_rk4();
/// let operator = UpwindAdvection::new(1.0, 1.0, 40).unwrap();
/// let result = linearly_stable_step_size(&method, &operator, &SolverConfiguration::default()).unwrap();
///
/// let exporter = CsvExporter::new(CsvConfig::default().with_header());
/// exporter.export_spectrum(&method, &result, "rk4_upwind.csv").unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    config: CsvConfig,
}

impl CsvExporter {
    /// Create an exporter with the given configuration
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Exporter configuration
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    fn write_file(
        &self,
        path: &str,
        metadata: CsvMetadata,
        columns: &[&str],
        rows: &[Vec<f64>],
    ) -> Result<(), CsvError> {
        validate_rows(rows)?;

        let mut out = BufWriter::new(File::create(path)?);

        if self.config.include_metadata {
            let metadata = self.config.metadata.clone().unwrap_or(metadata);
            write_metadata_header(&mut out, &metadata)?;
        }

        write_table(&mut out, columns, rows, &self.config)?;
        out.flush()?;

        log::debug!("Exported {} rows to {}", rows.len(), path);
        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export_spectrum(
        &self,
        method: &dyn StabilityFunction,
        result: &StepSizeResult,
        path: &str,
    ) -> Result<(), CsvError> {
        let scaled = result.scaled_spectrum.as_ref().ok_or_else(|| CsvError::MissingSpectrum {
            status: result.status.to_string(),
        })?;

        if scaled.is_empty() {
            return Err(CsvError::EmptyData { what: "scaled spectrum has no eigenvalue" });
        }

        let rows: Vec<Vec<f64>> = scaled
            .iter()
            .map(|z| vec![z.re, z.im, method.amplification(*z)])
            .collect();

        self.write_file(
            path,
            CsvMetadata::from_result(result),
            &["re", "im", "amplification"],
            &rows,
        )
    }

    fn export_boundary(&self, boundary: &StabilityBoundary, path: &str) -> Result<(), CsvError> {
        let rows: Vec<Vec<f64>> = boundary
            .points()
            .iter()
            .filter_map(|p| p.point().map(|z| vec![p.angle, p.radius, z.re, z.im]))
            .collect();

        if rows.is_empty() {
            return Err(CsvError::EmptyData { what: "boundary has no finite point" });
        }

        self.write_file(
            path,
            CsvMetadata::from_boundary(boundary),
            &["angle", "radius", "re", "im"],
            &rows,
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
