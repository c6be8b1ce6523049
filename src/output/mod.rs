//! Output module for stability analysis results
//!
//! Plotting stays outside the library: results are written to plain data
//! files that any plotting tool can read.
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait
//!     └── csv.rs          ← CSV implementation
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stab_rs::methods::Method;
//! use stab_rs::operators::UpwindAdvection;
//! use stab_rs::output::{CsvConfig, CsvExporter, Exporter};
//! use stab_rs::solver::{linearly_stable_step_size, SolverConfiguration};
//!
//! let method = Method::classical_rk4();
//! let operator = UpwindAdvection::new(1.0, 1.0, 40).unwrap();
//! let result = linearly_stable_step_size(&method, &operator, &SolverConfiguration::default()).unwrap();
//!
//! CsvExporter::new(CsvConfig::european().with_header())
//!     .export_spectrum(&method, &result, "spectrum.csv")
//!     .unwrap();
//! ```

pub mod export;

// Re-export commonly used items for convenience
pub use export::{CsvConfig, CsvError, CsvExporter, CsvMetadata, Exporter};
