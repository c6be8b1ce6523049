//! Operator spectra
//!
//! The stability analysis never sees an operator directly, only its
//! eigenvalues. This module provides:
//!
//! - **[`Spectrum`]**: immutable container of complex eigenvalues
//! - **[`SpectrumProvider`]**: trait for anything that can produce one
//!
//! # Where Eigenvalues Come From
//!
//! ```text
//! ┌──────────────────────┐   analytic formula   ┌──────────┐
//! │ Semi-discretization  │ ───────────────────► │          │
//! │ (upwind, centered…)  │                      │ Spectrum │
//! └──────────────────────┘                      │          │
//! ┌──────────────────────┐   real Schur (QR)    │          │
//! │ Dense matrix         │ ───────────────────► │          │
//! └──────────────────────┘                      └──────────┘
//! ```

pub mod data;
pub mod traits;

pub use data::Spectrum;
pub use traits::SpectrumProvider;
