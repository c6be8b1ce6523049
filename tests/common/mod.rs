//! Common utilities for integration tests

pub mod mock_methods;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_methods::{ConstantAmplification, FixedSpectrum};
pub use test_helpers::{
    default_config,
    relative_error,
    solve,
};
