// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod lattice;
pub mod state;
pub mod distribution;

// Re-export public types for convenient access via `qwalk::core::TypeName`
pub use error::WalkError;
pub use lattice::Lattice;
pub use state::{QuantumState, Spin, SpinAmplitudes};
pub use distribution::ClassicalDistribution;

pub mod constants;
pub use constants::walk_constants::{DEFAULT_SITES, NORM_TOLERANCE}; // Re-export
