// src/validation/mod.rs

//! Provides functions to validate walk states against their invariants.

use crate::core::{ClassicalDistribution, Lattice, QuantumState, WalkError};
use crate::core::constants::walk_constants::NORM_TOLERANCE;

/// Checks if the quantum state is normalized (sum of squared amplitudes ≈ 1.0).
///
/// A state that has lost amplitude through an open boundary fails this check;
/// that loss is expected behaviour, so callers decide whether it is an error.
///
/// # Arguments
/// * `state` - The `QuantumState` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `1e-9`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(WalkError::Denormalized)` otherwise.
pub fn check_normalization(state: &QuantumState, tolerance: Option<f64>) -> Result<(), WalkError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(WalkError::Denormalized {
            message: format!(
                "Sum(|psi|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that a classical distribution carries total mass ≈ 1.0.
pub fn check_probability_mass(
    distribution: &ClassicalDistribution,
    tolerance: Option<f64>,
) -> Result<(), WalkError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let mass = distribution.total_mass();
    if (mass - 1.0).abs() > effective_tolerance {
        Err(WalkError::Denormalized {
            message: format!("Sum(p) = {} (Deviation > {})", mass, effective_tolerance),
        })
    } else {
        Ok(())
    }
}

/// Fails with `ShapeMismatch` when `len` is not the lattice size.
pub fn check_shape(len: usize, lattice: &Lattice) -> Result<(), WalkError> {
    lattice.check_len(len)
}

/// Shape and normalization of a quantum state in one call.
pub fn validate_state(
    state: &QuantumState,
    lattice: &Lattice,
    norm_tolerance: Option<f64>,
) -> Result<(), WalkError> {
    check_shape(state.sites(), lattice)?;
    check_normalization(state, norm_tolerance)?;
    Ok(())
}
