// src/operators/transition.rs

use super::shift::ShiftOperator;
use crate::core::constants::walk_constants::{DEFAULT_FORWARD_PROBABILITY, NORM_TOLERANCE};
use crate::core::{Lattice, WalkError};

/// Probabilities of the classical walker stepping forward or backward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionProbabilities {
    forward: f64,
    backward: f64,
}

impl TransitionProbabilities {
    /// Both values must be finite, non-negative and sum to 1 within
    /// `NORM_TOLERANCE`. The stored backward probability is `1 - forward`, so
    /// the pair never adds up to more than 1.
    pub fn new(forward: f64, backward: f64) -> Result<Self, WalkError> {
        if !forward.is_finite() || !backward.is_finite() || forward < 0.0 || backward < 0.0 {
            return Err(WalkError::InvalidProbabilities {
                message: format!(
                    "forward={} backward={} must be finite and non-negative",
                    forward, backward
                ),
            });
        }
        if (forward + backward - 1.0).abs() > NORM_TOLERANCE {
            return Err(WalkError::InvalidProbabilities {
                message: format!("forward + backward = {}, expected 1", forward + backward),
            });
        }
        Ok(Self { forward, backward: 1.0 - forward })
    }

    /// `backward` is `1 - forward`.
    pub fn from_forward(forward: f64) -> Result<Self, WalkError> {
        Self::new(forward, 1.0 - forward)
    }

    pub fn forward(&self) -> f64 {
        self.forward
    }

    pub fn backward(&self) -> f64 {
        self.backward
    }
}

impl Default for TransitionProbabilities {
    fn default() -> Self {
        Self {
            forward: DEFAULT_FORWARD_PROBABILITY,
            backward: 1.0 - DEFAULT_FORWARD_PROBABILITY,
        }
    }
}

/// The classical step operator `M = p_f * S+ + p_b * S-`.
///
/// Built once per lattice. Applying it shifts the distribution both ways and
/// blends the results, which gives exactly the same numbers as multiplying by
/// the dense `M` returned from [`matrix`](Self::matrix).
#[derive(Debug, Clone, PartialEq)]
pub struct MixingOperator {
    probabilities: TransitionProbabilities,
    forward: ShiftOperator,
    backward: ShiftOperator,
}

impl MixingOperator {
    pub fn new(lattice: &Lattice, probabilities: TransitionProbabilities) -> Self {
        Self {
            probabilities,
            forward: ShiftOperator::forward(lattice),
            backward: ShiftOperator::backward(lattice),
        }
    }

    pub fn probabilities(&self) -> TransitionProbabilities {
        self.probabilities
    }

    pub fn sites(&self) -> usize {
        self.forward.sites()
    }

    /// Replaces `values` with `values * M`.
    pub fn apply_in_place(&self, values: &mut [f64]) -> Result<(), WalkError> {
        let forward = self.forward.apply(values)?;
        let backward = self.backward.apply(values)?;
        let (p_f, p_b) = (self.probabilities.forward, self.probabilities.backward);
        for ((v, f), b) in values.iter_mut().zip(forward).zip(backward) {
            *v = p_f * f + p_b * b;
        }
        Ok(())
    }

    /// Dense `L x L` form of `M`.
    pub fn matrix(&self) -> Vec<Vec<f64>> {
        let forward = self.forward.matrix::<f64>();
        let backward = self.backward.matrix::<f64>();
        let (p_f, p_b) = (self.probabilities.forward, self.probabilities.backward);
        forward
            .iter()
            .zip(&backward)
            .map(|(f_row, b_row)| {
                f_row
                    .iter()
                    .zip(b_row)
                    .map(|(f, b)| p_f * f + p_b * b)
                    .collect()
            })
            .collect()
    }
}
