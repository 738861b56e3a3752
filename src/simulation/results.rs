// src/simulation/results.rs
use crate::core::{ClassicalDistribution, QuantumState, Spin, WalkError};
use serde::Serialize;
use std::fmt;

/// Chart-ready snapshot of both walks after a tick.
///
/// Only every `stride`-th site is captured (site 0, `stride`, `2 * stride`, ...).
/// With the default stride of 2 the parity oscillation of the walk, where
/// odd and even sites alternate between empty and occupied, does not show
/// up as flicker between consecutive frames.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Driver ticks since the last reset.
    pub tick: u64,
    /// Walk steps since the last reset.
    pub steps: u64,
    /// Site index of every sample below.
    pub sites: Vec<usize>,
    /// `sqrt(|↑|^2 + |↓|^2)` per sampled site.
    pub envelope: Vec<f64>,
    /// Classical probability per sampled site.
    pub classical: Vec<f64>,
    pub up_re: Vec<f64>,
    pub up_im: Vec<f64>,
    pub down_re: Vec<f64>,
    pub down_im: Vec<f64>,
}

impl Frame {
    /// Samples `state` and `distribution` at every `stride`-th site. A stride of 0 is treated as 1.
    ///
    /// # Errors
    /// `WalkError::ShapeMismatch` when the two walkers live on lattices of different length.
    pub fn capture(
        state: &QuantumState,
        distribution: &ClassicalDistribution,
        tick: u64,
        steps: u64,
        stride: usize,
    ) -> Result<Self, WalkError> {
        if distribution.sites() != state.sites() {
            return Err(WalkError::ShapeMismatch {
                expected: state.sites(),
                found: distribution.sites(),
            });
        }
        let stride = stride.max(1);
        let sites: Vec<usize> = (0..state.sites()).step_by(stride).collect();
        let envelope = state.envelope();
        let up = state.column(Spin::Up);
        let down = state.column(Spin::Down);
        let classical = distribution.probabilities();

        Ok(Self {
            tick,
            steps,
            envelope: sites.iter().map(|&k| envelope[k]).collect(),
            classical: sites.iter().map(|&k| classical[k]).collect(),
            up_re: sites.iter().map(|&k| up[k].re).collect(),
            up_im: sites.iter().map(|&k| up[k].im).collect(),
            down_re: sites.iter().map(|&k| down[k].re).collect(),
            down_im: sites.iter().map(|&k| down[k].im).collect(),
            sites,
        })
    }

    /// Number of sampled sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let peak = |values: &[f64]| {
            values
                .iter()
                .zip(&self.sites)
                .fold(None, |best: Option<(usize, f64)>, (v, site)| match best {
                    Some((_, b)) if b >= *v => best,
                    _ => Some((*site, *v)),
                })
        };
        write!(f, "Frame(tick {}, step {}", self.tick, self.steps)?;
        if let Some((site, value)) = peak(&self.envelope) {
            write!(f, ", quantum peak {:.4} at {}", value, site)?;
        }
        if let Some((site, value)) = peak(&self.classical) {
            write!(f, ", classical peak {:.4} at {}", value, site)?;
        }
        write!(f, ")")
    }
}

/// Mass, mean and spread of a walker position distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionStatistics {
    /// Total weight still on the lattice.
    pub mass: f64,
    /// Mean site, weighted by the surviving mass.
    pub mean: f64,
    /// Standard deviation of the site, weighted by the surviving mass.
    pub std_dev: f64,
}

impl PositionStatistics {
    /// Moments of non-negative `weights` indexed by site. `None` when the total weight is zero.
    pub fn from_weights(weights: &[f64]) -> Option<Self> {
        let mass: f64 = weights.iter().sum();
        if !mass.is_finite() || mass <= 0.0 {
            return None;
        }
        let mean = weights
            .iter()
            .enumerate()
            .map(|(k, w)| k as f64 * w)
            .sum::<f64>()
            / mass;
        let variance = weights
            .iter()
            .enumerate()
            .map(|(k, w)| (k as f64 - mean).powi(2) * w)
            .sum::<f64>()
            / mass;
        Some(Self { mass, mean, std_dev: variance.max(0.0).sqrt() })
    }
}

/// Position statistics of both walks, side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WalkStatistics {
    pub quantum: Option<PositionStatistics>,
    pub classical: Option<PositionStatistics>,
}

impl WalkStatistics {
    /// Quantum moments come from the true density `|↑|^2 + |↓|^2`.
    pub fn of(state: &QuantumState, distribution: &ClassicalDistribution) -> Self {
        Self {
            quantum: PositionStatistics::from_weights(&state.density()),
            classical: PositionStatistics::from_weights(distribution.probabilities()),
        }
    }
}

impl fmt::Display for WalkStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut line = |label: &str, stats: &Option<PositionStatistics>| match stats {
            Some(s) => writeln!(
                f,
                "  {:<9} mass {:.6}  mean {:>9.3}  std dev {:>8.3}",
                label, s.mass, s.mean, s.std_dev
            ),
            None => writeln!(f, "  {:<9} no mass left on the lattice", label),
        };
        line("quantum", &self.quantum)?;
        line("classical", &self.classical)
    }
}
