//! Default parameters of the walk and numerical tolerances.

/// Defaults shared by the engine, the session driver and the configuration layer.
pub mod walk_constants {
    /// Number of lattice sites used when nothing else is configured.
    pub const DEFAULT_SITES: usize = 500;
    /// Probability of a classical step towards higher site indices.
    pub const DEFAULT_FORWARD_PROBABILITY: f64 = 0.5;
    /// Quantum and classical steps performed per driver tick.
    pub const DEFAULT_STEPS_PER_TICK: u32 = 2;
    /// Wall-clock pause between ticks when running in real time.
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 700;
    /// Only every `FRAME_STRIDE`-th site is captured in a frame.
    pub const FRAME_STRIDE: usize = 2;
    /// Allowed deviation of a norm or probability mass from 1.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Allowed deviation of `C C^dagger` from the identity.
    pub const UNITARITY_TOLERANCE: f64 = 1e-9;
}
