// src/config.rs

//! Run configuration, loadable from TOML.
//!
//! ```toml
//! sites = 500
//! forward_probability = 0.5
//! coin = "hadamard"
//! steps_per_tick = 2
//! tick_interval_ms = 700
//!
//! [initial]
//! site = 250
//! up = [1.0, 0.0]
//! down = [0.0, 0.0]
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above, with
//! `initial.site` defaulting to the lattice centre.

use crate::core::constants::walk_constants::{
    DEFAULT_FORWARD_PROBABILITY, DEFAULT_SITES, DEFAULT_STEPS_PER_TICK, DEFAULT_TICK_INTERVAL_MS,
};
use crate::core::{Lattice, SpinAmplitudes, WalkError};
use crate::operators::{CoinKind, TransitionProbabilities};
use crate::simulation::ResetParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkConfig {
    pub sites: usize,
    pub forward_probability: f64,
    pub coin: CoinKind,
    pub steps_per_tick: u32,
    pub tick_interval_ms: u64,
    pub initial: InitialCondition,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            sites: DEFAULT_SITES,
            forward_probability: DEFAULT_FORWARD_PROBABILITY,
            coin: CoinKind::default(),
            steps_per_tick: DEFAULT_STEPS_PER_TICK,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            initial: InitialCondition::default(),
        }
    }
}

/// Starting site and spin, as `[re, im]` pairs for each branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<usize>,
    pub up: [f64; 2],
    pub down: [f64; 2],
}

impl Default for InitialCondition {
    fn default() -> Self {
        Self { site: None, up: [1.0, 0.0], down: [0.0, 0.0] }
    }
}

impl InitialCondition {
    pub fn spin(&self) -> SpinAmplitudes {
        SpinAmplitudes::from_matrix([self.up, self.down])
    }

    /// Resolves the default site against a lattice of `sites` sites.
    pub fn reset_params(&self, sites: usize) -> ResetParams {
        ResetParams::new(self.site.unwrap_or(sites / 2), self.spin())
    }
}

impl WalkConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, WalkError> {
        let config: WalkConfig = toml::from_str(text).map_err(|e| WalkError::Configuration {
            message: format!("invalid TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, WalkError> {
        let text = std::fs::read_to_string(path).map_err(|e| WalkError::Configuration {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, WalkError> {
        toml::to_string_pretty(self).map_err(|e| WalkError::Configuration {
            message: format!("cannot serialize configuration: {}", e),
        })
    }

    /// Checks every field the engine would otherwise reject later.
    pub fn validate(&self) -> Result<(), WalkError> {
        let lattice = Lattice::new(self.sites)?;
        TransitionProbabilities::from_forward(self.forward_probability)?;
        if self.steps_per_tick == 0 {
            return Err(WalkError::Configuration {
                message: "steps_per_tick must be at least 1".to_string(),
            });
        }
        let initial = self.initial.reset_params(self.sites);
        lattice.check_site(initial.site)?;
        initial.spin.normalized()?;
        Ok(())
    }
}
