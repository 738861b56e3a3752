// src/simulation/mod.rs

//! Drives the two walks tick by tick.
//!
//! [`WalkEngine`] holds the fixed operators and implements the engine
//! operations. [`Session`] owns one engine plus the live quantum state and
//! classical distribution, and reacts to explicit [`Event`]s coming from
//! whatever front end is ticking it.

mod results;
pub(crate) mod engine;

// Re-export the main public interface types
pub use engine::WalkEngine;
pub use results::{Frame, PositionStatistics, WalkStatistics};

use crate::config::WalkConfig;
use crate::core::constants::walk_constants::{
    DEFAULT_SITES, DEFAULT_STEPS_PER_TICK, FRAME_STRIDE, NORM_TOLERANCE,
};
use crate::core::{ClassicalDistribution, Lattice, QuantumState, SpinAmplitudes, WalkError};
use crate::operators::{Coin, TransitionProbabilities};
use log::{debug, info, warn};

/// Where and how the walker starts after a reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResetParams {
    pub site: usize,
    pub spin: SpinAmplitudes,
}

impl ResetParams {
    pub fn new(site: usize, spin: SpinAmplitudes) -> Self {
        Self { site, spin }
    }
}

/// Input from the front end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Timer tick. Advances both walks only while the session is running.
    Tick,
    /// Start/stop button.
    Toggle,
    /// Reset button, carrying the initial conditions entered by the user.
    Reset(ResetParams),
}

/// What handling an [`Event`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Both walks advanced by `steps` steps.
    Stepped { steps: u32 },
    /// A tick arrived while stopped.
    Idle,
    Started,
    Stopped,
    Reset,
}

/// One walker pair (quantum and classical) and everything needed to evolve it.
#[derive(Debug, Clone)]
pub struct Session {
    engine: WalkEngine,
    quantum: QuantumState,
    classical: ClassicalDistribution,
    steps_per_tick: u32,
    running: bool,
    ticks: u64,
    steps: u64,
    leak_reported: bool,
}

impl Session {
    /// A stopped session with both walkers placed according to `initial`.
    pub fn new(
        engine: WalkEngine,
        initial: ResetParams,
        steps_per_tick: u32,
    ) -> Result<Self, WalkError> {
        let quantum = engine.initialize_quantum(initial.site, initial.spin)?;
        let classical = engine.initialize_classical(initial.site)?;
        Ok(Self {
            engine,
            quantum,
            classical,
            steps_per_tick,
            running: false,
            ticks: 0,
            steps: 0,
            leak_reported: false,
        })
    }

    /// Builds engine and session from a validated configuration.
    pub fn from_config(config: &WalkConfig) -> Result<Self, WalkError> {
        config.validate()?;
        SessionBuilder::new()
            .sites(config.sites)
            .coin(config.coin.coin())
            .forward_probability(config.forward_probability)
            .steps_per_tick(config.steps_per_tick)
            .initial(config.initial.reset_params(config.sites))
            .build()
    }

    /// Dispatches one event.
    pub fn handle(&mut self, event: Event) -> Result<Outcome, WalkError> {
        match event {
            Event::Tick => self.tick(),
            Event::Toggle => Ok(self.toggle()),
            Event::Reset(params) => {
                self.reset(params)?;
                Ok(Outcome::Reset)
            }
        }
    }

    /// Advances both walks by `steps_per_tick` steps if running.
    pub fn tick(&mut self) -> Result<Outcome, WalkError> {
        if !self.running {
            return Ok(Outcome::Idle);
        }
        self.advance(self.steps_per_tick)?;
        self.ticks += 1;
        Ok(Outcome::Stepped { steps: self.steps_per_tick })
    }

    /// Advances both walks by `steps` steps regardless of the running flag.
    pub fn advance(&mut self, steps: u32) -> Result<(), WalkError> {
        let coin = *self.engine.coin();
        for _ in 0..steps {
            self.engine.step_quantum_in_place(&mut self.quantum, &coin)?;
            self.engine.step_classical_in_place(&mut self.classical)?;
            self.steps += 1;
        }
        self.report_leak();
        Ok(())
    }

    pub fn toggle(&mut self) -> Outcome {
        if self.running {
            self.stop()
        } else {
            self.start()
        }
    }

    pub fn start(&mut self) -> Outcome {
        self.running = true;
        debug!("session started at tick {}", self.ticks);
        Outcome::Started
    }

    pub fn stop(&mut self) -> Outcome {
        self.running = false;
        debug!("session stopped at tick {}", self.ticks);
        Outcome::Stopped
    }

    /// Replaces both walkers with fresh ones at `params.site`.
    ///
    /// Both new states are built before anything is replaced, so an invalid
    /// site or spin leaves the session exactly as it was. The running flag is
    /// not touched.
    pub fn reset(&mut self, params: ResetParams) -> Result<(), WalkError> {
        let quantum = self.engine.initialize_quantum(params.site, params.spin)?;
        let classical = self.engine.initialize_classical(params.site)?;
        self.quantum = quantum;
        self.classical = classical;
        self.ticks = 0;
        self.steps = 0;
        self.leak_reported = false;
        info!("reset walkers to site {} with spin {:?}", params.site, params.spin);
        Ok(())
    }

    fn report_leak(&mut self) {
        if self.leak_reported {
            return;
        }
        let norm = self.quantum.norm_sqr();
        let mass = self.classical.total_mass();
        if norm < 1.0 - NORM_TOLERANCE || mass < 1.0 - NORM_TOLERANCE {
            warn!(
                "walker reached the lattice edge after {} steps: quantum norm^2 {:.6}, classical mass {:.6}",
                self.steps, norm, mass
            );
            self.leak_reported = true;
        }
    }

    /// Snapshot for charting, sampled at every other site.
    pub fn frame(&self) -> Result<Frame, WalkError> {
        Frame::capture(&self.quantum, &self.classical, self.ticks, self.steps, FRAME_STRIDE)
    }

    pub fn statistics(&self) -> WalkStatistics {
        WalkStatistics::of(&self.quantum, &self.classical)
    }

    pub fn engine(&self) -> &WalkEngine {
        &self.engine
    }

    pub fn quantum(&self) -> &QuantumState {
        &self.quantum
    }

    pub fn classical(&self) -> &ClassicalDistribution {
        &self.classical
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn steps_per_tick(&self) -> u32 {
        self.steps_per_tick
    }
}

//-------------------------------------------------------------------------
// Session Builder
//-------------------------------------------------------------------------

/// A helper struct for constructing `Session` instances using method chaining.
///
/// Unset fields fall back to the defaults: 500 sites, Hadamard coin, unbiased
/// classical walk, two steps per tick, walker at the centre in `|↑>`.
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    sites: Option<usize>,
    coin: Option<Coin>,
    forward_probability: Option<f64>,
    steps_per_tick: Option<u32>,
    initial: Option<ResetParams>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sites(mut self, sites: usize) -> Self {
        self.sites = Some(sites);
        self
    }

    pub fn coin(mut self, coin: Coin) -> Self {
        self.coin = Some(coin);
        self
    }

    pub fn forward_probability(mut self, forward: f64) -> Self {
        self.forward_probability = Some(forward);
        self
    }

    pub fn steps_per_tick(mut self, steps: u32) -> Self {
        self.steps_per_tick = Some(steps);
        self
    }

    pub fn initial(mut self, initial: ResetParams) -> Self {
        self.initial = Some(initial);
        self
    }

    /// # Errors
    /// `WalkError::Configuration` for zero steps per tick, plus whatever the
    /// lattice, probabilities or initial walker reject.
    pub fn build(self) -> Result<Session, WalkError> {
        let steps_per_tick = self.steps_per_tick.unwrap_or(DEFAULT_STEPS_PER_TICK);
        if steps_per_tick == 0 {
            return Err(WalkError::Configuration {
                message: "steps_per_tick must be at least 1".to_string(),
            });
        }
        let lattice = Lattice::new(self.sites.unwrap_or(DEFAULT_SITES))?;
        let probabilities = match self.forward_probability {
            Some(forward) => TransitionProbabilities::from_forward(forward)?,
            None => TransitionProbabilities::default(),
        };
        let initial = self
            .initial
            .unwrap_or_else(|| ResetParams::new(lattice.center(), SpinAmplitudes::up()));
        let engine = WalkEngine::new(lattice, self.coin.unwrap_or_default(), probabilities);
        Session::new(engine, initial, steps_per_tick)
    }
}
