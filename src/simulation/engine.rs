// src/simulation/engine.rs
use crate::core::{ClassicalDistribution, Lattice, QuantumState, Spin, SpinAmplitudes, WalkError};
use crate::operators::{Coin, MixingOperator, ShiftOperator, TransitionProbabilities};
use log::{Level, debug, log_enabled, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The walk-evolution engine.
///
/// Holds everything that is fixed for the lifetime of a run: the lattice, the
/// default coin, the two shift operators and the classical mixing operator.
/// The evolving states live outside the engine and are passed in and handed
/// back by each operation.
#[derive(Debug, Clone)]
pub struct WalkEngine {
    lattice: Lattice,
    coin: Coin,
    forward: ShiftOperator,
    backward: ShiftOperator,
    mixing: MixingOperator,
}

impl WalkEngine {
    /// Builds the shift and mixing operators for `lattice`.
    pub fn new(lattice: Lattice, coin: Coin, probabilities: TransitionProbabilities) -> Self {
        debug!(
            "walk engine: {} forward={} backward={}",
            lattice,
            probabilities.forward(),
            probabilities.backward()
        );
        Self {
            lattice,
            coin,
            forward: ShiftOperator::forward(&lattice),
            backward: ShiftOperator::backward(&lattice),
            mixing: MixingOperator::new(&lattice, probabilities),
        }
    }

    /// Hadamard coin and an unbiased classical walk on `sites` sites.
    pub fn with_sites(sites: usize) -> Result<Self, WalkError> {
        Ok(Self::new(
            Lattice::new(sites)?,
            Coin::default(),
            TransitionProbabilities::default(),
        ))
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// The coin used when a step is not given one explicitly.
    pub fn coin(&self) -> &Coin {
        &self.coin
    }

    pub fn probabilities(&self) -> TransitionProbabilities {
        self.mixing.probabilities()
    }

    /// `|site, spin>` with the spin normalized.
    ///
    /// # Errors
    /// `InvalidSite` for a site off the lattice, `DegenerateSpin` for an all-zero
    /// or non-finite spin.
    pub fn initialize_quantum(
        &self,
        site: usize,
        spin: SpinAmplitudes,
    ) -> Result<QuantumState, WalkError> {
        QuantumState::localized(&self.lattice, site, spin)
    }

    /// Point mass at `site`.
    pub fn initialize_classical(&self, site: usize) -> Result<ClassicalDistribution, WalkError> {
        ClassicalDistribution::point_mass(&self.lattice, site)
    }

    /// One quantum step with the engine's coin.
    pub fn step_quantum(&self, state: QuantumState) -> Result<QuantumState, WalkError> {
        self.step_quantum_with(state, &self.coin)
    }

    /// One quantum step with an explicit coin.
    pub fn step_quantum_with(
        &self,
        mut state: QuantumState,
        coin: &Coin,
    ) -> Result<QuantumState, WalkError> {
        self.step_quantum_in_place(&mut state, coin)?;
        Ok(state)
    }

    /// Coin flip at every site, then ↑ shifted forward and ↓ shifted backward.
    pub fn step_quantum_in_place(
        &self,
        state: &mut QuantumState,
        coin: &Coin,
    ) -> Result<(), WalkError> {
        self.lattice.check_len(state.sites())?;

        for row in state.rows_mut() {
            *row = coin.apply(*row);
        }

        let mut up = state.column(Spin::Up);
        let mut down = state.column(Spin::Down);
        self.forward.apply_in_place(&mut up)?;
        self.backward.apply_in_place(&mut down)?;
        state.set_column(Spin::Up, &up);
        state.set_column(Spin::Down, &down);

        if log_enabled!(Level::Trace) {
            trace!("quantum step: norm^2 = {:.12}", state.norm_sqr());
        }
        Ok(())
    }

    /// One classical step: `p' = p * (p_f S+ + p_b S-)`.
    pub fn step_classical(
        &self,
        mut distribution: ClassicalDistribution,
    ) -> Result<ClassicalDistribution, WalkError> {
        self.step_classical_in_place(&mut distribution)?;
        Ok(distribution)
    }

    pub fn step_classical_in_place(
        &self,
        distribution: &mut ClassicalDistribution,
    ) -> Result<(), WalkError> {
        self.lattice.check_len(distribution.sites())?;
        self.mixing.apply_in_place(distribution.probabilities_mut())?;
        if log_enabled!(Level::Trace) {
            trace!("classical step: mass = {:.12}", distribution.total_mass());
        }
        Ok(())
    }

    /// Applies [`step_quantum`](Self::step_quantum) `steps` times.
    pub fn evolve_quantum(
        &self,
        mut state: QuantumState,
        steps: usize,
    ) -> Result<QuantumState, WalkError> {
        for _ in 0..steps {
            self.step_quantum_in_place(&mut state, &self.coin)?;
        }
        Ok(state)
    }

    /// Applies [`step_classical`](Self::step_classical) `steps` times.
    pub fn evolve_classical(
        &self,
        mut distribution: ClassicalDistribution,
        steps: usize,
    ) -> Result<ClassicalDistribution, WalkError> {
        for _ in 0..steps {
            self.step_classical_in_place(&mut distribution)?;
        }
        Ok(distribution)
    }

    /// Per-site `sqrt(|↑|^2 + |↓|^2)`. See [`QuantumState::envelope`].
    pub fn probability_envelope(&self, state: &QuantumState) -> Result<Vec<f64>, WalkError> {
        self.lattice.check_len(state.sites())?;
        Ok(state.envelope())
    }

    /// Per-site `|↑|^2 + |↓|^2`.
    pub fn probability_density(&self, state: &QuantumState) -> Result<Vec<f64>, WalkError> {
        self.lattice.check_len(state.sites())?;
        Ok(state.density())
    }

    /// Draws a walker position from the quantum probability density.
    ///
    /// Leaked amplitude is ignored: the surviving density is renormalized.
    /// The same `seed` and state always give the same site. `None` when no
    /// amplitude is left on the lattice.
    pub fn sample_quantum_position(
        &self,
        state: &QuantumState,
        seed: u64,
    ) -> Result<Option<usize>, WalkError> {
        let density = self.probability_density(state)?;
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(sample_site(&density, &mut rng))
    }

    /// Draws a walker position from the classical distribution. See
    /// [`sample_quantum_position`](Self::sample_quantum_position).
    pub fn sample_classical_position(
        &self,
        distribution: &ClassicalDistribution,
        seed: u64,
    ) -> Result<Option<usize>, WalkError> {
        self.lattice.check_len(distribution.sites())?;
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(sample_site(distribution.probabilities(), &mut rng))
    }
}

/// Inverse-CDF draw from non-negative `weights`.
fn sample_site<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    let target = rng.random::<f64>() * total; // Sample in [0, total)
    let mut cumulative = 0.0;
    for (site, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if target < cumulative {
            return Some(site);
        }
    }
    // Rounding can leave target just above the running sum; fall back to the last occupied site.
    weights.iter().rposition(|w| *w > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-12;

    fn engine(sites: usize) -> Result<WalkEngine, WalkError> {
        WalkEngine::with_sites(sites)
    }

    #[test]
    fn step_rejects_foreign_state() -> Result<(), WalkError> {
        let small = engine(4)?;
        let large = engine(6)?;
        let state = large.initialize_quantum(3, SpinAmplitudes::up())?;
        assert_eq!(
            small.step_quantum(state),
            Err(WalkError::ShapeMismatch { expected: 4, found: 6 })
        );
        let dist = large.initialize_classical(3)?;
        assert_eq!(
            small.step_classical(dist),
            Err(WalkError::ShapeMismatch { expected: 4, found: 6 })
        );
        Ok(())
    }

    #[test]
    fn pauli_x_coin_swaps_drift_direction() -> Result<(), WalkError> {
        // X turns |↑> into |↓>, which then moves backward.
        let engine = engine(5)?;
        let state = engine.initialize_quantum(2, SpinAmplitudes::up())?;
        let state = engine.step_quantum_with(state, &Coin::pauli_x())?;
        assert_eq!(state.amplitude(1, Spin::Down), Some(Complex::new(1.0, 0.0)));
        assert!((state.norm_sqr() - 1.0).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn down_branch_picks_up_hadamard_sign() -> Result<(), WalkError> {
        let engine = engine(5)?;
        let state = engine.initialize_quantum(2, SpinAmplitudes::down())?;
        let state = engine.step_quantum(state)?;
        let up = state.amplitude(3, Spin::Up).unwrap();
        let down = state.amplitude(1, Spin::Down).unwrap();
        assert!((up - Complex::new(FRAC_1_SQRT_2, 0.0)).norm() < TEST_TOLERANCE);
        assert!((down - Complex::new(-FRAC_1_SQRT_2, 0.0)).norm() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn sampling_is_seeded() -> Result<(), WalkError> {
        let engine = engine(41)?;
        let state = engine.evolve_quantum(engine.initialize_quantum(20, SpinAmplitudes::up())?, 10)?;
        let first = engine.sample_quantum_position(&state, 7)?;
        let second = engine.sample_quantum_position(&state, 7)?;
        assert_eq!(first, second);
        let site = first.expect("state still has amplitude");
        assert!(state.density()[site] > 0.0, "sampled an empty site {}", site);
        Ok(())
    }

    #[test]
    fn sampling_point_mass_returns_its_site() -> Result<(), WalkError> {
        let engine = engine(9)?;
        let dist = engine.initialize_classical(6)?;
        for seed in 0..16 {
            assert_eq!(engine.sample_classical_position(&dist, seed)?, Some(6));
        }
        Ok(())
    }

    #[test]
    fn sampling_empty_lattice_gives_none() -> Result<(), WalkError> {
        let engine = engine(1)?;
        let dist = engine.step_classical(engine.initialize_classical(0)?)?;
        assert_eq!(dist.total_mass(), 0.0);
        assert_eq!(engine.sample_classical_position(&dist, 3)?, None);
        Ok(())
    }
}
