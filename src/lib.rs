// src/lib.rs

//! `qwalk` - A discrete-time quantum walk on a line, next to its classical counterpart
//!
//! A qubit-coined walker lives on `L` sites. Every step flips the coin at
//! each site and then moves the `↑` branch one site forward and the `↓`
//! branch one site backward. A classical random walker with the same start
//! is evolved alongside for comparison. Both lattices have open boundaries:
//! amplitude or probability stepping past either end is lost, not wrapped.

pub mod core;
pub mod operators;
pub mod simulation;
pub mod validation;
pub mod config;

// Re-export the most common types for easier top-level use
pub use crate::core::{ClassicalDistribution, Lattice, QuantumState, Spin, SpinAmplitudes, WalkError};
pub use operators::{Coin, CoinKind, TransitionProbabilities};
pub use simulation::{Event, Frame, ResetParams, Session, SessionBuilder, WalkEngine};
pub use config::WalkConfig;
pub use validation::{check_normalization, check_probability_mass, validate_state};

// Example 1: One Hadamard step from |k, ↑>
// The coin splits the walker evenly; the ↑ half moves right and the ↓ half moves left.
/// ```
/// use qwalk::{Spin, SpinAmplitudes, WalkEngine, WalkError};
/// use std::f64::consts::FRAC_1_SQRT_2;
///
/// let engine = WalkEngine::with_sites(11)?;
/// let state = engine.initialize_quantum(5, SpinAmplitudes::up())?;
/// let state = engine.step_quantum(state)?;
///
/// let right = state.amplitude(6, Spin::Up).unwrap();
/// let left = state.amplitude(4, Spin::Down).unwrap();
/// assert!((right.re - FRAC_1_SQRT_2).abs() < 1e-12);
/// assert!((left.re - FRAC_1_SQRT_2).abs() < 1e-12);
/// assert_eq!(state.amplitude(4, Spin::Up).unwrap().norm(), 0.0);
/// # Ok::<(), WalkError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Classical spreading on five sites
// A point mass in the middle diffuses symmetrically.
/// ```
/// use qwalk::{WalkEngine, WalkError};
///
/// let engine = WalkEngine::with_sites(5)?;
/// let dist = engine.initialize_classical(2)?;
/// let dist = engine.step_classical(dist)?;
/// assert_eq!(dist.probabilities(), &[0.0, 0.5, 0.0, 0.5, 0.0]);
/// let dist = engine.step_classical(dist)?;
/// assert_eq!(dist.probabilities(), &[0.25, 0.0, 0.5, 0.0, 0.25]);
/// # Ok::<(), WalkError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 3: Driving a session
/// ```
/// use qwalk::{Event, ResetParams, SessionBuilder, SpinAmplitudes, WalkError};
///
/// let mut session = SessionBuilder::new().sites(101).build()?;
/// session.handle(Event::Toggle)?; // start
/// for _ in 0..10 {
///     session.handle(Event::Tick)?;
/// }
/// assert_eq!(session.steps(), 20);
///
/// session.handle(Event::Reset(ResetParams::new(30, SpinAmplitudes::new(1.0, 0.0, 0.0, 1.0))))?;
/// assert_eq!(session.steps(), 0);
/// assert_eq!(session.frame()?.sites.len(), 51);
/// # Ok::<(), WalkError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
