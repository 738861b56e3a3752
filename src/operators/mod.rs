// src/operators/mod.rs

//! Linear operators driving the two walks.
//!
//! - [`Coin`]: per-site 2x2 unitary acting on the spin branches.
//! - [`ShiftOperator`]: one-site translation with open boundaries, shared by
//!   the quantum walk (complex amplitudes) and the classical walk (real mass).
//! - [`MixingOperator`]: the classical transition `p_f * S+ + p_b * S-`.

pub mod coin;
pub mod shift;
pub mod transition;

pub use coin::{Coin, CoinKind};
pub use shift::{Direction, ShiftOperator};
pub use transition::{MixingOperator, TransitionProbabilities};
