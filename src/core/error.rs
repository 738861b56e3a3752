//! Error handling logic

use std::fmt;

/// Error types raised by the walk engine, its operators and the session driver.
///
/// Every failure is reported synchronously by the call that detected it;
/// nothing is deferred to a later step.
#[derive(Debug, Clone, PartialEq)]
pub enum WalkError {
    /// A site index outside `[0, sites)`. Sites are rejected, never clamped or wrapped.
    InvalidSite {
        /// The offending site index
        site: usize,
        /// Number of sites in the lattice
        sites: usize,
    },

    /// Spin amplitudes that cannot be normalized (all zero, or not finite).
    DegenerateSpin {
        /// DegenerateSpin failure message
        message: String,
    },

    /// A state or distribution whose length disagrees with the lattice size.
    ShapeMismatch {
        /// Number of sites the operator was built for
        expected: usize,
        /// Number of sites actually supplied
        found: usize,
    },

    /// A lattice that cannot hold a walker.
    InvalidLattice {
        /// InvalidLattice failure message
        message: String,
    },

    /// Forward/backward transition probabilities that do not form a distribution.
    InvalidProbabilities {
        /// InvalidProbabilities failure message
        message: String,
    },

    /// A user supplied coin matrix that is not unitary.
    NonUnitaryCoin {
        /// NonUnitaryCoin failure message
        message: String,
    },

    /// Total norm or probability mass outside tolerance.
    Denormalized {
        /// Denormalized failure message
        message: String,
    },

    /// Unreadable or invalid configuration.
    Configuration {
        /// Configuration failure message
        message: String,
    },
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkError::InvalidSite { site, sites } => {
                write!(f, "Invalid Site: {} is outside the lattice [0, {})", site, sites)
            }
            WalkError::DegenerateSpin { message } => write!(f, "Degenerate Spin: {}", message),
            WalkError::ShapeMismatch { expected, found } => write!(
                f,
                "Shape Mismatch: expected {} sites, found {}",
                expected, found
            ),
            WalkError::InvalidLattice { message } => write!(f, "Invalid Lattice: {}", message),
            WalkError::InvalidProbabilities { message } => {
                write!(f, "Invalid Transition Probabilities: {}", message)
            }
            WalkError::NonUnitaryCoin { message } => write!(f, "Non-unitary Coin: {}", message),
            WalkError::Denormalized { message } => write!(f, "Denormalized: {}", message),
            WalkError::Configuration { message } => write!(f, "Configuration Error: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for WalkError {}
