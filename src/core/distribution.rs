// src/core/distribution.rs

use super::error::WalkError;
use super::lattice::Lattice;
use std::fmt;

/// Probability mass function of the classical walker over the lattice sites.
///
/// Mass is conserved while the walker stays in the interior. A step taken
/// from an edge site towards the outside removes that share of the mass.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassicalDistribution {
    mass: Vec<f64>,
}

impl ClassicalDistribution {
    /// All mass at `site`.
    pub fn point_mass(lattice: &Lattice, site: usize) -> Result<Self, WalkError> {
        let site = lattice.check_site(site)?;
        let mut mass = vec![0.0; lattice.sites()];
        mass[site] = 1.0;
        Ok(Self { mass })
    }

    /// Wraps an explicit vector. Entries must be finite and non-negative.
    pub fn from_vec(mass: Vec<f64>) -> Result<Self, WalkError> {
        if mass.is_empty() {
            return Err(WalkError::InvalidLattice {
                message: "a distribution needs at least one site".to_string(),
            });
        }
        if let Some((site, value)) = mass
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(WalkError::Denormalized {
                message: format!("probability at site {} is {}", site, value),
            });
        }
        Ok(Self { mass })
    }

    /// Read-only access to the per-site probabilities.
    pub fn probabilities(&self) -> &[f64] {
        &self.mass
    }

    pub(crate) fn probabilities_mut(&mut self) -> &mut [f64] {
        &mut self.mass
    }

    /// Number of sites `L`.
    pub fn sites(&self) -> usize {
        self.mass.len()
    }

    /// Probability at `site`, or `None` off the lattice.
    pub fn probability(&self, site: usize) -> Option<f64> {
        self.mass.get(site).copied()
    }

    /// Sum over all sites.
    pub fn total_mass(&self) -> f64 {
        self.mass.iter().sum()
    }
}

impl fmt::Display for ClassicalDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distribution[")?;
        let mut first = true;
        for (site, p) in self.mass.iter().enumerate().filter(|(_, p)| **p != 0.0) {
            write!(f, "{}{}: {:.4}", if first { "" } else { ", " }, site, p)?;
            first = false;
        }
        write!(f, "]")
    }
}
