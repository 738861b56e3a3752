// src/core/lattice.rs

use super::error::WalkError;
use std::fmt;

/// A one-dimensional line of sites `0..sites`.
///
/// The boundaries are open: anything shifted past site `0` or site
/// `sites - 1` leaves the lattice for good. Nothing wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lattice {
    sites: usize,
}

impl Lattice {
    /// Creates a lattice with `sites` positions. Zero sites is rejected.
    pub fn new(sites: usize) -> Result<Self, WalkError> {
        if sites == 0 {
            return Err(WalkError::InvalidLattice {
                message: "a lattice needs at least one site".to_string(),
            });
        }
        Ok(Self { sites })
    }

    /// Number of sites `L`.
    pub fn sites(&self) -> usize {
        self.sites
    }

    /// The middle site, `L / 2` rounded down. Used as the default starting point.
    pub fn center(&self) -> usize {
        self.sites / 2
    }

    /// Returns `site` back if it lies on the lattice.
    pub fn check_site(&self, site: usize) -> Result<usize, WalkError> {
        if site < self.sites {
            Ok(site)
        } else {
            Err(WalkError::InvalidSite { site, sites: self.sites })
        }
    }

    /// Fails with `ShapeMismatch` unless `len` equals the number of sites.
    pub fn check_len(&self, len: usize) -> Result<(), WalkError> {
        if len == self.sites {
            Ok(())
        } else {
            Err(WalkError::ShapeMismatch { expected: self.sites, found: len })
        }
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lattice({} sites)", self.sites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sites_is_rejected() {
        assert!(matches!(Lattice::new(0), Err(WalkError::InvalidLattice { .. })));
    }

    #[test]
    fn check_site_rejects_instead_of_clamping() -> Result<(), WalkError> {
        let lattice = Lattice::new(5)?;
        assert_eq!(lattice.check_site(4)?, 4);
        assert_eq!(lattice.check_site(5), Err(WalkError::InvalidSite { site: 5, sites: 5 }));
        Ok(())
    }

    #[test]
    fn center_is_the_floor_of_half() -> Result<(), WalkError> {
        assert_eq!(Lattice::new(500)?.center(), 250);
        assert_eq!(Lattice::new(5)?.center(), 2);
        assert_eq!(Lattice::new(1)?.center(), 0);
        Ok(())
    }
}
