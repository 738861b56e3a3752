// src/core/state.rs

use super::error::WalkError;
use super::lattice::Lattice;
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// The two coin (spin) branches carried at every site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    /// Drifts towards higher site indices after each coin flip.
    Up,
    /// Drifts towards lower site indices after each coin flip.
    Down,
}

impl Spin {
    /// Column of the amplitude table holding this branch.
    pub fn index(self) -> usize {
        match self {
            Spin::Up => 0,
            Spin::Down => 1,
        }
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spin::Up => write!(f, "↑"),
            Spin::Down => write!(f, "↓"),
        }
    }
}

/// Unnormalized spin: real and imaginary parts of both branches.
///
/// `SpinAmplitudes::new(1.0, 0.0, 0.0, 1.0)` describes `(|↑> + i|↓>) / sqrt(2)`
/// once normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinAmplitudes {
    pub up_re: f64,
    pub up_im: f64,
    pub down_re: f64,
    pub down_im: f64,
}

impl SpinAmplitudes {
    pub fn new(up_re: f64, up_im: f64, down_re: f64, down_im: f64) -> Self {
        Self { up_re, up_im, down_re, down_im }
    }

    /// Pure `|↑>`.
    pub fn up() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Pure `|↓>`.
    pub fn down() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }

    /// Builds from `[[Re ↑, Im ↑], [Re ↓, Im ↓]]`.
    pub fn from_matrix(spin: [[f64; 2]; 2]) -> Self {
        Self::new(spin[0][0], spin[0][1], spin[1][0], spin[1][1])
    }

    /// Euclidean norm of the four reals.
    ///
    /// Scaled by the largest component so large or tiny finite inputs do not
    /// overflow or flush to zero on the way.
    pub fn norm(&self) -> f64 {
        let scale = self.largest_component();
        if scale == 0.0 || !scale.is_finite() {
            return scale;
        }
        scale * self.scaled_norm(scale)
    }

    /// Returns `[↑, ↓]` divided by [`norm`](Self::norm).
    ///
    /// # Errors
    /// `WalkError::DegenerateSpin` when every component is zero or any component
    /// is not finite, since the division would produce NaN.
    pub fn normalized(&self) -> Result<[Complex<f64>; 2], WalkError> {
        let parts = [self.up_re, self.up_im, self.down_re, self.down_im];
        if parts.iter().any(|p| !p.is_finite()) {
            return Err(WalkError::DegenerateSpin {
                message: format!("spin components must be finite, got {:?}", parts),
            });
        }
        if parts.iter().all(|p| *p == 0.0) {
            return Err(WalkError::DegenerateSpin {
                message: "all four spin components are zero".to_string(),
            });
        }
        // Divide by the largest component first, then by the norm of what is left.
        let scale = self.largest_component();
        let norm = self.scaled_norm(scale);
        Ok([
            Complex::new(self.up_re / scale, self.up_im / scale) / norm,
            Complex::new(self.down_re / scale, self.down_im / scale) / norm,
        ])
    }

    fn largest_component(&self) -> f64 {
        [self.up_re, self.up_im, self.down_re, self.down_im]
            .iter()
            .fold(0.0_f64, |max, p| max.max(p.abs()))
    }

    fn scaled_norm(&self, scale: f64) -> f64 {
        [self.up_re, self.up_im, self.down_re, self.down_im]
            .iter()
            .map(|p| (p / scale).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

impl Default for SpinAmplitudes {
    fn default() -> Self {
        Self::up()
    }
}

/// The walker's wave function: `L` rows of `[↑, ↓]` complex amplitudes.
///
/// A freshly initialized state has total squared magnitude 1. Each walk step
/// preserves it except for amplitude pushed off either end of the lattice,
/// which is lost (open boundary).
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumState {
    rows: Vec<[Complex<f64>; 2]>,
}

impl QuantumState {
    /// The walker sits at `site` with the normalized `spin`; every other site is empty.
    pub fn localized(
        lattice: &Lattice,
        site: usize,
        spin: SpinAmplitudes,
    ) -> Result<Self, WalkError> {
        let site = lattice.check_site(site)?;
        let amplitudes = spin.normalized()?;
        let mut rows = vec![[Complex::zero(); 2]; lattice.sites()];
        rows[site] = amplitudes;
        Ok(Self { rows })
    }

    /// Wraps an explicit amplitude table. The table is taken as is, without normalization.
    pub fn from_rows(rows: Vec<[Complex<f64>; 2]>) -> Result<Self, WalkError> {
        if rows.is_empty() {
            return Err(WalkError::InvalidLattice {
                message: "a quantum state needs at least one site".to_string(),
            });
        }
        Ok(Self { rows })
    }

    /// Read-only access to the amplitude table.
    pub fn rows(&self) -> &[[Complex<f64>; 2]] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [[Complex<f64>; 2]] {
        &mut self.rows
    }

    /// Number of sites `L`.
    pub fn sites(&self) -> usize {
        self.rows.len()
    }

    /// Amplitude of `spin` at `site`, or `None` off the lattice.
    pub fn amplitude(&self, site: usize, spin: Spin) -> Option<Complex<f64>> {
        self.rows.get(site).map(|row| row[spin.index()])
    }

    /// Copies one branch out as a length-`L` vector.
    pub fn column(&self, spin: Spin) -> Vec<Complex<f64>> {
        self.rows.iter().map(|row| row[spin.index()]).collect()
    }

    pub(crate) fn set_column(&mut self, spin: Spin, values: &[Complex<f64>]) {
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[spin.index()] = *value;
        }
    }

    /// Sum of `|amplitude|^2` over every entry.
    pub fn norm_sqr(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| row[0].norm_sqr() + row[1].norm_sqr())
            .sum()
    }

    /// Per-site `|↑|^2 + |↓|^2`: the probability of finding the walker there.
    pub fn density(&self) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row[0].norm_sqr() + row[1].norm_sqr())
            .collect()
    }

    /// Per-site `sqrt(|↑|^2 + |↓|^2)`.
    ///
    /// This is an intensity curve, not a probability: square it (or use
    /// [`density`](Self::density)) before treating it as probability mass.
    pub fn envelope(&self) -> Vec<f64> {
        self.density().into_iter().map(f64::sqrt).collect()
    }
}

impl fmt::Display for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuantumState[")?;
        let mut first = true;
        for (site, row) in self.rows.iter().enumerate() {
            // Empty sites are skipped, a 500-site line is mostly zeros.
            if row[0].is_zero() && row[1].is_zero() {
                continue;
            }
            write!(
                f,
                "{}{}: ({:.4}, {:.4})",
                if first { "" } else { ", " },
                site,
                row[0],
                row[1]
            )?;
            first = false;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-12;

    #[test]
    fn localized_state_is_normalized() -> Result<(), WalkError> {
        let lattice = Lattice::new(10)?;
        let state = QuantumState::localized(&lattice, 3, SpinAmplitudes::new(1.0, 0.0, 0.0, 1.0))?;

        assert_eq!(state.sites(), 10);
        assert!((state.norm_sqr() - 1.0).abs() < TEST_TOLERANCE);
        let up = state.amplitude(3, Spin::Up).unwrap();
        let down = state.amplitude(3, Spin::Down).unwrap();
        assert!((up - Complex::new(FRAC_1_SQRT_2, 0.0)).norm() < TEST_TOLERANCE);
        assert!((down - Complex::new(0.0, FRAC_1_SQRT_2)).norm() < TEST_TOLERANCE);
        assert_eq!(state.amplitude(2, Spin::Up), Some(Complex::zero()));
        Ok(())
    }

    #[test]
    fn all_zero_spin_fails_explicitly() -> Result<(), WalkError> {
        let lattice = Lattice::new(4)?;
        let result = QuantumState::localized(&lattice, 1, SpinAmplitudes::new(0.0, 0.0, 0.0, 0.0));
        assert!(matches!(result, Err(WalkError::DegenerateSpin { .. })));
        Ok(())
    }

    #[test]
    fn non_finite_spin_fails_explicitly() {
        let spin = SpinAmplitudes::new(f64::NAN, 0.0, 1.0, 0.0);
        assert!(matches!(spin.normalized(), Err(WalkError::DegenerateSpin { .. })));
    }

    #[test]
    fn extreme_spin_magnitudes_normalize() -> Result<(), WalkError> {
        let lattice = Lattice::new(5)?;
        for scale in [1e200, 1e-200, f64::MAX, 5e-324] {
            let spin = SpinAmplitudes::new(scale, 0.0, 0.0, scale);
            let state = QuantumState::localized(&lattice, 2, spin)?;
            assert!((state.norm_sqr() - 1.0).abs() < TEST_TOLERANCE, "scale {}", scale);
            let up = state.amplitude(2, Spin::Up).unwrap();
            assert!((up - Complex::new(FRAC_1_SQRT_2, 0.0)).norm() < TEST_TOLERANCE);
        }
        assert!((SpinAmplitudes::new(3e-200, 0.0, 4e-200, 0.0).norm() - 5e-200).abs() < 1e-212);
        assert!((SpinAmplitudes::new(3e200, 0.0, 4e200, 0.0).norm() - 5e200).abs() < 1e188);
        Ok(())
    }

    #[test]
    fn out_of_range_site_is_rejected() -> Result<(), WalkError> {
        let lattice = Lattice::new(4)?;
        let result = QuantumState::localized(&lattice, 4, SpinAmplitudes::up());
        assert_eq!(result, Err(WalkError::InvalidSite { site: 4, sites: 4 }));
        Ok(())
    }

    #[test]
    fn envelope_is_square_root_of_density() -> Result<(), WalkError> {
        let rows = vec![
            [Complex::new(0.6, 0.0), Complex::zero()],
            [Complex::zero(), Complex::new(0.0, 0.8)],
        ];
        let state = QuantumState::from_rows(rows)?;
        let density = state.density();
        let envelope = state.envelope();
        assert!((density[0] - 0.36).abs() < TEST_TOLERANCE);
        assert!((envelope[0] - 0.6).abs() < TEST_TOLERANCE);
        assert!((envelope[1] - 0.8).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn display_skips_empty_sites() -> Result<(), WalkError> {
        let lattice = Lattice::new(3)?;
        let state = QuantumState::localized(&lattice, 1, SpinAmplitudes::up())?;
        let text = state.to_string();
        assert!(text.starts_with("QuantumState[1: "));
        assert!(!text.contains("0: "));
        Ok(())
    }
}
