// src/operators/shift.rs

use crate::core::{Lattice, WalkError};
use num_traits::{One, Zero};
use std::fmt;

/// Which way a shift moves its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Site `k` moves to `k + 1`; whatever sat at `L - 1` is dropped.
    Forward,
    /// Site `k` moves to `k - 1`; whatever sat at `0` is dropped.
    Backward,
}

/// Translation of a length-`L` vector by one site with open boundaries.
///
/// As a matrix (row-vector convention `v' = v * S`), the forward operator has
/// ones at `S[k][k + 1]` and the backward operator at `S[k + 1][k]`, so one
/// boundary row is entirely zero. The operator never materializes that matrix
/// to apply itself; [`matrix`](Self::matrix) builds it on request.
///
/// The scalar type is generic: the quantum walk shifts complex amplitudes, the
/// classical walk shifts real probabilities, with the same operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftOperator {
    direction: Direction,
    sites: usize,
}

impl ShiftOperator {
    pub fn new(lattice: &Lattice, direction: Direction) -> Self {
        Self { direction, sites: lattice.sites() }
    }

    pub fn forward(lattice: &Lattice) -> Self {
        Self::new(lattice, Direction::Forward)
    }

    pub fn backward(lattice: &Lattice) -> Self {
        Self::new(lattice, Direction::Backward)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn sites(&self) -> usize {
        self.sites
    }

    /// Shifts `values` in place by one site.
    pub fn apply_in_place<T: Copy + Zero>(&self, values: &mut [T]) -> Result<(), WalkError> {
        if values.len() != self.sites {
            return Err(WalkError::ShapeMismatch { expected: self.sites, found: values.len() });
        }
        let n = values.len();
        match self.direction {
            Direction::Forward => {
                for k in (1..n).rev() {
                    values[k] = values[k - 1];
                }
                values[0] = T::zero();
            }
            Direction::Backward => {
                for k in 0..n - 1 {
                    values[k] = values[k + 1];
                }
                values[n - 1] = T::zero();
            }
        }
        Ok(())
    }

    /// Returns `values * S` as a new vector.
    pub fn apply<T: Copy + Zero>(&self, values: &[T]) -> Result<Vec<T>, WalkError> {
        let mut shifted = values.to_vec();
        self.apply_in_place(&mut shifted)?;
        Ok(shifted)
    }

    /// Dense `L x L` form, `matrix[row][col]`.
    pub fn matrix<T: Clone + Zero + One>(&self) -> Vec<Vec<T>> {
        let mut matrix = vec![vec![T::zero(); self.sites]; self.sites];
        for k in 0..self.sites.saturating_sub(1) {
            match self.direction {
                Direction::Forward => matrix[k][k + 1] = T::one(),
                Direction::Backward => matrix[k + 1][k] = T::one(),
            }
        }
        matrix
    }
}

impl fmt::Display for ShiftOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction {
            Direction::Forward => "S+",
            Direction::Backward => "S-",
        };
        write!(f, "{}({} sites)", arrow, self.sites)
    }
}

/// Row vector times dense matrix. Only used to cross-check the structured operators.
#[cfg(test)]
pub(crate) fn row_times_matrix<T>(row: &[T], matrix: &[Vec<T>]) -> Vec<T>
where
    T: Copy + Zero + std::ops::Mul<Output = T>,
{
    let cols = matrix.first().map_or(0, Vec::len);
    (0..cols)
        .map(|col| {
            row.iter()
                .zip(matrix)
                .fold(T::zero(), |acc, (v, m_row)| acc + *v * m_row[col])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn forward_moves_right_and_drops_last() -> Result<(), WalkError> {
        let lattice = Lattice::new(4)?;
        let shifted = ShiftOperator::forward(&lattice).apply(&[1.0, 2.0, 3.0, 4.0])?;
        assert_eq!(shifted, vec![0.0, 1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn backward_moves_left_and_drops_first() -> Result<(), WalkError> {
        let lattice = Lattice::new(4)?;
        let shifted = ShiftOperator::backward(&lattice).apply(&[1.0, 2.0, 3.0, 4.0])?;
        assert_eq!(shifted, vec![2.0, 3.0, 4.0, 0.0]);
        Ok(())
    }

    #[test]
    fn single_site_lattice_empties() -> Result<(), WalkError> {
        let lattice = Lattice::new(1)?;
        assert_eq!(ShiftOperator::forward(&lattice).apply(&[1.0])?, vec![0.0]);
        assert_eq!(ShiftOperator::backward(&lattice).apply(&[1.0])?, vec![0.0]);
        Ok(())
    }

    #[test]
    fn wrong_length_is_a_shape_mismatch() -> Result<(), WalkError> {
        let lattice = Lattice::new(4)?;
        let result = ShiftOperator::forward(&lattice).apply(&[1.0, 2.0]);
        assert_eq!(result, Err(WalkError::ShapeMismatch { expected: 4, found: 2 }));
        Ok(())
    }

    #[test]
    fn structured_shift_matches_dense_matrix() -> Result<(), WalkError> {
        let lattice = Lattice::new(6)?;
        let column: Vec<Complex<f64>> = (0..6)
            .map(|k| Complex::new(k as f64 + 1.0, -(k as f64)))
            .collect();
        for shift in [ShiftOperator::forward(&lattice), ShiftOperator::backward(&lattice)] {
            let dense = shift.matrix::<Complex<f64>>();
            assert_eq!(shift.apply(&column)?, row_times_matrix(&column, &dense), "{}", shift);
        }
        Ok(())
    }

    #[test]
    fn dense_boundary_rows_are_zero() -> Result<(), WalkError> {
        let lattice = Lattice::new(5)?;
        let forward = ShiftOperator::forward(&lattice).matrix::<f64>();
        let backward = ShiftOperator::backward(&lattice).matrix::<f64>();
        assert!(forward[4].iter().all(|x| *x == 0.0));
        assert!(backward[0].iter().all(|x| *x == 0.0));
        assert_eq!(forward[1][2], 1.0);
        assert_eq!(backward[2][1], 1.0);
        Ok(())
    }
}
