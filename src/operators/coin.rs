// src/operators/coin.rs

use crate::core::constants::walk_constants::UNITARITY_TOLERANCE;
use crate::core::WalkError;
use num_complex::Complex;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

/// A 2x2 unitary mixing the `[↑, ↓]` amplitudes at each site before the shift.
///
/// The amplitudes are treated as a row vector, so applying the coin computes
/// `[↑, ↓] * C`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coin {
    matrix: [[Complex<f64>; 2]; 2],
}

impl Coin {
    /// Hadamard coin `(1/sqrt(2)) [[1, 1], [1, -1]]`, the default.
    pub fn hadamard() -> Self {
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        Self { matrix: [[h, h], [h, -h]] }
    }

    /// Pauli X `[[0, 1], [1, 0]]`.
    pub fn pauli_x() -> Self {
        Self {
            matrix: [
                [Complex::zero(), Complex::one()],
                [Complex::one(), Complex::zero()],
            ],
        }
    }

    /// Pauli Y `[[0, -i], [i, 0]]`.
    pub fn pauli_y() -> Self {
        let i = Complex::i();
        Self {
            matrix: [[Complex::zero(), -i], [i, Complex::zero()]],
        }
    }

    /// Pauli Z `[[1, 0], [0, -1]]`.
    pub fn pauli_z() -> Self {
        Self {
            matrix: [
                [Complex::one(), Complex::zero()],
                [Complex::zero(), -Complex::one()],
            ],
        }
    }

    /// Leaves the spin untouched; the walker then splits into two ballistic fronts.
    pub fn identity() -> Self {
        Self {
            matrix: [
                [Complex::one(), Complex::zero()],
                [Complex::zero(), Complex::one()],
            ],
        }
    }

    /// Accepts an arbitrary matrix after checking `C C^dagger = I`.
    pub fn from_matrix(matrix: [[Complex<f64>; 2]; 2]) -> Result<Self, WalkError> {
        if matrix.iter().flatten().any(|c| !c.re.is_finite() || !c.im.is_finite()) {
            return Err(WalkError::NonUnitaryCoin {
                message: "coin entries must be finite".to_string(),
            });
        }
        let coin = Self { matrix };
        let deviation = coin.unitarity_deviation();
        if deviation > UNITARITY_TOLERANCE {
            return Err(WalkError::NonUnitaryCoin {
                message: format!(
                    "max |C C^dagger - I| entry is {:.3e} (tolerance {:.1e})",
                    deviation, UNITARITY_TOLERANCE
                ),
            });
        }
        Ok(coin)
    }

    /// The underlying matrix, `matrix[row][col]`.
    pub fn matrix(&self) -> &[[Complex<f64>; 2]; 2] {
        &self.matrix
    }

    /// Row vector times matrix: `[↑', ↓'] = [↑, ↓] * C`.
    pub fn apply(&self, spin: [Complex<f64>; 2]) -> [Complex<f64>; 2] {
        let m = &self.matrix;
        [
            spin[0] * m[0][0] + spin[1] * m[1][0],
            spin[0] * m[0][1] + spin[1] * m[1][1],
        ]
    }

    /// Largest entry-wise distance between `C C^dagger` and the identity.
    fn unitarity_deviation(&self) -> f64 {
        let m = &self.matrix;
        let mut worst: f64 = 0.0;
        for row in 0..2 {
            for col in 0..2 {
                let product = m[row][0] * m[col][0].conj() + m[row][1] * m[col][1].conj();
                let expected = if row == col { Complex::one() } else { Complex::zero() };
                worst = worst.max((product - expected).norm());
            }
        }
        worst
    }
}

impl Default for Coin {
    fn default() -> Self {
        Self::hadamard()
    }
}

/// Named coins that can be selected from configuration or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinKind {
    #[default]
    Hadamard,
    X,
    Y,
    Z,
    Identity,
}

impl CoinKind {
    pub fn coin(self) -> Coin {
        match self {
            CoinKind::Hadamard => Coin::hadamard(),
            CoinKind::X => Coin::pauli_x(),
            CoinKind::Y => Coin::pauli_y(),
            CoinKind::Z => Coin::pauli_z(),
            CoinKind::Identity => Coin::identity(),
        }
    }
}

impl From<CoinKind> for Coin {
    fn from(kind: CoinKind) -> Self {
        kind.coin()
    }
}

impl fmt::Display for CoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoinKind::Hadamard => "hadamard",
            CoinKind::X => "x",
            CoinKind::Y => "y",
            CoinKind::Z => "z",
            CoinKind::Identity => "identity",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for CoinKind {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hadamard" | "h" => Ok(CoinKind::Hadamard),
            "x" | "pauli-x" => Ok(CoinKind::X),
            "y" | "pauli-y" => Ok(CoinKind::Y),
            "z" | "pauli-z" => Ok(CoinKind::Z),
            "identity" | "i" => Ok(CoinKind::Identity),
            other => Err(WalkError::Configuration {
                message: format!(
                    "unknown coin '{}', expected one of hadamard, x, y, z, identity",
                    other
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOLERANCE: f64 = 1e-12;

    fn approx(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a - b).norm() < TEST_TOLERANCE
    }

    #[test]
    fn named_coins_are_unitary() {
        for kind in [CoinKind::Hadamard, CoinKind::X, CoinKind::Y, CoinKind::Z, CoinKind::Identity] {
            let coin = kind.coin();
            assert!(
                Coin::from_matrix(*coin.matrix()).is_ok(),
                "{} coin should pass the unitarity check",
                kind
            );
        }
    }

    #[test]
    fn hadamard_uses_row_vector_convention() {
        let out = Coin::hadamard().apply([Complex::one(), Complex::zero()]);
        assert!(approx(out[0], Complex::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx(out[1], Complex::new(FRAC_1_SQRT_2, 0.0)));

        let out = Coin::hadamard().apply([Complex::zero(), Complex::one()]);
        assert!(approx(out[0], Complex::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx(out[1], Complex::new(-FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn pauli_y_row_vector_product() {
        // [1, 0] * [[0, -i], [i, 0]] = [0, -i]
        let out = Coin::pauli_y().apply([Complex::one(), Complex::zero()]);
        assert!(approx(out[0], Complex::zero()));
        assert!(approx(out[1], -Complex::i()));
    }

    #[test]
    fn non_unitary_matrix_is_rejected() {
        let matrix = [
            [Complex::one(), Complex::one()],
            [Complex::zero(), Complex::one()],
        ];
        assert!(matches!(Coin::from_matrix(matrix), Err(WalkError::NonUnitaryCoin { .. })));
    }

    #[test]
    fn coin_kind_parses_aliases() {
        assert_eq!("Hadamard".parse::<CoinKind>(), Ok(CoinKind::Hadamard));
        assert_eq!("pauli-x".parse::<CoinKind>(), Ok(CoinKind::X));
        assert!("grover".parse::<CoinKind>().is_err());
    }
}
