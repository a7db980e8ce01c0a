// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! The column parity mixer and its action on a state.
//!
//! A mixer `θ = (m, Z)` acts on an `m × n` state `A` by computing the column
//! parity `p(A)`, folding it into the effect `e = p(A) · Z` and adding `e` to
//! every row of `A`.

use crate::errors::{CpmError, CpmResult};
use crate::math::{add, vector_matrix_product};
use crate::matrix_type::{BitMatrix, BitVector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column parity of a state: `p[j] = XOR_i A[i][j]`.
pub fn column_parity(state: &BitMatrix) -> BitVector {
    let mut parity = BitVector::zeros(state.cols());
    for row in state.data() {
        // rows of a BitMatrix all have `cols` bits
        for j in row.ones() {
            parity.set(j, !parity.get(j));
        }
    }
    parity
}

/// The state-shaped matrix whose every row is the column parity of `state`.
pub fn expanded_column_parity(state: &BitMatrix) -> BitMatrix {
    repeat_row(&column_parity(state), state.rows())
}

/// Columns with odd parity, ascending.
pub fn odd_columns(state: &BitMatrix) -> Vec<usize> {
    column_parity(state).ones()
}

/// Columns with even parity, ascending.
pub fn even_columns(state: &BitMatrix) -> Vec<usize> {
    column_parity(state).zero_positions()
}

fn repeat_row(row: &BitVector, rows: usize) -> BitMatrix {
    let mut out = BitMatrix::zeros(rows, row.len());
    for i in 0..rows {
        for j in row.ones() {
            out.set(i, j, true);
        }
    }
    out
}

/// A column parity mixer with `m` rows and an `n × n` parity-folding matrix.
///
/// Values are immutable; composition, inversion and powers return new mixers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CpmRepr", into = "CpmRepr")]
pub struct Cpm {
    rows: usize,
    folding: BitMatrix,
}

#[derive(Clone, Serialize, Deserialize)]
struct CpmRepr {
    rows: usize,
    folding_matrix: BitMatrix,
}

impl TryFrom<CpmRepr> for Cpm {
    type Error = CpmError;

    fn try_from(repr: CpmRepr) -> Result<Self, Self::Error> {
        Cpm::new(repr.rows, repr.folding_matrix)
    }
}

impl From<Cpm> for CpmRepr {
    fn from(cpm: Cpm) -> Self {
        CpmRepr {
            rows: cpm.rows,
            folding_matrix: cpm.folding,
        }
    }
}

impl Cpm {
    /// Creates a mixer from a row count and a parity-folding matrix.
    ///
    /// # Errors
    ///
    /// `InvalidRowCount` if `rows < 1`, `InvalidDimensions` if `folding` is not square.
    ///
    /// # Example
    ///
    /// ```
    /// use column_parity_mixer::{BitMatrix, Cpm};
    ///
    /// let z = BitMatrix::new(&[[1, 1, 0], [0, 1, 1], [1, 0, 1]]).unwrap();
    /// let theta = Cpm::new(4, z).unwrap();
    /// assert_eq!(theta.to_string(), "Column Parity Mixer with 4 rows and 3 columns");
    /// ```
    pub fn new(rows: usize, folding: BitMatrix) -> CpmResult<Self> {
        if rows < 1 {
            return Err(CpmError::InvalidRowCount(rows));
        }
        if !folding.is_square() {
            return Err(CpmError::InvalidDimensions {
                rows: folding.rows(),
                cols: folding.cols(),
            });
        }
        Ok(Self { rows, folding })
    }

    /// The identity mixer `(m, 0)`.
    pub fn identity(rows: usize, cols: usize) -> CpmResult<Self> {
        Self::new(rows, BitMatrix::zeros(cols, cols))
    }

    /// Row count `m`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count `n`.
    pub fn columns(&self) -> usize {
        self.folding.cols()
    }

    /// The parity-folding matrix `Z`.
    pub fn parity_folding_matrix(&self) -> &BitMatrix {
        &self.folding
    }

    /// `m mod 2`: whether the correction term survives composition.
    pub(crate) fn odd_rows(&self) -> bool {
        self.rows % 2 == 1
    }

    /// `Z + I`. For odd `m` this is the linear map the mixer induces on column parities.
    pub fn associated_matrix(&self) -> BitMatrix {
        let mut out = self.folding.clone();
        for i in 0..self.columns() {
            out.set(i, i, !out.get(i, i));
        }
        out
    }

    fn check_state(&self, state: &BitMatrix) -> CpmResult<()> {
        if state.rows() != self.rows || state.cols() != self.columns() {
            return Err(CpmError::ShapeMismatch {
                expected_rows: self.rows,
                expected_cols: self.columns(),
                rows: state.rows(),
                cols: state.cols(),
            });
        }
        Ok(())
    }

    /// Column parity of a state of this mixer's shape.
    pub fn parity(&self, state: &BitMatrix) -> CpmResult<BitVector> {
        self.check_state(state)?;
        Ok(column_parity(state))
    }

    /// Effect vector `e = p(A) · Z`.
    pub fn effect(&self, state: &BitMatrix) -> CpmResult<BitVector> {
        let parity = self.parity(state)?;
        Ok(vector_matrix_product(&parity, &self.folding)?)
    }

    /// The `m × n` matrix whose every row is the effect vector.
    pub fn expanded_effect(&self, state: &BitMatrix) -> CpmResult<BitMatrix> {
        Ok(repeat_row(&self.effect(state)?, self.rows))
    }

    /// Columns the mixer flips, ascending.
    pub fn affected_columns(&self, state: &BitMatrix) -> CpmResult<Vec<usize>> {
        Ok(self.effect(state)?.ones())
    }

    /// Columns the mixer leaves untouched, ascending.
    pub fn unaffected_columns(&self, state: &BitMatrix) -> CpmResult<Vec<usize>> {
        Ok(self.effect(state)?.zero_positions())
    }

    /// Applies the mixer: every row of `state` is XORed with the effect vector.
    pub fn apply(&self, state: &BitMatrix) -> CpmResult<BitMatrix> {
        Ok(add(state, &self.expanded_effect(state)?)?)
    }

    /// True iff `m` and `Z` are equal.
    pub fn equals(&self, other: &Cpm) -> bool {
        self == other
    }

    /// True iff `Z` is the zero matrix.
    pub fn is_identity(&self) -> bool {
        self.folding.is_zero()
    }

    /// True iff composing the mixer with itself gives the identity.
    pub fn is_involution(&self) -> CpmResult<bool> {
        if !self.odd_rows() {
            return Ok(true);
        }
        Ok(self.compose(self)?.is_identity())
    }
}

impl fmt::Display for Cpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Column Parity Mixer with {} rows and {} columns",
            self.rows,
            self.columns()
        )
    }
}
