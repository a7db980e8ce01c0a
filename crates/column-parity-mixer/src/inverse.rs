// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Inversion of column parity mixers.
//!
//! The inverse `(m, Z')` solves `Z + Z' + c·Z·Z' = 0`. For even `m` that gives
//! `Z' = Z`; for odd `m` it gives `Z' = Z·(I + Z)^{-1}`, which exists exactly when
//! the associated matrix `I + Z` is invertible.

use crate::errors::{CpmError, CpmResult, MatrixError};
use crate::math::multiply;
use crate::matrix;
use crate::mixer::Cpm;
use tracing::debug;

impl Cpm {
    /// True iff `I + c·Z` is invertible over GF(2), `c = m mod 2`.
    ///
    /// Every mixer with an even row count is invertible.
    pub fn is_invertible(&self) -> CpmResult<bool> {
        if !self.odd_rows() {
            return Ok(true);
        }
        Ok(matrix::is_invertible(&self.associated_matrix())?)
    }

    /// The mixer undoing `self`.
    ///
    /// # Errors
    ///
    /// `NotInvertible` if `I + Z` is singular (odd row count only).
    pub fn inverse(&self) -> CpmResult<Cpm> {
        if !self.odd_rows() {
            return Ok(self.clone());
        }

        let inverted = match matrix::invert(&self.associated_matrix()) {
            Ok(inverted) => inverted,
            Err(MatrixError::Singular { .. }) => {
                debug!("associated matrix of {} is singular", self);
                return Err(CpmError::NotInvertible {
                    rows: self.rows(),
                    cols: self.columns(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let folding = multiply(self.parity_folding_matrix(), &inverted)?;
        Cpm::new(self.rows(), folding)
    }
}
