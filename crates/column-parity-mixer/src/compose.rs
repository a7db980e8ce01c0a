// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Composition of column parity mixers.
//!
//! Mixing with `θ = (m, Z₁)` adds the same effect to all `m` rows, which shifts the
//! column parity seen by a following `γ = (m, Z₂)` by `(m mod 2)` copies of that
//! effect. Running `θ` and then `γ` is therefore the mixer
//!
//! ```text
//! Z = Z₁ + Z₂ + c·(Z₁ · Z₂),   c = m mod 2
//! ```
//!
//! For odd `m` this is `(I + Z₁)(I + Z₂) + I`, so composition is associative
//! but not commutative.

use crate::errors::{CpmError, CpmResult, MatrixError};
use crate::math::{add, multiply};
use crate::mixer::Cpm;

impl Cpm {
    /// The mixer that applies `self` first and then `other`.
    ///
    /// # Errors
    ///
    /// `IncompatibleRowCounts` if the row counts differ, a dimension mismatch if
    /// the column counts differ.
    pub fn compose(&self, other: &Cpm) -> CpmResult<Cpm> {
        if self.rows() != other.rows() {
            return Err(CpmError::IncompatibleRowCounts {
                left: self.rows(),
                right: other.rows(),
            });
        }
        if self.columns() != other.columns() {
            return Err(MatrixError::dimension_mismatch(
                self.columns(),
                other.columns(),
                "mixer composition",
            )
            .into());
        }

        let z1 = self.parity_folding_matrix();
        let z2 = other.parity_folding_matrix();
        let mut folding = add(z1, z2)?;
        if self.odd_rows() {
            folding = add(&folding, &multiply(z1, z2)?)?;
        }
        Cpm::new(self.rows(), folding)
    }

    /// `θ^k`: the mixer composed with itself `k` times; `θ^0` is the identity.
    pub fn power(&self, mut k: u64) -> CpmResult<Cpm> {
        let mut result = Cpm::identity(self.rows(), self.columns())?;
        let mut base = self.clone();
        while k > 0 {
            if k & 1 == 1 {
                result = result.compose(&base)?;
            }
            k >>= 1;
            if k > 0 {
                base = base.compose(&base)?;
            }
        }
        Ok(result)
    }
}
