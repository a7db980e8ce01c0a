// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Gaussian elimination over GF(2): rank, invertibility and inversion.
//!
//! Every routine works on its own copy of the input, so concurrent callers never
//! share elimination scratch space.

use crate::errors::{MatrixError, MatrixResult};
use crate::math::identity;
use crate::matrix_type::BitMatrix;
use tracing::trace;

fn ensure_square(x: &BitMatrix) -> MatrixResult<usize> {
    if !x.is_square() {
        return Err(MatrixError::NotSquare {
            rows: x.rows(),
            cols: x.cols(),
        });
    }
    Ok(x.rows())
}

/// First row at or below `start` with a one in column `col`.
fn find_pivot(work: &BitMatrix, start: usize, col: usize) -> Option<usize> {
    (start..work.rows()).find(|&row| work.get(row, col))
}

/// Rank of a matrix over GF(2).
pub fn rank(x: &BitMatrix) -> usize {
    let mut work = x.clone();
    let mut pivot_row = 0;

    for col in 0..work.cols() {
        if pivot_row >= work.rows() {
            break;
        }
        let Some(found) = find_pivot(&work, pivot_row, col) else {
            continue;
        };
        work.swap_rows(pivot_row, found);

        // Eliminate entries below the pivot
        for row in pivot_row + 1..work.rows() {
            if work.get(row, col) {
                work.add_row(row, pivot_row);
            }
        }
        pivot_row += 1;
    }

    pivot_row
}

/// Returns true iff the square matrix `x` has full rank over GF(2).
pub fn is_invertible(x: &BitMatrix) -> MatrixResult<bool> {
    let n = ensure_square(x)?;
    Ok(rank(x) == n)
}

/// Inverts a square matrix by Gauss-Jordan elimination on `[x | I]`.
///
/// The row operations that reduce the left half to `I` are replayed on the right
/// half, which then holds `x^{-1}`.
pub fn invert(x: &BitMatrix) -> MatrixResult<BitMatrix> {
    let n = ensure_square(x)?;
    let mut left = x.clone();
    let mut right = identity(n);

    for col in 0..n {
        let Some(found) = find_pivot(&left, col, col) else {
            trace!("no pivot in column {col} of {n}x{n} matrix");
            return Err(MatrixError::Singular { size: n });
        };
        if found != col {
            left.swap_rows(col, found);
            right.swap_rows(col, found);
        }

        for row in 0..n {
            if row != col && left.get(row, col) {
                left.add_row(row, col);
                right.add_row(row, col);
            }
        }
    }

    Ok(right)
}
