// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for GF(2) matrix arithmetic and column parity mixers
//!
//! Matrix-level failures live in [`MatrixError`]; everything the mixer engine
//! reports is a [`CpmError`], which wraps matrix failures transparently.

use thiserror::Error;

/// Errors raised by the GF(2) matrix/vector kernel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Operands of an arithmetic operation have incompatible shapes
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// A square matrix was required
    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Gauss-Jordan elimination found a column without a pivot
    #[error("Matrix of size {size}x{size} is singular over GF(2)")]
    Singular { size: usize },

    /// Literal rows of unequal length
    #[error("Row {row} has {actual} entries, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Literal entry outside {0, 1}
    #[error("Entry ({row}, {col}) is {value}, expected 0 or 1")]
    NonBinary { row: usize, col: usize, value: i64 },
}

/// Errors raised by column parity mixer operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CpmError {
    /// The parity-folding matrix is not square
    #[error("Parity folding matrix must be square, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// A mixer needs at least one row
    #[error("Row count must be >= 1, got {0}")]
    InvalidRowCount(usize),

    /// State matrix does not fit the mixer
    #[error(
        "State shape mismatch: expected {expected_rows}x{expected_cols}, got {rows}x{cols}"
    )]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// Composition requires equal row counts
    #[error("Cannot compose mixers with {left} and {right} rows")]
    IncompatibleRowCounts { left: usize, right: usize },

    /// The associated matrix I + Z is singular for odd row counts
    #[error("Column parity mixer with {rows} rows and {cols} columns is not invertible")]
    NotInvertible { rows: usize, cols: usize },

    /// Order search gave up
    #[error("No finite order found within {limit} compositions")]
    NoFiniteOrder { limit: u64 },

    /// Underlying matrix failure
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// Invalid settings
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for matrix kernel operations
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Result type alias for mixer operations
pub type CpmResult<T> = Result<T, CpmError>;

impl MatrixError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize, context: impl Into<String>) -> Self {
        MatrixError::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}

impl CpmError {
    /// Create a configuration error with a message
    pub fn config(message: impl Into<String>) -> Self {
        CpmError::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_error_is_transparent() {
        let err: CpmError = MatrixError::Singular { size: 3 }.into();
        assert_eq!(err.to_string(), "Matrix of size 3x3 is singular over GF(2)");
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = MatrixError::dimension_mismatch(4, 3, "multiply");
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in multiply: expected 4, got 3"
        );
    }
}
