// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::{MatrixError, MatrixResult};
use crate::matrix_type::{BitMatrix, BitVector};

/// The `n × n` identity matrix.
pub fn identity(n: usize) -> BitMatrix {
    let mut out = BitMatrix::zeros(n, n);
    for i in 0..n {
        out.set(i, i, true);
    }
    out
}

/// Element-wise XOR of two matrices of equal shape.
pub fn add(x: &BitMatrix, y: &BitMatrix) -> MatrixResult<BitMatrix> {
    if x.rows() != y.rows() {
        return Err(MatrixError::dimension_mismatch(
            x.rows(),
            y.rows(),
            "matrix addition (rows)",
        ));
    }
    if x.cols() != y.cols() {
        return Err(MatrixError::dimension_mismatch(
            x.cols(),
            y.cols(),
            "matrix addition (columns)",
        ));
    }

    let mut out = x.clone();
    for i in 0..y.rows() {
        out.row_mut(i).xor_assign(y.row(i))?;
    }
    Ok(out)
}

/// Matrix product over GF(2).
///
/// Row `i` of the product is the XOR of the rows of `y` selected by the set bits
/// of row `i` of `x`, which is the usual dot-product definition with AND for
/// multiplication and XOR for addition.
pub fn multiply(x: &BitMatrix, y: &BitMatrix) -> MatrixResult<BitMatrix> {
    if x.cols() != y.rows() {
        return Err(MatrixError::dimension_mismatch(
            x.cols(),
            y.rows(),
            "matrix multiplication",
        ));
    }

    let mut out = BitMatrix::zeros(x.rows(), y.cols());
    for i in 0..x.rows() {
        for k in x.row(i).ones() {
            out.row_mut(i).xor_assign(y.row(k))?;
        }
    }
    Ok(out)
}

/// Row vector times matrix: `(v·x)[j] = XOR_i v[i]·x[i][j]`.
pub fn vector_matrix_product(v: &BitVector, x: &BitMatrix) -> MatrixResult<BitVector> {
    if v.len() != x.rows() {
        return Err(MatrixError::dimension_mismatch(
            x.rows(),
            v.len(),
            "vector-matrix product",
        ));
    }

    let mut out = BitVector::zeros(x.cols());
    for i in v.ones() {
        out.xor_assign(x.row(i))?;
    }
    Ok(out)
}

/// Matrix times column vector: `(x·v)[i] = <x[i], v>`.
pub fn matrix_vector_product(x: &BitMatrix, v: &BitVector) -> MatrixResult<BitVector> {
    if v.len() != x.cols() {
        return Err(MatrixError::dimension_mismatch(
            x.cols(),
            v.len(),
            "matrix-vector product",
        ));
    }

    let mut out = BitVector::zeros(x.rows());
    for i in 0..x.rows() {
        out.set(i, x.row(i).dot(v)?);
    }
    Ok(out)
}

/// `x^k` for square `x` by square-and-multiply; `x^0 = I`.
pub fn pow(x: &BitMatrix, mut k: u64) -> MatrixResult<BitMatrix> {
    if !x.is_square() {
        return Err(MatrixError::NotSquare {
            rows: x.rows(),
            cols: x.cols(),
        });
    }

    let mut result = identity(x.rows());
    let mut base = x.clone();
    while k > 0 {
        if k & 1 == 1 {
            result = multiply(&result, &base)?;
        }
        k >>= 1;
        if k > 0 {
            base = multiply(&base, &base)?;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[u8]]) -> BitMatrix {
        BitMatrix::new(rows).unwrap()
    }

    #[test]
    fn test_identity() {
        let i3 = identity(3);
        assert_eq!(i3, m(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]]));
        assert_eq!(identity(0).rows(), 0);
    }

    #[test]
    fn test_add_is_xor() {
        let a = m(&[&[1, 1], &[0, 1]]);
        let b = m(&[&[1, 0], &[1, 1]]);
        assert_eq!(add(&a, &b).unwrap(), m(&[&[0, 1], &[1, 0]]));
        assert!(add(&a, &a).unwrap().is_zero());
    }

    #[test]
    fn test_add_dimension_mismatch() {
        let a = m(&[&[1, 1], &[0, 1]]);
        let b = m(&[&[1, 0, 1]]);
        assert!(matches!(
            add(&a, &b),
            Err(MatrixError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_multiply() {
        let a = m(&[&[1, 1, 0], &[0, 1, 1]]);
        let b = m(&[&[1, 0], &[1, 1], &[0, 1]]);
        // [1+1, 0+1] and [1+0, 1+1]
        assert_eq!(multiply(&a, &b).unwrap(), m(&[&[0, 1], &[1, 0]]));
        assert_eq!(multiply(&a, &identity(3)).unwrap(), a);
        assert!(matches!(
            multiply(&a, &a),
            Err(MatrixError::DimensionMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_vector_products() {
        let x = m(&[&[1, 1, 0], &[0, 1, 1]]);
        let row = BitVector::from_bits(&[true, true]);
        assert_eq!(
            vector_matrix_product(&row, &x).unwrap(),
            BitVector::from_bits(&[true, false, true])
        );
        let col = BitVector::from_bits(&[true, true, true]);
        assert_eq!(
            matrix_vector_product(&x, &col).unwrap(),
            BitVector::from_bits(&[false, false])
        );
        assert!(vector_matrix_product(&col, &x).is_err());
        assert!(matrix_vector_product(&x, &row).is_err());
    }

    #[test]
    fn test_pow() {
        // cyclic shift of order 3
        let p = m(&[&[0, 1, 0], &[0, 0, 1], &[1, 0, 0]]);
        assert_eq!(pow(&p, 0).unwrap(), identity(3));
        assert_eq!(pow(&p, 1).unwrap(), p);
        assert_eq!(pow(&p, 3).unwrap(), identity(3));
        assert_eq!(pow(&p, 7).unwrap(), p);
        assert!(matches!(
            pow(&m(&[&[1, 0]]), 2),
            Err(MatrixError::NotSquare { rows: 1, cols: 2 })
        ));
    }
}
