// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Bit vector and bit matrix types over GF(2) with dimension validation.

use crate::errors::{MatrixError, MatrixResult};
use serde::{Deserialize, Serialize};

const WORD_BITS: usize = u64::BITS as usize;

fn word_count(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

/// A fixed-length vector over GF(2).
///
/// Bits are packed into `u64` words; bit `i` is `(words[i / 64] >> (i % 64)) & 1`.
/// Bits past `len` are kept at zero so that derived equality compares values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitVector {
    words: Vec<u64>,
    len: usize,
}

impl BitVector {
    /// Creates the zero vector of the given length.
    pub fn zeros(len: usize) -> Self {
        Self {
            words: vec![0; word_count(len)],
            len,
        }
    }

    /// Creates a vector from individual bits.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut v = Self::zeros(bits.len());
        for (i, &bit) in bits.iter().enumerate() {
            v.set(i, bit);
        }
        v
    }

    /// Returns the number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true for the length-0 vector.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns bit `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.len, "bit index {i} out of range (len={})", self.len);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    /// Sets bit `i` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn set(&mut self, i: usize, value: bool) {
        assert!(i < self.len, "bit index {i} out of range (len={})", self.len);
        let mask = 1u64 << (i % WORD_BITS);
        if value {
            self.words[i / WORD_BITS] |= mask;
        } else {
            self.words[i / WORD_BITS] &= !mask;
        }
    }

    /// Adds `other` into `self` (XOR).
    pub fn xor_assign(&mut self, other: &BitVector) -> MatrixResult<()> {
        if self.len != other.len {
            return Err(MatrixError::dimension_mismatch(
                self.len,
                other.len,
                "vector addition",
            ));
        }
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a ^= b;
        }
        Ok(())
    }

    /// Returns `self + other` (XOR).
    pub fn xor(&self, other: &BitVector) -> MatrixResult<BitVector> {
        let mut out = self.clone();
        out.xor_assign(other)?;
        Ok(out)
    }

    /// GF(2) inner product: parity of the bitwise AND.
    pub fn dot(&self, other: &BitVector) -> MatrixResult<bool> {
        if self.len != other.len {
            return Err(MatrixError::dimension_mismatch(
                self.len,
                other.len,
                "inner product",
            ));
        }
        let ones: u32 = self
            .words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones())
            .sum();
        Ok(ones % 2 == 1)
    }

    /// Returns true if every bit is zero.
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Hamming weight.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Ascending indices of the set bits.
    pub fn ones(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.count_ones());
        for (w, &word) in self.words.iter().enumerate() {
            let mut bits = word;
            while bits != 0 {
                out.push(w * WORD_BITS + bits.trailing_zeros() as usize);
                bits &= bits - 1;
            }
        }
        out
    }

    /// Ascending indices of the clear bits.
    pub fn zero_positions(&self) -> Vec<usize> {
        (0..self.len).filter(|&i| !self.get(i)).collect()
    }

    /// Iterates over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }
}

/// A `rows × cols` matrix over GF(2), stored as one [`BitVector`] per row.
///
/// Construction from literal rows rejects ragged input and entries other than
/// 0 or 1. The serde form is a list of rows of `0`/`1` integers and goes through
/// the same validation.
///
/// # Example
///
/// ```
/// use column_parity_mixer::BitMatrix;
///
/// let matrix = BitMatrix::new(&[[1, 0, 1], [0, 1, 1]]).unwrap();
/// assert_eq!(matrix.rows(), 2);
/// assert_eq!(matrix.cols(), 3);
/// assert!(matrix.get(1, 2));
/// assert!(BitMatrix::new(&[vec![1, 0], vec![1]]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct BitMatrix {
    data: Vec<BitVector>,
    rows: usize,
    cols: usize,
}

impl BitMatrix {
    /// Creates a matrix from literal rows of `0`/`1` values.
    ///
    /// # Errors
    ///
    /// Returns an error if rows have inconsistent lengths or an entry is not 0 or 1.
    pub fn new<R: AsRef<[u8]>>(data: &[R]) -> MatrixResult<Self> {
        let rows = data.len();
        let cols = data.first().map_or(0, |r| r.as_ref().len());
        let mut out = Vec::with_capacity(rows);

        for (i, row) in data.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::NonRectangular {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            let mut bits = BitVector::zeros(cols);
            for (j, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => bits.set(j, true),
                    _ => {
                        return Err(MatrixError::NonBinary {
                            row: i,
                            col: j,
                            value: value.into(),
                        })
                    }
                }
            }
            out.push(bits);
        }

        Ok(Self {
            data: out,
            rows,
            cols,
        })
    }

    /// Creates a matrix from rows of booleans.
    pub fn from_bool_rows<R: AsRef<[bool]>>(data: &[R]) -> MatrixResult<Self> {
        let rows = data
            .iter()
            .map(|r| BitVector::from_bits(r.as_ref()))
            .collect();
        Self::from_rows(rows)
    }

    /// Creates a matrix from row vectors of equal length.
    pub fn from_rows(data: Vec<BitVector>) -> MatrixResult<Self> {
        let cols = data.first().map_or(0, BitVector::len);
        if let Some((i, row)) = data.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(MatrixError::NonRectangular {
                row: i,
                expected: cols,
                actual: row.len(),
            });
        }
        Ok(Self {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// Creates a zero matrix of the specified dimensions.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![BitVector::zeros(cols); rows],
            rows,
            cols,
        }
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the row vectors.
    pub fn data(&self) -> &[BitVector] {
        &self.data
    }

    /// Gets a specific element.
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row].get(col)
    }

    /// Sets a specific element.
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.data[row].set(col, value);
    }

    /// Returns row `i`.
    pub fn row(&self, i: usize) -> &BitVector {
        &self.data[i]
    }

    pub(crate) fn row_mut(&mut self, i: usize) -> &mut BitVector {
        &mut self.data[i]
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    /// Row operation `row[target] ^= row[source]`.
    pub(crate) fn add_row(&mut self, target: usize, source: usize) {
        if target == source {
            self.data[target] = BitVector::zeros(self.cols);
            return;
        }
        let (dst, src) = if target < source {
            let (lo, hi) = self.data.split_at_mut(source);
            (&mut lo[target], &hi[0])
        } else {
            let (lo, hi) = self.data.split_at_mut(target);
            (&mut hi[0], &lo[source])
        };
        for (a, b) in dst.words.iter_mut().zip(&src.words) {
            *a ^= b;
        }
    }

    /// Extracts column `j`.
    pub fn column(&self, j: usize) -> BitVector {
        let mut col = BitVector::zeros(self.rows);
        for (i, row) in self.data.iter().enumerate() {
            col.set(i, row.get(j));
        }
        col
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(BitVector::is_zero)
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> BitMatrix {
        let mut out = BitMatrix::zeros(self.cols, self.rows);
        for (i, row) in self.data.iter().enumerate() {
            for j in row.ones() {
                out.set(j, i, true);
            }
        }
        out
    }
}

impl TryFrom<Vec<Vec<u8>>> for BitMatrix {
    type Error = MatrixError;

    fn try_from(data: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        BitMatrix::new(&data)
    }
}

impl From<BitMatrix> for Vec<Vec<u8>> {
    fn from(matrix: BitMatrix) -> Self {
        matrix
            .data
            .iter()
            .map(|row| row.iter().map(u8::from).collect())
            .collect()
    }
}

/// Read-only view of a bit matrix, used for rendering.
pub trait MatrixLike {
    /// Returns the number of rows.
    fn rows(&self) -> usize;

    /// Returns the number of columns.
    fn cols(&self) -> usize;

    /// Returns the entry at (`row`, `col`).
    fn get(&self, row: usize, col: usize) -> bool;
}

impl MatrixLike for BitMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> bool {
        self.data[row].get(col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_vector_ones_across_words() {
        let mut v = BitVector::zeros(130);
        for i in [0, 63, 64, 129] {
            v.set(i, true);
        }
        assert_eq!(v.ones(), vec![0, 63, 64, 129]);
        assert_eq!(v.count_ones(), 4);
        v.set(63, false);
        assert_eq!(v.ones(), vec![0, 64, 129]);
    }

    #[test]
    fn test_bit_vector_xor_and_dot() {
        let a = BitVector::from_bits(&[true, true, false, true]);
        let b = BitVector::from_bits(&[true, false, false, true]);
        assert_eq!(
            a.xor(&b).unwrap(),
            BitVector::from_bits(&[false, true, false, false])
        );
        assert!(!a.dot(&b).unwrap());
        assert!(a.dot(&a).unwrap());
        assert!(a.xor(&BitVector::zeros(3)).is_err());
    }

    #[test]
    fn test_zero_positions() {
        let v = BitVector::from_bits(&[true, false, true, false, false]);
        assert_eq!(v.zero_positions(), vec![1, 3, 4]);
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let err = BitMatrix::new(&[vec![1, 0, 1], vec![0, 1]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NonRectangular {
                row: 1,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_new_rejects_non_binary() {
        let err = BitMatrix::new(&[[1, 0], [2, 1]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NonBinary {
                row: 1,
                col: 0,
                value: 2
            }
        );
    }

    #[test]
    fn test_empty_matrix() {
        let m = BitMatrix::new::<[u8; 0]>(&[]).unwrap();
        assert_eq!((m.rows(), m.cols()), (0, 0));
        assert!(m.is_square());
    }

    #[test]
    fn test_column_and_transpose() {
        let m = BitMatrix::new(&[[1, 0, 1], [0, 1, 1]]).unwrap();
        assert_eq!(m.column(2), BitVector::from_bits(&[true, true]));
        let t = m.transpose();
        assert_eq!(t, BitMatrix::new(&[[1, 0], [0, 1], [1, 1]]).unwrap());
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_bool_rows_match_integer_rows() {
        let a = BitMatrix::from_bool_rows(&[[true, false], [false, true]]).unwrap();
        let b = BitMatrix::new(&[[1, 0], [0, 1]]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_yaml_validates() {
        let m: BitMatrix = serde_yaml::from_str("- [1, 0]\n- [0, 1]\n").unwrap();
        assert_eq!(m, BitMatrix::new(&[[1, 0], [0, 1]]).unwrap());
        assert!(serde_yaml::from_str::<BitMatrix>("- [1, 3]\n- [0, 1]\n").is_err());
        assert!(serde_yaml::from_str::<BitMatrix>("- [1, 0]\n- [0]\n").is_err());

        let text = serde_yaml::to_string(&m).unwrap();
        let back: BitMatrix = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, m);
    }
}
