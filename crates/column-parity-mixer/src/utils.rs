// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::matrix_type::{BitVector, MatrixLike};

/// Renders a matrix as a titled block, one bracketed row per line.
pub fn format_matrix(name: &str, matrix: &dyn MatrixLike) -> String {
    let mut out = format!("{} ({}x{}):\n", name, matrix.rows(), matrix.cols());
    for i in 0..matrix.rows() {
        let row: Vec<&str> = (0..matrix.cols())
            .map(|j| if matrix.get(i, j) { "1" } else { "0" })
            .collect();
        out.push_str(&format!("  [{}]\n", row.join(" ")));
    }
    out
}

/// Renders a vector as `(b0, b1, ...)`.
pub fn format_vector(vector: &BitVector) -> String {
    let bits: Vec<&str> = vector.iter().map(|b| if b { "1" } else { "0" }).collect();
    format!("({})", bits.join(", "))
}

pub fn print_matrix(name: &str, matrix: &dyn MatrixLike) {
    println!("{}", format_matrix(name, matrix));
}
