// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Algebra of column parity mixers over GF(2).
//!
//! Column parity mixers (CPMs) are the linear diffusion layers of permutations such
//! as Keccak-f, Xoodoo and Ascon. A CPM `θ = (m, Z)` acts on an `m × n` state by
//! adding the folded column parity `p(A) · Z` to every row.
//!
//! ## Mathematical Background
//!
//! The effect of running `θ = (m, Z₁)` and then `γ = (m, Z₂)` is again a CPM with
//! folding matrix `Z₁ + Z₂ + c·Z₁Z₂`, where `c = m mod 2`. For even `m` composition
//! is plain addition, every CPM is an involution and is its own inverse. For odd `m`
//! the map `θ ↦ I + Z` turns composition into matrix multiplication, so `θ` is
//! invertible iff `I + Z` is, and its order is the multiplicative order of `I + Z`.
//!
//! ## Modules
//!
//! - [`matrix_type`], [`math`], [`matrix`]: bit vectors and matrices, GF(2) arithmetic
//!   and Gauss-Jordan elimination.
//! - [`mixer`]: the [`Cpm`] type, column parities and the mixing action.
//! - [`compose`], [`inverse`], [`order`]: composition and powers, inversion, order.
//! - [`config`]: YAML mixer descriptions.

pub mod compose;
pub mod config;
pub mod errors;
pub mod inverse;
pub mod math;
pub mod matrix;
pub mod matrix_type;
pub mod mixer;
pub mod order;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{load_config, load_state, MixerConfig};
pub use errors::{CpmError, CpmResult, MatrixError, MatrixResult};
pub use matrix_type::{BitMatrix, BitVector, MatrixLike};
pub use mixer::{column_parity, even_columns, expanded_column_parity, odd_columns, Cpm};
pub use order::{batch_order, OrderConfig};
