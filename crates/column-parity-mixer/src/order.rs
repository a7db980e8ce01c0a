// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Order of a column parity mixer under composition.
//!
//! The order is the least `k ≥ 1` with `θ^k` equal to the identity mixer. A
//! non-invertible mixer never returns to the identity, so it is rejected up front,
//! and every search is bounded by [`OrderConfig::max_iterations`].

use crate::errors::{CpmError, CpmResult};
use crate::math::{identity, multiply, pow};
use crate::matrix::invert;
use crate::matrix_type::BitMatrix;
use crate::mixer::Cpm;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Default bound on the exponent an order search may reach.
pub const DEFAULT_MAX_ITERATIONS: u64 = 1 << 20;

/// Settings for order searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Largest exponent tried before giving up with `NoFiniteOrder`.
    pub max_iterations: u64,
    /// Use a baby-step/giant-step search instead of composing one step at a time.
    pub use_squaring: bool,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            use_squaring: false,
        }
    }
}

impl OrderConfig {
    pub fn validate(&self) -> CpmResult<()> {
        if self.max_iterations == 0 {
            return Err(CpmError::config("order.max_iterations must be >= 1"));
        }
        Ok(())
    }
}

impl Cpm {
    /// Order of the mixer with the default search settings.
    ///
    /// # Example
    ///
    /// ```
    /// use column_parity_mixer::{BitMatrix, Cpm};
    ///
    /// let z = BitMatrix::new(&[[1, 1, 0], [1, 0, 1], [0, 1, 0]]).unwrap();
    /// let theta = Cpm::new(5, z).unwrap();
    /// assert_eq!(theta.order().unwrap(), 7);
    /// ```
    pub fn order(&self) -> CpmResult<u64> {
        self.order_with(&OrderConfig::default())
    }

    /// Order of the mixer.
    ///
    /// # Errors
    ///
    /// `NoFiniteOrder` if the mixer is not invertible or the order exceeds
    /// `config.max_iterations`.
    pub fn order_with(&self, config: &OrderConfig) -> CpmResult<u64> {
        config.validate()?;
        let limit = config.max_iterations;

        if !self.is_invertible()? {
            debug!("{} is not invertible, no order", self);
            return Err(CpmError::NoFiniteOrder { limit });
        }
        if self.is_identity() {
            return Ok(1);
        }
        // Even row counts: θ∘θ = (m, Z + Z) = identity
        if !self.odd_rows() {
            return bounded(2, limit);
        }

        if config.use_squaring {
            self.order_baby_giant(limit)
        } else {
            self.order_iterative(limit)
        }
    }

    fn order_iterative(&self, limit: u64) -> CpmResult<u64> {
        let mut acc = self.clone();
        let mut k = 1u64;
        while !acc.is_identity() {
            if k >= limit {
                warn!("order search for {} exhausted {} compositions", self, limit);
                return Err(CpmError::NoFiniteOrder { limit });
            }
            acc = acc.compose(self)?;
            k += 1;
        }
        debug!("order of {} is {}", self, k);
        Ok(k)
    }

    /// Baby-step/giant-step on the associated matrix `M = I + Z`. For odd row
    /// counts `θ^k` is the identity exactly when `M^k = I`.
    fn order_baby_giant(&self, limit: u64) -> CpmResult<u64> {
        let m = self.associated_matrix();
        let n = m.rows();
        let one = identity(n);
        // ceil(sqrt(limit)) so that baby and giant steps together cover 1..=limit
        let root = limit.isqrt();
        let step = if root * root < limit { root + 1 } else { root };

        // Baby steps: M^j for 0 <= j < step
        let mut table: HashMap<BitMatrix, u64> = HashMap::new();
        let mut power = one.clone();
        for j in 0..step {
            if j > 0 && power == one {
                return bounded(j, limit);
            }
            table.entry(power.clone()).or_insert(j);
            power = multiply(&power, &m)?;
        }

        // Giant steps: M^(-i·step) for i = 1, 2, ...
        let giant = pow(&invert(&m)?, step)?;
        let mut gamma = one;
        let mut i = 0u64;
        while i.saturating_mul(step) < limit {
            i += 1;
            gamma = multiply(&gamma, &giant)?;
            if let Some(&j) = table.get(&gamma) {
                let k = i * step + j;
                debug!("order of {} is {} (baby-step/giant-step)", self, k);
                return bounded(k, limit);
            }
        }

        warn!("order search for {} exhausted {} steps", self, limit);
        Err(CpmError::NoFiniteOrder { limit })
    }
}

fn bounded(order: u64, limit: u64) -> CpmResult<u64> {
    if order > limit {
        return Err(CpmError::NoFiniteOrder { limit });
    }
    Ok(order)
}

/// Orders of many mixers, computed in parallel. Results keep the input order.
pub fn batch_order(mixers: &[Cpm], config: &OrderConfig) -> Vec<CpmResult<u64>> {
    mixers
        .par_iter()
        .map(|cpm| cpm.order_with(config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn order7() -> Cpm {
        let z = BitMatrix::new(&[[1, 1, 0], [1, 0, 1], [0, 1, 0]]).unwrap();
        Cpm::new(5, z).unwrap()
    }

    fn arb_cpm(rows: usize, n: usize) -> impl Strategy<Value = Cpm> {
        prop::collection::vec(prop::collection::vec(any::<bool>(), n), n).prop_map(move |data| {
            Cpm::new(rows, BitMatrix::from_bool_rows(&data).unwrap()).unwrap()
        })
    }

    fn squaring() -> OrderConfig {
        OrderConfig {
            use_squaring: true,
            ..OrderConfig::default()
        }
    }

    #[test]
    fn test_order_small() {
        let theta = order7();
        assert_eq!(theta.order().unwrap(), 7);
        assert_eq!(theta.order_with(&squaring()).unwrap(), 7);
    }

    #[test]
    fn test_order_identity_is_one() {
        let id = Cpm::identity(3, 4).unwrap();
        assert_eq!(id.order().unwrap(), 1);
        assert_eq!(Cpm::identity(2, 4).unwrap().order().unwrap(), 1);
    }

    #[test]
    fn test_order_even_rows_is_two() {
        let z = BitMatrix::new(&[[1, 1, 0], [1, 0, 1], [0, 1, 0]]).unwrap();
        let theta = Cpm::new(4, z).unwrap();
        assert_eq!(theta.order().unwrap(), 2);
        assert!(theta.power(2).unwrap().is_identity());
    }

    #[test]
    fn test_order_not_invertible() {
        let z = BitMatrix::new(&[[0, 1], [1, 0]]).unwrap();
        let theta = Cpm::new(3, z).unwrap();
        assert_eq!(
            theta.order(),
            Err(CpmError::NoFiniteOrder {
                limit: DEFAULT_MAX_ITERATIONS
            })
        );
    }

    #[test]
    fn test_order_cap() {
        let theta = order7();
        let tight = OrderConfig {
            max_iterations: 6,
            use_squaring: false,
        };
        assert_eq!(
            theta.order_with(&tight),
            Err(CpmError::NoFiniteOrder { limit: 6 })
        );
        let tight_squaring = OrderConfig {
            max_iterations: 6,
            use_squaring: true,
        };
        assert_eq!(
            theta.order_with(&tight_squaring),
            Err(CpmError::NoFiniteOrder { limit: 6 })
        );
        let exact = OrderConfig {
            max_iterations: 7,
            use_squaring: false,
        };
        assert_eq!(theta.order_with(&exact).unwrap(), 7);
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = OrderConfig {
            max_iterations: 0,
            use_squaring: false,
        };
        assert!(matches!(
            order7().order_with(&config),
            Err(CpmError::Config { .. })
        ));
    }

    #[test]
    fn test_batch_order_keeps_input_order() {
        let z = BitMatrix::new(&[[0, 1], [1, 0]]).unwrap();
        let mixers = vec![
            order7(),
            Cpm::identity(5, 3).unwrap(),
            Cpm::new(3, z).unwrap(),
            Cpm::new(2, BitMatrix::new(&[[1, 0], [0, 0]]).unwrap()).unwrap(),
        ];
        let orders = batch_order(&mixers, &OrderConfig::default());
        assert_eq!(orders.len(), 4);
        assert_eq!(orders[0], Ok(7));
        assert_eq!(orders[1], Ok(1));
        assert!(orders[2].is_err());
        assert_eq!(orders[3], Ok(2));
    }

    proptest! {
        #[test]
        fn order_is_least_identity_exponent(theta in arb_cpm(3, 5)) {
            if let Ok(k) = theta.order() {
                prop_assert!(theta.power(k).unwrap().is_identity());
                for j in 1..k {
                    prop_assert!(!theta.power(j).unwrap().is_identity());
                }
                prop_assert_eq!(theta.order_with(&squaring()).unwrap(), k);
            } else {
                prop_assert!(!theta.is_invertible().unwrap());
            }
        }
    }
}
