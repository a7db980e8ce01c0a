// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Mixer description files.
//!
//! A description is YAML with the row count, the parity-folding matrix and
//! optional order search settings. Values are layered: built-in defaults, then the
//! file, then `CPM_` environment variables (`__` separates nested keys, so
//! `CPM_ORDER__MAX_ITERATIONS=64` sets `order.max_iterations`).

use crate::errors::{CpmError, CpmResult};
use crate::matrix_type::BitMatrix;
use crate::mixer::Cpm;
use crate::order::OrderConfig;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const ENV_PREFIX: &str = "CPM_";

/// A mixer together with the settings used to analyse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixerConfig {
    pub rows: usize,
    pub folding_matrix: BitMatrix,
    #[serde(default)]
    pub order: OrderConfig,
}

impl MixerConfig {
    /// Builds the mixer described by this config.
    pub fn mixer(&self) -> CpmResult<Cpm> {
        Cpm::new(self.rows, self.folding_matrix.clone())
    }

    /// Checks the mixer and the order settings.
    pub fn validate(&self) -> CpmResult<()> {
        self.order.validate()?;
        self.mixer()?;
        Ok(())
    }
}

/// Loads and validates a mixer description.
pub fn load_config(path: &Path) -> CpmResult<MixerConfig> {
    if !path.exists() {
        return Err(CpmError::config(format!(
            "mixer file not found: {}",
            path.display()
        )));
    }

    let config: MixerConfig = Figment::from(Serialized::default("order", OrderConfig::default()))
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| CpmError::config(format!("could not parse {}: {}", path.display(), e)))?;

    config.validate()?;
    debug!(
        "loaded {}x{} mixer with {} rows from {}",
        config.folding_matrix.rows(),
        config.folding_matrix.cols(),
        config.rows,
        path.display()
    );
    Ok(config)
}

/// Loads a state matrix written as a YAML list of rows.
pub fn load_state(path: &Path) -> CpmResult<BitMatrix> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CpmError::config(format!("could not read {}: {}", path.display(), e)))?;
    serde_yaml::from_str(&text)
        .map_err(|e| CpmError::config(format!("could not parse {}: {}", path.display(), e)))
}
