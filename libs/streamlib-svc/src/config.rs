// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Planner configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SvcError};

/// Smallest width at which a spatial layer is still worth encoding.
pub const MIN_LAYER_WIDTH: u32 = 320;

/// Smallest height at which a spatial layer is still worth encoding.
pub const MIN_LAYER_HEIGHT: u32 = 180;

/// Lowest viable video bitrate for any spatial layer, in kbps.
pub const MIN_SVC_BITRATE_KBPS: u32 = 30;

/// Thresholds used by [`SpatialLayerPlanner`](crate::SpatialLayerPlanner).
///
/// The defaults are the reference thresholds; changing them changes the
/// produced layer counts and bitrate floors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvcPlannerConfig {
    /// Minimum spatial layer width in pixels.
    pub min_layer_width: u32,
    /// Minimum spatial layer height in pixels.
    pub min_layer_height: u32,
    /// Floor applied to every layer's minimum bitrate, in kbps.
    pub min_bitrate_kbps: u32,
}

impl Default for SvcPlannerConfig {
    fn default() -> Self {
        Self {
            min_layer_width: MIN_LAYER_WIDTH,
            min_layer_height: MIN_LAYER_HEIGHT,
            min_bitrate_kbps: MIN_SVC_BITRATE_KBPS,
        }
    }
}

impl SvcPlannerConfig {
    /// Create a config with the reference thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum spatial layer size.
    pub fn with_min_layer_size(mut self, width: u32, height: u32) -> Self {
        self.min_layer_width = width;
        self.min_layer_height = height;
        self
    }

    /// Set the minimum bitrate floor in kbps.
    pub fn with_min_bitrate_kbps(mut self, kbps: u32) -> Self {
        self.min_bitrate_kbps = kbps;
        self
    }

    /// Check that the thresholds can drive a planner.
    ///
    /// A zero bitrate floor is allowed; zero minimum dimensions are not.
    pub fn validate(&self) -> Result<()> {
        if self.min_layer_width == 0 {
            return Err(SvcError::InvalidConfig(
                "min_layer_width must be greater than zero".into(),
            ));
        }
        if self.min_layer_height == 0 {
            return Err(SvcError::InvalidConfig(
                "min_layer_height must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Parse a config from TOML. Missing keys take their default values.
    ///
    /// ```
    /// use streamlib_svc::SvcPlannerConfig;
    ///
    /// let config = SvcPlannerConfig::from_toml_str("min_bitrate_kbps = 50").unwrap();
    /// assert_eq!(config.min_bitrate_kbps, 50);
    /// assert_eq!(config.min_layer_width, 320);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
