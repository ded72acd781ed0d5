// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Per-layer SVC configuration.

use serde::{Deserialize, Serialize};

/// Configuration for one spatial layer of a scalable stream.
///
/// Produced by [`SpatialLayerPlanner::plan`](crate::SpatialLayerPlanner::plan)
/// in increasing-resolution order. Bitrates satisfy
/// `min_bitrate_kbps <= target_bitrate_kbps <= max_bitrate_kbps`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialLayerConfig {
    /// Layer width in pixels.
    pub width: u32,
    /// Layer height in pixels.
    pub height: u32,
    /// Temporal layers carried by this spatial layer.
    #[serde(rename = "numberOfTemporalLayers")]
    pub num_temporal_layers: u32,
    /// Lowest acceptable bitrate in kbps.
    pub min_bitrate_kbps: u32,
    /// Bitrate above which extra bits stop paying off, in kbps.
    pub max_bitrate_kbps: u32,
    /// Midpoint of the min/max envelope, in kbps.
    pub target_bitrate_kbps: u32,
}

impl SpatialLayerConfig {
    /// Number of pixels in one frame of this layer.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// `(width, height)` of this layer.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Sum of the minimum bitrates of all layers, in kbps.
pub fn total_min_bitrate_kbps(layers: &[SpatialLayerConfig]) -> u64 {
    layers.iter().map(|l| u64::from(l.min_bitrate_kbps)).sum()
}

/// Sum of the target bitrates of all layers, in kbps.
pub fn total_target_bitrate_kbps(layers: &[SpatialLayerConfig]) -> u64 {
    layers.iter().map(|l| u64::from(l.target_bitrate_kbps)).sum()
}

/// Sum of the maximum bitrates of all layers, in kbps.
pub fn total_max_bitrate_kbps(layers: &[SpatialLayerConfig]) -> u64 {
    layers.iter().map(|l| u64::from(l.max_bitrate_kbps)).sum()
}
