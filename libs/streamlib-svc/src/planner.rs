// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Spatial layer planning.
//!
//! Each spatial layer halves the resolution of the one above it, so the
//! number of layers a source supports is bounded by how many halvings keep
//! both dimensions at or above the configured minimum. Bitrates come from an
//! empirical rate model over the layer's pixel count; its constants were
//! calibrated against subjective quality and must not be re-derived.

use crate::config::SvcPlannerConfig;
use crate::error::{require_positive, Result};
use crate::layer::SpatialLayerConfig;

/// The `(min, max, target)` bitrate triple for one layer, in kbps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitrateEnvelope {
    pub min_kbps: u32,
    pub max_kbps: u32,
    pub target_kbps: u32,
}

impl BitrateEnvelope {
    /// Evaluate the rate model for a layer of `pixels` pixels.
    ///
    /// `min_floor_kbps` is applied to the minimum before the target is
    /// derived. With the reference floor the maximum always exceeds the
    /// minimum; a custom floor above the model's maximum raises the maximum
    /// to match so the envelope stays ordered.
    pub fn for_pixels(pixels: u64, min_floor_kbps: u32) -> Self {
        let pixels = pixels as f64;

        // Casts truncate toward zero (and saturate), matching the reference
        // integer conversion.
        let min = ((600.0 * pixels.sqrt() - 95_000.0) / 1000.0) as i64;
        let min = min.max(i64::from(min_floor_kbps));
        let min_kbps = u32::try_from(min).unwrap_or(u32::MAX);

        let max = ((1.6 * pixels + 50_000.0) / 1000.0) as u64;
        let max_kbps = u32::try_from(max).unwrap_or(u32::MAX).max(min_kbps);

        let target_kbps = ((u64::from(max_kbps) + u64::from(min_kbps)) / 2) as u32;

        Self {
            min_kbps,
            max_kbps,
            target_kbps,
        }
    }
}

/// Derives per-layer geometry and bitrate envelopes for SVC encoding.
///
/// Stateless apart from its thresholds; safe to share across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpatialLayerPlanner {
    config: SvcPlannerConfig,
}

impl SpatialLayerPlanner {
    /// Create a planner with custom thresholds.
    pub fn new(config: SvcPlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Thresholds this planner applies.
    pub fn config(&self) -> &SvcPlannerConfig {
        &self.config
    }

    /// Largest spatial layer count the resolution supports, before any
    /// caller request is applied.
    pub fn max_spatial_layers(&self, width: u32, height: u32) -> Result<u32> {
        require_positive("width", width)?;
        require_positive("height", height)?;

        let horizontal = layers_fit(width, self.config.min_layer_width);
        let vertical = layers_fit(height, self.config.min_layer_height);
        Ok(horizontal.min(vertical))
    }

    /// Plan the spatial layers for a `width`x`height` source.
    ///
    /// Layers are returned lowest resolution first; the last layer always
    /// has the input resolution. The spatial layer count is reduced to what
    /// the resolution supports. The temporal layer count is copied to every
    /// layer unchanged.
    pub fn plan(
        &self,
        width: u32,
        height: u32,
        num_spatial_layers: u32,
        num_temporal_layers: u32,
    ) -> Result<Vec<SpatialLayerConfig>> {
        require_positive("num_spatial_layers", num_spatial_layers)?;
        require_positive("num_temporal_layers", num_temporal_layers)?;
        let max_layers = self.max_spatial_layers(width, height)?;

        let num_layers = num_spatial_layers.min(max_layers);
        if num_layers < num_spatial_layers {
            tracing::debug!(
                "[SVC] {}x{} fits {} spatial layers, {} requested",
                width,
                height,
                num_layers,
                num_spatial_layers
            );
        }

        let layers = (0..num_layers)
            .map(|index| {
                let shift = num_layers - index - 1;
                let layer_width = width >> shift;
                let layer_height = height >> shift;
                let pixels = u64::from(layer_width) * u64::from(layer_height);
                let envelope = BitrateEnvelope::for_pixels(pixels, self.config.min_bitrate_kbps);

                tracing::trace!(
                    "[SVC] Layer {}: {}x{}, bitrate {}/{}/{} kbps (min/target/max)",
                    index,
                    layer_width,
                    layer_height,
                    envelope.min_kbps,
                    envelope.target_kbps,
                    envelope.max_kbps
                );

                SpatialLayerConfig {
                    width: layer_width,
                    height: layer_height,
                    num_temporal_layers,
                    min_bitrate_kbps: envelope.min_kbps,
                    max_bitrate_kbps: envelope.max_kbps,
                    target_bitrate_kbps: envelope.target_kbps,
                }
            })
            .collect();

        Ok(layers)
    }
}

/// Plan spatial layers with the reference thresholds.
///
/// ```
/// let layers = streamlib_svc::plan_spatial_layers(1280, 720, 3, 3).unwrap();
/// let sizes: Vec<_> = layers.iter().map(|l| l.resolution()).collect();
/// assert_eq!(sizes, [(320, 180), (640, 360), (1280, 720)]);
/// ```
pub fn plan_spatial_layers(
    width: u32,
    height: u32,
    num_spatial_layers: u32,
    num_temporal_layers: u32,
) -> Result<Vec<SpatialLayerConfig>> {
    SpatialLayerPlanner::default().plan(width, height, num_spatial_layers, num_temporal_layers)
}

/// `floor(1 + max(0, log2(dimension / min_dimension)))`, evaluated in `f32`.
///
/// Capped at the bit length of `dimension` so that the smallest layer can
/// never shift down to zero, even where `f32` rounding overshoots.
fn layers_fit(dimension: u32, min_dimension: u32) -> u32 {
    let ratio = dimension as f32 / min_dimension as f32;
    let fit = (1.0 + ratio.log2().max(0.0)).floor() as u32;
    fit.min(u32::BITS - dimension.leading_zeros())
}
