// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Spatial and temporal layer planning for scalable video coding.
//!
//! Given a source resolution and requested layer counts, produces one
//! [`SpatialLayerConfig`] per spatial layer: its dimensions, temporal layer
//! count and bitrate envelope. The result is plain data for the encoder
//! setup path; this crate performs no encoding.
//!
//! # Example
//!
//! ```
//! use streamlib_svc::{plan_spatial_layers, total_target_bitrate_kbps};
//!
//! let layers = plan_spatial_layers(1280, 720, 3, 3).unwrap();
//! assert_eq!(layers.len(), 3);
//! assert_eq!(layers[2].max_bitrate_kbps, 1524);
//! assert_eq!(total_target_bitrate_kbps(&layers), 95 + 305 + 1002);
//! ```

pub mod config;
pub mod error;
pub mod layer;
pub mod planner;

pub use config::{SvcPlannerConfig, MIN_LAYER_HEIGHT, MIN_LAYER_WIDTH, MIN_SVC_BITRATE_KBPS};
pub use error::{Result, SvcError};
pub use layer::{
    total_max_bitrate_kbps, total_min_bitrate_kbps, total_target_bitrate_kbps, SpatialLayerConfig,
};
pub use planner::{plan_spatial_layers, BitrateEnvelope, SpatialLayerPlanner};
