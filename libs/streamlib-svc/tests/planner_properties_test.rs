// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Property checks for spatial layer planning across common source
//! resolutions and layer requests.
//!
//! Run with: cargo test -p streamlib-svc --test planner_properties_test

use streamlib_svc::{
    plan_spatial_layers, SpatialLayerConfig, SpatialLayerPlanner, SvcPlannerConfig,
    MIN_SVC_BITRATE_KBPS,
};

const RESOLUTIONS: &[(u32, u32)] = &[
    (1, 1),
    (64, 64),
    (176, 144),
    (320, 180),
    (352, 288),
    (640, 360),
    (640, 480),
    (960, 540),
    (1280, 720),
    (1366, 768),
    (1920, 1080),
    (2560, 1440),
    (3840, 2160),
    (4096, 2160),
    (7680, 4320),
    (1080, 1920),
    (1001, 333),
];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn for_each_case(mut check: impl FnMut(u32, u32, u32, u32, &[SpatialLayerConfig])) {
    init_tracing();
    for &(width, height) in RESOLUTIONS {
        for spatial in 1..=6 {
            for temporal in 1..=4 {
                let layers = plan_spatial_layers(width, height, spatial, temporal).unwrap();
                check(width, height, spatial, temporal, &layers);
            }
        }
    }
}

#[test]
fn test_layer_count_bounds() {
    let planner = SpatialLayerPlanner::default();
    for_each_case(|width, height, spatial, _, layers| {
        let ceiling = planner.max_spatial_layers(width, height).unwrap();
        let n = layers.len() as u32;
        assert!(n >= 1, "{width}x{height}: empty plan");
        assert_eq!(n, spatial.min(ceiling), "{width}x{height} requested {spatial}");
    });
}

#[test]
fn test_geometry_is_successive_halving() {
    for_each_case(|width, height, _, _, layers| {
        let last = layers.last().unwrap();
        assert_eq!(last.resolution(), (width, height));

        let n = layers.len();
        for (i, layer) in layers.iter().enumerate() {
            let shift = (n - 1 - i) as u32;
            assert_eq!(layer.width, width >> shift);
            assert_eq!(layer.height, height >> shift);
            assert!(layer.width > 0 && layer.height > 0);
        }
    });
}

#[test]
fn test_bitrate_envelope_ordering() {
    for_each_case(|_, _, _, temporal, layers| {
        for layer in layers {
            assert_eq!(layer.num_temporal_layers, temporal);
            assert!(layer.min_bitrate_kbps >= MIN_SVC_BITRATE_KBPS);
            assert!(layer.min_bitrate_kbps <= layer.target_bitrate_kbps);
            assert!(layer.target_bitrate_kbps <= layer.max_bitrate_kbps);
            assert_eq!(
                layer.target_bitrate_kbps,
                (layer.min_bitrate_kbps + layer.max_bitrate_kbps) / 2
            );
        }
    });
}

#[test]
fn test_bitrates_grow_with_resolution() {
    for_each_case(|_, _, _, _, layers| {
        for pair in layers.windows(2) {
            assert!(pair[1].min_bitrate_kbps >= pair[0].min_bitrate_kbps);
            assert!(pair[1].max_bitrate_kbps >= pair[0].max_bitrate_kbps);
        }
    });
}

#[test]
fn test_deterministic() {
    for_each_case(|width, height, spatial, temporal, layers| {
        let again = plan_spatial_layers(width, height, spatial, temporal).unwrap();
        assert_eq!(layers, again.as_slice());
    });
}

#[test]
fn test_temporal_layers_not_clamped() {
    let layers = plan_spatial_layers(320, 180, 1, 16).unwrap();
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].num_temporal_layers, 16);
}

#[test]
fn test_1080p_reference_plan() {
    let layers = plan_spatial_layers(1920, 1080, 3, 3).unwrap();
    let expected = [
        // 480x270: sqrt = 360, 1.6 * 129600 = 207360
        SpatialLayerConfig {
            width: 480,
            height: 270,
            num_temporal_layers: 3,
            min_bitrate_kbps: 121,
            max_bitrate_kbps: 257,
            target_bitrate_kbps: 189,
        },
        // 960x540: sqrt = 720, 1.6 * 518400 = 829440
        SpatialLayerConfig {
            width: 960,
            height: 540,
            num_temporal_layers: 3,
            min_bitrate_kbps: 337,
            max_bitrate_kbps: 879,
            target_bitrate_kbps: 608,
        },
        // 1920x1080: sqrt = 1440, 1.6 * 2073600 = 3317760
        SpatialLayerConfig {
            width: 1920,
            height: 1080,
            num_temporal_layers: 3,
            min_bitrate_kbps: 769,
            max_bitrate_kbps: 3367,
            target_bitrate_kbps: 2068,
        },
    ];
    assert_eq!(layers, expected);
}

#[test]
fn test_concurrent_planning_matches_sequential() {
    let planner = SpatialLayerPlanner::default();
    let expected: Vec<_> = RESOLUTIONS
        .iter()
        .map(|&(w, h)| planner.plan(w, h, 4, 3).unwrap())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    RESOLUTIONS
                        .iter()
                        .map(|&(w, h)| planner.plan(w, h, 4, 3).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_json_field_names() {
    let layers = plan_spatial_layers(640, 360, 2, 2).unwrap();
    let json = serde_json::to_value(&layers).unwrap();
    assert_eq!(
        json[1],
        serde_json::json!({
            "width": 640,
            "height": 360,
            "numberOfTemporalLayers": 2,
            "minBitrateKbps": 193,
            "maxBitrateKbps": 418,
            "targetBitrateKbps": 305,
        })
    );

    let parsed: Vec<SpatialLayerConfig> = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, layers);
}

#[test]
fn test_planner_from_toml_config() {
    let config = SvcPlannerConfig::from_toml_str(
        r#"
min_layer_width = 160
min_layer_height = 90
min_bitrate_kbps = 40
"#,
    )
    .unwrap();
    let planner = SpatialLayerPlanner::new(config).unwrap();

    let layers = planner.plan(1280, 720, 5, 1).unwrap();
    let sizes: Vec<_> = layers.iter().map(|l| l.resolution()).collect();
    assert_eq!(sizes, [(160, 90), (320, 180), (640, 360), (1280, 720)]);
    assert_eq!(layers[0].min_bitrate_kbps, 40);
}
