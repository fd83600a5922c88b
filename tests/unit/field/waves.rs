use std::f64::consts::PI;

use super::*;

#[test]
fn amplitude_decreases_and_baseline_increases_within_a_group() {
    for group in WaveGroup::ALL {
        for i in 0..LAYERS_PER_GROUP - 1 {
            let a = WaveLayer::derive(group, i).unwrap();
            let b = WaveLayer::derive(group, i + 1).unwrap();
            assert!(b.amplitude < a.amplitude, "{group:?} layer {i}");
            assert!(b.baseline > a.baseline, "{group:?} layer {i}");
        }
    }
}

#[test]
fn derive_rejects_out_of_range_index() {
    assert!(WaveLayer::derive(WaveGroup::Upper, LAYERS_PER_GROUP).is_err());
}

#[test]
fn layer_parameters_match_closed_forms() {
    let layer = WaveLayer::derive(WaveGroup::Mid, 7).unwrap();
    assert_eq!(layer.baseline, 550.0 + 4.0 * 7.0);
    assert_eq!(layer.amplitude, 40.0 - 0.5 * 7.0);
    assert!((layer.phase - (0.2 * 7.0 + PI)).abs() < 1e-12);
    assert!((layer.stroke_opacity - (0.85 - 0.02 * 7.0)).abs() < 1e-12);
    assert!((layer.fade_delay_s - (0.5 + 0.03 * 7.0)).abs() < 1e-12);
    assert!((layer.drift_period_s - (12.0 + 0.3 * 7.0)).abs() < 1e-12);
    assert!((layer.breathe_period_s - (8.0 + 0.3 * 7.0)).abs() < 1e-12);
}

#[test]
fn upper_group_breathe_period_is_fixed() {
    for i in 0..LAYERS_PER_GROUP {
        let layer = WaveLayer::derive(WaveGroup::Upper, i).unwrap();
        assert_eq!(layer.breathe_period_s, 0.1);
    }
}

#[test]
fn sampled_path_hits_every_grid_point() {
    use kurbo::PathEl;

    let layer = WaveLayer::derive(WaveGroup::Lower, 3).unwrap();
    let path = layer.sample_path(0.25);

    let points: Vec<kurbo::Point> = path
        .elements()
        .iter()
        .map(|el| match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => p,
            other => panic!("unexpected path element {other:?}"),
        })
        .collect();

    assert_eq!(points.len(), SAMPLES_PER_PATH);
    for (k, p) in points.iter().enumerate() {
        let x = SAMPLE_START_X + SAMPLE_STEP_X * k as f64;
        assert_eq!(p.x, x);
        let expected = layer.baseline
            + layer.amplitude * (layer.frequency * x + layer.phase + 0.25).sin();
        assert!((p.y - expected).abs() < 1e-9, "sample {k}");
    }
    assert_eq!(points.last().map(|p| p.x), Some(SAMPLE_END_X));
}

#[test]
fn phase_shift_moves_the_curve() {
    let layer = WaveLayer::derive(WaveGroup::Upper, 0).unwrap();
    assert_ne!(layer.y_at(100.0, 0.0), layer.y_at(100.0, 0.5));
    // Identical inputs always reproduce identical samples.
    assert_eq!(layer.sample_path(0.5), layer.sample_path(0.5));
}

#[test]
fn layers_returns_all_groups_in_order() {
    let all = layers();
    assert_eq!(all.len(), GROUP_COUNT * LAYERS_PER_GROUP);
    assert_eq!(all[0].group, WaveGroup::Upper);
    assert_eq!(all[LAYERS_PER_GROUP].group, WaveGroup::Mid);
    assert_eq!(all[2 * LAYERS_PER_GROUP].group, WaveGroup::Lower);
    for (k, layer) in all.iter().enumerate() {
        assert_eq!(layer.index, k % LAYERS_PER_GROUP);
    }
}
