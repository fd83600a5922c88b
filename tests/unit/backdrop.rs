use super::*;
use crate::field::{particles::PARTICLE_COUNT, waves::{GROUP_COUNT, LAYERS_PER_GROUP}};

fn clock_after(ticks: u64) -> AnimationClock {
    let mut clock = AnimationClock::new();
    for _ in 0..ticks {
        clock.tick();
    }
    clock
}

#[test]
fn pre_hydration_scene_is_static_and_clock_independent() {
    let backdrop = Backdrop::new(BackdropParams::default()).unwrap();
    assert_eq!(backdrop.hydration(), Hydration::Pre);

    let a = backdrop.scene(clock_after(0));
    let b = backdrop.scene(clock_after(100));

    assert!(!a.live);
    assert_eq!(a.phase_shift, 0.0);
    assert_eq!(b.phase_shift, 0.0);
    assert!(a.particles.is_empty());
    assert_eq!(a.waves.len(), GROUP_COUNT * LAYERS_PER_GROUP);
    for node in &a.waves {
        assert!(node.motion.is_none());
        let expected = 0.85 - 0.02 * node.layer.index as f64;
        assert!((node.layer.stroke_opacity - expected).abs() < 1e-12);
    }

    // Clock-independence: identical scene either way.
    let a_json = serde_json::to_string(&a).unwrap();
    let b_json = serde_json::to_string(&b).unwrap();
    assert_eq!(a_json, b_json);
}

#[test]
fn hydrated_scene_gains_particles_and_motion() {
    let mut backdrop = Backdrop::new(BackdropParams::default()).unwrap();
    backdrop.hydrate();
    assert_eq!(backdrop.hydration(), Hydration::Hydrated);

    let scene = backdrop.scene(clock_after(10));
    assert!(scene.live);
    assert!((scene.phase_shift - 0.5).abs() < 1e-12);
    assert_eq!(scene.particles.len(), PARTICLE_COUNT);
    for node in &scene.waves {
        assert!(node.motion.is_some());
    }
}

#[test]
fn hydration_gate_off_starts_live() {
    let backdrop = Backdrop::new(BackdropParams {
        hydration_gate: false,
        ..BackdropParams::default()
    })
    .unwrap();
    assert_eq!(backdrop.hydration(), Hydration::Hydrated);
}

#[test]
fn hydrate_is_one_way_and_idempotent() {
    let mut backdrop = Backdrop::new(BackdropParams::default()).unwrap();
    backdrop.hydrate();
    backdrop.hydrate();
    assert_eq!(backdrop.hydration(), Hydration::Hydrated);
}

#[test]
fn invalid_view_box_is_rejected() {
    let params = BackdropParams {
        view_box: crate::foundation::core::ViewBox {
            width: 0.0,
            height: 800.0,
        },
        ..BackdropParams::default()
    };
    assert!(Backdrop::new(params).is_err());
}

#[test]
fn live_paths_respond_to_the_clock() {
    let mut backdrop = Backdrop::new(BackdropParams::default()).unwrap();
    backdrop.hydrate();
    let a = backdrop.scene(clock_after(0));
    let b = backdrop.scene(clock_after(1));
    assert_ne!(a.waves[0].path, b.waves[0].path);
}
