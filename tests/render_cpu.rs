use serpentine::{
    AnimationClock, Backdrop, BackdropParams, CpuRenderer, RenderSettings, render_ticks,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn clock_after(ticks: u64) -> AnimationClock {
    let mut clock = AnimationClock::new();
    for _ in 0..ticks {
        clock.tick();
    }
    clock
}

fn small_settings() -> RenderSettings {
    RenderSettings {
        width: 288,
        height: 80,
    }
}

#[test]
fn static_frame_has_the_backdrop_wash() {
    init_tracing();
    let backdrop = Backdrop::new(BackdropParams::default()).unwrap();
    let mut renderer = CpuRenderer::new(small_settings()).unwrap();
    let frame = renderer.render(&backdrop.scene(clock_after(0))).unwrap();

    assert_eq!(frame.width, 288);
    assert_eq!(frame.height, 80);
    assert_eq!(frame.data.len(), 288 * 80 * 4);
    assert!(frame.premultiplied);

    // Top-left pixel is the night-sky base blended with the wash, opaque.
    let px = &frame.data[..4];
    assert_eq!(px[3], 255);
    assert!(px[0] <= 16, "red channel {}", px[0]);
    assert!(px[2] >= 35 && px[2] <= 70, "blue channel {}", px[2]);
    assert!(px[2] > px[0]);
}

#[test]
fn live_frame_differs_from_the_static_one() {
    let mut backdrop = Backdrop::new(BackdropParams::default()).unwrap();
    let mut renderer = CpuRenderer::new(small_settings()).unwrap();
    let static_frame = renderer.render(&backdrop.scene(clock_after(0))).unwrap();

    backdrop.hydrate();
    // Well past every fade so the wave strokes are at full opacity.
    let live_frame = renderer.render(&backdrop.scene(clock_after(100))).unwrap();
    assert_ne!(static_frame.data, live_frame.data);
}

#[test]
fn rendering_is_deterministic() {
    let mut backdrop = Backdrop::new(BackdropParams::default()).unwrap();
    backdrop.hydrate();
    let scene = backdrop.scene(clock_after(40));

    let mut renderer = CpuRenderer::new(small_settings()).unwrap();
    let a = renderer.render(&scene).unwrap();
    let b = renderer.render(&scene).unwrap();
    assert_eq!(a.data, b.data);
}

#[test]
fn tick_sequence_renders_one_frame_per_tick() {
    let mut backdrop = Backdrop::new(BackdropParams::default()).unwrap();
    backdrop.hydrate();

    let frames = render_ticks(&backdrop, 4, small_settings()).unwrap();
    assert_eq!(frames.len(), 4);
    for frame in &frames {
        assert_eq!(frame.data.len(), 288 * 80 * 4);
    }
}

#[test]
fn zero_sized_settings_are_rejected() {
    assert!(
        CpuRenderer::new(RenderSettings {
            width: 0,
            height: 80
        })
        .is_err()
    );
}
