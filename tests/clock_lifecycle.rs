use std::time::{Duration, Instant};

use serpentine::{Backdrop, BackdropParams, ClockHandle, TICK_INCREMENT};

#[test]
fn timer_advances_in_tick_increments() {
    let handle = ClockHandle::spawn_with_period(Duration::from_millis(1));

    let deadline = Instant::now() + Duration::from_secs(5);
    while handle.phase_shift() < TICK_INCREMENT * 3.0 {
        assert!(Instant::now() < deadline, "timer never ticked");
        std::thread::sleep(Duration::from_millis(1));
    }

    let phase = handle.stop().phase_shift();
    let ticks = phase / TICK_INCREMENT;
    assert!((ticks - ticks.round()).abs() < 1e-9);
}

#[test]
fn mounted_backdrop_unmount_freezes_the_phase() {
    let backdrop = Backdrop::new(BackdropParams::default()).unwrap();
    let (_, mounted) = backdrop.mount();

    std::thread::sleep(Duration::from_millis(120));
    let observed = mounted.phase_shift();
    let frozen = mounted.unmount();

    assert!(frozen.phase_shift() >= observed);
    assert!(frozen.phase_shift() >= TICK_INCREMENT);
}

#[test]
fn dropping_the_handle_stops_the_timer_thread() {
    let handle = ClockHandle::spawn_with_period(Duration::from_millis(1));
    drop(handle);
}
