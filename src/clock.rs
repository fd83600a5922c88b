use std::{
    sync::{Arc, Condvar, Mutex, PoisonError},
    thread,
    time::Duration,
};

/// Timer period driving the backdrop clock.
pub const TICK_PERIOD: Duration = Duration::from_millis(50);

/// Phase advance applied on every tick.
///
/// One tick per 50 ms at 0.05 per tick means `phase_shift` tracks elapsed
/// seconds at the nominal rate.
pub const TICK_INCREMENT: f64 = 0.05;

/// The single piece of mutable backdrop state: a monotonically increasing
/// phase scalar.
///
/// The clock itself is pure data; advancing it on a timer is the job of
/// [`ClockHandle`]. Tests drive [`AnimationClock::tick`] directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationClock {
    phase_shift: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase value, in "seconds at nominal tick rate".
    pub fn phase_shift(self) -> f64 {
        self.phase_shift
    }

    /// Advance by one tick. Strictly increasing; never reordered or undone.
    pub fn tick(&mut self) {
        self.phase_shift += TICK_INCREMENT;
    }
}

#[derive(Debug)]
struct Shared {
    clock: Mutex<AnimationClock>,
    stop: Mutex<bool>,
    wake: Condvar,
}

/// Owning handle for the periodic timer that advances an [`AnimationClock`].
///
/// The timer thread is acquired when the handle is created and released
/// exactly once: either by [`ClockHandle::stop`] or by dropping the handle.
/// Both join the worker, so once they return no further tick can run and the
/// clock value is frozen.
#[derive(Debug)]
pub struct ClockHandle {
    shared: Arc<Shared>,
    join: Option<thread::JoinHandle<()>>,
}

impl ClockHandle {
    /// Spawn the timer at the canonical [`TICK_PERIOD`].
    pub fn spawn() -> Self {
        Self::spawn_with_period(TICK_PERIOD)
    }

    /// Spawn the timer with a custom period (tests use a short one).
    pub fn spawn_with_period(period: Duration) -> Self {
        let shared = Arc::new(Shared {
            clock: Mutex::new(AnimationClock::new()),
            stop: Mutex::new(false),
            wake: Condvar::new(),
        });

        let worker = Arc::clone(&shared);
        let join = thread::Builder::new()
            .name("serpentine-clock".into())
            .spawn(move || run_timer(&worker, period))
            .ok();

        Self { shared, join }
    }

    /// Read the clock without stopping it.
    pub fn clock(&self) -> AnimationClock {
        *self
            .shared
            .clock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Current phase value.
    pub fn phase_shift(&self) -> f64 {
        self.clock().phase_shift()
    }

    /// Stop the timer and return the final, frozen clock.
    ///
    /// Synchronous: the worker thread is signalled and joined before this
    /// returns, so no tick fires afterwards.
    pub fn stop(mut self) -> AnimationClock {
        self.shutdown();
        self.clock()
    }

    fn shutdown(&mut self) {
        {
            let mut stop = self
                .shared
                .stop
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *stop = true;
        }
        self.shared.wake.notify_all();
        if let Some(join) = self.join.take() {
            let _ = join.join();
            tracing::debug!("clock timer released");
        }
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_timer(shared: &Shared, period: Duration) {
    let mut stop = shared
        .stop
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    loop {
        // Condvar wait doubles as the periodic sleep so a stop request wakes
        // the worker immediately instead of after a full period.
        let (guard, timeout) = shared
            .wake
            .wait_timeout(stop, period)
            .unwrap_or_else(PoisonError::into_inner);
        stop = guard;
        if *stop {
            return;
        }
        if timeout.timed_out() {
            let mut clock = shared
                .clock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            clock.tick();
        }
    }
}
