use crate::{
    clock::{AnimationClock, ClockHandle},
    field::{gradient, particles, waves},
    foundation::core::ViewBox,
    foundation::error::SerpentineResult,
    scene::model::{Background, DriftPath, FadeIn, Scene, WaveMotion, WaveNode},
};

/// Stroke width of every wave curve, in scene units.
const WAVE_STROKE_WIDTH: f64 = 0.7;

/// Duration of each layer's first-paint fade.
const FADE_DURATION_S: f64 = 1.0;

/// Backdrop configuration.
///
/// The backdrop takes no inputs at runtime; these parameters only adapt it to
/// its host (view box, whether a pre-interactive render phase exists).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BackdropParams {
    /// Logical coordinate space, stretched to fill the host surface.
    #[serde(default)]
    pub view_box: ViewBox,
    /// When `true` (the default), the backdrop starts in the pre-hydration
    /// state and suppresses all time-driven output until [`Backdrop::hydrate`]
    /// runs. Hosts with no server-render phase set this to `false` and the
    /// two-phase contract collapses to a no-op.
    #[serde(default = "default_hydration_gate")]
    pub hydration_gate: bool,
    /// Background fills.
    #[serde(default)]
    pub background: Background,
}

fn default_hydration_gate() -> bool {
    true
}

impl Default for BackdropParams {
    fn default() -> Self {
        Self {
            view_box: ViewBox::CANONICAL,
            hydration_gate: true,
            background: Background::default(),
        }
    }
}

impl BackdropParams {
    /// Validate parameter invariants.
    pub fn validate(&self) -> SerpentineResult<()> {
        self.view_box.validate()
    }
}

/// Hydration state machine: one-way `Pre -> Hydrated`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Hydration {
    /// Initial, possibly server-produced render phase: static geometry only,
    /// no particles, no motion, clock-independent output.
    Pre,
    /// Live phase: looping motion active, particles visible.
    Hydrated,
}

/// The procedural background renderer.
///
/// Owns no timer itself; [`Backdrop::scene`] is a pure function of the
/// hydration state and a clock value. [`Backdrop::mount`] wires in the
/// periodic timer and flips the hydration gate.
#[derive(Clone, Debug)]
pub struct Backdrop {
    params: BackdropParams,
    hydration: Hydration,
}

impl Backdrop {
    pub fn new(params: BackdropParams) -> SerpentineResult<Self> {
        params.validate()?;
        let hydration = if params.hydration_gate {
            Hydration::Pre
        } else {
            Hydration::Hydrated
        };
        Ok(Self { params, hydration })
    }

    pub fn params(&self) -> &BackdropParams {
        &self.params
    }

    pub fn hydration(&self) -> Hydration {
        self.hydration
    }

    /// Flip the one-way hydration gate. Idempotent; there is no way back.
    pub fn hydrate(&mut self) {
        self.hydration = Hydration::Hydrated;
    }

    /// Compose the scene for a clock value.
    ///
    /// Pre-hydration scenes ignore the clock entirely, so repeated renders
    /// are byte-identical regardless of timer state.
    #[tracing::instrument(skip(self, clock))]
    pub fn scene(&self, clock: AnimationClock) -> Scene {
        let live = self.hydration == Hydration::Hydrated;
        let phase_shift = if live { clock.phase_shift() } else { 0.0 };

        let wave_nodes = waves::layers()
            .into_iter()
            .map(|layer| {
                let group = layer.group.params();
                let motion = live.then(|| WaveMotion {
                    drift: DriftPath {
                        ctrl: group.drift_ctrl,
                        mid: group.drift_mid,
                        end: group.drift_end,
                    },
                    drift_period_s: layer.drift_period_s,
                    breathe_period_s: layer.breathe_period_s,
                });
                WaveNode {
                    gradient: gradient_stops_for(&layer),
                    path: layer.sample_path(phase_shift),
                    stroke_width: WAVE_STROKE_WIDTH,
                    fade: FadeIn {
                        duration_s: FADE_DURATION_S,
                        delay_s: layer.fade_delay_s,
                    },
                    motion,
                    layer,
                }
            })
            .collect();

        Scene {
            view_box: self.params.view_box,
            background: self.params.background,
            phase_shift,
            live,
            waves: wave_nodes,
            particles: if live {
                particles::particles()
            } else {
                Vec::new()
            },
        }
    }

    /// Begin the animation clock.
    ///
    /// Returns the initial scene (pre-hydration when the gate is on) plus the
    /// mounted handle; the hydration gate flips as part of mounting, so the
    /// next [`MountedBackdrop::scene`] call is live.
    pub fn mount(mut self) -> (Scene, MountedBackdrop) {
        let initial = self.scene(AnimationClock::new());
        self.hydrate();
        let clock = ClockHandle::spawn();
        (initial, MountedBackdrop {
            backdrop: self,
            clock,
        })
    }
}

/// A mounted backdrop: a hydrated [`Backdrop`] plus its running timer.
///
/// Dropping the handle releases the timer; [`MountedBackdrop::unmount`] does
/// the same and hands back the frozen clock.
#[derive(Debug)]
pub struct MountedBackdrop {
    backdrop: Backdrop,
    clock: ClockHandle,
}

impl MountedBackdrop {
    /// Compose the scene at the current clock value.
    pub fn scene(&self) -> Scene {
        self.backdrop.scene(self.clock.clock())
    }

    /// Current clock phase.
    pub fn phase_shift(&self) -> f64 {
        self.clock.phase_shift()
    }

    /// Cancel the timer and return the frozen clock.
    ///
    /// Synchronous: no tick fires and no rendering state mutates after this
    /// returns.
    pub fn unmount(self) -> AnimationClock {
        self.clock.stop()
    }
}

fn gradient_stops_for(layer: &waves::WaveLayer) -> gradient::GradientStops {
    // Layer indices come from layers(), so this lookup cannot fail.
    gradient::stops(layer.group, layer.index).unwrap_or(gradient::GradientStops {
        start: crate::foundation::core::Rgb::new(0.0, 0.0, 0.0),
        end: crate::foundation::core::Rgb::new(0.0, 0.0, 0.0),
    })
}

#[cfg(test)]
#[path = "../tests/unit/backdrop.rs"]
mod tests;
