//! Serpentine is a procedural backdrop renderer: layered sine-wave bands plus
//! a drifting particle field, derived deterministically from an animation
//! clock and rendered behind arbitrary foreground content.
//!
//! # Pipeline overview
//!
//! 1. **Clock**: a periodic timer advances [`AnimationClock`] by a fixed
//!    increment (one tick per 50 ms, `phase_shift += 0.05`).
//! 2. **Compose**: `Backdrop + clock -> Scene`, a pure, immutable description
//!    of every drawable primitive (wave polylines, gradients, particles).
//! 3. **Render**: a thin adapter turns the [`Scene`] into output, either SVG markup
//!    ([`scene_to_svg`]) or premultiplied RGBA8 pixels ([`CpuRenderer`]).
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: every derived entity (layer geometry,
//!   gradient colors, particle placement) is an index-pure function; the same
//!   clock value always composes the same scene.
//! - **No IO in composition**: only the render adapters and the CLI touch the
//!   filesystem.
//! - **Scoped timer lifetime**: the animation timer is an explicit handle that
//!   is released exactly once; no tick fires after `unmount()` returns.
#![forbid(unsafe_code)]

mod backdrop;
mod clock;
mod field;
mod foundation;
mod render;
mod scene;

pub use backdrop::{Backdrop, BackdropParams, Hydration, MountedBackdrop};
pub use clock::{AnimationClock, ClockHandle, TICK_INCREMENT, TICK_PERIOD};
pub use field::gradient::{ChannelRamp, ColorRamp, GradientStops, gradient_id, stops};
pub use field::particles::{OpacityPulse, Oscillation, PARTICLE_COUNT, Particle, particles};
pub use field::waves::{
    GROUP_COUNT, GroupParams, LAYERS_PER_GROUP, SAMPLES_PER_PATH, WaveGroup, WaveLayer, layers,
};
pub use foundation::core::{Rgb, ViewBox};
pub use foundation::error::{SerpentineError, SerpentineResult};
pub use render::cpu::CpuRenderer;
pub use render::svg::scene_to_svg;
pub use render::{FrameRGBA, RenderSettings, render_ticks};
pub use scene::model::{Background, DriftPath, FadeIn, Scene, WaveMotion, WaveNode};
