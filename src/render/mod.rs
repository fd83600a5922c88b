use rayon::prelude::*;

use crate::{
    backdrop::Backdrop,
    clock::AnimationClock,
    foundation::error::{SerpentineError, SerpentineResult},
};

pub mod cpu;
pub mod svg;

/// A rendered frame of **premultiplied** RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Raster output dimensions; the scene view box is stretched to fill them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
}

impl RenderSettings {
    pub fn validate(self) -> SerpentineResult<()> {
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if v == 0 || v > u32::from(u16::MAX) {
                return Err(SerpentineError::validation(format!(
                    "render {name} must be in [1, {}]",
                    u16::MAX
                )));
            }
        }
        Ok(())
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        // Half the canonical view box; the backdrop is decorative, so full
        // resolution is rarely needed.
        Self {
            width: 1440,
            height: 400,
        }
    }
}

/// Render `ticks` consecutive clock states in parallel.
///
/// Frame `k` is composed at the clock value reached after `k` ticks, exactly
/// as the live timer would have produced it. Workers each own a renderer so
/// gradient caches are not shared across threads.
pub fn render_ticks(
    backdrop: &Backdrop,
    ticks: u64,
    settings: RenderSettings,
) -> SerpentineResult<Vec<FrameRGBA>> {
    settings.validate()?;
    (0..ticks)
        .into_par_iter()
        .map_init(
            || cpu::CpuRenderer::new_unchecked(settings),
            |renderer, k| renderer.render(&backdrop.scene(clock_after(k))),
        )
        .collect()
}

fn clock_after(ticks: u64) -> AnimationClock {
    // Replays the tick accumulation rather than multiplying, so the phase
    // matches what the real timer would hold bit-for-bit.
    let mut clock = AnimationClock::new();
    for _ in 0..ticks {
        clock.tick();
    }
    clock
}
