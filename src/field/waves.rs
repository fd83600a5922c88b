use std::f64::consts::PI;

use crate::foundation::{
    core::{BezPath, Point, Vec2},
    error::{SerpentineError, SerpentineResult},
};

/// Number of wave groups (visual bands).
pub const GROUP_COUNT: usize = 3;

/// Number of layers per group.
pub const LAYERS_PER_GROUP: usize = 15;

/// First sampled x coordinate (200 units left of the view box).
pub const SAMPLE_START_X: f64 = -200.0;

/// Last sampled x coordinate (200 units right of the 2880-unit view box).
pub const SAMPLE_END_X: f64 = 3080.0;

/// Horizontal sampling step.
pub const SAMPLE_STEP_X: f64 = 20.0;

/// On-curve points per sampled path: `(3080 - (-200)) / 20 + 1`.
pub const SAMPLES_PER_PATH: usize = 171;

/// One of the three visual wave bands.
///
/// Each band has its own baseline, spatial frequency, phase spacing and hue
/// ramp, so the bands read as distinct sheets of waves.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum WaveGroup {
    /// Topmost band; blue-to-purple hues, fastest spatial frequency.
    Upper,
    /// Middle band; purple-to-cyan hues.
    Mid,
    /// Bottom band; teal-to-deep-blue hues, widest drift path.
    Lower,
}

impl WaveGroup {
    /// All groups in paint order (upper is painted first).
    pub const ALL: [WaveGroup; GROUP_COUNT] = [WaveGroup::Upper, WaveGroup::Mid, WaveGroup::Lower];

    /// Fixed per-group parameters.
    pub fn params(self) -> GroupParams {
        match self {
            WaveGroup::Upper => GroupParams {
                base_y: 500.0,
                frequency: 0.003,
                phase_step: 0.2,
                phase_offset: 0.0,
                fade_delay_s: 0.0,
                drift_ctrl: Vec2::new(40.0, 5.0),
                drift_mid: Vec2::new(80.0, 0.0),
                drift_end: Vec2::new(160.0, 0.0),
                drift_base_period_s: 10.0,
                drift_period_step_s: 0.3,
                // The upper band re-samples on a fixed fast cycle instead of
                // a per-layer one.
                breathe_base_period_s: 0.1,
                breathe_period_step_s: 0.0,
            },
            WaveGroup::Mid => GroupParams {
                base_y: 550.0,
                frequency: 0.0015,
                phase_step: 0.2,
                phase_offset: PI,
                fade_delay_s: 0.5,
                drift_ctrl: Vec2::new(40.0, 5.0),
                drift_mid: Vec2::new(80.0, 0.0),
                drift_end: Vec2::new(160.0, 0.0),
                drift_base_period_s: 12.0,
                drift_period_step_s: 0.3,
                breathe_base_period_s: 8.0,
                breathe_period_step_s: 0.3,
            },
            WaveGroup::Lower => GroupParams {
                base_y: 600.0,
                frequency: 0.00125,
                phase_step: 0.15,
                phase_offset: PI * 0.5,
                fade_delay_s: 0.7,
                drift_ctrl: Vec2::new(60.0, 6.0),
                drift_mid: Vec2::new(120.0, 0.0),
                drift_end: Vec2::new(240.0, 0.0),
                drift_base_period_s: 14.0,
                drift_period_step_s: 0.4,
                breathe_base_period_s: 9.0,
                breathe_period_step_s: 0.35,
            },
        }
    }

    /// Stable lowercase name, used for gradient ids and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            WaveGroup::Upper => "upper",
            WaveGroup::Mid => "mid",
            WaveGroup::Lower => "lower",
        }
    }
}

/// Per-group wave parameters; layers derive from these plus their index.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct GroupParams {
    /// Baseline of layer 0; layer `i` sits at `base_y + 4*i`.
    pub base_y: f64,
    /// Spatial frequency of the sine, in radians per x unit.
    pub frequency: f64,
    /// Phase spacing between adjacent layers.
    pub phase_step: f64,
    /// Phase offset shared by the whole group.
    pub phase_offset: f64,
    /// Fade-in delay of layer 0; layer `i` adds `0.03*i`.
    pub fade_delay_s: f64,
    /// Control point of the first quad of the drift loop path.
    pub drift_ctrl: Vec2,
    /// End of the first quad (the smooth second quad mirrors the control).
    pub drift_mid: Vec2,
    /// End of the drift loop path.
    pub drift_end: Vec2,
    /// Drift period of layer 0.
    pub drift_base_period_s: f64,
    /// Drift period increase per layer index.
    pub drift_period_step_s: f64,
    /// Breathe (re-sampling) period of layer 0.
    pub breathe_base_period_s: f64,
    /// Breathe period increase per layer index.
    pub breathe_period_step_s: f64,
}

/// One derived wave curve: everything needed to sample and animate it.
///
/// Immutable per frame; recomputed from `(group, index)` alone.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WaveLayer {
    pub group: WaveGroup,
    /// Layer index within the group, `[0, 15)`.
    pub index: usize,
    /// `base_y + 4*index`; strictly increases with the index.
    pub baseline: f64,
    /// `40 - 0.5*index`; strictly decreases with the index.
    pub amplitude: f64,
    /// Spatial frequency of the sine.
    pub frequency: f64,
    /// `phase_step*index + group phase offset`.
    pub phase: f64,
    /// `0.85 - 0.02*index`; independent of time.
    pub stroke_opacity: f64,
    /// Group base delay plus `0.03*index`.
    pub fade_delay_s: f64,
    /// Period of the drift loop.
    pub drift_period_s: f64,
    /// Period of the breathe loop.
    pub breathe_period_s: f64,
}

impl WaveLayer {
    /// Derive the layer for `(group, index)`; `index` must be below
    /// [`LAYERS_PER_GROUP`].
    pub fn derive(group: WaveGroup, index: usize) -> SerpentineResult<Self> {
        if index >= LAYERS_PER_GROUP {
            return Err(SerpentineError::validation(format!(
                "wave layer index {index} out of range [0, {LAYERS_PER_GROUP})"
            )));
        }
        let p = group.params();
        let i = index as f64;
        Ok(Self {
            group,
            index,
            baseline: p.base_y + 4.0 * i,
            amplitude: 40.0 - 0.5 * i,
            frequency: p.frequency,
            phase: p.phase_step * i + p.phase_offset,
            stroke_opacity: 0.85 - 0.02 * i,
            fade_delay_s: p.fade_delay_s + 0.03 * i,
            drift_period_s: p.drift_base_period_s + p.drift_period_step_s * i,
            breathe_period_s: p.breathe_base_period_s + p.breathe_period_step_s * i,
        })
    }

    /// Closed-form curve height at `x` for a given clock phase.
    pub fn y_at(&self, x: f64, phase_shift: f64) -> f64 {
        self.baseline + self.amplitude * (self.frequency * x + self.phase + phase_shift).sin()
    }

    /// Sample the curve into a polyline across the extended horizontal extent.
    ///
    /// Produces [`SAMPLES_PER_PATH`] on-curve points at `x = -200, -180, ...,
    /// 3080`. A polyline, not a spline: consecutive samples are joined by
    /// straight segments; at 20-unit spacing the bend per segment is below
    /// one unit anyway.
    pub fn sample_path(&self, phase_shift: f64) -> BezPath {
        let mut path = BezPath::new();
        let mut x = SAMPLE_START_X;
        path.move_to(Point::new(x, self.y_at(x, phase_shift)));
        while x < SAMPLE_END_X {
            x += SAMPLE_STEP_X;
            path.line_to(Point::new(x, self.y_at(x, phase_shift)));
        }
        path
    }
}

/// All 45 layers in paint order (group-major, then by index).
pub fn layers() -> Vec<WaveLayer> {
    let mut out = Vec::with_capacity(GROUP_COUNT * LAYERS_PER_GROUP);
    for group in WaveGroup::ALL {
        for index in 0..LAYERS_PER_GROUP {
            // Index is in range by construction, so derive cannot fail.
            if let Ok(layer) = WaveLayer::derive(group, index) {
                out.push(layer);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/field/waves.rs"]
mod tests;
