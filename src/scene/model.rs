use kurbo::{ParamCurve, QuadBez};

use crate::{
    field::gradient::GradientStops,
    field::particles::Particle,
    field::waves::WaveLayer,
    foundation::core::{BezPath, Point, Rgb, Vec2, ViewBox, fmt_num},
    foundation::error::{SerpentineError, SerpentineResult},
};

/// Full-viewport background: a base fill plus a vertical gradient overlay.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Background {
    /// Base fill behind everything.
    pub base: Rgb,
    /// Top color of the overlay gradient.
    pub gradient_top: Rgb,
    /// Bottom color of the overlay gradient.
    pub gradient_bottom: Rgb,
    /// Opacity of the overlay gradient.
    pub gradient_opacity: f64,
}

impl Default for Background {
    fn default() -> Self {
        // #050329 fading into #0B0636.
        Self {
            base: Rgb::new(5.0, 3.0, 41.0),
            gradient_top: Rgb::new(5.0, 3.0, 41.0),
            gradient_bottom: Rgb::new(11.0, 6.0, 54.0),
            gradient_opacity: 0.9,
        }
    }
}

/// One-shot fade applied to a layer on its first live paint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FadeIn {
    pub duration_s: f64,
    pub delay_s: f64,
}

impl FadeIn {
    /// Opacity multiplier at `t` seconds since going live; holds at 1 after
    /// the fade completes.
    pub fn factor_at(&self, t: f64) -> f64 {
        if self.duration_s <= 0.0 {
            return 1.0;
        }
        ((t - self.delay_s) / self.duration_s).clamp(0.0, 1.0)
    }
}

/// The short repeating drift loop a wave layer translates along.
///
/// Two joined quadratics: `M0,0 Q{ctrl} {mid} T{end}`, the second quad's
/// control point being the reflection of the first through `mid` (the SVG
/// smooth-quad rule).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DriftPath {
    pub ctrl: Vec2,
    pub mid: Vec2,
    pub end: Vec2,
}

impl DriftPath {
    /// Translate offset at normalized loop position `u` in `[0, 1)`.
    pub fn offset_at(&self, u: f64) -> Vec2 {
        let u = u.rem_euclid(1.0);
        let origin = Point::ZERO;
        let mid = origin + self.mid;
        let p = if u < 0.5 {
            QuadBez::new(origin, origin + self.ctrl, mid).eval(u * 2.0)
        } else {
            // Smooth continuation: control reflected through the joint.
            let reflected = mid + (self.mid - self.ctrl);
            QuadBez::new(mid, reflected, origin + self.end).eval(u * 2.0 - 1.0)
        };
        p - origin
    }

    /// SVG path `d` form of the loop.
    pub fn to_svg_d(&self) -> String {
        format!(
            "M0,0 Q{},{} {},{} T{},{}",
            fmt_num(self.ctrl.x),
            fmt_num(self.ctrl.y),
            fmt_num(self.mid.x),
            fmt_num(self.mid.y),
            fmt_num(self.end.x),
            fmt_num(self.end.y),
        )
    }
}

/// Looping motion attached to a wave layer once the scene is live.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WaveMotion {
    /// Drift loop geometry.
    pub drift: DriftPath,
    /// Drift loop period.
    pub drift_period_s: f64,
    /// Re-sampling loop period. The authoritative wave motion is the
    /// closed-form sine shifted by the clock; this loop is a declarative
    /// embellishment carried for the SVG adapter.
    pub breathe_period_s: f64,
}

/// One drawable wave curve with its paint and motion data.
#[derive(Clone, Debug, serde::Serialize)]
pub struct WaveNode {
    /// Derived layer parameters.
    pub layer: WaveLayer,
    /// Two-stop horizontal gradient endpoints.
    pub gradient: GradientStops,
    /// Sampled polyline at this scene's clock value.
    pub path: BezPath,
    /// Stroke width in scene units.
    pub stroke_width: f64,
    /// First-paint fade.
    pub fade: FadeIn,
    /// Present only in live scenes.
    pub motion: Option<WaveMotion>,
}

/// An immutable description of one backdrop frame.
///
/// Produced by [`crate::Backdrop::scene`]; consumed by the render adapters.
/// Everything inside is derived data; recomposing with the same inputs
/// yields an identical scene.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Scene {
    /// Logical coordinate space.
    pub view_box: ViewBox,
    /// Background fills.
    pub background: Background,
    /// Clock value the scene was composed at (0 for pre-hydration scenes).
    pub phase_shift: f64,
    /// Whether time-driven animation is active.
    pub live: bool,
    /// The 45 wave curves in paint order.
    pub waves: Vec<WaveNode>,
    /// The particle field; empty until the scene is live.
    pub particles: Vec<Particle>,
}

impl Scene {
    /// Serialize the scene as JSON, for snapshotting or host interop.
    pub fn to_json(&self) -> SerpentineResult<String> {
        serde_json::to_string(self).map_err(|e| SerpentineError::serde(e.to_string()))
    }
}
