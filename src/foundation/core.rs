use crate::foundation::error::{SerpentineError, SerpentineResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Logical coordinate space of a scene, mapped onto whatever surface renders it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewBox {
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Canonical backdrop viewport: 2880x800 units stretched to fill the host.
    pub const CANONICAL: ViewBox = ViewBox {
        width: 2880.0,
        height: 800.0,
    };

    pub fn validate(self) -> SerpentineResult<()> {
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SerpentineError::validation(format!(
                    "view box {name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// A straight-alpha RGB color with f64 channels in `[0, 255]`.
///
/// Channels stay fractional because the gradient ramps are affine functions of
/// the layer index (e.g. `10 + 0.5*i`); rounding happens only at the raster
/// edge via [`Rgb::to_rgba8`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 255.0),
            g: g.clamp(0.0, 255.0),
            b: b.clamp(0.0, 255.0),
        }
    }

    /// CSS `rgb(..)` form, fractional channels kept (browsers accept them).
    pub fn css(self) -> String {
        format!(
            "rgb({}, {}, {})",
            fmt_num(self.r),
            fmt_num(self.g),
            fmt_num(self.b)
        )
    }

    /// Straight-alpha RGBA8 with the given alpha in `[0, 1]`.
    pub fn to_rgba8(self, alpha: f64) -> [u8; 4] {
        let q = |c: f64| -> u8 { c.round().clamp(0.0, 255.0) as u8 };
        [
            q(self.r),
            q(self.g),
            q(self.b),
            (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// Format a scalar with at most two decimals and no trailing zeros.
///
/// Used for SVG attribute values, where `500` is preferred over `500.00`.
pub(crate) fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{rounded:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
