use crate::{
    field::waves::{LAYERS_PER_GROUP, WaveGroup},
    foundation::core::Rgb,
    foundation::error::{SerpentineError, SerpentineResult},
};

/// Affine ramp for one color channel: `base + slope * index`, clamped to
/// `[0, 255]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChannelRamp {
    pub base: f64,
    pub slope: f64,
}

impl ChannelRamp {
    pub fn at(self, index: usize) -> f64 {
        (self.base + self.slope * index as f64).clamp(0.0, 255.0)
    }
}

/// Index-deterministic color ramp: three channel ramps evaluated together.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorRamp {
    pub r: ChannelRamp,
    pub g: ChannelRamp,
    pub b: ChannelRamp,
}

impl ColorRamp {
    const fn new(r: (f64, f64), g: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            r: ChannelRamp {
                base: r.0,
                slope: r.1,
            },
            g: ChannelRamp {
                base: g.0,
                slope: g.1,
            },
            b: ChannelRamp {
                base: b.0,
                slope: b.1,
            },
        }
    }

    pub fn at(self, index: usize) -> Rgb {
        Rgb::new(self.r.at(index), self.g.at(index), self.b.at(index))
    }
}

/// Endpoint colors of one layer's two-stop horizontal gradient.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStops {
    pub start: Rgb,
    pub end: Rgb,
}

// Ramp coefficients per group, low indices skewing blue/violet and higher
// indices trending toward each group's secondary hue.
const UPPER_START: ColorRamp = ColorRamp::new((40.0, 2.0), (10.0, 0.5), (220.0, -2.0));
const UPPER_END: ColorRamp = ColorRamp::new((170.0, -1.0), (30.0, 0.8), (210.0, -1.0));
const MID_START: ColorRamp = ColorRamp::new((140.0, 1.5), (40.0, 0.8), (200.0, -1.0));
const MID_END: ColorRamp = ColorRamp::new((20.0, 1.0), (150.0, 1.5), (210.0, -0.5));
const LOWER_START: ColorRamp = ColorRamp::new((20.0, 1.0), (140.0, 1.5), (180.0, -1.0));
const LOWER_END: ColorRamp = ColorRamp::new((10.0, 0.5), (50.0, 1.0), (160.0, -0.8));

/// Gradient endpoints for layer `index` of `group`.
///
/// Index-pure: the same `(group, index)` always yields the same colors.
pub fn stops(group: WaveGroup, index: usize) -> SerpentineResult<GradientStops> {
    if index >= LAYERS_PER_GROUP {
        return Err(SerpentineError::validation(format!(
            "gradient index {index} out of range [0, {LAYERS_PER_GROUP})"
        )));
    }
    let (start, end) = match group {
        WaveGroup::Upper => (UPPER_START, UPPER_END),
        WaveGroup::Mid => (MID_START, MID_END),
        WaveGroup::Lower => (LOWER_START, LOWER_END),
    };
    Ok(GradientStops {
        start: start.at(index),
        end: end.at(index),
    })
}

/// Stable SVG gradient element id for `(group, index)`.
pub fn gradient_id(group: WaveGroup, index: usize) -> String {
    format!("{}Gradient{}", group.name(), index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_are_index_pure() {
        for group in WaveGroup::ALL {
            for i in 0..LAYERS_PER_GROUP {
                assert_eq!(stops(group, i).unwrap(), stops(group, i).unwrap());
            }
        }
    }

    fn assert_rgb_close(got: Rgb, want: (f64, f64, f64)) {
        assert!((got.r - want.0).abs() < 1e-9, "r: {} vs {}", got.r, want.0);
        assert!((got.g - want.1).abs() < 1e-9, "g: {} vs {}", got.g, want.1);
        assert!((got.b - want.2).abs() < 1e-9, "b: {} vs {}", got.b, want.2);
    }

    #[test]
    fn upper_ramp_matches_its_coefficients() {
        let s = stops(WaveGroup::Upper, 3).unwrap();
        assert_rgb_close(s.start, (46.0, 11.5, 214.0));
        assert_rgb_close(s.end, (167.0, 32.4, 207.0));
    }

    #[test]
    fn lower_ramp_matches_its_coefficients() {
        let s = stops(WaveGroup::Lower, 10).unwrap();
        assert_rgb_close(s.start, (30.0, 155.0, 170.0));
        assert_rgb_close(s.end, (15.0, 60.0, 152.0));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert!(stops(WaveGroup::Mid, LAYERS_PER_GROUP).is_err());
    }

    #[test]
    fn gradient_ids_are_stable() {
        assert_eq!(gradient_id(WaveGroup::Upper, 0), "upperGradient0");
        assert_eq!(gradient_id(WaveGroup::Lower, 14), "lowerGradient14");
    }
}
