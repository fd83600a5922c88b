use std::f64::consts::TAU;

use crate::foundation::error::{SerpentineError, SerpentineResult};

/// Number of particles in the field.
pub const PARTICLE_COUNT: usize = 50;

/// A smooth there-and-back positional loop.
///
/// The offset ramps from 0 out to `amplitude` and back over one `period_s`,
/// with a raised-cosine profile (ease-in-out at both ends), holding at 0
/// until `delay_s` has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Oscillation {
    pub amplitude: f64,
    pub period_s: f64,
    pub delay_s: f64,
}

impl Oscillation {
    /// Offset at `t` seconds since the loop became live.
    pub fn offset_at(&self, t: f64) -> f64 {
        if t < self.delay_s || self.period_s <= 0.0 {
            return 0.0;
        }
        let u = ((t - self.delay_s) / self.period_s).rem_euclid(1.0);
        self.amplitude * (0.5 - 0.5 * (TAU * u).cos())
    }
}

/// A looping opacity pulse between `min` and `max`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OpacityPulse {
    pub min: f64,
    pub max: f64,
    pub period_s: f64,
    pub delay_s: f64,
}

impl OpacityPulse {
    /// Opacity at `t` seconds since the loop became live.
    pub fn value_at(&self, t: f64) -> f64 {
        if t < self.delay_s || self.period_s <= 0.0 {
            return self.min;
        }
        let u = ((t - self.delay_s) / self.period_s).rem_euclid(1.0);
        self.min + (self.max - self.min) * (0.5 - 0.5 * (TAU * u).cos())
    }
}

/// One decorative drifting point, fully derived from its index.
///
/// Positions are percentages of the viewport; the field is confined to the
/// bottom 35% so it sits over the wave bands.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Particle {
    pub index: usize,
    /// Diameter in scene units: `((i % 3) + 1) * 0.5 + 0.5`.
    pub size: f64,
    /// Horizontal position in percent: `(i * 2) % 100`.
    pub left_pct: f64,
    /// Vertical position in percent: `65 + (i * 0.7) % 35`, always in `[65, 100)`.
    pub top_pct: f64,
    /// Resting opacity: `0.1 + (i % 4) * 0.1`.
    pub base_opacity: f64,
    /// Horizontal drift loop.
    pub drift_x: Oscillation,
    /// Vertical drift loop (negative amplitude: drifts upward).
    pub drift_y: Oscillation,
    /// Opacity pulse between 0.1 and 0.3.
    pub pulse: OpacityPulse,
}

impl Particle {
    /// Derive the particle for `index`; must be below [`PARTICLE_COUNT`].
    pub fn derive(index: usize) -> SerpentineResult<Self> {
        if index >= PARTICLE_COUNT {
            return Err(SerpentineError::validation(format!(
                "particle index {index} out of range [0, {PARTICLE_COUNT})"
            )));
        }
        let i = index;
        let duration = (10 + i % 10) as f64;
        let delay = (i % 5) as f64;
        Ok(Self {
            index,
            size: ((i % 3) + 1) as f64 * 0.5 + 0.5,
            left_pct: ((i * 2) % 100) as f64,
            top_pct: 65.0 + (i as f64 * 0.7) % 35.0,
            base_opacity: 0.1 + (i % 4) as f64 * 0.1,
            drift_x: Oscillation {
                amplitude: ((i % 6) as f64 - 3.0) * 10.0,
                period_s: duration * 0.7,
                delay_s: 0.0,
            },
            drift_y: Oscillation {
                amplitude: -(((i % 4) + 1) as f64) * 10.0,
                period_s: duration,
                delay_s: delay,
            },
            pulse: OpacityPulse {
                min: 0.1,
                max: 0.3,
                period_s: duration * 0.8,
                delay_s: delay * 0.5,
            },
        })
    }
}

/// The full particle field in index order.
pub fn particles() -> Vec<Particle> {
    let mut out = Vec::with_capacity(PARTICLE_COUNT);
    for index in 0..PARTICLE_COUNT {
        // Index is in range by construction, so derive cannot fail.
        if let Ok(p) = Particle::derive(index) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/field/particles.rs"]
mod tests;
