use super::*;

#[test]
fn derive_is_index_pure() {
    for i in 0..PARTICLE_COUNT {
        assert_eq!(Particle::derive(i).unwrap(), Particle::derive(i).unwrap());
    }
}

#[test]
fn derive_rejects_out_of_range_index() {
    assert!(Particle::derive(PARTICLE_COUNT).is_err());
}

#[test]
fn positions_stay_inside_the_band() {
    for p in particles() {
        assert!(p.left_pct >= 0.0 && p.left_pct < 100.0, "particle {}", p.index);
        assert!(p.top_pct >= 65.0 && p.top_pct < 100.0, "particle {}", p.index);
    }
}

#[test]
fn derived_fields_match_the_closed_forms() {
    let p = Particle::derive(17).unwrap();
    assert_eq!(p.size, ((17 % 3 + 1) as f64) * 0.5 + 0.5);
    assert_eq!(p.left_pct, 34.0);
    assert!((p.top_pct - (65.0 + (17.0 * 0.7) % 35.0)).abs() < 1e-12);
    assert!((p.base_opacity - 0.2).abs() < 1e-12);

    // duration = 10 + 17 % 10 = 17, delay = 17 % 5 = 2
    assert!((p.drift_x.amplitude - 20.0).abs() < 1e-12); // (17 % 6 - 3) * 10
    assert!((p.drift_x.period_s - 17.0 * 0.7).abs() < 1e-12);
    assert_eq!(p.drift_x.delay_s, 0.0);
    assert_eq!(p.drift_y.amplitude, -20.0); // -((17 % 4) + 1) * 10
    assert_eq!(p.drift_y.period_s, 17.0);
    assert_eq!(p.drift_y.delay_s, 2.0);
    assert!((p.pulse.period_s - 17.0 * 0.8).abs() < 1e-12);
    assert_eq!(p.pulse.delay_s, 1.0);
}

#[test]
fn oscillation_holds_before_delay_and_loops() {
    let osc = Oscillation {
        amplitude: 20.0,
        period_s: 4.0,
        delay_s: 2.0,
    };
    assert_eq!(osc.offset_at(0.0), 0.0);
    assert_eq!(osc.offset_at(1.999), 0.0);
    // Start of the loop, peak at the half period, back at the full period.
    assert!(osc.offset_at(2.0).abs() < 1e-9);
    assert!((osc.offset_at(4.0) - 20.0).abs() < 1e-9);
    assert!(osc.offset_at(6.0).abs() < 1e-9);
}

#[test]
fn pulse_oscillates_between_bounds() {
    let pulse = OpacityPulse {
        min: 0.1,
        max: 0.3,
        period_s: 8.0,
        delay_s: 0.0,
    };
    assert!((pulse.value_at(0.0) - 0.1).abs() < 1e-12);
    assert!((pulse.value_at(4.0) - 0.3).abs() < 1e-9);
    for k in 0..32 {
        let v = pulse.value_at(k as f64 * 0.5);
        assert!((0.1..=0.3).contains(&v));
    }
}
