//! Integration test: solver and time-advance properties across many trains.
//!
//! Checks, over a deterministic sweep of tooth counts and speeds, that:
//! 1. Derived tooth counts always satisfy `ring = sun + 2·planet`
//! 2. All four speeds satisfy both mesh equations whatever the input mode
//! 3. Solving with one mode from another mode's output round-trips
//! 4. Angles are periodic in `2π/ω` and stationary members never move
//! 5. Planets are evenly spaced around the carrier

use std::f64::consts::{PI, TAU};

use epicycle_core::prelude::*;
use epicycle_test_utils::{assert_angle_close, assert_close, tooth_count_pairs};

const TOL: f64 = 1e-9;

const SPEED_PAIRS: [(f64, f64); 5] = [(-0.4, 0.4), (1.3, 0.0), (0.0, -0.75), (0.9, 0.9), (-1.7, 1.2)];

fn sweep() -> Vec<ToothCounts> {
    tooth_count_pairs(40, 12, 45, 2024)
        .into_iter()
        .map(|(sun, planet)| ToothCounts::resolve(SizeInput::sun_planet(sun, planet)).unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

#[test]
fn every_size_mode_agrees_on_counts() {
    for c in sweep() {
        let via_sun_ring = ToothCounts::resolve(SizeInput::sun_ring(c.sun, c.ring)).unwrap();
        let via_planet_ring = ToothCounts::resolve(SizeInput::planet_ring(c.planet, c.ring)).unwrap();
        assert_eq!(via_sun_ring, c);
        assert_eq!(via_planet_ring, c);
        assert_eq!(c.ring, c.sun + 2 * c.planet);
    }
}

// ---------------------------------------------------------------------------
// Speeds
// ---------------------------------------------------------------------------

#[test]
fn mesh_equations_hold_for_every_speed_mode() {
    for c in sweep() {
        for (a, b) in SPEED_PAIRS {
            for mode in SpeedInputMode::ALL {
                let s = KinematicSolution::solve(c, SpeedInput::new(mode, a, b)).unwrap();
                let [r1, r2] = s.residuals(c);
                assert!(r1.abs() < TOL && r2.abs() < TOL, "{c:?} {mode:?} -> {s:?}");
            }
        }
    }
}

#[test]
fn speed_modes_round_trip() {
    for c in sweep() {
        for (a, b) in SPEED_PAIRS {
            let from_sun_ring = KinematicSolution::solve(c, SpeedInput::sun_ring(a, b)).unwrap();
            let sun_carrier = KinematicSolution::solve(
                c,
                SpeedInput::sun_carrier(from_sun_ring.sun, from_sun_ring.carrier),
            )
            .unwrap();
            assert_close(sun_carrier.ring, b, TOL);
            assert_close(sun_carrier.planet, from_sun_ring.planet, TOL);

            let carrier_ring = KinematicSolution::solve(
                c,
                SpeedInput::carrier_ring(sun_carrier.carrier, sun_carrier.ring),
            )
            .unwrap();
            assert_close(carrier_ring.sun, a, TOL);
        }
    }
}

// ---------------------------------------------------------------------------
// Time advance
// ---------------------------------------------------------------------------

fn all_gears(train: &PlanetaryGearTrain) -> Vec<&Gear> {
    let mut gears = vec![train.sun(), train.ring()];
    gears.extend(train.planets());
    gears
}

#[test]
fn advance_zero_lands_on_phase_corrections() {
    let mut train = create_planetary_gear_train(1, 23, 19, 2, 0.8, -0.35, 0.025, 3).unwrap();
    train.advance(9_876.0);
    train.advance(0.0);
    for gear in all_gears(&train) {
        assert_close(gear.position(), gear.mesh_phase_correction(), 1e-12);
    }
    assert_close(train.carrier_position(), 0.0, 1e-12);
}

#[test]
fn angles_are_periodic() {
    let mut train = create_planetary_gear_train(1, 28, 17, 1, -0.4, 0.4, 0.032, 5).unwrap();
    let t_ms = 3_217.0;
    let gear_periods: Vec<f64> = all_gears(&train)
        .iter()
        .filter_map(|g| g.period())
        .collect();
    assert_eq!(gear_periods.len(), 7);

    train.advance(t_ms);
    let before: Vec<f64> = all_gears(&train).iter().map(|g| g.position()).collect();

    for (i, period) in gear_periods.iter().enumerate() {
        for k in [1.0, 3.0] {
            let mut later = train.clone();
            later.advance(t_ms + k * period.abs() * 1000.0);
            let gear = all_gears(&later)[i];
            assert_angle_close(gear.position(), before[i], 1e-9);
        }
    }

    let carrier_period = (TAU / train.carrier_speed()).abs();
    let carrier_before = train.carrier_position();
    train.advance(t_ms + 2.0 * carrier_period * 1000.0);
    assert_angle_close(train.carrier_position(), carrier_before, 1e-9);
}

#[test]
fn stationary_members_never_move() {
    // Sun held: speed mode 2 with sun speed 0.
    let mut train = create_planetary_gear_train(2, 24, 60, 2, 0.0, 0.5, 0.032, 3).unwrap();
    let sun_before = train.sun().position();
    for t in [0.0, 16.7, 1_000.0, 123_456.0] {
        train.advance(t);
        assert_close(train.sun().position(), sun_before, 1e-15);
    }
}

#[test]
fn advance_is_independent_of_call_history() {
    let mut stepped = presets::demo().build().unwrap();
    for frame in 0..240 {
        stepped.advance(f64::from(frame) * 16.7);
    }
    let mut jumped = presets::demo().build().unwrap();
    jumped.advance(239.0 * 16.7);
    assert_eq!(stepped.snapshot(), jumped.snapshot());
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[test]
fn planets_evenly_spaced() {
    for n in 1..=8 {
        let mut train = create_planetary_gear_train(1, 20, 16, 1, 0.3, 0.7, 0.032, n).unwrap();
        train.advance(4_321.0);
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / n as f64;
        for i in 0..n {
            let next = (i + 1) % n;
            let gap = train.planet_carrier_angle(next) - train.planet_carrier_angle(i);
            assert_angle_close(gap, step, 1e-12);
        }
    }
}

#[test]
fn demo_scenario_matches_hand_calculation() {
    let train = create_planetary_gear_train(1, 28, 17, 1, -0.4, 0.4, 0.032, 5).unwrap();
    assert_eq!(train.ring().tooth_count(), 62);
    // (28 + 62) = 90 = 18 · 5.
    assert!(train.mesh_feasible());

    let sun_pcd = 28.0 * 0.032 / PI;
    let planet_pcd = 17.0 * 0.032 / PI;
    assert_close(train.sun().pitch_circle_diameter(), sun_pcd, 1e-15);
    assert_close(train.planets()[0].pitch_circle_diameter(), planet_pcd, 1e-15);
    assert_close(train.carrier_pitch(), sun_pcd / 2.0 + planet_pcd / 2.0, 1e-15);

    let planet_speed = (45.0 * 0.4 - 28.0 * -0.4) / 17.0;
    let ring_speed = (45.0 * 0.4 + 17.0 * planet_speed) / 62.0;
    assert_close(train.speeds().planet, planet_speed, TOL);
    assert_close(train.ring().angular_speed(), ring_speed, TOL);
}

#[test]
fn sun_forty_ring_six_planets_is_feasible() {
    let train = TrainSpec::new(SizeInput::sun_ring(20, 40), SpeedInput::sun_carrier(1.0, 0.2))
        .with_planets(6)
        .with_strict_mesh(true)
        .build()
        .unwrap();
    assert_eq!(train.tooth_counts().planet, 10);
    assert!(train.mesh_feasible());
}

#[test]
fn snapshot_serializes_for_renderers() {
    let mut train = presets::balanced_six().build().unwrap();
    train.advance(500.0);
    let json = serde_json::to_value(train.snapshot()).unwrap();
    assert_eq!(json["planets"].as_array().unwrap().len(), 6);
    assert_eq!(json["ring"]["kind"], "outer");
    assert!(json["ring"]["outer_diameter"].is_f64());
    assert!(json["sun"]["hub_diameter"].is_f64());
    assert_eq!(json["mesh_feasible"], true);
}
