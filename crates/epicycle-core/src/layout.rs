//! World-space geometry consumed by renderers.
//!
//! Coordinates are in the same length unit as the tooth pitch, with the
//! train axis at the origin and angles measured counter-clockwise from +x.

use std::f64::consts::TAU;

use nalgebra::{Point2, Vector2};

use crate::gear::Gear;
use crate::train::PlanetaryGearTrain;

/// Outline points emitted per tooth.
pub const POINTS_PER_TOOTH: usize = 6;

/// Margin applied to the ring rim when sizing the drawing area.
pub const WORLD_MARGIN: f64 = 1.05;

/// Sub-steps (in sixths of a tooth) and whether each sits on the tip radius.
const TOOTH_PROFILE: [(f64, bool); POINTS_PER_TOOTH] = [
    (0.0, true),
    (1.0, true),
    (2.0, false),
    (4.0, false),
    (5.0, true),
    (6.0, true),
];

/// Centre of planet `index`, one carrier pitch from the axis along its
/// carrier arm.
pub fn planet_center(train: &PlanetaryGearTrain, index: usize) -> Point2<f64> {
    let angle = train.planet_carrier_angle(index);
    Point2::origin() + Vector2::new(angle.cos(), angle.sin()) * train.carrier_pitch()
}

/// Centres of every planet, in planet order.
pub fn planet_centers(train: &PlanetaryGearTrain) -> Vec<Point2<f64>> {
    (0..train.number_of_planets())
        .map(|i| planet_center(train, i))
        .collect()
}

/// Closed silhouette of `gear` drawn about `center`.
///
/// Walks the circumference in `tooth_count` equal steps starting at the
/// gear's current position. Each tooth contributes six points alternating
/// between the tip radius `PCD/2 + p/3` and the root radius `PCD/2 - p/3`.
pub fn tooth_outline(gear: &Gear, center: Point2<f64>) -> Vec<Point2<f64>> {
    let teeth = gear.tooth_count() as usize;
    let tooth_angle = gear.tooth_angle();
    let sub_step = tooth_angle / 6.0;
    let pitch_radius = gear.pitch_circle_diameter() / 2.0;
    let tip = pitch_radius + gear.tooth_pitch() / 3.0;
    let root = pitch_radius - gear.tooth_pitch() / 3.0;

    let mut points = Vec::with_capacity(teeth * POINTS_PER_TOOTH);
    for tooth in 0..teeth {
        #[allow(clippy::cast_precision_loss)]
        let start = gear.position() + tooth as f64 * tooth_angle;
        for (step, on_tip) in TOOTH_PROFILE {
            let angle = sub_step.mul_add(step, start);
            let radius = if on_tip { tip } else { root };
            points.push(center + Vector2::new(angle.cos(), angle.sin()) * radius);
        }
    }
    points
}

/// Side of the square world region that contains the whole train.
pub fn world_extent(train: &PlanetaryGearTrain) -> f64 {
    let rim = train
        .ring()
        .outer_diameter()
        .unwrap_or_else(|| train.ring().pitch_circle_diameter());
    rim * WORLD_MARGIN
}

/// Angle wrapped to `[0, 2π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
