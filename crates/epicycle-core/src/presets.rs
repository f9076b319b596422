//! Ready-made gear train configurations.

use crate::mode::{SizeInput, SpeedInput};
use crate::train::{DEFAULT_TOOTH_PITCH, TrainSpec};

/// The start-up scenario of the animation: 28-tooth sun, 17-tooth planets,
/// sun and carrier counter-rotating at 0.4 rad/s, five planets.
pub const fn demo() -> TrainSpec {
    TrainSpec::new(SizeInput::sun_planet(28, 17), SpeedInput::sun_carrier(-0.4, 0.4))
        .with_tooth_pitch(DEFAULT_TOOTH_PITCH)
        .with_planets(5)
}

/// Sun 20, ring 40, six planets. Meshes cleanly; ring held, carrier driven.
pub const fn balanced_six() -> TrainSpec {
    TrainSpec::new(SizeInput::sun_ring(20, 40), SpeedInput::carrier_ring(0.3, 0.0))
        .with_planets(6)
}

/// Reduction stage with a stationary ring, driven from the sun.
///
/// Speed mode 3 with ring speed 0; the carrier turns at
/// `sun_speed · Ns / (Ns + Nr)`.
pub fn fixed_ring(sun: u32, planet: u32, planets: usize, sun_speed: f64) -> TrainSpec {
    let ns = f64::from(sun);
    let nr = 2.0f64.mul_add(f64::from(planet), ns);
    let carrier = sun_speed * ns / (ns + nr);
    TrainSpec::new(
        SizeInput::sun_planet(sun, planet),
        SpeedInput::carrier_ring(carrier, 0.0),
    )
    .with_planets(planets)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, TrainError};

    #[test]
    fn demo_builds() {
        let t = demo().with_strict_mesh(true).build().unwrap();
        assert!(t.mesh_feasible());
        assert_eq!(t.ring().tooth_count(), 62);
    }

    #[test]
    fn demo_with_four_planets_is_infeasible_when_strict() {
        assert!(demo().with_planets(4).with_strict_mesh(true).build().is_err());
    }

    #[test]
    fn balanced_six_is_feasible() {
        let t = balanced_six().with_strict_mesh(true).build().unwrap();
        assert_eq!(t.tooth_counts().planet, 10);
        assert!(t.ring().angular_speed().abs() < f64::EPSILON);
    }

    #[test]
    fn fixed_ring_with_oversized_teeth_is_an_error() {
        let err = fixed_ring(u32::MAX, u32::MAX, 3, 1.0).build().unwrap_err();
        assert!(matches!(
            err,
            TrainError::DegenerateGeometry(GeometryError::ToothCount { member: "ring", .. })
        ));
    }

    #[test]
    fn fixed_ring_reproduces_sun_speed() {
        let t = fixed_ring(24, 12, 4, 1.5).build().unwrap();
        assert!((t.sun().angular_speed() - 1.5).abs() < 1e-9);
        assert!(t.ring().angular_speed().abs() < f64::EPSILON);
        assert!(t.mesh_feasible());
    }
}
