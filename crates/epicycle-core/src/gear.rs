//! A single rotating toothed body: sun, ring, or planet.
//!
//! # Geometry
//!
//! All gears of one train share a tooth pitch `p`:
//! - Pitch circle diameter: `PCD = N * p / π`.
//! - Inner gears (sun, planets) carry a cosmetic hub of `0.15 * PCD`.
//! - The ring carries an outer rim of `PCD + 3p`.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Hub diameter as a fraction of the pitch circle diameter.
pub const HUB_FRACTION: f64 = 0.15;

/// Ring rim thickness, in tooth pitches, added to the pitch circle diameter.
pub const RING_RIM_PITCHES: f64 = 3.0;

// ---------------------------------------------------------------------------
// GearKind
// ---------------------------------------------------------------------------

/// Inner (external teeth) or outer (internal teeth) gear, with the derived
/// geometry specific to each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GearKind {
    /// Sun or planet.
    Inner { hub_diameter: f64 },
    /// Ring (annulus).
    Outer { outer_diameter: f64 },
}

// ---------------------------------------------------------------------------
// Gear
// ---------------------------------------------------------------------------

/// One gear of a planetary train.
///
/// Everything except `position` is fixed at construction. The position is
/// only written by the owning [`PlanetaryGearTrain`](crate::train::PlanetaryGearTrain).
#[derive(Debug, Clone, PartialEq)]
pub struct Gear {
    tooth_pitch: f64,
    tooth_count: u32,
    angular_speed: f64,
    pitch_circle_diameter: f64,
    position: f64,
    mesh_phase_correction: f64,
    kind: GearKind,
}

impl Gear {
    /// Sun or planet gear.
    pub fn inner(tooth_pitch: f64, tooth_count: u32, angular_speed: f64) -> Result<Self, GeometryError> {
        let pcd = pitch_circle_diameter(tooth_pitch, tooth_count)?;
        Ok(Self::with_kind(
            tooth_pitch,
            tooth_count,
            angular_speed,
            pcd,
            GearKind::Inner {
                hub_diameter: HUB_FRACTION * pcd,
            },
        ))
    }

    /// Ring gear.
    pub fn outer(tooth_pitch: f64, tooth_count: u32, angular_speed: f64) -> Result<Self, GeometryError> {
        let pcd = pitch_circle_diameter(tooth_pitch, tooth_count)?;
        Ok(Self::with_kind(
            tooth_pitch,
            tooth_count,
            angular_speed,
            pcd,
            GearKind::Outer {
                outer_diameter: RING_RIM_PITCHES.mul_add(tooth_pitch, pcd),
            },
        ))
    }

    const fn with_kind(
        tooth_pitch: f64,
        tooth_count: u32,
        angular_speed: f64,
        pitch_circle_diameter: f64,
        kind: GearKind,
    ) -> Self {
        Self {
            tooth_pitch,
            tooth_count,
            angular_speed,
            pitch_circle_diameter,
            position: 0.0,
            mesh_phase_correction: 0.0,
            kind,
        }
    }

    pub const fn tooth_pitch(&self) -> f64 {
        self.tooth_pitch
    }

    pub const fn tooth_count(&self) -> u32 {
        self.tooth_count
    }

    /// Constant angular speed (rad/s). Positive is counter-clockwise.
    pub const fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    pub const fn pitch_circle_diameter(&self) -> f64 {
        self.pitch_circle_diameter
    }

    /// Current angular position (rad). Not wrapped to one revolution.
    pub const fn position(&self) -> f64 {
        self.position
    }

    pub const fn mesh_phase_correction(&self) -> f64 {
        self.mesh_phase_correction
    }

    pub const fn kind(&self) -> GearKind {
        self.kind
    }

    /// Hub diameter, present on inner gears only.
    pub const fn hub_diameter(&self) -> Option<f64> {
        match self.kind {
            GearKind::Inner { hub_diameter } => Some(hub_diameter),
            GearKind::Outer { .. } => None,
        }
    }

    /// Rim diameter, present on the ring only.
    pub const fn outer_diameter(&self) -> Option<f64> {
        match self.kind {
            GearKind::Outer { outer_diameter } => Some(outer_diameter),
            GearKind::Inner { .. } => None,
        }
    }

    /// Angular pitch of one tooth (rad).
    pub fn tooth_angle(&self) -> f64 {
        TAU / f64::from(self.tooth_count)
    }

    /// Time for one revolution (s), signed like the speed. `None` when the
    /// gear is stationary.
    pub fn period(&self) -> Option<f64> {
        if self.angular_speed == 0.0 {
            None
        } else {
            Some(TAU / self.angular_speed)
        }
    }

    /// Absolute angle at `elapsed_secs` after animation start.
    ///
    /// Computed from total elapsed time rather than integrated, so repeated
    /// calls never accumulate drift. `None` when the gear is stationary.
    pub fn angle_at(&self, elapsed_secs: f64) -> Option<f64> {
        self.period()
            .map(|period| phase_angle(elapsed_secs, period, self.mesh_phase_correction))
    }

    pub(crate) const fn set_mesh_phase_correction(&mut self, correction: f64) {
        self.mesh_phase_correction = correction;
        self.position = correction;
    }

    /// Move to the angle for `elapsed_secs`; stationary gears keep their
    /// last position.
    pub(crate) fn advance_to(&mut self, elapsed_secs: f64) {
        if let Some(angle) = self.angle_at(elapsed_secs) {
            self.position = angle;
        }
    }
}

/// `2π · ((t / period) mod 1) + phase`.
///
/// The remainder is truncated, so a negative period (reverse rotation)
/// yields a fraction in `(-1, 0]`.
pub(crate) fn phase_angle(elapsed_secs: f64, period: f64, phase: f64) -> f64 {
    let fraction = (elapsed_secs / period) % 1.0;
    TAU.mul_add(fraction, phase)
}

fn pitch_circle_diameter(tooth_pitch: f64, tooth_count: u32) -> Result<f64, GeometryError> {
    if !tooth_pitch.is_finite() || tooth_pitch <= 0.0 {
        return Err(GeometryError::ToothPitch(tooth_pitch));
    }
    if tooth_count == 0 {
        return Err(GeometryError::ToothCount {
            member: "gear",
            count: 0,
        });
    }
    Ok(f64::from(tooth_count) * tooth_pitch / PI)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn pitch_circle_diameter_from_teeth() {
        let g = Gear::inner(0.032, 28, 0.0).unwrap();
        assert!((g.pitch_circle_diameter() - 28.0 * 0.032 / PI).abs() < EPS);
    }

    #[test]
    fn inner_gear_has_hub_only() {
        let g = Gear::inner(0.032, 17, 1.0).unwrap();
        let hub = g.hub_diameter().unwrap();
        assert!((hub - 0.15 * g.pitch_circle_diameter()).abs() < EPS);
        assert!(g.outer_diameter().is_none());
    }

    #[test]
    fn outer_gear_has_rim_only() {
        let g = Gear::outer(0.032, 62, 1.0).unwrap();
        let rim = g.outer_diameter().unwrap();
        assert!((rim - (g.pitch_circle_diameter() + 3.0 * 0.032)).abs() < EPS);
        assert!(g.hub_diameter().is_none());
    }

    #[test]
    fn new_gear_starts_at_zero() {
        let g = Gear::outer(0.01, 40, -2.0).unwrap();
        assert!(g.position().abs() < EPS);
        assert!(g.mesh_phase_correction().abs() < EPS);
    }

    #[test]
    fn rejects_non_positive_pitch() {
        assert_eq!(
            Gear::inner(0.0, 10, 0.0).unwrap_err(),
            GeometryError::ToothPitch(0.0)
        );
        assert!(Gear::outer(-1.0, 10, 0.0).is_err());
        assert!(Gear::inner(f64::NAN, 10, 0.0).is_err());
    }

    #[test]
    fn rejects_zero_teeth() {
        assert!(matches!(
            Gear::inner(0.032, 0, 0.0),
            Err(GeometryError::ToothCount { count: 0, .. })
        ));
    }

    #[test]
    fn stationary_gear_has_no_period() {
        let g = Gear::inner(0.032, 20, 0.0).unwrap();
        assert!(g.period().is_none());
        assert!(g.angle_at(12.5).is_none());
    }

    #[test]
    fn period_is_signed() {
        let g = Gear::inner(0.032, 20, -0.5).unwrap();
        assert!((g.period().unwrap() + TAU / 0.5).abs() < EPS);
    }

    #[test]
    fn angle_at_quarter_turn() {
        let g = Gear::inner(0.032, 20, TAU).unwrap();
        // One revolution per second: 0.25 s is a quarter turn.
        assert!((g.angle_at(0.25).unwrap() - TAU / 4.0).abs() < 1e-12);
    }

    #[test]
    fn reverse_gear_turns_negative() {
        let g = Gear::inner(0.032, 20, -TAU).unwrap();
        assert!((g.angle_at(0.25).unwrap() + TAU / 4.0).abs() < 1e-12);
    }

    #[test]
    fn advance_keeps_phase_correction() {
        let mut g = Gear::inner(0.032, 20, 1.0).unwrap();
        g.set_mesh_phase_correction(0.3);
        g.advance_to(0.0);
        assert!((g.position() - 0.3).abs() < EPS);
    }

    #[test]
    fn stationary_gear_keeps_position() {
        let mut g = Gear::outer(0.032, 40, 0.0).unwrap();
        g.set_mesh_phase_correction(0.2);
        g.advance_to(123.0);
        assert!((g.position() - 0.2).abs() < EPS);
    }

    #[test]
    fn tooth_angle_divides_revolution() {
        let g = Gear::inner(0.032, 16, 0.0).unwrap();
        assert!((g.tooth_angle() * 16.0 - TAU).abs() < EPS);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn gear_is_send_sync() {
        assert_send_sync::<Gear>();
    }
}
