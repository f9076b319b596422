//! Tooth-count resolution and the closed-form epicyclic speed solver.
//!
//! # Kinematic Equations
//!
//! With `N` tooth counts and `ω` absolute angular speeds (s = sun,
//! p = planet, r = ring, c = carrier):
//!
//! ```text
//! Ns·ωs + Np·ωp = (Ns + Np)·ωc          sun/planet mesh
//! Nr·ωr = Np·ωp + (Nr − Np)·ωc          planet/ring mesh
//! ```
//!
//! Adding both gives `Ns·ωs + Nr·ωr = (Ns + Nr)·ωc`, which is how the
//! carrier (mode 2) or sun (mode 3) is found before the planet speed.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, TrainError};
use crate::mode::{SizeInput, SizeInputMode, SpeedInput, SpeedInputMode};

// ---------------------------------------------------------------------------
// ToothCounts
// ---------------------------------------------------------------------------

/// Resolved tooth counts. Always satisfies `ring = sun + 2 * planet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToothCounts {
    pub sun: u32,
    pub planet: u32,
    pub ring: u32,
}

impl ToothCounts {
    /// Derive the third tooth count from the two given by `input`.
    pub fn resolve(input: SizeInput) -> Result<Self, GeometryError> {
        let a = i64::from(input.a);
        let b = i64::from(input.b);
        let (sun, planet, ring) = match input.mode {
            SizeInputMode::SunPlanet => (a, b, a + 2 * b),
            SizeInputMode::SunRing => {
                if (b - a) % 2 != 0 {
                    return Err(GeometryError::NonIntegralPlanet {
                        sun: input.a,
                        ring: input.b,
                    });
                }
                (a, (b - a) / 2, b)
            }
            SizeInputMode::PlanetRing => (b - 2 * a, a, b),
        };
        Ok(Self {
            sun: positive_count("sun", sun)?,
            planet: positive_count("planet", planet)?,
            ring: positive_count("ring", ring)?,
        })
    }

    /// Whether `planets` evenly spaced planets can mesh with sun and ring at
    /// the same time: `(sun + ring) mod planets == 0`.
    pub fn mesh_feasible(&self, planets: usize) -> bool {
        if planets == 0 {
            return false;
        }
        (u64::from(self.sun) + u64::from(self.ring)) % planets as u64 == 0
    }
}

fn positive_count(member: &'static str, count: i64) -> Result<u32, GeometryError> {
    u32::try_from(count)
        .ok()
        .filter(|&n| n > 0)
        .ok_or(GeometryError::ToothCount { member, count })
}

// ---------------------------------------------------------------------------
// KinematicSolution
// ---------------------------------------------------------------------------

/// Angular speeds (rad/s) of every member, mutually consistent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicSolution {
    pub sun: f64,
    pub planet: f64,
    pub ring: f64,
    pub carrier: f64,
}

impl KinematicSolution {
    /// Solve the remaining two speeds from the two given by `input`.
    pub fn solve(counts: ToothCounts, input: SpeedInput) -> Result<Self, TrainError> {
        let (name_a, name_b) = match input.mode {
            SpeedInputMode::SunCarrier => ("sun", "carrier"),
            SpeedInputMode::SunRing => ("sun", "ring"),
            SpeedInputMode::CarrierRing => ("carrier", "ring"),
        };
        finite_speed(name_a, input.a)?;
        finite_speed(name_b, input.b)?;

        let ns = f64::from(counts.sun);
        let np = f64::from(counts.planet);
        let nr = f64::from(counts.ring);

        let solution = match input.mode {
            SpeedInputMode::SunCarrier => {
                let (sun, carrier) = (input.a, input.b);
                let planet = planet_speed(ns, np, sun, carrier);
                let ring = (nr - np).mul_add(carrier, np * planet) / nr;
                Self { sun, planet, ring, carrier }
            }
            SpeedInputMode::SunRing => {
                let (sun, ring) = (input.a, input.b);
                let carrier = ns.mul_add(sun, nr * ring) / (ns + nr);
                let planet = planet_speed(ns, np, sun, carrier);
                Self { sun, planet, ring, carrier }
            }
            SpeedInputMode::CarrierRing => {
                let (carrier, ring) = (input.a, input.b);
                let sun = (ns + nr).mul_add(carrier, -(nr * ring)) / ns;
                let planet = planet_speed(ns, np, sun, carrier);
                Self { sun, planet, ring, carrier }
            }
        };
        Ok(solution)
    }

    /// Left-minus-right of both mesh equations. Both are zero (to rounding)
    /// for any solution produced by [`solve`](Self::solve).
    pub fn residuals(&self, counts: ToothCounts) -> [f64; 2] {
        let ns = f64::from(counts.sun);
        let np = f64::from(counts.planet);
        let nr = f64::from(counts.ring);
        [
            ns.mul_add(self.sun, np * self.planet) - (ns + np) * self.carrier,
            nr.mul_add(self.ring, -(np * self.planet)) - (nr - np) * self.carrier,
        ]
    }

    /// The speed the given mode treats as derived on the {sun, carrier, ring}
    /// side: ring for mode 1, carrier for mode 2, sun for mode 3.
    pub const fn derived_member(&self, mode: SpeedInputMode) -> f64 {
        match mode {
            SpeedInputMode::SunCarrier => self.ring,
            SpeedInputMode::SunRing => self.carrier,
            SpeedInputMode::CarrierRing => self.sun,
        }
    }
}

/// `ωp = ((Ns + Np)·ωc − Ns·ωs) / Np`.
fn planet_speed(ns: f64, np: f64, sun: f64, carrier: f64) -> f64 {
    (ns + np).mul_add(carrier, -(ns * sun)) / np
}

fn finite_speed(name: &'static str, value: f64) -> Result<(), TrainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TrainError::InvalidSpeed { name, value })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
