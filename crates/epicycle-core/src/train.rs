//! The planetary gear train aggregate: construction-time solver and
//! elapsed-time advance.
//!
//! # Construction
//!
//! ```text
//! SizeInput → ToothCounts → SpeedInput → KinematicSolution → mesh check → gears + phasing
//! ```
//!
//! # Advance
//!
//! Every member's angle is recomputed from total elapsed time since
//! animation start, so frames may be skipped or arrive late without drift.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, TrainError};
use crate::gear::{Gear, GearKind, phase_angle};
use crate::kinematics::{KinematicSolution, ToothCounts};
use crate::mode::{SizeInput, SizeInputMode, SpeedInput, SpeedInputMode};

/// Default tooth pitch (m).
pub const DEFAULT_TOOTH_PITCH: f64 = 0.032;

/// Default number of planets.
pub const DEFAULT_PLANETS: usize = 5;

// ---------------------------------------------------------------------------
// TrainSpec
// ---------------------------------------------------------------------------

/// Everything needed to build a [`PlanetaryGearTrain`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainSpec {
    pub size: SizeInput,
    pub speed: SpeedInput,
    pub tooth_pitch: f64,
    pub number_of_planets: usize,
    /// Reject mesh-infeasible geometry instead of warning.
    pub strict_mesh: bool,
}

impl TrainSpec {
    /// New spec with the default tooth pitch and planet count.
    pub const fn new(size: SizeInput, speed: SpeedInput) -> Self {
        Self {
            size,
            speed,
            tooth_pitch: DEFAULT_TOOTH_PITCH,
            number_of_planets: DEFAULT_PLANETS,
            strict_mesh: false,
        }
    }

    #[must_use]
    pub const fn with_tooth_pitch(mut self, tooth_pitch: f64) -> Self {
        self.tooth_pitch = tooth_pitch;
        self
    }

    #[must_use]
    pub const fn with_planets(mut self, number_of_planets: usize) -> Self {
        self.number_of_planets = number_of_planets;
        self
    }

    #[must_use]
    pub const fn with_strict_mesh(mut self, strict: bool) -> Self {
        self.strict_mesh = strict;
        self
    }

    /// Solve and build the train.
    pub fn build(&self) -> Result<PlanetaryGearTrain, TrainError> {
        PlanetaryGearTrain::new(self)
    }

    /// Check that [`build`](Self::build) would succeed without building
    /// any gears or logging.
    pub fn validate(&self) -> Result<(), TrainError> {
        self.solve().map(|_| ())
    }

    /// Resolve counts and speeds and run the mesh check. The returned flag
    /// is the mesh feasibility; in strict mode an infeasible mesh is an
    /// error instead.
    fn solve(&self) -> Result<(ToothCounts, KinematicSolution, bool), TrainError> {
        let pitch = self.tooth_pitch;
        if !pitch.is_finite() || pitch <= 0.0 {
            return Err(GeometryError::ToothPitch(pitch).into());
        }
        let n = self.number_of_planets;
        if n == 0 {
            return Err(GeometryError::NoPlanets.into());
        }

        let counts = ToothCounts::resolve(self.size)?;
        let speeds = KinematicSolution::solve(counts, self.speed)?;

        let mesh_feasible = counts.mesh_feasible(n);
        if !mesh_feasible && self.strict_mesh {
            return Err(TrainError::MeshInfeasible {
                sun: counts.sun,
                ring: counts.ring,
                planets: n,
            });
        }
        Ok((counts, speeds, mesh_feasible))
    }
}

/// Build a train from raw numeric modes (1, 2 or 3 each).
///
/// Mesh infeasibility is logged, not returned; use
/// [`TrainSpec::with_strict_mesh`] to make it an error.
#[allow(clippy::too_many_arguments)]
pub fn create_planetary_gear_train(
    size_input_mode: u8,
    size_a: u32,
    size_b: u32,
    speed_input_mode: u8,
    speed_a: f64,
    speed_b: f64,
    tooth_pitch: f64,
    number_of_planets: usize,
) -> Result<PlanetaryGearTrain, TrainError> {
    let size_mode = SizeInputMode::try_from(size_input_mode)?;
    let speed_mode = SpeedInputMode::try_from(speed_input_mode)?;
    TrainSpec::new(
        SizeInput::new(size_mode, size_a, size_b),
        SpeedInput::new(speed_mode, speed_a, speed_b),
    )
    .with_tooth_pitch(tooth_pitch)
    .with_planets(number_of_planets)
    .build()
}

// ---------------------------------------------------------------------------
// PlanetaryGearTrain
// ---------------------------------------------------------------------------

/// Sun, ring, evenly spaced planets and the carrier holding them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetaryGearTrain {
    sun: Gear,
    ring: Gear,
    planets: Vec<Gear>,
    carrier_speed: f64,
    carrier_position: f64,
    carrier_pitch: f64,
    counts: ToothCounts,
    speeds: KinematicSolution,
    size_mode: SizeInputMode,
    speed_mode: SpeedInputMode,
    mesh_feasible: bool,
}

impl PlanetaryGearTrain {
    /// Solve sizes and speeds, check meshing, and phase every gear.
    pub fn new(spec: &TrainSpec) -> Result<Self, TrainError> {
        let (counts, speeds, mesh_feasible) = spec.solve()?;
        let pitch = spec.tooth_pitch;
        let n = spec.number_of_planets;
        if !mesh_feasible {
            tracing::warn!(
                sun = counts.sun,
                ring = counts.ring,
                planets = n,
                "(sun + ring) is not divisible by the number of planets; \
                 planets cannot mesh with sun and ring at even spacing"
            );
        }

        let sun = Gear::inner(pitch, counts.sun, speeds.sun)?;
        let mut ring = Gear::outer(pitch, counts.ring, speeds.ring)?;

        let carrier_position = 0.0;
        let mut planets = Vec::with_capacity(n);
        for index in 0..n {
            let mut planet = Gear::inner(pitch, counts.planet, speeds.planet)?;
            let arm_angle = carrier_angle(carrier_position, index, n);
            planet.set_mesh_phase_correction(planet_phase_correction(
                counts.sun,
                counts.planet,
                arm_angle,
            ));
            planets.push(planet);
        }

        let carrier_pitch = sun.pitch_circle_diameter() / 2.0
            + planets[0].pitch_circle_diameter() / 2.0;

        // Half-tooth offset so an even ring lines up with the planets.
        if counts.ring % 2 == 0 {
            ring.set_mesh_phase_correction(0.5 * ring.tooth_angle());
        }

        tracing::debug!(
            size_mode = spec.size.mode.code(),
            sun = counts.sun,
            planet = counts.planet,
            ring = counts.ring,
            speed_mode = spec.speed.mode.code(),
            sun_speed = speeds.sun,
            carrier_speed = speeds.carrier,
            planet_speed = speeds.planet,
            ring_speed = speeds.ring,
            "planetary gear train created"
        );

        Ok(Self {
            sun,
            ring,
            planets,
            carrier_speed: speeds.carrier,
            carrier_position,
            carrier_pitch,
            counts,
            speeds,
            size_mode: spec.size.mode,
            speed_mode: spec.speed.mode,
            mesh_feasible,
        })
    }

    /// Move every rotating member to its angle at `elapsed_ms` after
    /// animation start. Stationary members keep their position.
    pub fn advance(&mut self, elapsed_ms: f64) {
        let secs = elapsed_ms / 1000.0;
        self.ring.advance_to(secs);
        self.sun.advance_to(secs);
        for planet in &mut self.planets {
            planet.advance_to(secs);
        }
        if self.carrier_speed != 0.0 {
            self.carrier_position = phase_angle(secs, TAU / self.carrier_speed, 0.0);
        }
    }

    pub const fn sun(&self) -> &Gear {
        &self.sun
    }

    pub const fn ring(&self) -> &Gear {
        &self.ring
    }

    pub fn planets(&self) -> &[Gear] {
        &self.planets
    }

    pub fn number_of_planets(&self) -> usize {
        self.planets.len()
    }

    pub const fn carrier_speed(&self) -> f64 {
        self.carrier_speed
    }

    pub const fn carrier_position(&self) -> f64 {
        self.carrier_position
    }

    /// Distance from the train axis to each planet axis.
    pub const fn carrier_pitch(&self) -> f64 {
        self.carrier_pitch
    }

    /// Angle of planet `index`'s carrier arm.
    pub fn planet_carrier_angle(&self, index: usize) -> f64 {
        carrier_angle(self.carrier_position, index, self.planets.len())
    }

    pub const fn tooth_counts(&self) -> ToothCounts {
        self.counts
    }

    pub const fn speeds(&self) -> KinematicSolution {
        self.speeds
    }

    pub const fn size_mode(&self) -> SizeInputMode {
        self.size_mode
    }

    pub const fn speed_mode(&self) -> SpeedInputMode {
        self.speed_mode
    }

    /// `false` when `(sun + ring)` is not divisible by the planet count.
    pub const fn mesh_feasible(&self) -> bool {
        self.mesh_feasible
    }

    /// Serializable read-only view for renderers and recorders.
    pub fn snapshot(&self) -> TrainSnapshot {
        TrainSnapshot {
            sun: GearSnapshot::from(&self.sun),
            ring: GearSnapshot::from(&self.ring),
            planets: self.planets.iter().map(GearSnapshot::from).collect(),
            carrier_position: self.carrier_position,
            carrier_pitch: self.carrier_pitch,
            carrier_speed: self.carrier_speed,
            mesh_feasible: self.mesh_feasible,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn carrier_angle(carrier_position: f64, index: usize, planets: usize) -> f64 {
    carrier_position + index as f64 * TAU / planets as f64
}

/// Phase that puts a tooth gap of the planet on the sun's tooth at this
/// carrier angle.
fn planet_phase_correction(sun_teeth: u32, planet_teeth: u32, carrier_angle: f64) -> f64 {
    let sun_teeth_swept = f64::from(sun_teeth) / TAU * carrier_angle;
    let partial_tooth = sun_teeth_swept - sun_teeth_swept.floor();
    PI + carrier_angle + (0.5 + partial_tooth) * (TAU / f64::from(planet_teeth))
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Read-only state of one gear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearSnapshot {
    pub tooth_count: u32,
    pub pitch_circle_diameter: f64,
    pub position: f64,
    pub angular_speed: f64,
    #[serde(flatten)]
    pub kind: GearKind,
}

impl From<&Gear> for GearSnapshot {
    fn from(gear: &Gear) -> Self {
        Self {
            tooth_count: gear.tooth_count(),
            pitch_circle_diameter: gear.pitch_circle_diameter(),
            position: gear.position(),
            angular_speed: gear.angular_speed(),
            kind: gear.kind(),
        }
    }
}

/// Read-only state of a whole train at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSnapshot {
    pub sun: GearSnapshot,
    pub ring: GearSnapshot,
    pub planets: Vec<GearSnapshot>,
    pub carrier_position: f64,
    pub carrier_pitch: f64,
    pub carrier_speed: f64,
    pub mesh_feasible: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
