//! Rejection sampler for mechanically valid, visually tame gear trains.

use std::f64::consts::PI;

use epicycle_core::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::bounds::{BoundsError, ScenarioBounds};

/// Clearance, in teeth, kept between neighbouring planets.
const PLANET_CLEARANCE_TEETH: f64 = 3.0;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid bounds: {0}")]
    InvalidBounds(#[from] BoundsError),

    #[error("no valid scenario found after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

/// Why a single sampled candidate was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `(sun + ring)` not divisible by the planet count.
    MeshInfeasible,
    /// Neighbouring planets would overlap.
    Overcrowded,
    /// The derived sun, carrier or ring speed exceeds the bound.
    SpeedOutOfBounds,
    /// The solver refused the candidate.
    Degenerate,
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// An accepted scenario: the inputs it was built from and the solved train.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub spec: TrainSpec,
    pub train: PlanetaryGearTrain,
    /// Candidates sampled, including the accepted one.
    pub attempts: u32,
}

// ---------------------------------------------------------------------------
// ScenarioGenerator
// ---------------------------------------------------------------------------

/// Draws random planetary gear scenarios within [`ScenarioBounds`].
///
/// Sizes are given in size mode 1 (sun and planet), so the ring is always
/// `sun + 2·planet`. One of the three speed modes is picked uniformly.
#[derive(Debug, Clone, Default)]
pub struct ScenarioGenerator {
    bounds: ScenarioBounds,
}

impl ScenarioGenerator {
    pub fn new(bounds: ScenarioBounds) -> Result<Self, ScenarioError> {
        bounds.validate()?;
        Ok(Self { bounds })
    }

    pub const fn bounds(&self) -> &ScenarioBounds {
        &self.bounds
    }

    /// Sample until a candidate passes every filter, at most
    /// `max_attempts` times.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Scenario, ScenarioError> {
        for attempt in 1..=self.bounds.max_attempts {
            let spec = self.sample_spec(rng);
            match self.accept(&spec) {
                Ok(train) => {
                    tracing::debug!(attempts = attempt, "random scenario accepted");
                    return Ok(Scenario {
                        spec,
                        train,
                        attempts: attempt,
                    });
                }
                Err(reason) => {
                    tracing::trace!(attempt, ?reason, "random scenario rejected");
                }
            }
        }
        Err(ScenarioError::RetriesExhausted {
            attempts: self.bounds.max_attempts,
        })
    }

    /// [`generate`](Self::generate) with a `ChaCha8Rng` seeded from `seed`.
    pub fn generate_seeded(&self, seed: u64) -> Result<Scenario, ScenarioError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(&mut rng)
    }

    /// Draw one unfiltered candidate.
    pub fn sample_spec<R: Rng + ?Sized>(&self, rng: &mut R) -> TrainSpec {
        let b = &self.bounds;
        let (size_min, size_max) = b.gear_size;
        let sun = rng.gen_range(size_min..=size_max);
        let planet = rng.gen_range(size_min..=size_max);
        let (planets_min, planets_max) = b.planets;
        let planets = rng.gen_range(planets_min..=planets_max) as usize;

        let mut speed_a = rng.gen_range(-b.speed_bound..b.speed_bound);
        let mut speed_b = rng.gen_range(-b.speed_bound..b.speed_bound);
        if rng.gen_bool(b.fixed_member_probability) {
            if rng.gen_bool(0.5) {
                speed_a = 0.0;
            } else {
                speed_b = 0.0;
            }
        }
        let mode = SpeedInputMode::ALL[rng.gen_range(0..SpeedInputMode::ALL.len())];

        TrainSpec::new(
            SizeInput::sun_planet(sun, planet),
            SpeedInput::new(mode, speed_a, speed_b),
        )
        .with_tooth_pitch(b.tooth_pitch)
        .with_planets(planets)
        .with_strict_mesh(true)
    }

    /// Run a candidate through the filters, returning the solved train.
    pub fn accept(&self, spec: &TrainSpec) -> Result<PlanetaryGearTrain, Rejection> {
        let counts = ToothCounts::resolve(spec.size).map_err(|_| Rejection::Degenerate)?;
        if !counts.mesh_feasible(spec.number_of_planets) {
            return Err(Rejection::MeshInfeasible);
        }
        if !planets_fit(counts, spec.number_of_planets) {
            return Err(Rejection::Overcrowded);
        }
        let train = spec.build().map_err(|_| Rejection::Degenerate)?;
        let derived = train.speeds().derived_member(spec.speed.mode);
        if derived.abs() > self.bounds.speed_bound {
            return Err(Rejection::SpeedOutOfBounds);
        }
        Ok(train)
    }
}

/// Largest planet count that fits around the sun without neighbours
/// touching: `π / asin((Np + 3) / (Ns + Np))`.
pub fn max_planets(counts: ToothCounts) -> f64 {
    let ratio = (f64::from(counts.planet) + PLANET_CLEARANCE_TEETH)
        / (f64::from(counts.sun) + f64::from(counts.planet));
    if ratio >= 1.0 {
        return 0.0;
    }
    PI / ratio.asin()
}

#[allow(clippy::cast_precision_loss)]
fn planets_fit(counts: ToothCounts, planets: usize) -> bool {
    max_planets(counts) > planets as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
