//! Input selectors: which two tooth counts and which two speeds are given.
//!
//! The numeric codes (1, 2, 3) are the ones used by callers that pass raw
//! modes, e.g. [`create_planetary_gear_train`](crate::train::create_planetary_gear_train).

use serde::{Deserialize, Serialize};

use crate::error::{ModeKind, TrainError};

// ---------------------------------------------------------------------------
// SizeInputMode
// ---------------------------------------------------------------------------

/// Which two of {sun, planet, ring} tooth counts are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeInputMode {
    /// 1: sun and planet given, ring derived.
    SunPlanet,
    /// 2: sun and ring given, planet derived.
    SunRing,
    /// 3: planet and ring given, sun derived.
    PlanetRing,
}

impl SizeInputMode {
    pub const ALL: [Self; 3] = [Self::SunPlanet, Self::SunRing, Self::PlanetRing];

    pub const fn code(self) -> u8 {
        match self {
            Self::SunPlanet => 1,
            Self::SunRing => 2,
            Self::PlanetRing => 3,
        }
    }
}

impl TryFrom<u8> for SizeInputMode {
    type Error = TrainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::SunPlanet),
            2 => Ok(Self::SunRing),
            3 => Ok(Self::PlanetRing),
            _ => Err(TrainError::InvalidInputMode {
                kind: ModeKind::Size,
                value,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// SpeedInputMode
// ---------------------------------------------------------------------------

/// Which two of {sun, carrier, ring} angular speeds are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedInputMode {
    /// 1: sun and carrier given.
    SunCarrier,
    /// 2: sun and ring given.
    SunRing,
    /// 3: carrier and ring given.
    CarrierRing,
}

impl SpeedInputMode {
    pub const ALL: [Self; 3] = [Self::SunCarrier, Self::SunRing, Self::CarrierRing];

    pub const fn code(self) -> u8 {
        match self {
            Self::SunCarrier => 1,
            Self::SunRing => 2,
            Self::CarrierRing => 3,
        }
    }
}

impl TryFrom<u8> for SpeedInputMode {
    type Error = TrainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::SunCarrier),
            2 => Ok(Self::SunRing),
            3 => Ok(Self::CarrierRing),
            _ => Err(TrainError::InvalidInputMode {
                kind: ModeKind::Speed,
                value,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// SizeInput / SpeedInput
// ---------------------------------------------------------------------------

/// A size mode together with its two given tooth counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeInput {
    pub mode: SizeInputMode,
    pub a: u32,
    pub b: u32,
}

impl SizeInput {
    pub const fn new(mode: SizeInputMode, a: u32, b: u32) -> Self {
        Self { mode, a, b }
    }

    pub const fn sun_planet(sun: u32, planet: u32) -> Self {
        Self::new(SizeInputMode::SunPlanet, sun, planet)
    }

    pub const fn sun_ring(sun: u32, ring: u32) -> Self {
        Self::new(SizeInputMode::SunRing, sun, ring)
    }

    pub const fn planet_ring(planet: u32, ring: u32) -> Self {
        Self::new(SizeInputMode::PlanetRing, planet, ring)
    }
}

/// A speed mode together with its two given speeds (rad/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedInput {
    pub mode: SpeedInputMode,
    pub a: f64,
    pub b: f64,
}

impl SpeedInput {
    pub const fn new(mode: SpeedInputMode, a: f64, b: f64) -> Self {
        Self { mode, a, b }
    }

    pub const fn sun_carrier(sun: f64, carrier: f64) -> Self {
        Self::new(SpeedInputMode::SunCarrier, sun, carrier)
    }

    pub const fn sun_ring(sun: f64, ring: f64) -> Self {
        Self::new(SpeedInputMode::SunRing, sun, ring)
    }

    pub const fn carrier_ring(carrier: f64, ring: f64) -> Self {
        Self::new(SpeedInputMode::CarrierRing, carrier, ring)
    }
}
