//! Sampling bounds for random scenarios.
//!
//! A [`ScenarioBounds`] describes the ranges the generator draws gear sizes,
//! planet counts and speeds from. Build one with the `with_*` methods and
//! call [`validate`](ScenarioBounds::validate) before sampling.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from invalid sampling bounds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    #[error("invalid {what} bounds: min ({min}) > max ({max})")]
    InvertedRange {
        what: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{what} minimum must be at least 1")]
    ZeroMinimum { what: &'static str },

    #[error("invalid speed bound: {0} (must be > 0 and finite)")]
    SpeedBound(f64),

    #[error("invalid probability: {0} (must be in [0, 1])")]
    Probability(f64),

    #[error("invalid tooth pitch: {0} (must be > 0 and finite)")]
    ToothPitch(f64),

    #[error("max_attempts must be at least 1")]
    NoAttempts,
}

// ---------------------------------------------------------------------------
// ScenarioBounds
// ---------------------------------------------------------------------------

/// Ranges random scenarios are drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioBounds {
    /// Inclusive `[min, max]` tooth count for sun and planet.
    pub gear_size: (u32, u32),
    /// Inclusive `[min, max]` planet count.
    pub planets: (u32, u32),
    /// Input speeds are drawn from `[-speed_bound, speed_bound)`, and a
    /// derived speed beyond it rejects the scenario.
    pub speed_bound: f64,
    /// Chance of pinning one input member at zero speed.
    pub fixed_member_probability: f64,
    pub tooth_pitch: f64,
    /// Sampling attempts before giving up.
    pub max_attempts: u32,
}

impl Default for ScenarioBounds {
    fn default() -> Self {
        Self {
            gear_size: (15, 30),
            planets: (1, 8),
            speed_bound: 1.7,
            fixed_member_probability: 0.5,
            tooth_pitch: epicycle_core::train::DEFAULT_TOOTH_PITCH,
            max_attempts: 10_000,
        }
    }
}

impl ScenarioBounds {
    #[must_use]
    pub const fn with_gear_size(mut self, min: u32, max: u32) -> Self {
        self.gear_size = (min, max);
        self
    }

    #[must_use]
    pub const fn with_planets(mut self, min: u32, max: u32) -> Self {
        self.planets = (min, max);
        self
    }

    #[must_use]
    pub const fn with_speed_bound(mut self, bound: f64) -> Self {
        self.speed_bound = bound;
        self
    }

    #[must_use]
    pub const fn with_fixed_member_probability(mut self, p: f64) -> Self {
        self.fixed_member_probability = p;
        self
    }

    #[must_use]
    pub const fn with_tooth_pitch(mut self, pitch: f64) -> Self {
        self.tooth_pitch = pitch;
        self
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Validate bounds. Returns Err on values the generator cannot sample.
    pub fn validate(&self) -> Result<(), BoundsError> {
        check_range("gear size", self.gear_size)?;
        check_range("planet count", self.planets)?;
        // The sampled range is 2·bound wide and must stay finite.
        if !(2.0 * self.speed_bound).is_finite() || self.speed_bound <= 0.0 {
            return Err(BoundsError::SpeedBound(self.speed_bound));
        }
        if !(0.0..=1.0).contains(&self.fixed_member_probability) {
            return Err(BoundsError::Probability(self.fixed_member_probability));
        }
        if !self.tooth_pitch.is_finite() || self.tooth_pitch <= 0.0 {
            return Err(BoundsError::ToothPitch(self.tooth_pitch));
        }
        if self.max_attempts == 0 {
            return Err(BoundsError::NoAttempts);
        }
        Ok(())
    }
}

const fn check_range(what: &'static str, (min, max): (u32, u32)) -> Result<(), BoundsError> {
    if min == 0 {
        return Err(BoundsError::ZeroMinimum { what });
    }
    if min > max {
        return Err(BoundsError::InvertedRange { what, min, max });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
