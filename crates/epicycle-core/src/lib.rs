//! Kinematics of an epicyclic (planetary) gear train.
//!
//! Pure Rust library with no rendering dependencies. Given two of the sun,
//! planet and ring tooth counts and two of the sun, carrier and ring speeds,
//! it solves the rest, phases every gear so the teeth interlock, and
//! advances all angles as a function of elapsed time.
//!
//! # Pipeline
//!
//! ```text
//! SizeInput  → ToothCounts ─┐
//! SpeedInput → KinematicSolution → PlanetaryGearTrain → advance(t) → layout
//!                                   (mesh check, phasing)             (renderer)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use epicycle_core::prelude::*;
//!
//! let mut train = create_planetary_gear_train(1, 28, 17, 1, -0.4, 0.4, 0.032, 5).unwrap();
//! assert_eq!(train.ring().tooth_count(), 62);
//!
//! train.advance(1000.0);
//! let centers = layout::planet_centers(&train);
//! assert_eq!(centers.len(), 5);
//! ```

pub mod config;
pub mod error;
pub mod gear;
pub mod kinematics;
pub mod layout;
pub mod mode;
pub mod presets;
pub mod train;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::TrainConfig;
    pub use crate::error::{ConfigError, GeometryError, ModeKind, TrainError};
    pub use crate::gear::{Gear, GearKind};
    pub use crate::kinematics::{KinematicSolution, ToothCounts};
    pub use crate::layout;
    pub use crate::mode::{SizeInput, SizeInputMode, SpeedInput, SpeedInputMode};
    pub use crate::presets;
    pub use crate::train::{
        GearSnapshot, PlanetaryGearTrain, TrainSnapshot, TrainSpec, create_planetary_gear_train,
    };
}
