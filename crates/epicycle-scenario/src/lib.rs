//! Random planetary gear train scenarios.
//!
//! Draws sun and planet sizes, planet counts and input speeds from
//! [`ScenarioBounds`](bounds::ScenarioBounds), throws away candidates whose
//! planets cannot mesh or would overlap, and caps the number of attempts so
//! an impossible bound set fails instead of spinning.
//!
//! # Example
//!
//! ```
//! use epicycle_scenario::prelude::*;
//!
//! let generator = ScenarioGenerator::default();
//! let scenario = generator.generate_seeded(7).unwrap();
//! assert!(scenario.train.mesh_feasible());
//! ```

pub mod bounds;
pub mod generator;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::bounds::{BoundsError, ScenarioBounds};
    pub use crate::generator::{Rejection, Scenario, ScenarioError, ScenarioGenerator, max_planets};
}
