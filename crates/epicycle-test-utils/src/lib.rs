//! Shared test utilities for the epicycle workspace.
//!
//! Provides deterministic RNGs and floating-point assertions for angles.

pub mod angles;
pub mod rng;

pub use angles::{angle_diff, assert_angle_close, assert_close};
pub use rng::{seeded_rng, tooth_count_pairs};
