use thiserror::Error;

/// Top-level error type for building a planetary gear train.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainError {
    #[error("Invalid {kind} input mode: {value} (expected 1, 2 or 3)")]
    InvalidInputMode { kind: ModeKind, value: u8 },

    #[error(
        "Mesh infeasible: (sun {sun} + ring {ring}) is not divisible by {planets} planets"
    )]
    MeshInfeasible { sun: u32, ring: u32, planets: usize },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(#[from] GeometryError),

    #[error("Invalid {name} speed: {value} (must be finite)")]
    InvalidSpeed { name: &'static str, value: f64 },
}

/// Which of the two input selectors was out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Size,
    Speed,
}

impl std::fmt::Display for ModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Size => f.write_str("size"),
            Self::Speed => f.write_str("speed"),
        }
    }
}

/// Geometry that cannot produce a physical gear set.
///
/// Copy + static messages so it can be embedded in [`TrainError`] freely.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("tooth pitch {0} must be positive and finite")]
    ToothPitch(f64),

    #[error("{member} tooth count resolved to {count} (must be > 0)")]
    ToothCount { member: &'static str, count: i64 },

    #[error("ring ({ring}) - sun ({sun}) is odd, planet tooth count would not be integral")]
    NonIntegralPlanet { sun: u32, ring: u32 },

    #[error("number of planets must be at least 1")]
    NoPlanets,
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid train configuration: {0}")]
    Train(#[from] TrainError),
}
