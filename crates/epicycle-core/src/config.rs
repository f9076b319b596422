use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TrainError};
use crate::mode::{SizeInput, SizeInputMode, SpeedInput, SpeedInputMode};
use crate::train::{DEFAULT_PLANETS, DEFAULT_TOOTH_PITCH, PlanetaryGearTrain, TrainSpec};

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_tooth_pitch() -> f64 {
    DEFAULT_TOOTH_PITCH
}
const fn default_planets() -> usize {
    DEFAULT_PLANETS
}

// ---------------------------------------------------------------------------
// TrainConfig
// ---------------------------------------------------------------------------

/// File-level description of one gear train scenario.
///
/// ```toml
/// size_mode = 1
/// size_a = 28
/// size_b = 17
/// speed_mode = 1
/// speed_a = -0.4
/// speed_b = 0.4
/// number_of_planets = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// 1 = sun & planet, 2 = sun & ring, 3 = planet & ring.
    pub size_mode: u8,
    pub size_a: u32,
    pub size_b: u32,

    /// 1 = sun & carrier, 2 = sun & ring, 3 = carrier & ring.
    pub speed_mode: u8,
    pub speed_a: f64,
    pub speed_b: f64,

    /// Tooth pitch shared by every gear (default: 0.032).
    #[serde(default = "default_tooth_pitch")]
    pub tooth_pitch: f64,

    /// Number of planets (default: 5).
    #[serde(default = "default_planets")]
    pub number_of_planets: usize,

    /// Fail instead of warning when planets cannot mesh at even spacing.
    #[serde(default)]
    pub strict_mesh: bool,
}

impl TrainConfig {
    /// Convert to a typed [`TrainSpec`], rejecting unknown modes.
    pub fn to_spec(&self) -> Result<TrainSpec, TrainError> {
        let size_mode = SizeInputMode::try_from(self.size_mode)?;
        let speed_mode = SpeedInputMode::try_from(self.speed_mode)?;
        Ok(TrainSpec::new(
            SizeInput::new(size_mode, self.size_a, self.size_b),
            SpeedInput::new(speed_mode, self.speed_a, self.speed_b),
        )
        .with_tooth_pitch(self.tooth_pitch)
        .with_planets(self.number_of_planets)
        .with_strict_mesh(self.strict_mesh))
    }

    /// Validate modes, sizes, speeds and meshing without building gears.
    /// Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_spec()?.validate()?;
        Ok(())
    }

    pub fn build(&self) -> Result<PlanetaryGearTrain, ConfigError> {
        Ok(self.to_spec()?.build()?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

impl From<&TrainSpec> for TrainConfig {
    fn from(spec: &TrainSpec) -> Self {
        Self {
            size_mode: spec.size.mode.code(),
            size_a: spec.size.a,
            size_b: spec.size.b,
            speed_mode: spec.speed.mode.code(),
            speed_a: spec.speed.a,
            speed_b: spec.speed.b,
            tooth_pitch: spec.tooth_pitch,
            number_of_planets: spec.number_of_planets,
            strict_mesh: spec.strict_mesh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use crate::presets;

    const DEMO: &str = r"
        size_mode = 1
        size_a = 28
        size_b = 17
        speed_mode = 1
        speed_a = -0.4
        speed_b = 0.4
    ";

    #[test]
    fn parses_with_defaults() {
        let config = TrainConfig::from_toml_str(DEMO).unwrap();
        assert!((config.tooth_pitch - 0.032).abs() < f64::EPSILON);
        assert_eq!(config.number_of_planets, 5);
        assert!(!config.strict_mesh);
    }

    #[test]
    fn builds_demo_train() {
        let train = TrainConfig::from_toml_str(DEMO).unwrap().build().unwrap();
        assert_eq!(train.ring().tooth_count(), 62);
    }

    #[test]
    fn strict_mesh_fails_validation() {
        // (28 + 62) is not divisible by 4.
        let content = format!("{DEMO}\nnumber_of_planets = 4\nstrict_mesh = true\n");
        let err = TrainConfig::from_toml_str(&content).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Train(TrainError::MeshInfeasible { .. })
        ));
    }

    #[test]
    fn infeasible_loose_config_validates_and_builds() {
        let content = format!("{DEMO}\nnumber_of_planets = 4\n");
        let config = TrainConfig::from_toml_str(&content).unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.build().unwrap().mesh_feasible());
    }

    #[test]
    fn bad_mode_fails_validation() {
        let content = DEMO.replace("speed_mode = 1", "speed_mode = 9");
        assert!(matches!(
            TrainConfig::from_toml_str(&content),
            Err(ConfigError::Train(TrainError::InvalidInputMode { value: 9, .. }))
        ));
    }

    #[test]
    fn zero_planets_fails_validation() {
        let content = format!("{DEMO}\nnumber_of_planets = 0\n");
        assert!(matches!(
            TrainConfig::from_toml_str(&content),
            Err(ConfigError::Train(TrainError::DegenerateGeometry(
                GeometryError::NoPlanets
            )))
        ));
    }

    #[test]
    fn missing_field_is_toml_error() {
        assert!(matches!(
            TrainConfig::from_toml_str("size_mode = 1"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            TrainConfig::from_file("/nonexistent/train.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = TrainConfig::from(&presets::balanced_six());
        let text = toml::to_string(&config).unwrap();
        let back = TrainConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, back);
    }
}
