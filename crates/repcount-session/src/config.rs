//! Session configuration.

use repcount_classifier::DETECTION_LANDMARKS;
use repcount_core::{BodyLandmark, Error, Result};
use repcount_exercise::PolicyThresholds;
use serde::{Deserialize, Serialize};

/// Everything a session needs that is not per-frame input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Frames per classification window
    pub window_size: usize,

    /// Landmarks whose (x, y) pairs form the classifier features, in model order
    pub feature_landmarks: Vec<BodyLandmark>,

    /// Per-exercise phase thresholds
    pub thresholds: PolicyThresholds,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_size: 10,
            feature_landmarks: DETECTION_LANDMARKS.to_vec(),
            thresholds: PolicyThresholds::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from file, with `REPCOUNT__*` environment overrides
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("REPCOUNT").separator("__"))
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("REPCOUNT").separator("__"))
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::Config("window_size must be at least 1".to_string()));
        }
        if self.feature_landmarks.is_empty() {
            return Err(Error::Config(
                "feature_landmarks must name at least one landmark".to_string(),
            ));
        }
        Ok(())
    }
}
