//! Timer configuration, loadable from YAML.
//!
//! ```yaml
//! ticks_per_second: 60
//! time_scale: 1.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Tick rate and time scale for a [`Timer`](crate::Timer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Target simulation rate.
    pub ticks_per_second: f64,
    /// Multiplier on real time. `0.0` pauses.
    pub time_scale: f64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60.0,
            time_scale: 1.0,
        }
    }
}

impl TimerConfig {
    /// Read and validate a YAML config file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TimerError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "loaded timer config");
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, TimerError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TimerError> {
        if !(self.ticks_per_second.is_finite() && self.ticks_per_second > 0.0) {
            return Err(TimerError::InvalidTickRate(self.ticks_per_second));
        }
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return Err(TimerError::InvalidTimeScale(self.time_scale));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_is_valid() {
        let c = TimerConfig::default();
        assert_eq!(c.ticks_per_second, 60.0);
        assert_eq!(c.time_scale, 1.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn parses_full_document() {
        let c = TimerConfig::from_yaml("ticks_per_second: 20\ntime_scale: 0.5\n").unwrap();
        assert_eq!(c.ticks_per_second, 20.0);
        assert_eq!(c.time_scale, 0.5);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let c = TimerConfig::from_yaml("ticks_per_second: 30\n").unwrap();
        assert_eq!(c.ticks_per_second, 30.0);
        assert_eq!(c.time_scale, 1.0);
    }

    #[test]
    fn rejects_zero_rate() {
        let err = TimerConfig::from_yaml("ticks_per_second: 0\n").unwrap_err();
        assert!(matches!(err, TimerError::InvalidTickRate(_)));
    }

    #[test]
    fn rejects_negative_scale() {
        let err = TimerConfig::from_yaml("time_scale: -1\n").unwrap_err();
        assert!(matches!(err, TimerError::InvalidTimeScale(_)));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = TimerConfig::from_yaml("ticks_per_second: [fast]\n").unwrap_err();
        assert!(matches!(err, TimerError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ticks_per_second: 120").unwrap();
        writeln!(file, "time_scale: 2.0").unwrap();
        let c = TimerConfig::load(file.path()).unwrap();
        assert_eq!(c.ticks_per_second, 120.0);
        assert_eq!(c.time_scale, 2.0);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TimerConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, TimerError::Io(_)));
    }
}
