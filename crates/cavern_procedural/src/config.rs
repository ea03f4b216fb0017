//! # Cave Configuration
//!
//! Construction parameters, loaded once from TOML.
//!
//! ```toml
//! width = 68
//! height = 40
//! density_percent = 18
//! topology = "hex"
//! seed = 1200
//! iterations = 4
//! scroll_limit = 1
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::automaton::{validate_density, validate_dimensions, WORD_BYTES};
use crate::error::{CaveError, CaveResult};
use crate::grid::FRAME_THICKNESS;
use crate::topology::Topology;

/// Parameters for building and driving a cave.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaveConfig {
    /// Grid width in cells; `width - 4` must be a positive multiple of 8.
    pub width: usize,
    /// Grid height in cells, at least 5.
    pub height: usize,
    /// Wall density, 0..=100.
    pub density_percent: u8,
    /// Neighborhood topology.
    pub topology: Topology,
    /// Seed-axis index of the first noise row.
    pub seed: u64,
    /// Smoothing passes.
    pub iterations: u32,
    /// Largest seed step a session handles with an incremental scroll.
    pub scroll_limit: usize,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 68,
            height: 40,
            density_percent: 18,
            topology: Topology::Square,
            seed: 0,
            iterations: 4,
            scroll_limit: 1,
        }
    }
}

impl CaveConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`CaveError::InvalidConfig`] on malformed TOML, otherwise any
    /// [`validate`](Self::validate) failure.
    pub fn from_toml_str(text: &str) -> CaveResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| CaveError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`CaveError::ConfigIo`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> CaveResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| CaveError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!("loaded cave config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// [`CaveError::InvalidConfig`] if a value has no TOML representation
    /// (seeds above `i64::MAX`).
    pub fn to_toml_string(&self) -> CaveResult<String> {
        toml::to_string(self).map_err(|e| CaveError::InvalidConfig(e.to_string()))
    }

    /// Checks the same preconditions as cave construction.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition.
    pub fn validate(&self) -> CaveResult<()> {
        validate_dimensions(self.width, self.height)?;
        validate_density(self.density_percent)?;
        if self.scroll_limit == 0 {
            return Err(CaveError::InvalidConfig(
                "scroll_limit must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Rounds an arbitrary width down to the nearest valid grid width.
    ///
    /// Valid widths are `8k + 4`; the result is never below 12.
    #[must_use]
    pub const fn snap_width(raw: usize) -> usize {
        let frame = 2 * FRAME_THICKNESS;
        let interior = raw.saturating_sub(frame);
        let interior = interior - interior % WORD_BYTES;
        if interior == 0 {
            WORD_BYTES + frame
        } else {
            interior + frame
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CaveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.density_percent, 18);
        assert_eq!(config.iterations, 4);
    }

    #[test]
    fn test_partial_document() {
        let config = CaveConfig::from_toml_str("topology = \"hex\"\nseed = 99\n").unwrap();
        assert_eq!(config.topology, Topology::Hex);
        assert_eq!(config.seed, 99);
        assert_eq!(config.width, 68);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = CaveConfig::from_toml_str("colour = \"green\"").unwrap_err();
        assert!(matches!(err, CaveError::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert_eq!(
            CaveConfig::from_toml_str("width = 64"),
            Err(CaveError::InvalidWidth { width: 64 })
        );
        assert_eq!(
            CaveConfig::from_toml_str("density_percent = 101"),
            Err(CaveError::InvalidDensity(101))
        );
        assert!(CaveConfig::from_toml_str("scroll_limit = 0").is_err());
        assert!(CaveConfig::from_toml_str("iterations = -1").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CaveConfig {
            topology: Topology::Hex,
            seed: 31_337,
            ..CaveConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(CaveConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_seed_beyond_toml_integer_range() {
        let config = CaveConfig {
            seed: u64::MAX,
            ..CaveConfig::default()
        };
        assert!(matches!(
            config.to_toml_string(),
            Err(CaveError::InvalidConfig(_))
        ));

        let largest = CaveConfig {
            seed: u64::MAX >> 1,
            ..CaveConfig::default()
        };
        assert!(largest.to_toml_string().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = CaveConfig::load("/nonexistent/cave.toml").unwrap_err();
        assert!(matches!(err, CaveError::ConfigIo { .. }));
    }

    #[test]
    fn test_snap_width() {
        assert_eq!(CaveConfig::snap_width(0), 12);
        assert_eq!(CaveConfig::snap_width(12), 12);
        assert_eq!(CaveConfig::snap_width(19), 12);
        assert_eq!(CaveConfig::snap_width(20), 20);
        assert_eq!(CaveConfig::snap_width(64), 60);
        assert_eq!(CaveConfig::snap_width(75), 68);
        for raw in 0..200 {
            let width = CaveConfig::snap_width(raw);
            assert!(validate_dimensions(width, 5).is_ok(), "{raw} -> {width}");
        }
    }
}
